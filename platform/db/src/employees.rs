//! Employee record store. Every operation is one statement against the
//! `employees` table, so each is atomic on its own.

use entity::employees::{self, ActiveModel, Column, Entity};
use products_hr::EmployeeDraft;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DbErr, EntityTrait, PaginatorTrait, QueryOrder, Set,
};
use tracing::{debug, instrument};

use crate::{DbError, DbPool, DbResult};

pub type Employee = employees::Model;

fn active_model(id: Option<i32>, draft: &EmployeeDraft) -> ActiveModel {
    ActiveModel {
        id: id.map(Set).unwrap_or(NotSet),
        first_name: Set(draft.first_name.clone()),
        second_name: Set(draft.second_name.clone()),
        hiring_date: Set(draft.hiring_date),
        specialization: Set(draft.specialization.clone()),
    }
}

/// Insert a new record and return the id the database assigned.
#[instrument(skip(pool, draft))]
pub async fn create(pool: &DbPool, draft: &EmployeeDraft) -> DbResult<i32> {
    let result = Entity::insert(active_model(None, draft)).exec(pool).await?;
    debug!(id = result.last_insert_id, "employee created");
    Ok(result.last_insert_id)
}

#[instrument(skip(pool))]
pub async fn get(pool: &DbPool, id: i32) -> DbResult<Employee> {
    Entity::find_by_id(id)
        .one(pool)
        .await?
        .ok_or(DbError::NotFound { id })
}

/// All records in insertion order.
#[instrument(skip(pool))]
pub async fn list_all(pool: &DbPool) -> DbResult<Vec<Employee>> {
    Ok(Entity::find().order_by_asc(Column::Id).all(pool).await?)
}

/// Replace every business field of record `id`. The id is kept.
#[instrument(skip(pool, draft))]
pub async fn update(pool: &DbPool, id: i32, draft: &EmployeeDraft) -> DbResult<Employee> {
    match active_model(Some(id), draft).update(pool).await {
        Ok(model) => Ok(model),
        // Backends with RETURNING report RecordNotFound, the others
        // RecordNotUpdated, when the WHERE clause matched nothing.
        Err(DbErr::RecordNotUpdated) | Err(DbErr::RecordNotFound(_)) => {
            Err(DbError::NotFound { id })
        }
        Err(err) => Err(err.into()),
    }
}

#[instrument(skip(pool))]
pub async fn delete(pool: &DbPool, id: i32) -> DbResult<()> {
    let result = Entity::delete_by_id(id).exec(pool).await?;
    if result.rows_affected == 0 {
        return Err(DbError::NotFound { id });
    }
    debug!(id, "employee deleted");
    Ok(())
}

pub async fn count(pool: &DbPool) -> DbResult<u64> {
    Ok(Entity::find().count(pool).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    async fn store() -> DbPool {
        let pool = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&pool, None).await.unwrap();
        pool
    }

    fn draft(first: &str, second: &str, ymd: (i32, u32, u32), spec: &str) -> EmployeeDraft {
        let (y, m, d) = ymd;
        EmployeeDraft::new(first, second, NaiveDate::from_ymd_opt(y, m, d).unwrap(), spec)
    }

    fn fields(model: &Employee) -> EmployeeDraft {
        EmployeeDraft::new(
            model.first_name.clone(),
            model.second_name.clone(),
            model.hiring_date,
            model.specialization.clone(),
        )
    }

    #[tokio::test]
    async fn create_then_get_returns_payload() {
        let pool = store().await;
        let payload = draft("John", "Doe", (2023, 1, 1), "Engineering");
        let id = create(&pool, &payload).await.unwrap();

        let found = get(&pool, id).await.unwrap();
        assert_eq!(found.id, id);
        assert_eq!(fields(&found), payload);
    }

    #[tokio::test]
    async fn list_all_is_in_insertion_order() {
        let pool = store().await;
        let tom = create(&pool, &draft("Tom", "Hanks", (2020, 1, 1), "Acting"))
            .await
            .unwrap();
        let emma = create(&pool, &draft("Emma", "Stone", (2019, 2, 2), "Acting"))
            .await
            .unwrap();

        let all = list_all(&pool).await.unwrap();
        let ids: Vec<i32> = all.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![tom, emma]);
        assert_eq!(all[0].first_name, "Tom");
        assert_eq!(all[1].first_name, "Emma");
        assert_eq!(count(&pool).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn update_replaces_fields_and_keeps_id() {
        let pool = store().await;
        let id = create(&pool, &draft("Alice", "Smith", (2022, 5, 1), "Marketing"))
            .await
            .unwrap();
        let changed = draft("Alice", "Johnson", (2022, 6, 1), "Sales");

        let updated = update(&pool, id, &changed).await.unwrap();
        assert_eq!(updated.id, id);

        let found = get(&pool, id).await.unwrap();
        assert_eq!(found.id, id);
        assert_eq!(fields(&found), changed);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found_everywhere() {
        let pool = store().await;
        let payload = draft("Ghost", "User", (2022, 1, 1), "None");

        assert!(matches!(get(&pool, 9999).await, Err(DbError::NotFound { id: 9999 })));
        assert!(update(&pool, 9999, &payload).await.unwrap_err().is_not_found());
        assert!(delete(&pool, 9999).await.unwrap_err().is_not_found());
        assert!(list_all(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleted_records_stay_gone() {
        let pool = store().await;
        let id = create(&pool, &draft("Bob", "Brown", (2021, 7, 1), "Finance"))
            .await
            .unwrap();

        delete(&pool, id).await.unwrap();
        assert!(get(&pool, id).await.unwrap_err().is_not_found());
        assert!(list_all(&pool).await.unwrap().iter().all(|e| e.id != id));
        assert!(delete(&pool, id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let pool = store().await;
        let first = create(&pool, &draft("Bob", "Brown", (2021, 7, 1), "Finance"))
            .await
            .unwrap();
        delete(&pool, first).await.unwrap();

        let second = create(&pool, &draft("Carol", "White", (2021, 8, 1), "Legal"))
            .await
            .unwrap();
        assert!(second > first);
    }
}
