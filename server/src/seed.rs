use anyhow::Result;
use platform_db::{DbPool, employees};
use products_hr::{DateError, EmployeeDraft, parse_date};
use tracing::info;

fn demo_roster() -> Result<Vec<EmployeeDraft>, DateError> {
    Ok(vec![
        EmployeeDraft::new("Tom", "Hanks", parse_date("2020-01-01")?, "Acting"),
        EmployeeDraft::new("Emma", "Stone", parse_date("2019-02-02")?, "Acting"),
        EmployeeDraft::new("Alice", "Smith", parse_date("2022-05-01")?, "Marketing"),
        EmployeeDraft::hired_today("Bob", "Brown", "Finance"),
    ])
}

/// Insert demo employees into an empty table. Returns how many were added.
pub async fn seed_demo(pool: &DbPool) -> Result<usize> {
    if employees::count(pool).await? > 0 {
        info!("employees table not empty; skipping seed");
        return Ok(0);
    }
    let roster = demo_roster()?;
    for draft in &roster {
        employees::create(pool, draft).await?;
    }
    info!(count = roster.len(), "seeded demo employees");
    Ok(roster.len())
}
