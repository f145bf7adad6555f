//! Employee handlers: list, create, edit, delete, plus read-only JSON views.
//!
//! Mutations validate first, write once, leave a flash message and redirect
//! to the list so a reload never repeats them.

use axum::{
    Form, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::PrivateCookieJar;
use platform_api::{ApiError, ApiResult, JsonError};
use platform_db::employees::{self, Employee};
use products_hr::{RawForm, validate_employee_form};
use tracing::{info, instrument, warn};

use crate::{
    flash,
    http::AppState,
    views::{self, FormMode, FormView, IndexView},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/home", get(index))
        .route("/add", get(add_form).post(add))
        .route("/edit/{id}", get(edit_form).post(edit))
        .route("/delete/{id}", post(delete))
        .route("/api/employees", get(api_list))
        .route("/api/employees/{id}", get(api_get))
}

/// Path ids that are not integers cannot name a record.
fn record_id(raw: &str) -> ApiResult<i32> {
    raw.parse::<i32>().map_err(|_| ApiError::NotFound)
}

fn notify_and_redirect(state: &AppState, jar: PrivateCookieJar, message: &str) -> Response {
    let jar = flash::set(jar, message, state.config.cookie_secure);
    (jar, Redirect::to("/")).into_response()
}

fn reject_form(view: FormView) -> Response {
    (StatusCode::BAD_REQUEST, Html(views::employee_form(&view))).into_response()
}

#[instrument(name = "employees.index", skip_all)]
async fn index(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
) -> ApiResult<(PrivateCookieJar, Html<String>)> {
    let employees = employees::list_all(&state.pool).await?;
    let (jar, notice) = flash::take(jar);
    let html = views::index(&IndexView {
        notice,
        employees: &employees,
    });
    Ok((jar, Html(html)))
}

#[instrument(name = "employees.add_form", skip_all)]
async fn add_form() -> Html<String> {
    Html(views::employee_form(&FormView::blank()))
}

#[instrument(name = "employees.add", skip_all)]
async fn add(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Form(form): Form<RawForm>,
) -> ApiResult<Response> {
    let draft = match validate_employee_form(&form) {
        Ok(draft) => draft,
        Err(err) => {
            warn!(error = %err, "rejected new employee");
            return Ok(reject_form(FormView::rejected(FormMode::Create, &form, &err)));
        }
    };
    let id = employees::create(&state.pool, &draft).await?;
    info!(id, "employee added");
    Ok(notify_and_redirect(&state, jar, flash::EMPLOYEE_ADDED))
}

#[instrument(name = "employees.edit_form", skip(state))]
async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Html<String>> {
    let employee = employees::get(&state.pool, record_id(&id)?).await?;
    Ok(Html(views::employee_form(&FormView::for_employee(&employee))))
}

#[instrument(name = "employees.edit", skip(state, jar, form))]
async fn edit(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Path(id): Path<String>,
    Form(form): Form<RawForm>,
) -> ApiResult<Response> {
    let id = record_id(&id)?;
    // Unknown ids are reported as such even when the submission is invalid.
    employees::get(&state.pool, id).await?;
    let draft = match validate_employee_form(&form) {
        Ok(draft) => draft,
        Err(err) => {
            warn!(id, error = %err, "rejected employee update");
            return Ok(reject_form(FormView::rejected(FormMode::Edit(id), &form, &err)));
        }
    };
    employees::update(&state.pool, id, &draft).await?;
    info!(id, "employee updated");
    Ok(notify_and_redirect(&state, jar, flash::EMPLOYEE_UPDATED))
}

#[instrument(name = "employees.delete", skip(state, jar))]
async fn delete(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let id = record_id(&id)?;
    employees::delete(&state.pool, id).await?;
    info!(id, "employee deleted");
    Ok(notify_and_redirect(&state, jar, flash::EMPLOYEE_DELETED))
}

#[instrument(name = "employees.api_list", skip_all)]
async fn api_list(State(state): State<AppState>) -> Result<Json<Vec<Employee>>, JsonError> {
    Ok(Json(employees::list_all(&state.pool).await?))
}

#[instrument(name = "employees.api_get", skip(state))]
async fn api_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Employee>, JsonError> {
    let id = record_id(&id)?;
    Ok(Json(employees::get(&state.pool, id).await?))
}
