//! HTTP surface of the employee backend.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use server_api::{
    create_employee, delete_employee, employees_route, list_employees, search_employee,
    update_employee,
};
use shared::{
    domain::{EmployeeRecord, RecordId},
    error::{ApiError, ErrorCode},
    protocol::{EmployeeUpdate, NewEmployee},
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::app_state::AppState;

const MAX_BODY_BYTES: usize = 64 * 1024;

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

pub(crate) fn build_router(state: Arc<AppState>) -> Router {
    let base = employees_route();
    Router::new()
        .route("/healthz", get(healthz))
        .route(base, get(http_list_employees).post(http_create_employee))
        .route(
            &format!("{base}/search/:employee_id"),
            get(http_search_employee),
        )
        .route(
            &format!("{base}/:id"),
            axum::routing::put(http_update_employee).delete(http_delete_employee),
        )
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz(State(state): State<Arc<AppState>>) -> ApiResult<&'static str> {
    state
        .api
        .storage
        .health_check()
        .await
        .map_err(|e| failure(ApiError::internal(e.to_string())))?;
    Ok("ok")
}

async fn http_list_employees(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<EmployeeRecord>>> {
    list_employees(&state.api).await.map(Json).map_err(failure)
}

async fn http_search_employee(
    State(state): State<Arc<AppState>>,
    Path(employee_id): Path<String>,
) -> ApiResult<Json<EmployeeRecord>> {
    search_employee(&state.api, &employee_id)
        .await
        .map(Json)
        .map_err(failure)
}

async fn http_create_employee(
    State(state): State<Arc<AppState>>,
    Json(employee): Json<NewEmployee>,
) -> ApiResult<Json<EmployeeRecord>> {
    create_employee(&state.api, employee)
        .await
        .map(Json)
        .map_err(failure)
}

async fn http_update_employee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(update): Json<EmployeeUpdate>,
) -> ApiResult<Json<EmployeeRecord>> {
    update_employee(&state.api, RecordId(id), update)
        .await
        .map(Json)
        .map_err(failure)
}

async fn http_delete_employee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    delete_employee(&state.api, RecordId(id))
        .await
        .map_err(failure)?;
    Ok(StatusCode::NO_CONTENT)
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn failure(err: ApiError) -> (StatusCode, Json<ApiError>) {
    let status = status_for(err.code);
    if status.is_server_error() {
        tracing::error!(error = %err.message, "request failed");
    } else {
        tracing::debug!(code = ?err.code, error = %err.message, "request rejected");
    }
    (status, Json(err))
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
