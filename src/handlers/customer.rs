//! Customer handlers: create, list, get, replace, patch, delete.

use crate::error::AppError;
use crate::model::{CustomerCreate, CustomerReplace};
use crate::service::{patch_fields, validate_create, validate_replace, CustomerService};
use crate::sql::ListParams;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CustomerCreate>,
) -> Result<impl IntoResponse, AppError> {
    validate_create(&payload)?;
    let row = CustomerService::create(&state.pool, &payload).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// Plain JSON array of records; the pre-pagination total rides in the
/// X-Total-Count header so callers can compute page counts.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let (rows, total) = CustomerService::list(&state.pool, &params).await?;
    Ok(([("x-total-count", total.to_string())], Json(rows)))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let row = CustomerService::get(&state.pool, id).await?;
    Ok(Json(row))
}

pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<CustomerReplace>,
) -> Result<impl IntoResponse, AppError> {
    validate_replace(&payload)?;
    let row = CustomerService::replace(&state.pool, id, &payload).await?;
    Ok(Json(row))
}

pub async fn patch(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let fields = patch_fields(&body)?;
    let row = CustomerService::patch(&state.pool, id, &fields).await?;
    Ok(Json(row))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    CustomerService::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
