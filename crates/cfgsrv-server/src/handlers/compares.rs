//! Compare handlers (list, add, get, update, delete).

use axum::extract::{Path, State};
use axum::Json;

use cfgsrv_core::ComparePartial;

use crate::deadline::Deadline;
use crate::error::ApiError;
use crate::schema::compares::{
    AddCompareRequest, CompareListResponse, CompareResponse, UpdateCompareRequest,
};
use crate::state::AppState;

/// `GET /compares`
pub async fn list_compares(
    State(state): State<AppState>,
    deadline: Deadline,
) -> Result<Json<CompareListResponse>, ApiError> {
    let service = state.compares.clone();
    let compares = deadline.run(move || service.get_all()).await?;
    Ok(Json(CompareListResponse {
        compares: compares.into_iter().map(Into::into).collect(),
    }))
}

/// Adds a compare task; its id is derived from the name.
///
/// `POST /compares`
pub async fn add_compare(
    State(state): State<AppState>,
    deadline: Deadline,
    Json(req): Json<AddCompareRequest>,
) -> Result<Json<CompareResponse>, ApiError> {
    let service = state.compares.clone();
    let cmp = deadline.run(move || service.add(req.into())).await?;
    Ok(Json(cmp.into()))
}

/// `GET /compares/{id}`
pub async fn get_compare(
    State(state): State<AppState>,
    Path(id): Path<String>,
    deadline: Deadline,
) -> Result<Json<CompareResponse>, ApiError> {
    let service = state.compares.clone();
    let cmp = deadline.run(move || service.get_by_id(&id)).await?;
    Ok(Json(cmp.into()))
}

/// `PATCH /compares/{id}`
pub async fn update_compare(
    State(state): State<AppState>,
    Path(id): Path<String>,
    deadline: Deadline,
    Json(req): Json<UpdateCompareRequest>,
) -> Result<Json<CompareResponse>, ApiError> {
    let service = state.compares.clone();
    let partial: ComparePartial = req.into();
    let cmp = deadline
        .run(move || service.update_by_id(&id, &partial))
        .await?;
    Ok(Json(cmp.into()))
}

/// `DELETE /compares/{id}`
pub async fn delete_compare(
    State(state): State<AppState>,
    Path(id): Path<String>,
    deadline: Deadline,
) -> Result<Json<serde_json::Value>, ApiError> {
    let service = state.compares.clone();
    deadline.run(move || service.delete_by_id(&id)).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
