//! Language handlers (list, add, get, update, delete).

use axum::extract::{Path, Query, State};
use axum::Json;

use cfgsrv_core::LanguagePartial;

use crate::deadline::Deadline;
use crate::error::ApiError;
use crate::schema::languages::{
    AddLanguageRequest, LanguageListResponse, LanguageResponse, LanguageView,
    ListLanguagesQuery, UpdateLanguageRequest,
};
use crate::state::AppState;

/// Lists all languages.
///
/// `GET /languages?include_name=true&include_version=true`
pub async fn list_languages(
    State(state): State<AppState>,
    Query(query): Query<ListLanguagesQuery>,
    deadline: Deadline,
) -> Result<Json<LanguageListResponse>, ApiError> {
    let service = state.languages.clone();
    let languages = deadline.run(move || service.get_all()).await?;
    Ok(Json(LanguageListResponse {
        languages: languages
            .into_iter()
            .map(|lang| LanguageView::project(lang, query))
            .collect(),
    }))
}

/// Adds a language; its id is derived from name and version.
///
/// `POST /languages`
pub async fn add_language(
    State(state): State<AppState>,
    deadline: Deadline,
    Json(req): Json<AddLanguageRequest>,
) -> Result<Json<LanguageResponse>, ApiError> {
    let service = state.languages.clone();
    let lang = deadline.run(move || service.add(req.into())).await?;
    Ok(Json(lang.into()))
}

/// `GET /languages/{id}`
pub async fn get_language(
    State(state): State<AppState>,
    Path(id): Path<String>,
    deadline: Deadline,
) -> Result<Json<LanguageResponse>, ApiError> {
    let service = state.languages.clone();
    let lang = deadline.run(move || service.get_by_id(&id)).await?;
    Ok(Json(lang.into()))
}

/// Partially updates a language and returns the full updated record.
///
/// `PATCH /languages/{id}`
pub async fn update_language(
    State(state): State<AppState>,
    Path(id): Path<String>,
    deadline: Deadline,
    Json(req): Json<UpdateLanguageRequest>,
) -> Result<Json<LanguageResponse>, ApiError> {
    let service = state.languages.clone();
    let partial: LanguagePartial = req.into();
    let lang = deadline
        .run(move || service.update_by_id(&id, &partial))
        .await?;
    Ok(Json(lang.into()))
}

/// `DELETE /languages/{id}`
pub async fn delete_language(
    State(state): State<AppState>,
    Path(id): Path<String>,
    deadline: Deadline,
) -> Result<Json<serde_json::Value>, ApiError> {
    let service = state.languages.clone();
    deadline.run(move || service.delete_by_id(&id)).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
