use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    Json,
};
use models::malaria::MalariaView;
use service::malaria::{FilterPage, FilterQuery};
use tracing::{error, info};

use super::ServerState;
use crate::errors::ApiError;

pub const ADDED_TEXT: &str = "Successfully added malaria data";
pub const UPDATED_TEXT: &str = "Successfully updated malaria data";
pub const DELETED_TEXT: &str = "Successfully deleted malaria data";
pub const RESET_TEXT: &str = "Successfully reset the malaria database";

/// Ids are matched as text first so a non-numeric id reads as "no such record".
fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.trim().parse::<i32>().map_err(|_| ApiError::not_found())
}

#[utoipa::path(
    get,
    path = "/api/malaria/",
    tag = "malaria",
    responses(
        (status = 200, description = "All records ordered by id", body = [crate::openapi::MalariaDoc]),
        (status = 500, description = "Storage failure", body = String)
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<MalariaView>>, ApiError> {
    let rows = state.malaria.list().await.map_err(ApiError::read)?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/api/malaria/filter",
    tag = "malaria",
    params(crate::openapi::FilterParamsDoc),
    responses(
        (status = 200, description = "One page of matching records", body = crate::openapi::FilterPageDoc),
        (status = 500, description = "Storage failure", body = String)
    )
)]
pub async fn filter(
    State(state): State<ServerState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<FilterPage>, ApiError> {
    let query = FilterQuery::from_pairs(pairs);
    let page = state.malaria.filter(&query).await.map_err(ApiError::read)?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/malaria/{id}/",
    tag = "malaria",
    params(("id" = i32, Path, description = "Record id")),
    responses(
        (status = 200, description = "The record", body = crate::openapi::MalariaDoc),
        (status = 404, description = "Malaria data not found", body = String)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<MalariaView>, ApiError> {
    let id = parse_id(&id)?;
    let view = state.malaria.get(id).await.map_err(ApiError::read)?;
    Ok(Json(view))
}

#[utoipa::path(
    get,
    path = "/api/malaria/iso/",
    tag = "malaria",
    responses((status = 200, description = "Distinct iso codes", body = [String]))
)]
pub async fn list_isos(State(state): State<ServerState>) -> Result<Json<Vec<String>>, ApiError> {
    let isos = state.malaria.isos().await.map_err(ApiError::read)?;
    Ok(Json(isos))
}

#[utoipa::path(
    get,
    path = "/api/malaria/iso/{iso}",
    tag = "malaria",
    params(("iso" = String, Path, description = "ISO 3166 alpha-3 code, any case")),
    responses(
        (status = 200, description = "Lowest-id record with that code", body = crate::openapi::MalariaDoc),
        (status = 404, description = "Malaria data not found", body = String)
    )
)]
pub async fn get_by_iso(
    State(state): State<ServerState>,
    Path(iso): Path<String>,
) -> Result<Json<MalariaView>, ApiError> {
    let view = state.malaria.get_by_iso(&iso).await.map_err(ApiError::read)?;
    Ok(Json(view))
}

#[utoipa::path(
    post,
    path = "/api/malaria/",
    tag = "malaria",
    request_body = crate::openapi::MalariaInputDoc,
    responses(
        (status = 200, description = "Successfully added malaria data", body = String),
        (status = 501, description = "Error adding malaria data", body = String)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    body: Bytes,
) -> Result<&'static str, ApiError> {
    let created = state
        .malaria
        .create_json(&body)
        .await
        .map_err(|e| ApiError::mutation(e, "Error adding malaria data"))?;
    info!(id = created.malaria_id, "malaria data added");
    Ok(ADDED_TEXT)
}

#[utoipa::path(
    put,
    path = "/api/malaria/{id}/",
    tag = "malaria",
    params(("id" = i32, Path, description = "Record id")),
    request_body = crate::openapi::MalariaInputDoc,
    responses(
        (status = 200, description = "Successfully updated malaria data", body = String),
        (status = 404, description = "Malaria data not found", body = String),
        (status = 501, description = "Error updating malaria data", body = String)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<&'static str, ApiError> {
    let id = parse_id(&id)?;
    state
        .malaria
        .update_json(id, &body)
        .await
        .map_err(|e| ApiError::mutation(e, "Error updating malaria data"))?;
    Ok(UPDATED_TEXT)
}

#[utoipa::path(
    delete,
    path = "/api/malaria/{id}/",
    tag = "malaria",
    params(("id" = i32, Path, description = "Record id")),
    responses(
        (status = 200, description = "Successfully deleted malaria data", body = String),
        (status = 404, description = "Malaria data not found", body = String),
        (status = 501, description = "Error deleting malaria data", body = String)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<&'static str, ApiError> {
    let id = parse_id(&id)?;
    state
        .malaria
        .delete(id)
        .await
        .map_err(|e| ApiError::mutation(e, "Error deleting malaria data"))?;
    Ok(DELETED_TEXT)
}

#[utoipa::path(
    put,
    path = "/api/reset/malaria/",
    tag = "malaria",
    responses(
        (status = 200, description = "Successfully reset the malaria database", body = String),
        (status = 501, description = "Error resetting the malaria database", body = String)
    )
)]
pub async fn reset(State(state): State<ServerState>) -> Result<&'static str, ApiError> {
    match state.malaria.reset().await {
        Ok(rows) => {
            info!(rows, "malaria database reset");
            Ok(RESET_TEXT)
        }
        Err(e) => {
            error!(err = %e, "reset failed");
            Err(ApiError::new(
                axum::http::StatusCode::NOT_IMPLEMENTED,
                "Error resetting the malaria database",
            ))
        }
    }
}
