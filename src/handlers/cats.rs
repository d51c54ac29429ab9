use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::error::ApiError;
use crate::middleware::Principal;
use crate::pipeline::{
    parse_record_id, remove_blank_fields, require_exists, require_ownership,
    strip_protected_fields,
};
use crate::AppState;

/// Single-record request bodies arrive wrapped under the `cat` key:
/// { "cat": { "name": "Milo", "type": "tabby" } }
#[derive(Debug, Deserialize)]
pub struct CatBody {
    pub cat: Value,
}

/// The wrapped payload must be a JSON object; its keys are otherwise opaque.
fn object_fields(payload: Value) -> Result<Map<String, Value>, ApiError> {
    match payload {
        Value::Object(map) => Ok(map),
        _ => Err(ApiError::unprocessable_entity(
            "cat payload must be a JSON object",
            None,
        )),
    }
}

/// GET /cats - List all cat records
pub async fn list(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Value>, ApiError> {
    let cats = state.store.find_all().await?;
    tracing::debug!(count = cats.len(), user = %principal.id, "listing cats");
    Ok(Json(json!({ "cats": cats })))
}

/// GET /cats/:id - Get a single cat record by id. Reads are not scoped by
/// owner; any authenticated principal may fetch any record.
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_record_id(&id)?;
    let cat = require_exists(state.store.find_by_id(id).await?, id)?;
    Ok(Json(json!({ "cat": cat })))
}

/// POST /cats - Create a cat record owned by the authenticated principal.
/// Any client-supplied owner or id is scrubbed; the owner is stamped from
/// the principal and can never be changed afterwards.
pub async fn create(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<CatBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let fields = strip_protected_fields(object_fields(body.cat)?);
    let cat = state.store.create(&principal.id, fields).await?;
    tracing::debug!(id = %cat.id, user = %principal.id, "created cat");
    Ok((StatusCode::CREATED, Json(json!({ "cat": cat }))))
}

/// PATCH /cats/:id - Partially update a cat record. Blank string fields are
/// stripped so an empty form value cannot clobber existing data, then
/// server-assigned fields are scrubbed, then existence and ownership are
/// checked before the store sees the merge.
pub async fn update(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    Json(body): Json<CatBody>,
) -> Result<StatusCode, ApiError> {
    let fields = strip_protected_fields(object_fields(remove_blank_fields(body.cat))?);

    let id = parse_record_id(&id)?;
    let cat = require_exists(state.store.find_by_id(id).await?, id)?;
    require_ownership(&cat, &principal)?;

    state.store.apply_partial(id, fields).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /cats/:id - Delete a cat record owned by the authenticated
/// principal.
pub async fn delete(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_record_id(&id)?;
    let cat = require_exists(state.store.find_by_id(id).await?, id)?;
    require_ownership(&cat, &principal)?;

    state.store.delete(id).await?;
    tracing::debug!(id = %id, user = %principal.id, "deleted cat");
    Ok(StatusCode::NO_CONTENT)
}
