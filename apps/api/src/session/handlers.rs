use axum::{
    body::Bytes,
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interaction::geometry::Bounds;
use crate::interaction::gesture::{PointerEvent, SliderView};
use crate::models::slider::{ImageSlot, SliderConfig};
use crate::session::export::{Artifact, StoredArtifact};
use crate::session::ingest::ingest_multipart;
use crate::session::store::SessionSummary;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub config: Option<SliderConfig>,
}

#[derive(Debug, Deserialize)]
pub struct PointerRequest {
    pub event: PointerEvent,
    /// Container rectangle at event time. Required for `down` and `move`.
    pub bounds: Option<Bounds>,
}

/// POST /api/v1/sessions
///
/// An empty body creates a session with the default config; a non-empty body must be a
/// valid `CreateSessionRequest`.
pub async fn handle_create_session(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<SessionSummary>), AppError> {
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        CreateSessionRequest::default()
    } else {
        serde_json::from_slice::<CreateSessionRequest>(&body)
            .map_err(|e| AppError::Validation(format!("Invalid session request: {e}")))?
    };
    let summary = state
        .sessions
        .create(request.config.unwrap_or_default())
        .await;
    Ok((StatusCode::CREATED, Json(summary)))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSummary>, AppError> {
    Ok(Json(state.sessions.summary(id).await?))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/sessions/:id/images/:slot (multipart, field `file`)
pub async fn handle_upload_image(
    State(state): State<AppState>,
    Path((id, slot)): Path<(Uuid, ImageSlot)>,
    multipart: Multipart,
) -> Result<Json<SessionSummary>, AppError> {
    // Reject unknown sessions before buffering the upload.
    state.sessions.read(id, |_| Ok(())).await?;
    let handle = ingest_multipart(multipart, state.config.max_upload_bytes).await?;
    info!(session_id = %id, %slot, bytes = handle.byte_len(), "Image uploaded");
    Ok(Json(state.sessions.set_image(id, slot, handle).await?))
}

/// DELETE /api/v1/sessions/:id/images/:slot
pub async fn handle_remove_image(
    State(state): State<AppState>,
    Path((id, slot)): Path<(Uuid, ImageSlot)>,
) -> Result<Json<SessionSummary>, AppError> {
    Ok(Json(state.sessions.remove_image(id, slot).await?))
}

/// POST /api/v1/sessions/:id/swap
pub async fn handle_swap_images(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSummary>, AppError> {
    Ok(Json(state.sessions.swap(id).await?))
}

/// PUT /api/v1/sessions/:id/config
pub async fn handle_update_config(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(config): Json<SliderConfig>,
) -> Result<Json<SessionSummary>, AppError> {
    Ok(Json(state.sessions.set_config(id, config).await?))
}

/// GET /api/v1/sessions/:id/preview
pub async fn handle_get_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SliderView>, AppError> {
    Ok(Json(state.sessions.preview(id).await?))
}

/// POST /api/v1/sessions/:id/preview/pointer
pub async fn handle_pointer_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<PointerRequest>,
) -> Result<Json<SliderView>, AppError> {
    let bounds = match (req.bounds, req.event.needs_bounds()) {
        (Some(bounds), _) => bounds,
        (None, false) => Bounds::default(),
        (None, true) => {
            return Err(AppError::Validation(
                "Pointer down/move events require container bounds".to_string(),
            ))
        }
    };
    Ok(Json(state.sessions.apply_pointer(id, req.event, &bounds).await?))
}

/// Generates the artifact for a session. Both images must be present; the generator
/// itself never re-checks.
async fn build_artifact(state: &AppState, id: Uuid) -> Result<Artifact, AppError> {
    let generator = &state.generator;
    let body = state
        .sessions
        .read(id, |session| {
            let (before, after) = session.export_inputs()?;
            Ok(generator.generate(before, after, &session.config))
        })
        .await?;
    Ok(Artifact::html(&state.config.export_filename, body))
}

/// GET /api/v1/sessions/:id/export
pub async fn handle_download_export(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let artifact = build_artifact(&state, id).await?;
    info!(session_id = %id, bytes = artifact.body.len(), "Artifact exported for download");

    let headers = [
        (header::CONTENT_TYPE, artifact.content_type.to_string()),
        (header::CONTENT_DISPOSITION, artifact.content_disposition()),
    ];
    Ok((headers, artifact.body).into_response())
}

/// POST /api/v1/sessions/:id/export
pub async fn handle_store_export(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<StoredArtifact>), AppError> {
    let sink = state.sink.clone().ok_or_else(|| {
        AppError::NotImplemented("Server-side export is disabled (EXPORT_DIR unset)".to_string())
    })?;
    let artifact = build_artifact(&state, id).await?;
    let stored = sink.store(id, &artifact).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}
