//! Sequence HTTP Routes
//!
//! Endpoints for creating and updating sequences and their steps. Path ids
//! are validated here, before any store access; store errors are
//! classified here and nowhere below.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, patch, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::observability::RequestContext;
use crate::sequence::{NewSequence, NewStep, Sequence, SequenceService, SequenceStep, SequenceStore};

use super::errors::ApiError;

// ==================
// Shared State
// ==================

/// Sequence state shared across handlers
pub struct SequenceState<S> {
    pub service: SequenceService<S>,
}

impl<S: SequenceStore> SequenceState<S> {
    pub fn new(store: S) -> Self {
        Self {
            service: SequenceService::new(store),
        }
    }
}

/// Create sequence routes
pub fn sequence_routes<S: SequenceStore + 'static>(state: Arc<SequenceState<S>>) -> Router {
    Router::new()
        .route("/sequences", post(create_sequence_handler::<S>))
        .route("/sequences/:sequence_id", patch(update_sequence_handler::<S>))
        .route(
            "/sequences/:sequence_id/steps/:step_id",
            patch(update_step_handler::<S>),
        )
        .route(
            "/sequences/:sequence_id/steps/:step_id",
            delete(delete_step_handler::<S>),
        )
        .with_state(state)
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSequenceRequest {
    pub name: String,
    pub open_tracking_enabled: bool,
    pub click_tracking_enabled: bool,
    #[serde(default)]
    pub steps: Vec<StepInput>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepInput {
    pub email_subject: String,
    pub email_content: String,
    pub days_after_previous_step: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSequenceRequest {
    #[serde(default)]
    pub open_tracking_enabled: Option<bool>,
    #[serde(default)]
    pub click_tracking_enabled: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStepRequest {
    #[serde(default)]
    pub email_subject: Option<String>,
    #[serde(default)]
    pub email_content: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceResponse {
    pub id: String,
    pub name: String,
    pub open_tracking_enabled: bool,
    pub click_tracking_enabled: bool,
    pub steps: Vec<StepResponse>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepResponse {
    pub id: String,
    pub email_subject: String,
    pub email_content: String,
    pub days_after_previous_step: u32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&SequenceStep> for StepResponse {
    fn from(step: &SequenceStep) -> Self {
        Self {
            id: step.id.to_string(),
            email_subject: step.email_subject.clone(),
            email_content: step.email_content.clone(),
            days_after_previous_step: step.days_after_previous_step,
            created_at: step.created_at.to_rfc3339(),
            updated_at: step.updated_at.to_rfc3339(),
        }
    }
}

impl SequenceResponse {
    /// Assemble the wire shape from a persisted sequence and its steps.
    /// The steps arrive already sorted by their ordering value.
    pub fn from_parts(sequence: &Sequence, steps: &[SequenceStep]) -> Self {
        Self {
            id: sequence.id.to_string(),
            name: sequence.name.clone(),
            open_tracking_enabled: sequence.open_tracking_enabled,
            click_tracking_enabled: sequence.click_tracking_enabled,
            steps: steps.iter().map(StepResponse::from).collect(),
            created_at: sequence.created_at.to_rfc3339(),
            updated_at: sequence.updated_at.to_rfc3339(),
        }
    }
}

// ==================
// Handlers
// ==================

/// Create sequence handler
async fn create_sequence_handler<S: SequenceStore>(
    State(state): State<Arc<SequenceState<S>>>,
    Extension(ctx): Extension<RequestContext>,
    Json(request): Json<CreateSequenceRequest>,
) -> Result<(StatusCode, Json<SequenceResponse>), ApiError> {
    let sequence = NewSequence {
        name: request.name,
        open_tracking_enabled: request.open_tracking_enabled,
        click_tracking_enabled: request.click_tracking_enabled,
    };

    let steps = request
        .steps
        .into_iter()
        .map(|step| NewStep {
            email_subject: step.email_subject,
            email_content: step.email_content,
            days_after_previous_step: step.days_after_previous_step,
        })
        .collect();

    let (created, created_steps) = state
        .service
        .create_sequence(sequence, steps)
        .map_err(|err| ApiError::internal(&ctx, &err, "Failed to create sequence"))?;

    Ok((
        StatusCode::CREATED,
        Json(SequenceResponse::from_parts(&created, &created_steps)),
    ))
}

/// Update sequence handler
async fn update_sequence_handler<S: SequenceStore>(
    State(state): State<Arc<SequenceState<S>>>,
    Extension(ctx): Extension<RequestContext>,
    Path(sequence_id): Path<String>,
    Json(request): Json<UpdateSequenceRequest>,
) -> Result<Json<SequenceResponse>, ApiError> {
    let id = parse_id(&ctx, &sequence_id, "Invalid sequence ID")?;

    let (updated, steps) = state
        .service
        .update_sequence(
            id,
            request.open_tracking_enabled,
            request.click_tracking_enabled,
        )
        .map_err(|err| {
            ApiError::from_store(&ctx, err, "Sequence not found", "Failed to update sequence")
        })?;

    Ok(Json(SequenceResponse::from_parts(&updated, &steps)))
}

/// Update sequence step handler
async fn update_step_handler<S: SequenceStore>(
    State(state): State<Arc<SequenceState<S>>>,
    Extension(ctx): Extension<RequestContext>,
    Path((sequence_id, step_id)): Path<(String, String)>,
    Json(request): Json<UpdateStepRequest>,
) -> Result<Json<StepResponse>, ApiError> {
    let sequence_id = parse_id(&ctx, &sequence_id, "Invalid sequence ID")?;
    let step_id = parse_id(&ctx, &step_id, "Invalid step ID")?;

    let updated = state
        .service
        .update_step(
            sequence_id,
            step_id,
            request.email_subject,
            request.email_content,
        )
        .map_err(|err| {
            ApiError::from_store(
                &ctx,
                err,
                "Sequence step not found",
                "Failed to update sequence step",
            )
        })?;

    Ok(Json(StepResponse::from(&updated)))
}

/// Delete sequence step handler
async fn delete_step_handler<S: SequenceStore>(
    State(state): State<Arc<SequenceState<S>>>,
    Extension(ctx): Extension<RequestContext>,
    Path((sequence_id, step_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let sequence_id = parse_id(&ctx, &sequence_id, "Invalid sequence ID")?;
    let step_id = parse_id(&ctx, &step_id, "Invalid step ID")?;

    state
        .service
        .delete_step(sequence_id, step_id)
        .map_err(|err| ApiError::internal(&ctx, &err, "Failed to delete sequence step"))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Parse a path id, rejecting malformed values before any store access
fn parse_id(ctx: &RequestContext, raw: &str, message: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request(ctx, message))
}
