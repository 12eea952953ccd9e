// --- File: crates/services/slotsync_backend/src/handlers.rs ---
//! Axum handlers for the availability API.

use crate::app_state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use slotsync_common::{GroupRepository, ParticipantCredential, SchedulingWindow, SlotStore};
use slotsync_engine::EngineError;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateGroupRequest {
    /// Client-chosen id; generated when omitted.
    pub id: Option<String>,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    #[serde(default)]
    pub min_slot_minutes: i64,
    #[serde(default)]
    pub participants: Vec<ParticipantPayload>,
}

#[derive(Debug, Deserialize)]
pub struct ParticipantPayload {
    pub user_id: String,
    pub access_token: Option<String>,
    /// Defaults to the participant's primary calendar.
    pub calendar_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateGroupResponse {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct SlotsResponse {
    pub group_id: String,
    pub slots: Vec<slotsync_common::AvailableSlot>,
}

/// Handler to create a scheduling group with its window and participants.
#[axum::debug_handler]
pub async fn create_group_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<CreateGroupResponse>), (StatusCode, String)> {
    let window = SchedulingWindow {
        start: request.window_start,
        end: request.window_end,
        min_slot_duration: Duration::minutes(request.min_slot_minutes),
    };
    if !window.is_valid() {
        return Err((
            StatusCode::BAD_REQUEST,
            "window_start must be before window_end".to_string(),
        ));
    }

    let group_id = request
        .id
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let credentials: Vec<ParticipantCredential> = request
        .participants
        .iter()
        .map(|participant| ParticipantCredential {
            user_id: participant.user_id.clone(),
            access_token: participant.access_token.clone(),
            calendar_id: participant
                .calendar_id
                .clone()
                .unwrap_or_else(|| "primary".to_string()),
        })
        .collect();

    // One transaction covers the group and all its participants, so a failed
    // participant insert never leaves a half-populated group behind.
    state
        .groups
        .create_group_with_participants(&group_id, &window, &credentials)
        .await
        .map_err(|e| {
            error!("Failed to create group {}: {}", group_id, e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

    info!(
        "Created group {} with {} participants",
        group_id,
        request.participants.len()
    );
    Ok((
        StatusCode::CREATED,
        Json(CreateGroupResponse { id: group_id }),
    ))
}

/// Handler to recompute and replace a group's available slots.
#[axum::debug_handler]
pub async fn recompute_handler(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
) -> Result<Json<SlotsResponse>, (StatusCode, String)> {
    let slots = state
        .coordinator
        .recompute(&group_id)
        .await
        .map_err(engine_error_response)?;

    Ok(Json(SlotsResponse { group_id, slots }))
}

/// Handler to read a group's currently stored slots.
#[axum::debug_handler]
pub async fn list_slots_handler(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
) -> Result<Json<SlotsResponse>, (StatusCode, String)> {
    let window = state
        .groups
        .get_scheduling_window(&group_id)
        .await
        .map_err(|e| {
            error!("Failed to load group {}: {}", group_id, e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;
    if window.is_none() {
        return Err((
            StatusCode::NOT_FOUND,
            format!("Unknown group: {}", group_id),
        ));
    }

    let slots = state.slots.list_slots(&group_id).await.map_err(|e| {
        error!("Failed to list slots for group {}: {}", group_id, e);
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    Ok(Json(SlotsResponse { group_id, slots }))
}

/// Handler for the health check endpoint.
#[axum::debug_handler]
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, &'static str) {
    if state.db_client.is_healthy().await {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "database unreachable")
    }
}

fn engine_error_response(err: EngineError) -> (StatusCode, String) {
    match &err {
        EngineError::GroupNotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        EngineError::InvalidWindow { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
        EngineError::Repository(_) | EngineError::Persistence(_) => {
            error!("Recomputation failed: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}
