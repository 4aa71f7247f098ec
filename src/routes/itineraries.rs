//! Itinerary generation and saved-itinerary CRUD.
//!
//! - POST   /api/v1/sessions/:id/itinerary/generate
//! - POST   /api/v1/sessions/:id/itineraries
//! - GET    /api/v1/sessions/:id/itineraries
//! - GET    /api/v1/sessions/:id/itineraries/:itinerary_id
//! - POST   /api/v1/sessions/:id/itineraries/:itinerary_id/select
//! - DELETE /api/v1/sessions/:id/itineraries/:itinerary_id

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::itinerary::{SavedItinerary, TripPlan};
use crate::errors::{AppError, ErrorResponse};
use crate::routes::sessions::{SavedItinerarySummary, SessionResponse};
use crate::routes::AppState;
use crate::services::itinerary::{generate_plan, PlanContext};

/// Request body for itinerary generation.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct GenerateRequest {
    /// Seed for the simulation. Omit for a random seed; the response echoes
    /// the seed used so a plan can be reproduced.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Request body for saving the generated itinerary.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SaveItineraryRequest {
    /// Optional display name; a default is derived from the first
    /// destination and the save date.
    #[serde(default)]
    pub name: Option<String>,
}

/// Generate a day-by-day itinerary from the session's combined state.
///
/// Fails with a validation message unless the rider profile core fields are
/// set and the vehicle spec sheet has been loaded. The generated plan
/// replaces the session's previous plan.
#[utoipa::path(
    post,
    path = "/api/v1/sessions/{id}/itinerary/generate",
    tag = "Itineraries",
    params(("id" = Uuid, Path, description = "Session UUID")),
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Generated trip plan", body = TripPlan),
        (status = 400, description = "Profile or vehicle setup incomplete", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
    )
)]
pub async fn generate_itinerary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<TripPlan>, AppError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("Session {} not found", id)))?;

    let seed = request.seed.unwrap_or_else(rand::random);
    let start_date = Utc::now().date_naive();

    let plan = {
        let ctx = PlanContext {
            profile: &session.rider_profile,
            derived: &session.rider_derived,
            preferences: &session.trip_preferences,
            factors: &session.external_factors,
            specs: &session.vehicle_specs,
            condition: &session.vehicle_condition,
            metrics: &session.calculated_metrics,
            rider_recommendation: &session.rider_recommendation,
            vehicle_report: &session.vehicle_report,
        };
        generate_plan(&ctx, start_date, seed)?
    };

    tracing::info!(
        "Generated {}-day plan for session {} (seed {})",
        plan.days.len(),
        id,
        seed
    );
    session.plan = Some(plan.clone());
    Ok(Json(plan))
}

/// Save the session's generated plan as an itinerary snapshot.
///
/// The saved itinerary gets a server-assigned id and becomes the current
/// selection.
#[utoipa::path(
    post,
    path = "/api/v1/sessions/{id}/itineraries",
    tag = "Itineraries",
    params(("id" = Uuid, Path, description = "Session UUID")),
    request_body = SaveItineraryRequest,
    responses(
        (status = 200, description = "Saved itinerary snapshot", body = SavedItinerary),
        (status = 400, description = "No generated plan to save", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
    )
)]
pub async fn save_itinerary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SaveItineraryRequest>,
) -> Result<Json<SavedItinerary>, AppError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("Session {} not found", id)))?;
    let saved = session.save_itinerary(request.name)?;
    tracing::info!("Saved itinerary {} for session {}", saved.id, id);
    Ok(Json(saved))
}

/// List the session's saved itineraries.
#[utoipa::path(
    get,
    path = "/api/v1/sessions/{id}/itineraries",
    tag = "Itineraries",
    params(("id" = Uuid, Path, description = "Session UUID")),
    responses(
        (status = 200, description = "Saved itinerary summaries", body = Vec<SavedItinerarySummary>),
        (status = 404, description = "Session not found", body = ErrorResponse),
    )
)]
pub async fn list_itineraries(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<SavedItinerarySummary>>, AppError> {
    let sessions = state.sessions.read().await;
    let session = sessions
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("Session {} not found", id)))?;
    let summaries = session
        .saved_itineraries
        .iter()
        .map(SavedItinerarySummary::from)
        .collect();
    Ok(Json(summaries))
}

/// Get one saved itinerary in full.
#[utoipa::path(
    get,
    path = "/api/v1/sessions/{id}/itineraries/{itinerary_id}",
    tag = "Itineraries",
    params(
        ("id" = Uuid, Path, description = "Session UUID"),
        ("itinerary_id" = Uuid, Path, description = "Itinerary UUID"),
    ),
    responses(
        (status = 200, description = "Full saved itinerary", body = SavedItinerary),
        (status = 404, description = "Session or itinerary not found", body = ErrorResponse),
    )
)]
pub async fn get_itinerary(
    State(state): State<AppState>,
    Path((id, itinerary_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<SavedItinerary>, AppError> {
    let sessions = state.sessions.read().await;
    let session = sessions
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("Session {} not found", id)))?;
    let itinerary = session
        .itinerary(itinerary_id)
        .ok_or_else(|| AppError::NotFound(format!("Itinerary {} not found", itinerary_id)))?;
    Ok(Json(itinerary.clone()))
}

/// Mark a saved itinerary as the current selection.
#[utoipa::path(
    post,
    path = "/api/v1/sessions/{id}/itineraries/{itinerary_id}/select",
    tag = "Itineraries",
    params(
        ("id" = Uuid, Path, description = "Session UUID"),
        ("itinerary_id" = Uuid, Path, description = "Itinerary UUID"),
    ),
    responses(
        (status = 200, description = "Updated session snapshot", body = SessionResponse),
        (status = 404, description = "Session or itinerary not found", body = ErrorResponse),
    )
)]
pub async fn select_itinerary(
    State(state): State<AppState>,
    Path((id, itinerary_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<SessionResponse>, AppError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("Session {} not found", id)))?;
    session.select_itinerary(itinerary_id)?;
    Ok(Json(SessionResponse::from(&*session)))
}

/// Delete a saved itinerary.
///
/// When the deleted itinerary was the current selection, the selection is
/// cleared.
#[utoipa::path(
    delete,
    path = "/api/v1/sessions/{id}/itineraries/{itinerary_id}",
    tag = "Itineraries",
    params(
        ("id" = Uuid, Path, description = "Session UUID"),
        ("itinerary_id" = Uuid, Path, description = "Itinerary UUID"),
    ),
    responses(
        (status = 204, description = "Itinerary deleted"),
        (status = 404, description = "Session or itinerary not found", body = ErrorResponse),
    )
)]
pub async fn delete_itinerary(
    State(state): State<AppState>,
    Path((id, itinerary_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("Session {} not found", id)))?;
    session.delete_itinerary(itinerary_id)?;
    tracing::info!("Deleted itinerary {} from session {}", itinerary_id, id);
    Ok(StatusCode::NO_CONTENT)
}
