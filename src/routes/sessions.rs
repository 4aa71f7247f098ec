//! Session lifecycle and rider-side patch endpoints.
//!
//! - POST  /api/v1/sessions
//! - GET   /api/v1/sessions/:id
//! - POST  /api/v1/sessions/:id/reset
//! - PATCH /api/v1/sessions/:id/rider
//! - PATCH /api/v1/sessions/:id/preferences
//! - PATCH /api/v1/sessions/:id/factors
//!
//! All PATCH bodies are deep-merge patches: nested objects merge, arrays
//! and scalars replace, missing keys are untouched.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::itinerary::{SavedItinerary, Sentiment, TripPlan};
use crate::domain::rider::{RiderDerived, RiderProfile, RiderRecommendation};
use crate::domain::trip::{ExternalFactors, TripPreferences};
use crate::domain::vehicle::{CalculatedMetrics, VehicleCondition, VehicleReport, VehicleSpecs};
use crate::errors::{AppError, ErrorResponse};
use crate::helpers::apply_patch;
use crate::routes::AppState;
use crate::services::session::PlannerSession;

/// Summary of a saved itinerary for list views.
#[derive(Debug, Serialize, ToSchema)]
pub struct SavedItinerarySummary {
    pub id: Uuid,
    pub name: String,
    /// ISO 8601 creation timestamp
    pub created_at: String,
    pub days: usize,
    pub total_distance_km: f64,
    pub sentiment: Sentiment,
}

impl From<&SavedItinerary> for SavedItinerarySummary {
    fn from(it: &SavedItinerary) -> Self {
        Self {
            id: it.id,
            name: it.name.clone(),
            created_at: it.created_at.to_rfc3339(),
            days: it.plan.days.len(),
            total_distance_km: it.plan.total_distance_km,
            sentiment: it.plan.overall.sentiment,
        }
    }
}

/// Full session snapshot: inputs, derived state, recommendations, the last
/// generated plan, and saved-itinerary summaries.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub id: Uuid,
    /// ISO 8601 creation timestamp
    pub created_at: String,
    pub rider_profile: RiderProfile,
    pub rider_derived: RiderDerived,
    pub trip_preferences: TripPreferences,
    pub external_factors: ExternalFactors,
    pub vehicle_specs: VehicleSpecs,
    pub vehicle_condition: VehicleCondition,
    pub calculated_metrics: CalculatedMetrics,
    pub rider_recommendation: RiderRecommendation,
    pub vehicle_report: VehicleReport,
    pub plan: Option<TripPlan>,
    pub saved_itineraries: Vec<SavedItinerarySummary>,
    pub current_itinerary_id: Option<Uuid>,
}

impl From<&PlannerSession> for SessionResponse {
    fn from(session: &PlannerSession) -> Self {
        Self {
            id: session.id,
            created_at: session.created_at.to_rfc3339(),
            rider_profile: session.rider_profile.clone(),
            rider_derived: session.rider_derived.clone(),
            trip_preferences: session.trip_preferences.clone(),
            external_factors: session.external_factors.clone(),
            vehicle_specs: session.vehicle_specs.clone(),
            vehicle_condition: session.vehicle_condition.clone(),
            calculated_metrics: session.calculated_metrics.clone(),
            rider_recommendation: session.rider_recommendation.clone(),
            vehicle_report: session.vehicle_report.clone(),
            plan: session.plan.clone(),
            saved_itineraries: session
                .saved_itineraries
                .iter()
                .map(SavedItinerarySummary::from)
                .collect(),
            current_itinerary_id: session.current_itinerary_id,
        }
    }
}

/// Create a new planning session with default inputs.
#[utoipa::path(
    post,
    path = "/api/v1/sessions",
    tag = "Sessions",
    responses(
        (status = 200, description = "New session with default state", body = SessionResponse),
    )
)]
pub async fn create_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let session = PlannerSession::new(Utc::now().date_naive(), state.fuel_price_per_litre);
    let response = SessionResponse::from(&session);
    state.sessions.write().await.insert(session.id, session);
    tracing::info!("Created session {}", response.id);
    Json(response)
}

/// Get the full snapshot of a session.
#[utoipa::path(
    get,
    path = "/api/v1/sessions/{id}",
    tag = "Sessions",
    params(("id" = Uuid, Path, description = "Session UUID")),
    responses(
        (status = 200, description = "Session snapshot", body = SessionResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
    )
)]
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let sessions = state.sessions.read().await;
    let session = sessions
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("Session {} not found", id)))?;
    Ok(Json(SessionResponse::from(session)))
}

/// Reset a session's inputs and derived state to defaults.
///
/// Saved itineraries and the current selection survive a reset.
#[utoipa::path(
    post,
    path = "/api/v1/sessions/{id}/reset",
    tag = "Sessions",
    params(("id" = Uuid, Path, description = "Session UUID")),
    responses(
        (status = 200, description = "Session restored to defaults", body = SessionResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
    )
)]
pub async fn reset_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("Session {} not found", id)))?;
    session.reset(Utc::now().date_naive(), state.fuel_price_per_litre);
    Ok(Json(SessionResponse::from(&*session)))
}

/// Apply a deep-merge patch to the rider profile and recompute derived state.
#[utoipa::path(
    patch,
    path = "/api/v1/sessions/{id}/rider",
    tag = "Sessions",
    params(("id" = Uuid, Path, description = "Session UUID")),
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Updated session snapshot", body = SessionResponse),
        (status = 400, description = "Invalid patch", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
    )
)]
pub async fn patch_rider(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<Value>,
) -> Result<Json<SessionResponse>, AppError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("Session {} not found", id)))?;
    session.rider_profile = apply_patch(&session.rider_profile, &patch)?;
    session.recompute(Utc::now().date_naive(), state.fuel_price_per_litre);
    Ok(Json(SessionResponse::from(&*session)))
}

/// Apply a deep-merge patch to the trip preferences.
#[utoipa::path(
    patch,
    path = "/api/v1/sessions/{id}/preferences",
    tag = "Sessions",
    params(("id" = Uuid, Path, description = "Session UUID")),
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Updated session snapshot", body = SessionResponse),
        (status = 400, description = "Invalid patch", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
    )
)]
pub async fn patch_preferences(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<Value>,
) -> Result<Json<SessionResponse>, AppError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("Session {} not found", id)))?;
    session.trip_preferences = apply_patch(&session.trip_preferences, &patch)?;
    session.recompute(Utc::now().date_naive(), state.fuel_price_per_litre);
    Ok(Json(SessionResponse::from(&*session)))
}

/// Apply a deep-merge patch to the external factors.
#[utoipa::path(
    patch,
    path = "/api/v1/sessions/{id}/factors",
    tag = "Sessions",
    params(("id" = Uuid, Path, description = "Session UUID")),
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Updated session snapshot", body = SessionResponse),
        (status = 400, description = "Invalid patch", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
    )
)]
pub async fn patch_factors(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<Value>,
) -> Result<Json<SessionResponse>, AppError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("Session {} not found", id)))?;
    session.external_factors = apply_patch(&session.external_factors, &patch)?;
    session.recompute(Utc::now().date_naive(), state.fuel_price_per_litre);
    Ok(Json(SessionResponse::from(&*session)))
}
