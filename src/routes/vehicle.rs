//! Vehicle patch endpoints.
//!
//! - PATCH /api/v1/sessions/:id/vehicle/specs
//! - PATCH /api/v1/sessions/:id/vehicle/condition
//!
//! A specs patch only touches the identity fields (make, model, year). When
//! the identity changes, the previous spec sheet is invalidated and the
//! configured lookup provider is consulted; the sheet stays empty on a miss
//! so downstream calculation remains gated.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::vehicle::VehicleIdentity;
use crate::errors::{AppError, ErrorResponse};
use crate::helpers::apply_patch;
use crate::routes::sessions::SessionResponse;
use crate::routes::AppState;

/// Outcome of a specs patch, including what the lookup did.
#[derive(Debug, Serialize, ToSchema)]
pub struct SpecsPatchResponse {
    /// "found", "not-found", or "not-attempted"
    pub lookup_status: String,
    /// Human-readable message when the lookup did not produce a sheet
    pub lookup_message: Option<String>,
    pub session: SessionResponse,
}

/// Patch the vehicle identity and refresh the spec sheet.
///
/// Changing make, model, or year clears the loaded sheet (its fields are
/// only valid for the identity they were looked up with) and, when all
/// three identity fields are present, triggers a new lookup.
#[utoipa::path(
    patch,
    path = "/api/v1/sessions/{id}/vehicle/specs",
    tag = "Vehicle",
    params(("id" = Uuid, Path, description = "Session UUID")),
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Updated session with lookup outcome", body = SpecsPatchResponse),
        (status = 400, description = "Invalid patch", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 502, description = "Specs lookup service unreachable", body = ErrorResponse),
    )
)]
pub async fn patch_vehicle_specs(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<Value>,
) -> Result<Json<SpecsPatchResponse>, AppError> {
    let today = Utc::now().date_naive();
    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("Session {} not found", id)))?;

    let identity = VehicleIdentity {
        make: session.vehicle_specs.make.clone(),
        model: session.vehicle_specs.model.clone(),
        year: session.vehicle_specs.year,
    };
    let patched: VehicleIdentity = apply_patch(&identity, &patch)?;
    let changed = patched.make != identity.make
        || patched.model != identity.model
        || patched.year != identity.year;

    session.vehicle_specs.make = patched.make;
    session.vehicle_specs.model = patched.model;
    session.vehicle_specs.year = patched.year;

    let mut lookup_status = "not-attempted";
    let mut lookup_message = None;

    if changed {
        // A sheet is only valid for the identity it was looked up with
        session.vehicle_specs.sheet = None;

        let make = session.vehicle_specs.make.clone();
        let model = session.vehicle_specs.model.clone();
        if !make.is_empty() && !model.is_empty() {
            if let Some(year) = session.vehicle_specs.year {
                match state.specs.lookup(&make, &model, year).await {
                    Ok(Some(sheet)) => {
                        session.vehicle_specs.sheet = Some(sheet);
                        lookup_status = "found";
                    }
                    Ok(None) => {
                        lookup_status = "not-found";
                        lookup_message = Some(format!(
                            "Detailed specs for {} {} {} not found. Please check spelling or \
                             try another vehicle.",
                            make, model, year
                        ));
                    }
                    Err(e) => {
                        tracing::warn!("Specs lookup failed for {} {}: {}", make, model, e);
                        session.recompute(today, state.fuel_price_per_litre);
                        return Err(e);
                    }
                }
            }
        }
    }

    session.recompute(today, state.fuel_price_per_litre);
    Ok(Json(SpecsPatchResponse {
        lookup_status: lookup_status.to_string(),
        lookup_message,
        session: SessionResponse::from(&*session),
    }))
}

/// Apply a deep-merge patch to the vehicle condition and recompute metrics.
#[utoipa::path(
    patch,
    path = "/api/v1/sessions/{id}/vehicle/condition",
    tag = "Vehicle",
    params(("id" = Uuid, Path, description = "Session UUID")),
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Updated session snapshot", body = SessionResponse),
        (status = 400, description = "Invalid patch", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
    )
)]
pub async fn patch_vehicle_condition(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<Value>,
) -> Result<Json<SessionResponse>, AppError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("Session {} not found", id)))?;
    session.vehicle_condition = apply_patch(&session.vehicle_condition, &patch)?;
    session.recompute(Utc::now().date_naive(), state.fuel_price_per_litre);
    Ok(Json(SessionResponse::from(&*session)))
}
