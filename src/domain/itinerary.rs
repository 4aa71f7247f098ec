//! Generated itineraries and saved itinerary snapshots.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::rider::RiderProfile;
use crate::domain::trip::{ExternalFactors, TripPreferences};
use crate::domain::vehicle::{VehicleCondition, VehicleSpecs};

/// User-facing tone of a recommendation block. Escalates only — once a pass
/// has reached `warning` it never steps back down.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Cautionary,
    Warning,
}

impl Sentiment {
    /// Escalate to `other` if it is more severe than the current value.
    pub fn escalate(&mut self, other: Sentiment) {
        if other > *self {
            *self = other;
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskLevel {
    /// Numeric weight used when averaging risk across days.
    pub fn weight(self) -> f64 {
        match self {
            RiskLevel::Low => 1.0,
            RiskLevel::Moderate => 2.0,
            RiskLevel::High => 3.0,
            RiskLevel::Critical => 4.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StopKind {
    Fuel,
    Rest,
    Food,
    Sightseeing,
}

/// A planned stop within a day, in chronological order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StopPoint {
    pub name: String,
    pub kind: StopKind,
    pub location: String,
    /// 24-hour clock label, e.g. "13:00".
    pub time: String,
}

/// One day's planned ride segment. Immutable once generated; regenerate to
/// change it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItineraryDay {
    pub day: u32,
    pub date: NaiveDate,
    pub start_location: String,
    pub destination: String,
    pub distance_km: f64,
    pub estimated_time_hours: f64,
    pub terrain: String,
    pub risk_level: RiskLevel,
    pub stop_points: Vec<StopPoint>,
    pub day_tips: String,
}

/// Combined trip-level advice attached to a generated plan.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OverallRecommendation {
    pub coach_tips: String,
    pub risk_alert: String,
    pub sentiment: Sentiment,
}

/// A generated multi-day trip plan.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TripPlan {
    /// Seed the simulation ran with. Re-generating with the same seed and
    /// inputs reproduces the plan exactly.
    pub seed: u64,
    pub days: Vec<ItineraryDay>,
    pub total_distance_km: f64,
    pub total_riding_hours: f64,
    pub overall: OverallRecommendation,
}

/// A saved itinerary: a full snapshot of the session inputs plus the
/// generated plan. Append/delete only.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SavedItinerary {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub rider_profile: RiderProfile,
    pub vehicle_specs: VehicleSpecs,
    pub vehicle_condition: VehicleCondition,
    pub trip_preferences: TripPreferences,
    pub external_factors: ExternalFactors,
    pub plan: TripPlan,
}
