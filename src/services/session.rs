//! Per-user planner session state.
//!
//! A [`PlannerSession`] holds the five input records, their derived outputs,
//! the last generated plan, and the saved-itinerary list. Derived state is
//! never mutated directly: every successful input mutation is followed by
//! [`PlannerSession::recompute`], a pure pass that re-derives rider metrics,
//! both recommendation blocks, and (when the spec sheet is loaded) the
//! vehicle metrics.
//!
//! Sessions live in an in-memory registry (`Arc<RwLock<HashMap>>`) shared
//! through the router state.

use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::itinerary::{SavedItinerary, TripPlan};
use crate::domain::rider::{RiderDerived, RiderProfile, RiderRecommendation};
use crate::domain::trip::{ExternalFactors, TripPreferences};
use crate::domain::vehicle::{CalculatedMetrics, VehicleCondition, VehicleReport, VehicleSpecs};
use crate::errors::AppError;
use crate::services::{advice, maintenance, metrics, stamina};

/// All state for one planning session.
#[derive(Debug, Clone)]
pub struct PlannerSession {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,

    // Inputs
    pub rider_profile: RiderProfile,
    pub trip_preferences: TripPreferences,
    pub external_factors: ExternalFactors,
    pub vehicle_specs: VehicleSpecs,
    pub vehicle_condition: VehicleCondition,

    // Derived
    pub rider_derived: RiderDerived,
    pub rider_recommendation: RiderRecommendation,
    pub calculated_metrics: CalculatedMetrics,
    pub vehicle_report: VehicleReport,

    /// Last generated plan, replaced on every generation run.
    pub plan: Option<TripPlan>,

    pub saved_itineraries: Vec<SavedItinerary>,
    pub current_itinerary_id: Option<Uuid>,
}

/// Shared session registry handle.
pub type SharedSessions = Arc<RwLock<HashMap<Uuid, PlannerSession>>>;

impl PlannerSession {
    /// Create a session with default inputs and freshly derived state.
    pub fn new(today: NaiveDate, fuel_price_per_litre: f64) -> Self {
        let mut session = Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            rider_profile: RiderProfile::default(),
            trip_preferences: TripPreferences::default(),
            external_factors: ExternalFactors::default(),
            vehicle_specs: VehicleSpecs::default(),
            vehicle_condition: VehicleCondition::default(),
            rider_derived: RiderDerived::default(),
            rider_recommendation: RiderRecommendation::default(),
            calculated_metrics: CalculatedMetrics::default(),
            vehicle_report: VehicleReport::default(),
            plan: None,
            saved_itineraries: Vec::new(),
            current_itinerary_id: None,
        };
        session.recompute(today, fuel_price_per_litre);
        session
    }

    /// Restore all inputs and derived state to defaults. Saved itineraries
    /// and the current selection are unaffected.
    pub fn reset(&mut self, today: NaiveDate, fuel_price_per_litre: f64) {
        self.rider_profile = RiderProfile::default();
        self.trip_preferences = TripPreferences::default();
        self.external_factors = ExternalFactors::default();
        self.vehicle_specs = VehicleSpecs::default();
        self.vehicle_condition = VehicleCondition::default();
        self.plan = None;
        self.recompute(today, fuel_price_per_litre);
    }

    /// Re-derive everything from the current inputs.
    pub fn recompute(&mut self, today: NaiveDate, fuel_price_per_litre: f64) {
        let bmi = metrics::calculate_bmi(self.rider_profile.height_cm, self.rider_profile.weight_kg);
        let (stamina_score, stamina_level) = stamina::estimate_stamina(&self.rider_profile, bmi);
        self.rider_derived = RiderDerived {
            bmi,
            bmi_category: bmi.map(metrics::classify_bmi),
            stamina_score,
            stamina_level,
            total_load_kg: metrics::compute_total_load(&self.rider_profile),
        };

        let (risk_alert, risk_sentiment) = advice::rider_risk_assessment(
            &self.rider_profile,
            &self.rider_derived,
            &self.trip_preferences,
            &self.external_factors,
        );
        self.rider_recommendation = RiderRecommendation {
            coach_tips: advice::coach_tips(
                &self.rider_profile,
                &self.rider_derived,
                &self.trip_preferences,
                &self.external_factors,
            ),
            risk_alert,
            sentiment: risk_sentiment,
        };

        // Vehicle derivation is gated on a loaded spec sheet
        let Some(sheet) = self.vehicle_specs.sheet.clone() else {
            self.calculated_metrics = CalculatedMetrics::default();
            self.vehicle_report = VehicleReport::default();
            return;
        };

        let assessment =
            maintenance::assess_maintenance(&sheet, &self.vehicle_condition, today);
        self.calculated_metrics = CalculatedMetrics {
            power_to_weight: metrics::power_to_weight(&sheet),
            estimated_range_km: metrics::estimated_range_km(&sheet),
            fuel_cost_per_100km: metrics::fuel_cost_per_100km(&sheet, fuel_price_per_litre),
            next_service_due_km: assessment.next_service_due_km,
            next_service_due_date: assessment.next_service_due_date,
            next_tire_change_due_km: assessment.next_tire_change_due_km,
            next_brake_pad_change_due_km: assessment.next_brake_pad_change_due_km,
            next_chain_change_due_km: assessment.next_chain_change_due_km,
            remaining_tire_life_km: assessment.remaining_tire_life_km,
            remaining_brake_pad_life_km: assessment.remaining_brake_pad_life_km,
            remaining_chain_life_km: assessment.remaining_chain_life_km,
            maintenance_urgency: assessment.urgency,
            age_of_vehicle_years: metrics::vehicle_age_years(self.vehicle_specs.year, today),
            terrain_suitability: Some(metrics::terrain_suitability(&sheet)),
        };

        let (safety_alerts, safety_sentiment) =
            advice::safety_alerts(&sheet, &self.vehicle_condition, &self.calculated_metrics);
        self.vehicle_report = VehicleReport {
            maintenance_tips: advice::maintenance_tips(
                &self.vehicle_specs,
                &sheet,
                &self.vehicle_condition,
                &self.calculated_metrics,
                today,
            ),
            performance_tips: advice::performance_tips(
                &self.vehicle_specs,
                &sheet,
                &self.calculated_metrics,
            ),
            safety_alerts,
            sentiment: advice::overall_vehicle_sentiment(
                safety_sentiment,
                self.calculated_metrics.maintenance_urgency,
            ),
        };
    }

    /// Snapshot the current inputs and plan as a saved itinerary and make it
    /// the current selection.
    pub fn save_itinerary(&mut self, name: Option<String>) -> Result<SavedItinerary, AppError> {
        let plan = self.plan.clone().ok_or_else(|| {
            AppError::BadRequest(
                "No itinerary generated to save. Please generate one first.".to_string(),
            )
        })?;

        let created_at = Utc::now();
        let name = name.unwrap_or_else(|| {
            let destination = plan
                .days
                .first()
                .map_or("Unnamed Trip", |d| d.destination.as_str());
            format!("Ride to {} - {}", destination, created_at.format("%Y-%m-%d"))
        });

        let saved = SavedItinerary {
            id: Uuid::new_v4(),
            name,
            created_at,
            rider_profile: self.rider_profile.clone(),
            vehicle_specs: self.vehicle_specs.clone(),
            vehicle_condition: self.vehicle_condition.clone(),
            trip_preferences: self.trip_preferences.clone(),
            external_factors: self.external_factors.clone(),
            plan,
        };
        self.current_itinerary_id = Some(saved.id);
        self.saved_itineraries.push(saved.clone());
        Ok(saved)
    }

    pub fn itinerary(&self, id: Uuid) -> Option<&SavedItinerary> {
        self.saved_itineraries.iter().find(|it| it.id == id)
    }

    /// Mark a saved itinerary as the current selection.
    pub fn select_itinerary(&mut self, id: Uuid) -> Result<(), AppError> {
        if self.itinerary(id).is_none() {
            return Err(AppError::NotFound(format!("Itinerary {} not found", id)));
        }
        self.current_itinerary_id = Some(id);
        Ok(())
    }

    /// Delete a saved itinerary. Clears the current selection when it
    /// pointed at the deleted entry.
    pub fn delete_itinerary(&mut self, id: Uuid) -> Result<(), AppError> {
        let before = self.saved_itineraries.len();
        self.saved_itineraries.retain(|it| it.id != id);
        if self.saved_itineraries.len() == before {
            return Err(AppError::NotFound(format!("Itinerary {} not found", id)));
        }
        if self.current_itinerary_id == Some(id) {
            self.current_itinerary_id = None;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::itinerary::{OverallRecommendation, Sentiment};
    use crate::domain::rider::StaminaLevel;
    use crate::domain::vehicle::UrgencyLevel;
    use crate::services::specs;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 5).unwrap()
    }

    fn session() -> PlannerSession {
        PlannerSession::new(today(), 100.0)
    }

    fn plan() -> TripPlan {
        TripPlan {
            seed: 1,
            days: Vec::new(),
            total_distance_km: 0.0,
            total_riding_hours: 0.0,
            overall: OverallRecommendation {
                coach_tips: String::new(),
                risk_alert: String::new(),
                sentiment: Sentiment::Positive,
            },
        }
    }

    #[test]
    fn test_new_session_has_derived_state() {
        let session = session();
        // Default profile: base 50 + 8 (sleep 7) + 7 (hydration 2.5) = 65
        assert_eq!(session.rider_derived.stamina_score, 65);
        assert_eq!(session.rider_derived.stamina_level, StaminaLevel::Moderate);
        assert!(!session.rider_recommendation.coach_tips.is_empty());
        // No spec sheet yet: vehicle derivation is gated
        assert!(session.calculated_metrics.power_to_weight.is_none());
        assert!(session.vehicle_report.maintenance_tips.is_empty());
    }

    #[test]
    fn test_recompute_after_profile_change() {
        let mut session = session();
        session.rider_profile.height_cm = Some(175.0);
        session.rider_profile.weight_kg = Some(70.0);
        session.recompute(today(), 100.0);
        assert_eq!(session.rider_derived.bmi, Some(22.9));
        assert_eq!(session.rider_derived.total_load_kg, 70.0);
    }

    #[tokio::test]
    async fn test_loaded_sheet_unlocks_vehicle_metrics() {
        let mut session = session();
        session.vehicle_specs.make = "Honda".to_string();
        session.vehicle_specs.model = "CB350".to_string();
        session.vehicle_specs.year = Some(2022);
        session.vehicle_specs.sheet = specs::SpecsProvider::Catalog
            .lookup("Honda", "CB350", 2022)
            .await
            .unwrap();
        session.recompute(today(), 100.0);

        assert_eq!(session.calculated_metrics.estimated_range_km, Some(675.0));
        assert_eq!(session.calculated_metrics.maintenance_urgency, UrgencyLevel::Low);
        assert_eq!(session.calculated_metrics.age_of_vehicle_years, Some(4));
        assert!(session.vehicle_report.maintenance_tips.contains("Honda CB350"));
    }

    #[test]
    fn test_reset_restores_defaults_but_keeps_saved() {
        let mut session = session();
        session.plan = Some(plan());
        let saved_id = session.save_itinerary(None).unwrap().id;
        session.rider_profile.name = "Asha".to_string();

        session.reset(today(), 100.0);

        assert!(session.rider_profile.name.is_empty());
        assert!(session.plan.is_none());
        assert_eq!(session.saved_itineraries.len(), 1);
        assert_eq!(session.current_itinerary_id, Some(saved_id));
    }

    #[test]
    fn test_save_requires_a_plan() {
        let mut session = session();
        assert!(matches!(
            session.save_itinerary(None),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_save_sets_current_and_default_name() {
        let mut session = session();
        session.plan = Some(plan());
        let saved = session.save_itinerary(None).unwrap();
        assert!(saved.name.starts_with("Ride to Unnamed Trip"));
        let id = saved.id;
        assert_eq!(session.current_itinerary_id, Some(id));
    }

    #[test]
    fn test_delete_clears_current_selection() {
        let mut session = session();
        session.plan = Some(plan());
        let first = session.save_itinerary(None).unwrap().id;
        let second = session.save_itinerary(None).unwrap().id;

        // Deleting the non-selected entry keeps the selection
        session.delete_itinerary(first).unwrap();
        assert_eq!(session.current_itinerary_id, Some(second));

        // Deleting the selected entry clears it
        session.delete_itinerary(second).unwrap();
        assert_eq!(session.current_itinerary_id, None);
        assert!(session.saved_itineraries.is_empty());
    }

    #[test]
    fn test_delete_unknown_is_not_found() {
        let mut session = session();
        assert!(matches!(
            session.delete_itinerary(Uuid::new_v4()),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_select_itinerary() {
        let mut session = session();
        session.plan = Some(plan());
        let first = session.save_itinerary(None).unwrap().id;
        let _second = session.save_itinerary(None).unwrap().id;

        session.select_itinerary(first).unwrap();
        assert_eq!(session.current_itinerary_id, Some(first));
        assert!(matches!(
            session.select_itinerary(Uuid::new_v4()),
            Err(AppError::NotFound(_))
        ));
    }
}
