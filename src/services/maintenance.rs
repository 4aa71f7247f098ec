//! Maintenance assessor.
//!
//! Computes per-component due points from the spec sheet's typical lifespans
//! and the reported condition, and accumulates an urgency score that maps to
//! a discrete urgency level. Pure: no state beyond its inputs; re-run
//! whenever condition or specs change.

use chrono::{Days, Months, NaiveDate};

use crate::domain::vehicle::{
    ChainLube, ChainTension, FluidLevel, HornFunction, LightFunction, MirrorCondition, SpecSheet,
    UrgencyLevel, VehicleCondition,
};

/// A component is "approaching due" within this many km.
const COMPONENT_DUE_WINDOW_KM: f64 = 1000.0;
/// Full service uses a tighter window.
const SERVICE_DUE_WINDOW_KM: f64 = 500.0;

/// Wear percentages at or below these thresholds count as worn / critically worn.
const WEAR_WARN_PCT: f64 = 30.0;
const WEAR_CRITICAL_PCT: f64 = 10.0;

/// Urgency score thresholds for the discrete level.
const URGENCY_CRITICAL: u32 = 25;
const URGENCY_HIGH: u32 = 15;
const URGENCY_MODERATE: u32 = 7;

/// Issue keywords that carry a heavier urgency increment.
const SEVERE_ISSUE_KEYWORDS: [&str; 3] = ["engine", "oil leak", "clutch slipping"];

/// Outcome of a maintenance assessment.
#[derive(Debug, Clone)]
pub struct MaintenanceAssessment {
    pub next_service_due_km: Option<f64>,
    pub next_service_due_date: Option<NaiveDate>,
    pub next_tire_change_due_km: Option<f64>,
    pub next_brake_pad_change_due_km: Option<f64>,
    pub next_chain_change_due_km: Option<f64>,
    pub remaining_tire_life_km: Option<f64>,
    pub remaining_brake_pad_life_km: Option<f64>,
    pub remaining_chain_life_km: Option<f64>,
    pub urgency_score: u32,
    pub urgency: UrgencyLevel,
}

/// Assess maintenance needs from specs and reported condition.
pub fn assess_maintenance(
    sheet: &SpecSheet,
    condition: &VehicleCondition,
    today: NaiveDate,
) -> MaintenanceAssessment {
    let mut score: u32 = 0;

    // Full service by mileage
    let next_service_due_km = if sheet.service_interval_km > 0.0 {
        let due = condition.last_service_km + sheet.service_interval_km;
        if condition.current_odometer_km >= due - SERVICE_DUE_WINDOW_KM {
            score += 2;
            if condition.current_odometer_km >= due {
                score += 5;
            }
        }
        Some(due)
    } else {
        None
    };

    // Full service by date
    let next_service_due_date = condition.last_service_date.and_then(|last| {
        let due = last.checked_add_months(Months::new(sheet.service_interval_months))?;
        if today >= due {
            score += 4;
        } else if due <= today.checked_add_days(Days::new(30)).unwrap_or(today) {
            score += 1;
        }
        Some(due)
    });

    // Tires
    let (next_tire_change_due_km, remaining_tire_life_km) = component_due(
        sheet.typical_tire_lifespan_km,
        condition.last_tire_change_km,
        condition.current_odometer_km,
    );
    if let Some(due) = next_tire_change_due_km {
        let wear = condition
            .tire_wear_front_pct
            .min(condition.tire_wear_rear_pct);
        if condition.current_odometer_km >= due - COMPONENT_DUE_WINDOW_KM || wear <= WEAR_WARN_PCT {
            score += 3;
            if condition.current_odometer_km >= due || wear <= WEAR_CRITICAL_PCT {
                score += 6;
            }
        }
    }

    // Brake pads
    let (next_brake_pad_change_due_km, remaining_brake_pad_life_km) = component_due(
        sheet.typical_brake_pad_lifespan_km,
        condition.last_brake_pad_change_km,
        condition.current_odometer_km,
    );
    if let Some(due) = next_brake_pad_change_due_km {
        let wear = condition
            .brake_pad_wear_front_pct
            .min(condition.brake_pad_wear_rear_pct);
        if condition.current_odometer_km >= due - COMPONENT_DUE_WINDOW_KM || wear <= WEAR_WARN_PCT {
            score += 3;
            if condition.current_odometer_km >= due || wear <= WEAR_CRITICAL_PCT {
                score += 6;
            }
        }
    }

    // Chain
    let (next_chain_change_due_km, remaining_chain_life_km) = component_due(
        sheet.typical_chain_lifespan_km,
        condition.last_chain_change_km,
        condition.current_odometer_km,
    );
    if let Some(due) = next_chain_change_due_km {
        if condition.current_odometer_km >= due - COMPONENT_DUE_WINDOW_KM
            || condition.chain_tension_status != ChainTension::Good
            || condition.chain_lube_status == ChainLube::Rusty
        {
            score += 3;
            if condition.current_odometer_km >= due
                || condition.chain_tension_status != ChainTension::Good
            {
                score += 6;
            }
        }
    }

    // Fluids
    let fluids = [
        condition.oil_level_status,
        condition.coolant_level_status,
        condition.brake_fluid_level,
    ];
    if fluids.contains(&FluidLevel::Critical) {
        score += 10;
    } else if fluids.contains(&FluidLevel::Low) {
        score += 5;
    }

    // Battery
    if condition.battery_health_pct <= 20.0 {
        score += 10;
    } else if condition.battery_health_pct <= 40.0 {
        score += 5;
    }

    // Lights and horn: anything short of fully working is a safety gap
    let lights = [
        condition.headlight_function,
        condition.taillight_function,
        condition.turn_signal_function,
    ];
    if lights.iter().any(|l| *l != LightFunction::Working)
        || condition.horn_function != HornFunction::Working
    {
        score += 8;
    }

    if condition.mirror_condition != MirrorCondition::Good {
        score += 5;
    }

    // Reported issues, weighted by severity keywords
    for issue in &condition.recent_issues {
        let lower = issue.to_lowercase();
        if SEVERE_ISSUE_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            score += 7;
        } else {
            score += 3;
        }
    }

    MaintenanceAssessment {
        next_service_due_km,
        next_service_due_date,
        next_tire_change_due_km,
        next_brake_pad_change_due_km,
        next_chain_change_due_km,
        remaining_tire_life_km,
        remaining_brake_pad_life_km,
        remaining_chain_life_km,
        urgency_score: score,
        urgency: urgency_for_score(score),
    }
}

/// Due point and remaining life for a component with a typical lifespan.
fn component_due(lifespan_km: f64, last_change_km: f64, odometer_km: f64) -> (Option<f64>, Option<f64>) {
    if lifespan_km <= 0.0 {
        return (None, None);
    }
    let due = last_change_km + lifespan_km;
    (Some(due), Some(due - odometer_km))
}

fn urgency_for_score(score: u32) -> UrgencyLevel {
    if score >= URGENCY_CRITICAL {
        UrgencyLevel::Critical
    } else if score >= URGENCY_HIGH {
        UrgencyLevel::High
    } else if score >= URGENCY_MODERATE {
        UrgencyLevel::Moderate
    } else {
        UrgencyLevel::Low
    }
}
