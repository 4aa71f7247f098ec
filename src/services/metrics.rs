//! Pure metric calculators: BMI, total load, vehicle age, performance
//! figures, and the terrain suitability verdict.

use chrono::{Datelike, NaiveDate};

use crate::domain::rider::{BmiCategory, PillionGender, RiderProfile};
use crate::domain::vehicle::{SpecSheet, SuspensionType, TireType};
use crate::helpers::{round1, round2};

/// Rough engine-displacement-to-horsepower divisor for average motorcycles.
const CC_PER_HP: f64 = 18.0;

/// Assumed pillion weight by reported gender, kg.
const PILLION_WEIGHT_MALE_KG: f64 = 75.0;
const PILLION_WEIGHT_OTHER_KG: f64 = 55.0;

/// Weight of hard luggage hardware itself (panniers, top box), kg.
const HARD_LUGGAGE_WEIGHT_KG: f64 = 12.0;

/// Body Mass Index from height in cm and weight in kg, 1 decimal place.
///
/// Returns `None` unless both inputs are present and positive.
pub fn calculate_bmi(height_cm: Option<f64>, weight_kg: Option<f64>) -> Option<f64> {
    let height = height_cm.filter(|h| *h > 0.0)?;
    let weight = weight_kg.filter(|w| *w > 0.0)?;
    let h_meters = height / 100.0;
    Some(round1(weight / (h_meters * h_meters)))
}

pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// Total load on the vehicle: rider + pillion + luggage + hard-luggage
/// hardware, in kg.
pub fn compute_total_load(profile: &RiderProfile) -> f64 {
    let rider = profile.weight_kg.unwrap_or(0.0);
    let pillion = if profile.pillion {
        match profile.pillion_gender {
            Some(PillionGender::Male) => PILLION_WEIGHT_MALE_KG,
            _ => PILLION_WEIGHT_OTHER_KG,
        }
    } else {
        0.0
    };
    let hard_luggage = if profile.has_hard_luggage {
        HARD_LUGGAGE_WEIGHT_KG
    } else {
        0.0
    };
    rider + pillion + profile.luggage_weight_kg + hard_luggage
}

/// Vehicle age in years. `None` for missing or implausible years.
pub fn vehicle_age_years(year: Option<i32>, today: NaiveDate) -> Option<i32> {
    let year = year?;
    if year <= 1900 || year > today.year() {
        return None;
    }
    Some(today.year() - year)
}

/// Estimated HP per kg, 2 decimal places.
pub fn power_to_weight(sheet: &SpecSheet) -> Option<f64> {
    if sheet.engine_cc <= 0.0 || sheet.vehicle_weight_kg <= 0.0 {
        return None;
    }
    let estimated_hp = sheet.engine_cc / CC_PER_HP;
    Some(round2(estimated_hp / sheet.vehicle_weight_kg))
}

/// Estimated range on a full tank, km.
pub fn estimated_range_km(sheet: &SpecSheet) -> Option<f64> {
    if sheet.fuel_tank_capacity_l <= 0.0 || sheet.fuel_efficiency_kmpl <= 0.0 {
        return None;
    }
    Some((sheet.fuel_tank_capacity_l * sheet.fuel_efficiency_kmpl).round())
}

/// Fuel cost for 100 km at the configured price per litre.
pub fn fuel_cost_per_100km(sheet: &SpecSheet, fuel_price_per_litre: f64) -> Option<f64> {
    if sheet.fuel_efficiency_kmpl <= 0.0 {
        return None;
    }
    Some(round2((100.0 / sheet.fuel_efficiency_kmpl) * fuel_price_per_litre))
}

/// Free-text verdict on the vehicle's fitness per terrain class, based on
/// ground clearance, tires, and suspension.
pub fn terrain_suitability(sheet: &SpecSheet) -> String {
    let clearance = sheet.ground_clearance_mm;
    let knobby = matches!(sheet.tire_type, TireType::OffRoad | TireType::DualSport);
    let road_leaning = matches!(sheet.tire_type, TireType::DualSport | TireType::Road);

    if clearance >= 200.0 && knobby && sheet.suspension_type == SuspensionType::OffRoad {
        "Excellent for off-road and touring.".to_string()
    } else if clearance >= 160.0
        && road_leaning
        && sheet.suspension_type == SuspensionType::Adjustable
    {
        "Good for mixed terrain and light trails.".to_string()
    } else if clearance < 140.0 && sheet.tire_type == TireType::Road {
        "Primarily for paved roads. Avoid rough terrain.".to_string()
    } else {
        "Suitable for general road use.".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vehicle::{
        BrakeType, CoolingSystem, TransmissionType,
    };

    fn sheet() -> SpecSheet {
        SpecSheet {
            engine_cc: 348.0,
            ground_clearance_mm: 166.0,
            vehicle_weight_kg: 181.0,
            fuel_tank_capacity_l: 15.0,
            fuel_efficiency_kmpl: 45.0,
            load_capacity_kg: 170.0,
            tire_type: TireType::DualSport,
            brake_type: BrakeType::Disc,
            suspension_type: SuspensionType::Standard,
            cooling_system: CoolingSystem::Air,
            transmission_type: TransmissionType::Manual,
            service_interval_km: 6000.0,
            service_interval_months: 6,
            emission_standard: "BS6".to_string(),
            has_abs: true,
            has_traction_control: false,
            has_quick_shifter: false,
            typical_tire_lifespan_km: 20000.0,
            typical_brake_pad_lifespan_km: 18000.0,
            typical_chain_lifespan_km: 30000.0,
        }
    }

    #[test]
    fn test_bmi_normal() {
        // 175 cm, 70 kg → 70 / 1.75² = 22.857… → 22.9
        assert_eq!(calculate_bmi(Some(175.0), Some(70.0)), Some(22.9));
    }

    #[test]
    fn test_bmi_missing_inputs() {
        assert_eq!(calculate_bmi(None, Some(70.0)), None);
        assert_eq!(calculate_bmi(Some(175.0), None), None);
        assert_eq!(calculate_bmi(Some(0.0), Some(70.0)), None);
    }

    #[test]
    fn test_bmi_category_boundaries() {
        assert_eq!(classify_bmi(18.4), BmiCategory::Underweight);
        assert_eq!(classify_bmi(18.5), BmiCategory::Normal);
        assert_eq!(classify_bmi(24.9), BmiCategory::Normal);
        assert_eq!(classify_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(classify_bmi(30.0), BmiCategory::Obese);
    }

    #[test]
    fn test_total_load_solo() {
        let profile = RiderProfile {
            weight_kg: Some(70.0),
            ..RiderProfile::default()
        };
        assert_eq!(compute_total_load(&profile), 70.0);
    }

    #[test]
    fn test_total_load_with_pillion_and_luggage() {
        let profile = RiderProfile {
            weight_kg: Some(70.0),
            pillion: true,
            pillion_gender: Some(PillionGender::Male),
            luggage_weight_kg: 20.0,
            has_hard_luggage: true,
            ..RiderProfile::default()
        };
        // 70 + 75 + 20 + 12
        assert_eq!(compute_total_load(&profile), 177.0);
    }

    #[test]
    fn test_total_load_pillion_without_gender_uses_lower_weight() {
        let profile = RiderProfile {
            weight_kg: Some(70.0),
            pillion: true,
            ..RiderProfile::default()
        };
        assert_eq!(compute_total_load(&profile), 125.0);
    }

    #[test]
    fn test_vehicle_age() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        assert_eq!(vehicle_age_years(Some(2020), today), Some(6));
        assert_eq!(vehicle_age_years(Some(2026), today), Some(0));
        assert_eq!(vehicle_age_years(Some(2027), today), None);
        assert_eq!(vehicle_age_years(Some(1899), today), None);
        assert_eq!(vehicle_age_years(None, today), None);
    }

    #[test]
    fn test_power_to_weight() {
        // 348cc / 18 = 19.33 HP, / 181 kg = 0.1068… → 0.11
        assert_eq!(power_to_weight(&sheet()), Some(0.11));
    }

    #[test]
    fn test_estimated_range() {
        assert_eq!(estimated_range_km(&sheet()), Some(675.0));
    }

    #[test]
    fn test_fuel_cost_per_100km() {
        // 100 / 45 * 100 = 222.22…
        assert_eq!(fuel_cost_per_100km(&sheet(), 100.0), Some(222.22));
    }

    #[test]
    fn test_terrain_suitability_off_road() {
        let mut s = sheet();
        s.ground_clearance_mm = 220.0;
        s.tire_type = TireType::OffRoad;
        s.suspension_type = SuspensionType::OffRoad;
        assert_eq!(terrain_suitability(&s), "Excellent for off-road and touring.");
    }

    #[test]
    fn test_terrain_suitability_mixed() {
        let mut s = sheet();
        s.ground_clearance_mm = 170.0;
        s.tire_type = TireType::DualSport;
        s.suspension_type = SuspensionType::Adjustable;
        assert_eq!(
            terrain_suitability(&s),
            "Good for mixed terrain and light trails."
        );
    }

    #[test]
    fn test_terrain_suitability_paved_only() {
        let mut s = sheet();
        s.ground_clearance_mm = 130.0;
        s.tire_type = TireType::Road;
        assert_eq!(
            terrain_suitability(&s),
            "Primarily for paved roads. Avoid rough terrain."
        );
    }

    #[test]
    fn test_terrain_suitability_general() {
        assert_eq!(terrain_suitability(&sheet()), "Suitable for general road use.");
    }
}
