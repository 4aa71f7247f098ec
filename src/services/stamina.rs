//! Stamina estimator: a weighted-sum score over rider attributes.
//!
//! Starts at a base of 50 and applies fixed additive adjustments per
//! attribute, clamped to [0, 100]. Missing age or BMI is neutral: the
//! corresponding adjustment is skipped rather than compared against a
//! zero default.

use crate::domain::rider::{
    AdaptabilityLevel, DietQuality, FatigueLevel, FitnessLevel, RiderProfile, RidingStyle,
    StaminaLevel,
};

const BASE_SCORE: f64 = 50.0;

/// Maximum contribution of riding experience.
const EXPERIENCE_CAP: f64 = 15.0;
const EXPERIENCE_PER_YEAR: f64 = 1.5;

/// Estimate the rider's stamina score (0-100) and level.
///
/// Deterministic: the same inputs always produce the same score.
pub fn estimate_stamina(profile: &RiderProfile, bmi: Option<f64>) -> (u8, StaminaLevel) {
    let mut score = BASE_SCORE;

    // Age: younger riders generally sustain longer days
    if let Some(age) = profile.age {
        if age < 30 {
            score += 10.0;
        } else if age < 45 {
            score += 5.0;
        } else if age > 60 {
            score -= 15.0;
        }
    }

    // BMI: the healthy band contributes, either extreme costs
    if let Some(bmi) = bmi {
        if (18.5..=24.9).contains(&bmi) {
            score += 10.0;
        } else if bmi > 30.0 {
            score -= 10.0;
        } else if bmi < 18.5 {
            score -= 5.0;
        }
    }

    // Sleep
    if (7.0..=9.0).contains(&profile.sleep_hours) {
        score += 8.0;
    } else if profile.sleep_hours < 5.0 {
        score -= 10.0;
    }

    // Hydration
    if profile.hydration_litres >= 2.5 {
        score += 7.0;
    } else if profile.hydration_litres < 1.5 {
        score -= 8.0;
    }

    // Experience, capped
    score += (f64::from(profile.experience_years) * EXPERIENCE_PER_YEAR).min(EXPERIENCE_CAP);

    // Riding style: aggressive riding depletes stamina faster
    match profile.riding_style {
        RidingStyle::Aggressive => score -= 5.0,
        RidingStyle::FuelSaving | RidingStyle::Scenic => score += 3.0,
        RidingStyle::Balanced => {}
    }

    match profile.terrain_adaptability {
        AdaptabilityLevel::High => score += 7.0,
        AdaptabilityLevel::Low => score -= 7.0,
        AdaptabilityLevel::Moderate => {}
    }

    match profile.recent_fatigue {
        FatigueLevel::Mild => score -= 5.0,
        FatigueLevel::Moderate => score -= 10.0,
        FatigueLevel::High => score -= 20.0,
        FatigueLevel::None => {}
    }

    match profile.fitness_level {
        FitnessLevel::Athletic => score += 15.0,
        FitnessLevel::Good => score += 10.0,
        FitnessLevel::Low => score -= 10.0,
        FitnessLevel::Average => {}
    }

    match profile.diet_quality {
        DietQuality::Excellent => score += 5.0,
        DietQuality::Poor => score -= 5.0,
        DietQuality::Average | DietQuality::Good => {}
    }

    let score = score.clamp(0.0, 100.0).round() as u8;
    (score, level_for_score(score))
}

fn level_for_score(score: u8) -> StaminaLevel {
    if score >= 85 {
        StaminaLevel::Excellent
    } else if score >= 70 {
        StaminaLevel::High
    } else if score < 40 {
        StaminaLevel::Low
    } else {
        StaminaLevel::Moderate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fit_rider() -> RiderProfile {
        RiderProfile {
            age: Some(25),
            height_cm: Some(178.0),
            weight_kg: Some(70.0),
            experience_years: 5,
            riding_style: RidingStyle::Balanced,
            sleep_hours: 8.0,
            hydration_litres: 3.0,
            terrain_adaptability: AdaptabilityLevel::High,
            recent_fatigue: FatigueLevel::None,
            fitness_level: FitnessLevel::Good,
            diet_quality: DietQuality::Good,
            ..RiderProfile::default()
        }
    }

    #[test]
    fn test_fit_rider_clamps_to_100() {
        // 50 +10 (age) +10 (bmi 22) +8 (sleep) +7 (hydration) +7.5 (experience)
        // +7 (adaptability) +10 (fitness) = 109.5 → clamped to 100
        let (score, level) = estimate_stamina(&fit_rider(), Some(22.0));
        assert_eq!(score, 100);
        assert_eq!(level, StaminaLevel::Excellent);
    }

    #[test]
    fn test_exhausted_rider_is_low() {
        let profile = RiderProfile {
            age: Some(65),
            sleep_hours: 4.0,
            hydration_litres: 1.0,
            recent_fatigue: FatigueLevel::High,
            fitness_level: FitnessLevel::Low,
            diet_quality: DietQuality::Poor,
            ..RiderProfile::default()
        };
        // 50 -15 (age) -10 (bmi) -10 (sleep) -8 (hydration) -20 (fatigue)
        // -10 (fitness) -5 (diet) = -28 → clamped to 0
        let (score, level) = estimate_stamina(&profile, Some(32.0));
        assert_eq!(score, 0);
        assert_eq!(level, StaminaLevel::Low);
    }

    #[test]
    fn test_missing_age_and_bmi_are_neutral() {
        let mut profile = fit_rider();
        profile.age = None;
        let with_missing = estimate_stamina(&profile, None);
        // 50 +8 +7 +7.5 +7 +10 = 89.5 → 90, still excellent
        assert_eq!(with_missing.0, 90);
        assert_eq!(with_missing.1, StaminaLevel::Excellent);
    }

    #[test]
    fn test_deterministic() {
        let profile = fit_rider();
        assert_eq!(
            estimate_stamina(&profile, Some(22.0)),
            estimate_stamina(&profile, Some(22.0))
        );
    }

    #[test]
    fn test_score_always_in_range() {
        // Sweep a few extreme combinations; the clamp must always hold.
        for fatigue in [FatigueLevel::None, FatigueLevel::High] {
            for fitness in [FitnessLevel::Low, FitnessLevel::Athletic] {
                for years in [0, 50] {
                    let profile = RiderProfile {
                        age: Some(20),
                        experience_years: years,
                        recent_fatigue: fatigue,
                        fitness_level: fitness,
                        ..RiderProfile::default()
                    };
                    let (score, _) = estimate_stamina(&profile, Some(22.0));
                    assert!(score <= 100);
                }
            }
        }
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(level_for_score(85), StaminaLevel::Excellent);
        assert_eq!(level_for_score(84), StaminaLevel::High);
        assert_eq!(level_for_score(70), StaminaLevel::High);
        assert_eq!(level_for_score(69), StaminaLevel::Moderate);
        assert_eq!(level_for_score(40), StaminaLevel::Moderate);
        assert_eq!(level_for_score(39), StaminaLevel::Low);
    }
}
