//! Rider profile inputs and rider-derived state.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::itinerary::Sentiment;

/// How the rider tends to ride. Affects stamina, risk, and coaching advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum RidingStyle {
    Aggressive,
    Scenic,
    FuelSaving,
    Balanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AdaptabilityLevel {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FatigueLevel {
    None,
    Mild,
    Moderate,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FitnessLevel {
    Low,
    Average,
    Good,
    Athletic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DietQuality {
    Poor,
    Average,
    Good,
    Excellent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PillionGender {
    Male,
    Female,
}

/// Rider profile as entered by the user. Derived fields live in
/// [`RiderDerived`] and are recomputed after every mutation, never set
/// directly.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RiderProfile {
    pub name: String,
    pub age: Option<u32>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub experience_years: u32,
    pub riding_style: RidingStyle,
    /// Typical km/day the rider aims for.
    pub preferred_daily_distance_km: f64,
    pub pillion: bool,
    pub pillion_gender: Option<PillionGender>,
    pub luggage_weight_kg: f64,
    /// Panniers, top box.
    pub has_hard_luggage: bool,
    /// Average hours of sleep per night.
    pub sleep_hours: f64,
    /// Average water intake per day.
    pub hydration_litres: f64,
    /// Comfort with off-road and rough terrain.
    pub terrain_adaptability: AdaptabilityLevel,
    pub recent_fatigue: FatigueLevel,
    pub fitness_level: FitnessLevel,
    pub diet_quality: DietQuality,
}

impl Default for RiderProfile {
    fn default() -> Self {
        Self {
            name: String::new(),
            age: None,
            height_cm: None,
            weight_kg: None,
            experience_years: 0,
            riding_style: RidingStyle::Balanced,
            preferred_daily_distance_km: 250.0,
            pillion: false,
            pillion_gender: None,
            luggage_weight_kg: 0.0,
            has_hard_luggage: false,
            sleep_hours: 7.0,
            hydration_litres: 2.5,
            terrain_adaptability: AdaptabilityLevel::Moderate,
            recent_fatigue: FatigueLevel::None,
            fitness_level: FitnessLevel::Average,
            diet_quality: DietQuality::Average,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl std::fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StaminaLevel {
    Low,
    Moderate,
    High,
    Excellent,
}

/// Metrics derived from the rider profile. Recomputed on every profile,
/// preference, or factor change.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RiderDerived {
    /// Body Mass Index, 1 decimal place. None until height and weight are set.
    pub bmi: Option<f64>,
    pub bmi_category: Option<BmiCategory>,
    /// Heuristic fitness-for-riding score, 0-100.
    pub stamina_score: u8,
    pub stamina_level: StaminaLevel,
    /// Rider + pillion + luggage + hard-luggage weight in kg.
    pub total_load_kg: f64,
}

impl Default for RiderDerived {
    fn default() -> Self {
        Self {
            bmi: None,
            bmi_category: None,
            stamina_score: 0,
            stamina_level: StaminaLevel::Moderate,
            total_load_kg: 0.0,
        }
    }
}

/// Rider-facing recommendation block, regenerated on every state change.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RiderRecommendation {
    /// Coach-style advice sentences joined into one string.
    pub coach_tips: String,
    /// Risk warnings joined into one string.
    pub risk_alert: String,
    pub sentiment: Sentiment,
}

impl Default for RiderRecommendation {
    fn default() -> Self {
        Self {
            coach_tips: String::new(),
            risk_alert: String::new(),
            sentiment: Sentiment::Neutral,
        }
    }
}
