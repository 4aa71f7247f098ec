//! Trip preferences and simulated environmental context.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Pace {
    Relaxed,
    Moderate,
    Fast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ExpectedTerrain {
    Highway,
    Mixed,
    OffRoad,
}

impl std::fmt::Display for ExpectedTerrain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ExpectedTerrain::Highway => "highway",
            ExpectedTerrain::Mixed => "mixed",
            ExpectedTerrain::OffRoad => "off-road",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ComfortPriority {
    Speed,
    Comfort,
    Scenery,
    Balance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum WeatherTolerance {
    Any,
    Moderate,
    FairWeatherOnly,
}

/// Goals and constraints for the upcoming trip.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TripPreferences {
    pub desired_pace: Pace,
    pub trip_duration_days: u32,
    pub expected_terrain: ExpectedTerrain,
    pub comfort_priority: ComfortPriority,
    pub weather_tolerance: WeatherTolerance,
}

impl Default for TripPreferences {
    fn default() -> Self {
        Self {
            desired_pace: Pace::Moderate,
            trip_duration_days: 1,
            expected_terrain: ExpectedTerrain::Mixed,
            comfort_priority: ComfortPriority::Balance,
            weather_tolerance: WeatherTolerance::Moderate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum RoadConditions {
    Good,
    Patchy,
    Rough,
    OffRoad,
}

impl std::fmt::Display for RoadConditions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RoadConditions::Good => "good",
            RoadConditions::Patchy => "patchy",
            RoadConditions::Rough => "rough",
            RoadConditions::OffRoad => "off-road",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WeatherForecast {
    Clear,
    Rainy,
    Windy,
    Hot,
    Cold,
}

impl std::fmt::Display for WeatherForecast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            WeatherForecast::Clear => "clear",
            WeatherForecast::Rainy => "rainy",
            WeatherForecast::Windy => "windy",
            WeatherForecast::Hot => "hot",
            WeatherForecast::Cold => "cold",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TrafficDensity {
    Low,
    Moderate,
    High,
}

/// User-entered environmental context for the trip window.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExternalFactors {
    pub road_conditions: RoadConditions,
    pub weather_forecast: WeatherForecast,
    pub traffic_density: TrafficDensity,
}

impl Default for ExternalFactors {
    fn default() -> Self {
        Self {
            road_conditions: RoadConditions::Good,
            weather_forecast: WeatherForecast::Clear,
            traffic_density: TrafficDensity::Low,
        }
    }
}
