//! Vehicle specifications, reported condition, and derived metrics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::itinerary::Sentiment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum TireType {
    Road,
    DualSport,
    OffRoad,
    Sport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BrakeType {
    Disc,
    Drum,
    Abs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SuspensionType {
    Standard,
    Adjustable,
    UpsideDown,
    OffRoad,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CoolingSystem {
    Air,
    Liquid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransmissionType {
    Manual,
    Automatic,
}

/// Detailed vehicle specifications returned by the specs lookup, keyed by
/// (make, model). Never entered by hand.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SpecSheet {
    pub engine_cc: f64,
    pub ground_clearance_mm: f64,
    /// Dry weight in kg.
    pub vehicle_weight_kg: f64,
    pub fuel_tank_capacity_l: f64,
    /// Average km per litre.
    pub fuel_efficiency_kmpl: f64,
    /// Safe payload in kg.
    pub load_capacity_kg: f64,
    pub tire_type: TireType,
    pub brake_type: BrakeType,
    pub suspension_type: SuspensionType,
    pub cooling_system: CoolingSystem,
    pub transmission_type: TransmissionType,
    pub service_interval_km: f64,
    pub service_interval_months: u32,
    pub emission_standard: String,
    pub has_abs: bool,
    pub has_traction_control: bool,
    pub has_quick_shifter: bool,
    pub typical_tire_lifespan_km: f64,
    pub typical_brake_pad_lifespan_km: f64,
    pub typical_chain_lifespan_km: f64,
}

/// Vehicle identity plus the lookup-populated spec sheet.
///
/// `sheet` being `None` means "specs not loaded" and gates all downstream
/// vehicle calculation and itinerary generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct VehicleSpecs {
    pub make: String,
    pub model: String,
    pub year: Option<i32>,
    pub sheet: Option<SpecSheet>,
}

/// The user-editable part of [`VehicleSpecs`]. PATCH bodies are applied to
/// this projection so the spec sheet itself can never be patched by hand.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VehicleIdentity {
    pub make: String,
    pub model: String,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FluidLevel {
    Good,
    Low,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ChainLube {
    Good,
    NeedsLube,
    Dry,
    Rusty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChainTension {
    Good,
    Loose,
    Tight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum LightFunction {
    Working,
    Dim,
    NotWorking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum HornFunction {
    Working,
    NotWorking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MirrorCondition {
    Good,
    Cracked,
    Missing,
}

/// User-reported current state of the vehicle.
///
/// Wear levels are percentage of life *remaining* (80 = 20% worn).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VehicleCondition {
    pub current_odometer_km: f64,
    pub tire_pressure_front_psi: Option<f64>,
    pub tire_pressure_rear_psi: Option<f64>,
    pub tire_wear_front_pct: f64,
    pub tire_wear_rear_pct: f64,
    pub brake_pad_wear_front_pct: f64,
    pub brake_pad_wear_rear_pct: f64,
    pub brake_fluid_level: FluidLevel,
    pub chain_lube_status: ChainLube,
    pub chain_tension_status: ChainTension,
    pub oil_level_status: FluidLevel,
    /// Only meaningful for liquid-cooled vehicles.
    pub coolant_level_status: FluidLevel,
    pub battery_health_pct: f64,
    pub headlight_function: LightFunction,
    pub taillight_function: LightFunction,
    pub turn_signal_function: LightFunction,
    pub horn_function: HornFunction,
    pub mirror_condition: MirrorCondition,
    pub last_tire_change_km: f64,
    pub last_oil_change_km: f64,
    pub last_brake_pad_change_km: f64,
    pub last_chain_change_km: f64,
    pub last_service_km: f64,
    pub last_service_date: Option<NaiveDate>,
    /// Free text, e.g. "check engine light", "clutch slipping".
    pub recent_issues: Vec<String>,
    /// Free text, e.g. "aftermarket exhaust", "crash guards".
    pub customizations: Vec<String>,
}

impl Default for VehicleCondition {
    fn default() -> Self {
        Self {
            current_odometer_km: 0.0,
            tire_pressure_front_psi: None,
            tire_pressure_rear_psi: None,
            tire_wear_front_pct: 80.0,
            tire_wear_rear_pct: 80.0,
            brake_pad_wear_front_pct: 80.0,
            brake_pad_wear_rear_pct: 80.0,
            brake_fluid_level: FluidLevel::Good,
            chain_lube_status: ChainLube::Good,
            chain_tension_status: ChainTension::Good,
            oil_level_status: FluidLevel::Good,
            coolant_level_status: FluidLevel::Good,
            battery_health_pct: 90.0,
            headlight_function: LightFunction::Working,
            taillight_function: LightFunction::Working,
            turn_signal_function: LightFunction::Working,
            horn_function: HornFunction::Working,
            mirror_condition: MirrorCondition::Good,
            last_tire_change_km: 0.0,
            last_oil_change_km: 0.0,
            last_brake_pad_change_km: 0.0,
            last_chain_change_km: 0.0,
            last_service_km: 0.0,
            last_service_date: None,
            recent_issues: Vec::new(),
            customizations: Vec::new(),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    Low,
    Moderate,
    High,
    Critical,
}

/// Derived vehicle metrics. Recomputed whenever specs or condition change;
/// reset to the unloaded shape while the spec sheet is absent.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CalculatedMetrics {
    /// Estimated HP per kg.
    pub power_to_weight: Option<f64>,
    /// Estimated range on a full tank in km.
    pub estimated_range_km: Option<f64>,
    pub fuel_cost_per_100km: Option<f64>,
    pub next_service_due_km: Option<f64>,
    pub next_service_due_date: Option<NaiveDate>,
    pub next_tire_change_due_km: Option<f64>,
    pub next_brake_pad_change_due_km: Option<f64>,
    pub next_chain_change_due_km: Option<f64>,
    /// Negative when the component is overdue.
    pub remaining_tire_life_km: Option<f64>,
    pub remaining_brake_pad_life_km: Option<f64>,
    pub remaining_chain_life_km: Option<f64>,
    pub maintenance_urgency: UrgencyLevel,
    pub age_of_vehicle_years: Option<i32>,
    /// Free-text verdict on the vehicle's fitness per terrain class.
    pub terrain_suitability: Option<String>,
}

impl Default for CalculatedMetrics {
    fn default() -> Self {
        Self {
            power_to_weight: None,
            estimated_range_km: None,
            fuel_cost_per_100km: None,
            next_service_due_km: None,
            next_service_due_date: None,
            next_tire_change_due_km: None,
            next_brake_pad_change_due_km: None,
            next_chain_change_due_km: None,
            remaining_tire_life_km: None,
            remaining_brake_pad_life_km: None,
            remaining_chain_life_km: None,
            maintenance_urgency: UrgencyLevel::Low,
            age_of_vehicle_years: None,
            terrain_suitability: None,
        }
    }
}

/// Vehicle-facing recommendation block, regenerated on every state change.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VehicleReport {
    pub maintenance_tips: String,
    pub performance_tips: String,
    pub safety_alerts: String,
    pub sentiment: Sentiment,
}

impl Default for VehicleReport {
    fn default() -> Self {
        Self {
            maintenance_tips: String::new(),
            performance_tips: String::new(),
            safety_alerts: String::new(),
            sentiment: Sentiment::Neutral,
        }
    }
}
