//! Itinerary generator.
//!
//! A small state machine over the trip duration: each day picks a fresh
//! destination from a fixed pool, sizes the day's distance from rider
//! preference, pace, and stamina, simulates fuel burn and stop placement,
//! scores the day's risk, and emits day tips. All randomness is drawn from
//! an injected ChaCha generator so a pinned seed reproduces the plan
//! exactly.

use chrono::{Days, NaiveDate};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::domain::itinerary::{
    ItineraryDay, OverallRecommendation, RiskLevel, Sentiment, StopKind, StopPoint, TripPlan,
};
use crate::domain::rider::{
    AdaptabilityLevel, FatigueLevel, RiderDerived, RiderProfile, RiderRecommendation, RidingStyle,
    StaminaLevel,
};
use crate::domain::trip::{
    ComfortPriority, ExpectedTerrain, ExternalFactors, Pace, RoadConditions, TrafficDensity,
    TripPreferences, WeatherForecast, WeatherTolerance,
};
use crate::domain::vehicle::{
    BrakeType, CalculatedMetrics, UrgencyLevel, VehicleCondition, VehicleReport, VehicleSpecs,
};
use crate::errors::AppError;

/// Riding day starts at this hour.
const DAY_START_HOUR: u32 = 8;

/// Minimum riding hours per day, regardless of distance.
const MIN_RIDING_HOURS: f64 = 3.0;

/// Off-road days are capped at this distance.
const OFF_ROAD_DAILY_CAP_KM: f64 = 150.0;

/// Refuel once 70% of the tank has been consumed.
const FUEL_STOP_THRESHOLD: f64 = 0.7;

/// Day-risk thresholds.
const RISK_CRITICAL: u32 = 10;
const RISK_HIGH: u32 = 7;
const RISK_MODERATE: u32 = 4;

/// Average-risk thresholds for the overall trip sentiment.
const TRIP_RISK_WARNING: f64 = 3.5;
const TRIP_RISK_CAUTIONARY: f64 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DestinationKind {
    HillStation,
    CoastalTown,
    HistoricCity,
    HighAltitudeDesert,
    SpiritualTown,
    MountainValley,
    SpiritualCity,
}

/// Simulated destination pool for multi-day trips.
const DESTINATIONS: [(&str, DestinationKind); 10] = [
    ("Shimla", DestinationKind::HillStation),
    ("Goa", DestinationKind::CoastalTown),
    ("Jaipur", DestinationKind::HistoricCity),
    ("Leh", DestinationKind::HighAltitudeDesert),
    ("Rishikesh", DestinationKind::SpiritualTown),
    ("Ooty", DestinationKind::HillStation),
    ("Pondicherry", DestinationKind::CoastalTown),
    ("Udaipur", DestinationKind::HistoricCity),
    ("Manali", DestinationKind::MountainValley),
    ("Varanasi", DestinationKind::SpiritualCity),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DayTerrain {
    Highway,
    Mixed,
    OffRoad,
    WindingMountain,
    CoastalHighway,
    Rural,
}

impl DayTerrain {
    fn avg_speed_kmh(self) -> f64 {
        match self {
            DayTerrain::Highway => 70.0,
            DayTerrain::Mixed => 50.0,
            DayTerrain::OffRoad => 25.0,
            DayTerrain::WindingMountain => 40.0,
            DayTerrain::Rural => 45.0,
            DayTerrain::CoastalHighway => 55.0,
        }
    }
}

impl From<ExpectedTerrain> for DayTerrain {
    fn from(terrain: ExpectedTerrain) -> Self {
        match terrain {
            ExpectedTerrain::Highway => DayTerrain::Highway,
            ExpectedTerrain::Mixed => DayTerrain::Mixed,
            ExpectedTerrain::OffRoad => DayTerrain::OffRoad,
        }
    }
}

impl std::fmt::Display for DayTerrain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DayTerrain::Highway => "highway",
            DayTerrain::Mixed => "mixed",
            DayTerrain::OffRoad => "off-road",
            DayTerrain::WindingMountain => "Winding Mountain Roads",
            DayTerrain::CoastalHighway => "Coastal Highway",
            DayTerrain::Rural => "Rural Roads",
        };
        write!(f, "{}", s)
    }
}

/// Rest-stop interval in riding hours, by stamina level.
fn rest_interval_hours(level: StaminaLevel) -> f64 {
    match level {
        StaminaLevel::Excellent => 3.5,
        StaminaLevel::High => 3.0,
        StaminaLevel::Moderate => 2.5,
        StaminaLevel::Low => 2.0,
    }
}

/// Everything the generator reads. All references into the session; the
/// generator never mutates its inputs.
pub struct PlanContext<'a> {
    pub profile: &'a RiderProfile,
    pub derived: &'a RiderDerived,
    pub preferences: &'a TripPreferences,
    pub factors: &'a ExternalFactors,
    pub specs: &'a VehicleSpecs,
    pub condition: &'a VehicleCondition,
    pub metrics: &'a CalculatedMetrics,
    pub rider_recommendation: &'a RiderRecommendation,
    pub vehicle_report: &'a VehicleReport,
}

/// Generate a day-by-day trip plan.
///
/// Refuses to run unless the rider profile core fields are present and the
/// vehicle spec sheet has been loaded.
pub fn generate_plan(
    ctx: &PlanContext<'_>,
    start_date: NaiveDate,
    seed: u64,
) -> Result<TripPlan, AppError> {
    let rider_complete = !ctx.profile.name.is_empty()
        && ctx.profile.age.is_some()
        && ctx.profile.height_cm.is_some()
        && ctx.profile.weight_kg.is_some();
    let vehicle_complete =
        !ctx.specs.make.is_empty() && !ctx.specs.model.is_empty() && ctx.specs.year.is_some();

    let sheet = match ctx.specs.sheet.as_ref() {
        Some(sheet) if rider_complete && vehicle_complete => sheet,
        _ => {
            return Err(AppError::BadRequest(
                "Please ensure your rider profile and vehicle setup are fully completed and \
                 detailed specs are loaded before generating an itinerary."
                    .to_string(),
            ))
        }
    };

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut current_location = "Your Current City".to_string();
    let mut fuel_level = sheet.fuel_tank_capacity_l;
    let mut days = Vec::with_capacity(ctx.preferences.trip_duration_days as usize);

    for day_num in 1..=ctx.preferences.trip_duration_days {
        let date = start_date
            .checked_add_days(Days::new(u64::from(day_num)))
            .unwrap_or(start_date);
        let (destination, destination_kind) = pick_destination(&mut rng, &current_location);

        // Daily distance from preference, pace, and stamina
        let mut distance = ctx.profile.preferred_daily_distance_km;
        match ctx.preferences.desired_pace {
            Pace::Relaxed => distance *= 0.8,
            Pace::Fast => distance *= 1.2,
            Pace::Moderate => {}
        }
        match ctx.derived.stamina_level {
            StaminaLevel::Low => distance *= 0.7,
            StaminaLevel::Excellent => distance *= 1.1,
            _ => {}
        }

        let mut terrain = DayTerrain::from(ctx.preferences.expected_terrain);
        if terrain == DayTerrain::OffRoad && distance > OFF_ROAD_DAILY_CAP_KM {
            distance = OFF_ROAD_DAILY_CAP_KM;
        }
        match destination_kind {
            DestinationKind::HillStation | DestinationKind::MountainValley => {
                terrain = DayTerrain::WindingMountain;
            }
            DestinationKind::CoastalTown => terrain = DayTerrain::CoastalHighway,
            _ => {}
        }
        if terrain == DayTerrain::Mixed && rng.gen_bool(0.5) {
            terrain = DayTerrain::Rural;
        }

        let estimated_time_hours =
            crate::helpers::round1(distance / terrain.avg_speed_kmh()).max(MIN_RIDING_HOURS);

        // Stops, keyed by hour until the final sort
        let mut stops: Vec<(u32, StopPoint)> = Vec::new();

        // Fuel burn and refuel
        fuel_level -= distance / sheet.fuel_efficiency_kmpl;
        if fuel_level <= sheet.fuel_tank_capacity_l * (1.0 - FUEL_STOP_THRESHOLD) {
            let mark_km = (distance * rng.gen::<f64>()).floor();
            let hour = DAY_START_HOUR + (estimated_time_hours * 0.2).floor() as u32;
            stops.push((
                hour,
                StopPoint {
                    name: "Fuel Stop".to_string(),
                    kind: StopKind::Fuel,
                    location: format!("Fuel Station near {} km mark", mark_km),
                    time: format_hour(hour),
                },
            ));
            fuel_level = sheet.fuel_tank_capacity_l;
        }

        // Rest / food / scenic stops at stamina-driven intervals
        let interval = rest_interval_hours(ctx.derived.stamina_level);
        let segment_km = distance / (estimated_time_hours / interval);
        let mut riding_time = 0.0;
        let mut covered_km = 0.0;
        loop {
            riding_time += interval;
            if riding_time >= estimated_time_hours {
                break;
            }
            let hour = DAY_START_HOUR + riding_time.floor() as u32;
            let location = format!("Rest Area at {} km", (covered_km + segment_km).round());
            let roll: f64 = rng.gen();
            if roll < 0.4 {
                stops.push((
                    hour,
                    StopPoint {
                        name: "Short Rest Stop".to_string(),
                        kind: StopKind::Rest,
                        location,
                        time: format_hour(hour),
                    },
                ));
            } else if roll < 0.7 {
                stops.push((
                    hour,
                    StopPoint {
                        name: "Lunch/Snack Break".to_string(),
                        kind: StopKind::Food,
                        location,
                        time: format_hour(hour),
                    },
                ));
            } else if ctx.preferences.comfort_priority == ComfortPriority::Scenery
                || rng.gen_bool(0.5)
            {
                stops.push((
                    hour,
                    StopPoint {
                        name: "Scenic Viewpoint".to_string(),
                        kind: StopKind::Sightseeing,
                        location,
                        time: format_hour(hour),
                    },
                ));
            }
            covered_km += segment_km;
        }

        // Every day gets at least one food stop
        if !stops.iter().any(|(_, s)| s.kind == StopKind::Food) {
            stops.push((
                13,
                StopPoint {
                    name: "Lunch Break".to_string(),
                    kind: StopKind::Food,
                    location: format!("Restaurant in {}", destination),
                    time: format_hour(13),
                },
            ));
        }
        stops.sort_by_key(|(hour, _)| *hour);
        let stop_points: Vec<StopPoint> = stops.into_iter().map(|(_, s)| s).collect();

        let risk_level = day_risk(ctx, terrain, estimated_time_hours);
        let day_tips = day_tips(ctx, terrain, estimated_time_hours, distance, risk_level);

        days.push(ItineraryDay {
            day: day_num,
            date,
            start_location: current_location.clone(),
            destination: destination.to_string(),
            distance_km: distance.round(),
            estimated_time_hours,
            terrain: terrain.to_string(),
            risk_level,
            stop_points,
            day_tips,
        });

        current_location = destination.to_string();
    }

    let overall = overall_recommendation(ctx, &days);
    let total_distance_km = days.iter().map(|d| d.distance_km).sum();
    let total_riding_hours = days.iter().map(|d| d.estimated_time_hours).sum();

    Ok(TripPlan {
        seed,
        days,
        total_distance_km,
        total_riding_hours,
        overall,
    })
}

/// Pick a destination different from the current location. Uniform choice;
/// never repeats the current location unless the pool is exhausted.
fn pick_destination(rng: &mut ChaCha8Rng, current: &str) -> (&'static str, DestinationKind) {
    let available: Vec<_> = DESTINATIONS
        .iter()
        .filter(|(name, _)| *name != current)
        .collect();
    if available.is_empty() {
        return DESTINATIONS[rng.gen_range(0..DESTINATIONS.len())];
    }
    *available[rng.gen_range(0..available.len())]
}

fn format_hour(hour: u32) -> String {
    format!("{:02}:00", hour)
}

/// Weighted predicate checks for one day's risk.
fn day_risk(ctx: &PlanContext<'_>, terrain: DayTerrain, estimated_time_hours: f64) -> RiskLevel {
    let mut score: u32 = 0;

    // Rider fatigue and stamina
    if ctx.derived.stamina_level == StaminaLevel::Low {
        score += 3;
    }
    if estimated_time_hours > 6.0 && ctx.derived.stamina_level == StaminaLevel::Moderate {
        score += 2;
    }
    if ctx.profile.recent_fatigue == FatigueLevel::High {
        score += 5;
    }

    // Vehicle condition
    if matches!(
        ctx.metrics.maintenance_urgency,
        UrgencyLevel::High | UrgencyLevel::Critical
    ) {
        score += 4;
    }
    if ctx.vehicle_report.sentiment == Sentiment::Warning {
        score += 5;
    }

    // Terrain
    if terrain == DayTerrain::OffRoad && ctx.profile.terrain_adaptability == AdaptabilityLevel::Low
    {
        score += 5;
    }
    if terrain == DayTerrain::WindingMountain && ctx.profile.riding_style == RidingStyle::Aggressive
    {
        score += 3;
    }

    // External factors
    if matches!(
        ctx.factors.weather_forecast,
        WeatherForecast::Rainy | WeatherForecast::Windy
    ) {
        score += 4;
    }
    if matches!(
        ctx.factors.road_conditions,
        RoadConditions::Rough | RoadConditions::Patchy
    ) {
        score += 3;
    }
    if ctx.factors.traffic_density == TrafficDensity::High {
        score += 2;
    }

    if score >= RISK_CRITICAL {
        RiskLevel::Critical
    } else if score >= RISK_HIGH {
        RiskLevel::High
    } else if score >= RISK_MODERATE {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}

/// Predicate-triggered tips for a single day.
fn day_tips(
    ctx: &PlanContext<'_>,
    terrain: DayTerrain,
    estimated_time_hours: f64,
    distance_km: f64,
    risk_level: RiskLevel,
) -> String {
    let mut tips = Vec::new();
    tips.push(format!("Prepare for {} terrain.", terrain));

    if estimated_time_hours > 5.0 {
        tips.push("This is a longer riding day, ensure you take ample rest breaks.".to_string());
    }
    if matches!(risk_level, RiskLevel::High | RiskLevel::Critical) {
        tips.push(format!(
            "High risk detected for this day. Exercise extreme caution, especially with {} \
             weather and {} roads.",
            ctx.factors.weather_forecast, ctx.factors.road_conditions
        ));
    }
    if let Some(sheet) = &ctx.specs.sheet {
        if terrain == DayTerrain::OffRoad && sheet.ground_clearance_mm < 180.0 {
            tips.push(
                "Your vehicle might have limited ground clearance for off-road sections. Ride \
                 carefully."
                    .to_string(),
            );
        }
        if terrain == DayTerrain::WindingMountain && sheet.brake_type != BrakeType::Abs {
            tips.push(
                "Be extra cautious on winding roads without ABS. Maintain safe speeds."
                    .to_string(),
            );
        }
    }
    if ctx.profile.hydration_litres < 2.5 {
        tips.push("Remember to hydrate frequently throughout the day.".to_string());
    }
    if ctx.profile.sleep_hours < 7.0 {
        tips.push("Ensure you get enough sleep before this day's ride.".to_string());
    }
    if matches!(ctx.metrics.estimated_range_km, Some(range) if range < distance_km * 1.2) {
        tips.push("Fuel stop is critical today, monitor your tank closely.".to_string());
    }

    tips.join(" ")
}

/// Aggregate the day array into totals, sentiment, and the merged
/// trip-level recommendation block.
fn overall_recommendation(ctx: &PlanContext<'_>, days: &[ItineraryDay]) -> OverallRecommendation {
    let total_distance_km: f64 = days.iter().map(|d| d.distance_km).sum();
    let total_riding_hours: f64 = days.iter().map(|d| d.estimated_time_hours).sum();
    let avg_risk: f64 =
        days.iter().map(|d| d.risk_level.weight()).sum::<f64>() / days.len().max(1) as f64;

    let mut sentiment;
    let mut alerts = Vec::new();
    if avg_risk >= TRIP_RISK_WARNING {
        sentiment = Sentiment::Warning;
        alerts.push(
            "This trip has a high overall risk profile. Reconsider sections or prepare \
             extensively."
                .to_string(),
        );
    } else if avg_risk >= TRIP_RISK_CAUTIONARY {
        sentiment = Sentiment::Cautionary;
        alerts.push(
            "Be cautious! This trip has moderate risks. Pay close attention to daily alerts."
                .to_string(),
        );
    } else {
        sentiment = Sentiment::Positive;
        alerts.push("This trip looks good with manageable risks. Enjoy the ride!".to_string());
    }

    let mut coach = vec![
        ctx.rider_recommendation.coach_tips.clone(),
        ctx.vehicle_report.performance_tips.clone(),
        ctx.vehicle_report.maintenance_tips.clone(),
    ];
    alerts.push(ctx.rider_recommendation.risk_alert.clone());
    alerts.push(ctx.vehicle_report.safety_alerts.clone());

    coach.push(format!(
        "Your total trip distance is approximately {} km over {} days, with about {:.1} hours \
         of riding.",
        total_distance_km,
        days.len(),
        total_riding_hours
    ));
    if ctx.profile.pillion {
        coach.push(
            "Remember to account for the pillion and luggage in your riding style and braking."
                .to_string(),
        );
    }
    if matches!(&ctx.metrics.terrain_suitability, Some(verdict)
            if verdict.contains("Primarily for paved roads"))
        && ctx.preferences.expected_terrain == ExpectedTerrain::OffRoad
    {
        coach.push(
            "Your bike is primarily for paved roads, so exercise extreme caution on any \
             off-road sections planned."
                .to_string(),
        );
    }

    if ctx.preferences.desired_pace == Pace::Fast
        && ctx.derived.stamina_level == StaminaLevel::Low
    {
        alerts.push(
            "Mismatch between desired fast pace and low rider stamina. This significantly \
             increases fatigue risk."
                .to_string(),
        );
        sentiment.escalate(Sentiment::Warning);
    }
    if ctx.preferences.weather_tolerance == WeatherTolerance::FairWeatherOnly
        && ctx.factors.weather_forecast != WeatherForecast::Clear
    {
        alerts.push(format!(
            "Your weather tolerance is 'fair-weather-only' but the forecast is {}. Reconsider \
             trip dates or prepare for adverse conditions.",
            ctx.factors.weather_forecast
        ));
        sentiment.escalate(Sentiment::Warning);
    }

    OverallRecommendation {
        coach_tips: coach.join(" "),
        risk_alert: alerts.join(" "),
        sentiment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vehicle::{
        CoolingSystem, SpecSheet, SuspensionType, TireType, TransmissionType,
    };

    fn sheet() -> SpecSheet {
        SpecSheet {
            engine_cc: 411.0,
            ground_clearance_mm: 220.0,
            vehicle_weight_kg: 199.0,
            fuel_tank_capacity_l: 15.0,
            fuel_efficiency_kmpl: 30.0,
            load_capacity_kg: 200.0,
            tire_type: TireType::OffRoad,
            brake_type: BrakeType::Abs,
            suspension_type: SuspensionType::OffRoad,
            cooling_system: CoolingSystem::Air,
            transmission_type: TransmissionType::Manual,
            service_interval_km: 10000.0,
            service_interval_months: 12,
            emission_standard: "BS6".to_string(),
            has_abs: true,
            has_traction_control: false,
            has_quick_shifter: false,
            typical_tire_lifespan_km: 25000.0,
            typical_brake_pad_lifespan_km: 20000.0,
            typical_chain_lifespan_km: 35000.0,
        }
    }

    struct Fixture {
        profile: RiderProfile,
        derived: RiderDerived,
        preferences: TripPreferences,
        factors: ExternalFactors,
        specs: VehicleSpecs,
        condition: VehicleCondition,
        metrics: CalculatedMetrics,
        rider_recommendation: RiderRecommendation,
        vehicle_report: VehicleReport,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                profile: RiderProfile {
                    name: "Asha".to_string(),
                    age: Some(30),
                    height_cm: Some(175.0),
                    weight_kg: Some(70.0),
                    ..RiderProfile::default()
                },
                derived: RiderDerived {
                    bmi: Some(22.9),
                    stamina_score: 75,
                    stamina_level: StaminaLevel::High,
                    total_load_kg: 70.0,
                    ..RiderDerived::default()
                },
                preferences: TripPreferences {
                    trip_duration_days: 3,
                    ..TripPreferences::default()
                },
                factors: ExternalFactors::default(),
                specs: VehicleSpecs {
                    make: "Royal Enfield".to_string(),
                    model: "Himalayan".to_string(),
                    year: Some(2022),
                    sheet: Some(sheet()),
                },
                condition: VehicleCondition::default(),
                metrics: CalculatedMetrics {
                    estimated_range_km: Some(450.0),
                    ..CalculatedMetrics::default()
                },
                rider_recommendation: RiderRecommendation::default(),
                vehicle_report: VehicleReport::default(),
            }
        }

        fn ctx(&self) -> PlanContext<'_> {
            PlanContext {
                profile: &self.profile,
                derived: &self.derived,
                preferences: &self.preferences,
                factors: &self.factors,
                specs: &self.specs,
                condition: &self.condition,
                metrics: &self.metrics,
                rider_recommendation: &self.rider_recommendation,
                vehicle_report: &self.vehicle_report,
            }
        }
    }

    fn start_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 5).unwrap()
    }

    #[test]
    fn test_plan_has_exactly_n_days() {
        let mut fixture = Fixture::new();
        for n in [1, 3, 7] {
            fixture.preferences.trip_duration_days = n;
            let plan = generate_plan(&fixture.ctx(), start_date(), 42).unwrap();
            assert_eq!(plan.days.len(), n as usize);
        }
    }

    #[test]
    fn test_every_day_has_a_food_stop() {
        let fixture = Fixture::new();
        for seed in 0..20 {
            let plan = generate_plan(&fixture.ctx(), start_date(), seed).unwrap();
            for day in &plan.days {
                assert!(
                    day.stop_points.iter().any(|s| s.kind == StopKind::Food),
                    "day {} of seed {} has no food stop",
                    day.day,
                    seed
                );
            }
        }
    }

    #[test]
    fn test_stops_sorted_chronologically() {
        let fixture = Fixture::new();
        let plan = generate_plan(&fixture.ctx(), start_date(), 7).unwrap();
        for day in &plan.days {
            let hours: Vec<&String> = day.stop_points.iter().map(|s| &s.time).collect();
            let mut sorted = hours.clone();
            sorted.sort();
            assert_eq!(hours, sorted);
        }
    }

    #[test]
    fn test_same_seed_reproduces_plan() {
        let fixture = Fixture::new();
        let a = generate_plan(&fixture.ctx(), start_date(), 99).unwrap();
        let b = generate_plan(&fixture.ctx(), start_date(), 99).unwrap();
        assert_eq!(serde_json::to_value(&a).unwrap(), serde_json::to_value(&b).unwrap());
    }

    #[test]
    fn test_destination_never_repeats_immediately() {
        let mut fixture = Fixture::new();
        fixture.preferences.trip_duration_days = 10;
        let plan = generate_plan(&fixture.ctx(), start_date(), 5).unwrap();
        for day in &plan.days {
            assert_ne!(day.start_location, day.destination);
        }
    }

    #[test]
    fn test_off_road_days_are_capped() {
        let mut fixture = Fixture::new();
        fixture.preferences.expected_terrain = ExpectedTerrain::OffRoad;
        fixture.profile.preferred_daily_distance_km = 400.0;
        let plan = generate_plan(&fixture.ctx(), start_date(), 3).unwrap();
        for day in &plan.days {
            assert!(day.distance_km <= OFF_ROAD_DAILY_CAP_KM);
        }
    }

    #[test]
    fn test_minimum_riding_hours() {
        let mut fixture = Fixture::new();
        fixture.profile.preferred_daily_distance_km = 40.0;
        let plan = generate_plan(&fixture.ctx(), start_date(), 3).unwrap();
        for day in &plan.days {
            assert!(day.estimated_time_hours >= MIN_RIDING_HOURS);
        }
    }

    #[test]
    fn test_fast_pace_with_low_stamina_is_warning() {
        let mut fixture = Fixture::new();
        fixture.preferences.desired_pace = Pace::Fast;
        fixture.derived.stamina_level = StaminaLevel::Low;
        let plan = generate_plan(&fixture.ctx(), start_date(), 11).unwrap();
        assert_eq!(plan.overall.sentiment, Sentiment::Warning);
        assert!(plan
            .overall
            .risk_alert
            .contains("Mismatch between desired fast pace and low rider stamina"));
    }

    #[test]
    fn test_fair_weather_rider_in_rain_is_warning() {
        let mut fixture = Fixture::new();
        fixture.preferences.weather_tolerance = WeatherTolerance::FairWeatherOnly;
        fixture.factors.weather_forecast = WeatherForecast::Rainy;
        let plan = generate_plan(&fixture.ctx(), start_date(), 11).unwrap();
        assert_eq!(plan.overall.sentiment, Sentiment::Warning);
    }

    #[test]
    fn test_adverse_days_score_higher_risk() {
        let mut fixture = Fixture::new();
        fixture.derived.stamina_level = StaminaLevel::Low;
        fixture.profile.recent_fatigue = FatigueLevel::High;
        fixture.factors.weather_forecast = WeatherForecast::Rainy;
        fixture.factors.road_conditions = RoadConditions::Rough;
        let plan = generate_plan(&fixture.ctx(), start_date(), 2).unwrap();
        // 3 (stamina) + 5 (fatigue) + 4 (weather) + 3 (roads) = 15 → critical
        for day in &plan.days {
            assert_eq!(day.risk_level, RiskLevel::Critical);
        }
    }

    #[test]
    fn test_incomplete_profile_refuses_generation() {
        let mut fixture = Fixture::new();
        fixture.profile.age = None;
        let result = generate_plan(&fixture.ctx(), start_date(), 1);
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_missing_spec_sheet_refuses_generation() {
        let mut fixture = Fixture::new();
        fixture.specs.sheet = None;
        let result = generate_plan(&fixture.ctx(), start_date(), 1);
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_dates_advance_from_start() {
        let fixture = Fixture::new();
        let plan = generate_plan(&fixture.ctx(), start_date(), 42).unwrap();
        assert_eq!(
            plan.days[0].date,
            NaiveDate::from_ymd_opt(2026, 8, 6).unwrap()
        );
        assert_eq!(
            plan.days[2].date,
            NaiveDate::from_ymd_opt(2026, 8, 8).unwrap()
        );
    }

    #[test]
    fn test_totals_match_day_sums() {
        let fixture = Fixture::new();
        let plan = generate_plan(&fixture.ctx(), start_date(), 42).unwrap();
        let distance: f64 = plan.days.iter().map(|d| d.distance_km).sum();
        assert_eq!(plan.total_distance_km, distance);
    }
}
