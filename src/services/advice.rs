//! Recommendation generators.
//!
//! Three deterministic passes over the combined session state, each emitting
//! an ordered list of sentences joined into one string plus a sentiment that
//! only escalates within a pass:
//!
//! - rider risk assessment
//! - rider coach tips
//! - the vehicle report (maintenance tips, performance tips, safety alerts)
//!
//! None of them mutate their inputs.

use chrono::NaiveDate;

use crate::domain::itinerary::Sentiment;
use crate::domain::rider::{
    AdaptabilityLevel, BmiCategory, DietQuality, FatigueLevel, FitnessLevel, RiderDerived,
    RiderProfile, RidingStyle, StaminaLevel,
};
use crate::domain::trip::{
    ExpectedTerrain, ExternalFactors, RoadConditions, TrafficDensity, TripPreferences,
    WeatherForecast, WeatherTolerance,
};
use crate::domain::vehicle::{
    CalculatedMetrics, ChainLube, ChainTension, CoolingSystem, FluidLevel, HornFunction,
    LightFunction, MirrorCondition, SpecSheet, TireType, UrgencyLevel, VehicleCondition,
    VehicleSpecs,
};

/// Total load above this is called out as heavy, kg.
const HEAVY_LOAD_KG: f64 = 200.0;

/// Oil-change nag threshold, km since last change.
const OIL_CHANGE_NAG_KM: f64 = 5000.0;

/// Issue keywords that make a reported issue safety-critical.
const CRITICAL_ISSUE_KEYWORDS: [&str; 4] = ["engine", "brake", "steering", "suspension"];

/// Rider/trip risk assessment: alert sentences plus an escalating sentiment.
pub fn rider_risk_assessment(
    profile: &RiderProfile,
    derived: &RiderDerived,
    preferences: &TripPreferences,
    factors: &ExternalFactors,
) -> (String, Sentiment) {
    let mut alerts = Vec::new();
    let mut sentiment = Sentiment::Positive;

    if derived.stamina_level == StaminaLevel::Low {
        alerts.push("Rider stamina is low, increasing fatigue risk on longer rides.".to_string());
        sentiment.escalate(Sentiment::Cautionary);
    } else if derived.stamina_level == StaminaLevel::Excellent
        && profile.riding_style == RidingStyle::Aggressive
    {
        alerts.push(
            "High stamina combined with aggressive style requires extra caution on speed and braking."
                .to_string(),
        );
    }

    if let Some(category @ (BmiCategory::Obese | BmiCategory::Underweight)) =
        derived.bmi_category
    {
        alerts.push(format!(
            "Rider BMI is {}, which can impact comfort and endurance.",
            category
        ));
        sentiment.escalate(Sentiment::Neutral);
    }

    match profile.recent_fatigue {
        FatigueLevel::High => {
            alerts.push(
                "High rider fatigue detected. Postpone long rides or take extensive rest."
                    .to_string(),
            );
            sentiment.escalate(Sentiment::Warning);
        }
        FatigueLevel::Moderate => {
            alerts.push("Moderate rider fatigue. Plan shorter rides and frequent breaks.".to_string());
            sentiment.escalate(Sentiment::Neutral);
        }
        _ => {}
    }

    if profile.sleep_hours < 6.0 || profile.hydration_litres < 1.5 {
        alerts.push(
            "Inadequate sleep or hydration can severely impair riding ability and focus. \
             Prioritize rest and water intake."
                .to_string(),
        );
        sentiment.escalate(Sentiment::Cautionary);
    }

    if preferences.expected_terrain == ExpectedTerrain::OffRoad
        && profile.terrain_adaptability == AdaptabilityLevel::Low
    {
        alerts.push(
            "Rider has low terrain adaptability for expected off-road conditions. \
             Proceed with extreme caution or reconsider route."
                .to_string(),
        );
        sentiment.escalate(Sentiment::Cautionary);
    }

    if factors.weather_forecast == WeatherForecast::Rainy
        && preferences.weather_tolerance == WeatherTolerance::FairWeatherOnly
    {
        alerts.push(
            "Rainy weather forecast conflicts with rider preference. Consider rescheduling \
             or preparing for wet conditions (appropriate gear)."
                .to_string(),
        );
        sentiment.escalate(Sentiment::Cautionary);
    } else if matches!(
        factors.weather_forecast,
        WeatherForecast::Windy | WeatherForecast::Hot | WeatherForecast::Cold
    ) {
        alerts.push(format!(
            "Expected weather is {}. Prepare for challenging riding conditions \
             (e.g., wind gusts, heat exhaustion, hypothermia).",
            factors.weather_forecast
        ));
        sentiment.escalate(Sentiment::Cautionary);
    }

    if factors.traffic_density == TrafficDensity::High
        && profile.riding_style == RidingStyle::Aggressive
    {
        alerts.push(
            "High traffic combined with aggressive riding style increases accident risk. \
             Exercise patience and defensive riding."
                .to_string(),
        );
        sentiment.escalate(Sentiment::Cautionary);
    }

    let alert = if alerts.is_empty() {
        "Rider and trip conditions look good!".to_string()
    } else {
        format!("Rider/Trip Risk: {}", alerts.join(" "))
    };
    (alert, sentiment)
}

/// Coach-style tips for the rider, combining profile, trip, and conditions.
pub fn coach_tips(
    profile: &RiderProfile,
    derived: &RiderDerived,
    preferences: &TripPreferences,
    factors: &ExternalFactors,
) -> String {
    let mut tips = Vec::new();

    let name = if profile.name.is_empty() {
        "Rider"
    } else {
        profile.name.as_str()
    };
    tips.push(format!(
        "Hello {}! Let's get you ready for your journey.",
        name
    ));

    match derived.stamina_level {
        StaminaLevel::Low => tips.push(format!(
            "Based on your profile, your stamina seems limited. For a {}-day trip, I highly \
             recommend planning shorter daily distances, perhaps around 100-150 km, with \
             frequent breaks every 1.5-2 hours. Prioritize good sleep and consistent hydration.",
            preferences.trip_duration_days
        )),
        StaminaLevel::High | StaminaLevel::Excellent => tips.push(format!(
            "Your stamina is impressive! You're well-equipped to handle longer days. You can \
             comfortably aim for {} km/day, but remember to still take short breaks to \
             maintain focus.",
            profile.preferred_daily_distance_km
        )),
        StaminaLevel::Moderate => tips.push(
            "Your stamina is moderate. Aim for a balanced approach: around 200-250 km/day. \
             Listen to your body and don't push yourself too hard, especially on the first day."
                .to_string(),
        ),
    }

    if derived.total_load_kg > HEAVY_LOAD_KG {
        tips.push(format!(
            "Your personal load (rider + pillion + luggage) is quite heavy at {} kg. This will \
             impact your bike's handling. Consider offloading non-essentials if possible.",
            derived.total_load_kg
        ));
    } else {
        tips.push(
            "Your personal load is reasonable. Ensure luggage is securely fastened and weight \
             is evenly distributed."
                .to_string(),
        );
    }

    match profile.riding_style {
        RidingStyle::Aggressive => tips.push(
            "Your aggressive riding style can be exhilarating, but remember to always \
             prioritize safety. Maintain ample braking distance, especially in traffic or \
             adverse conditions. Consider a defensive riding course if you haven't already."
                .to_string(),
        ),
        RidingStyle::Scenic => tips.push(
            "Embrace your scenic riding style! Remember to keep an eye on the road, not just \
             the views. Plan stops at beautiful spots to fully enjoy the scenery safely."
                .to_string(),
        ),
        RidingStyle::FuelSaving => tips.push(
            "Your fuel-saving style is smart! Maintain steady speeds and smooth \
             acceleration/deceleration. This also contributes to a more relaxed ride and \
             less fatigue."
                .to_string(),
        ),
        RidingStyle::Balanced => {}
    }

    if profile.terrain_adaptability == AdaptabilityLevel::Low {
        tips.push(format!(
            "You've indicated low comfort with varied terrain, but your trip expects {} \
             conditions. Practice on similar terrains before your trip or adjust your route \
             to avoid overly challenging sections.",
            preferences.expected_terrain
        ));
    }

    if profile.fitness_level == FitnessLevel::Low || profile.diet_quality == DietQuality::Poor {
        tips.push(
            "For optimal riding performance and enjoyment, consider improving your general \
             fitness and diet quality. Even small changes can make a big difference in your \
             endurance and focus."
                .to_string(),
        );
    }
    if profile.sleep_hours < 7.0 {
        tips.push(format!(
            "You're aiming for {} hours of sleep. Try to get at least 7-8 hours, especially \
             before long rides, to maximize alertness and minimize fatigue.",
            profile.sleep_hours
        ));
    }
    if profile.hydration_litres < 2.5 {
        tips.push(format!(
            "Your typical water intake is {} litres. Aim for at least 2.5-3 litres, \
             especially on riding days, to stay well-hydrated and prevent fatigue.",
            profile.hydration_litres
        ));
    }

    if factors.weather_forecast != WeatherForecast::Clear
        || factors.road_conditions != RoadConditions::Good
    {
        tips.push(format!(
            "Heads up on the conditions: expect {} weather and {} roads. Dress appropriately, \
             check your gear, and adjust your riding pace accordingly. Safety first!",
            factors.weather_forecast, factors.road_conditions
        ));
    }
    if factors.traffic_density == TrafficDensity::High {
        tips.push(
            "Anticipate high traffic. Plan your departure to avoid peak hours if possible, or \
             be prepared for slower, stop-and-go riding. Stay patient!"
                .to_string(),
        );
    }

    tips.push(
        "Remember, riding is about the journey as much as the destination. Stay safe, stay \
         hydrated, and enjoy every moment!"
            .to_string(),
    );

    tips.join(" ")
}

/// Maintenance-focused health report for the vehicle.
pub fn maintenance_tips(
    specs: &VehicleSpecs,
    sheet: &SpecSheet,
    condition: &VehicleCondition,
    metrics: &CalculatedMetrics,
    today: NaiveDate,
) -> String {
    let mut tips = Vec::new();
    let odometer = condition.current_odometer_km;

    tips.push(format!(
        "Hello there! Let's take a closer look at the health of your {} {}.",
        specs.make, specs.model
    ));

    match metrics.maintenance_urgency {
        UrgencyLevel::Critical => tips.push(
            "Immediate attention required! Your bike has critical maintenance needs. Please \
             address these before your next ride to ensure safety and prevent further damage."
                .to_string(),
        ),
        UrgencyLevel::High => tips.push(
            "Your bike needs significant attention soon. Schedule maintenance to avoid \
             potential issues escalating and affecting your ride quality."
                .to_string(),
        ),
        UrgencyLevel::Moderate => tips.push(
            "Your bike is due for some checks. Plan for maintenance in the near future to keep \
             it running smoothly."
                .to_string(),
        ),
        UrgencyLevel::Low => tips.push(
            "Your bike is in great shape! Keep up the routine checks to maintain its excellent \
             condition."
                .to_string(),
        ),
    }

    // Full service
    match (metrics.next_service_due_km, metrics.next_service_due_date) {
        (Some(due_km), _) if odometer >= due_km => tips.push(format!(
            "Your bike is overdue for service by {} km. A full service will refresh many \
             components.",
            odometer - due_km
        )),
        (Some(due_km), _) if odometer >= due_km - 500.0 => tips.push(format!(
            "Heads up! Service is due soon! You're within 500 km of your {} km service mark. \
             Time to book that appointment!",
            due_km
        )),
        (_, Some(due_date)) if today >= due_date => tips.push(format!(
            "Your bike's service is overdue by date. It was due around {}.",
            due_date
        )),
        (Some(due_km), Some(due_date)) => tips.push(format!(
            "Your next service is due by {} or at {} km, whichever comes first.",
            due_date, due_km
        )),
        _ => {}
    }

    // Tires
    let tire_life = condition
        .tire_wear_front_pct
        .min(condition.tire_wear_rear_pct);
    if tire_life <= 10.0 {
        tips.push(
            "Your tires are critically worn (less than 10% life left). This is a major safety \
             risk. Replace them immediately!"
                .to_string(),
        );
    } else if tire_life <= 30.0 {
        tips.push(
            "Your tires are showing significant wear (around 30% life left). Consider \
             replacing them soon, especially before long trips or monsoon season."
                .to_string(),
        );
    } else if matches!(metrics.next_tire_change_due_km, Some(due) if odometer >= due - 1000.0) {
        tips.push(format!(
            "Your tires are approaching their typical lifespan. They're due for replacement \
             around {} km. Keep an eye on the tread.",
            metrics.next_tire_change_due_km.unwrap_or_default()
        ));
    } else {
        let fmt_psi = |p: Option<f64>| p.map_or("N/A".to_string(), |v| v.to_string());
        tips.push(format!(
            "Tires look good for now. Remember to check tire pressure (front: {} PSI, rear: \
             {} PSI) regularly for optimal performance and safety!",
            fmt_psi(condition.tire_pressure_front_psi),
            fmt_psi(condition.tire_pressure_rear_psi)
        ));
    }

    // Brakes
    let brake_life = condition
        .brake_pad_wear_front_pct
        .min(condition.brake_pad_wear_rear_pct);
    if brake_life <= 10.0 {
        tips.push(
            "Brake pads are critically worn (less than 10% life left). Get them replaced \
             urgently to ensure effective stopping power!"
                .to_string(),
        );
    } else if brake_life <= 30.0 {
        tips.push(
            "Brake pads are wearing down (around 30% life left). Plan for replacement soon to \
             maintain optimal stopping performance."
                .to_string(),
        );
    } else if matches!(metrics.next_brake_pad_change_due_km, Some(due) if odometer >= due - 1000.0)
    {
        tips.push(format!(
            "Your brake pads are nearing the end of their typical lifespan, due around {} km.",
            metrics.next_brake_pad_change_due_km.unwrap_or_default()
        ));
    } else {
        tips.push(
            "Brakes are in good condition. Always use both front and rear brakes effectively \
             for balanced stopping."
                .to_string(),
        );
    }
    match condition.brake_fluid_level {
        FluidLevel::Critical => tips.push(
            "Brake fluid level is critically low. This can lead to brake failure. Get it \
             checked and topped up immediately!"
                .to_string(),
        ),
        FluidLevel::Low => tips.push(
            "Brake fluid level is low. Top it up soon to ensure consistent braking performance."
                .to_string(),
        ),
        FluidLevel::Good => {}
    }

    // Oil
    match condition.oil_level_status {
        FluidLevel::Critical => tips.push(
            "Engine oil level is dangerously low. Do not ride until it is topped up or \
             changed. Low oil can cause severe engine damage!"
                .to_string(),
        ),
        FluidLevel::Low => tips.push(
            "Engine oil level is low. Please top it up or consider an oil change soon."
                .to_string(),
        ),
        FluidLevel::Good => {
            if condition.last_oil_change_km > 0.0
                && odometer - condition.last_oil_change_km > OIL_CHANGE_NAG_KM
            {
                tips.push(format!(
                    "It's been a while since your last oil change ({} km). Fresh oil keeps your \
                     engine happy!",
                    odometer - condition.last_oil_change_km
                ));
            }
        }
    }

    // Coolant
    if sheet.cooling_system == CoolingSystem::Liquid {
        match condition.coolant_level_status {
            FluidLevel::Critical => tips.push(
                "Coolant level is critically low. Your engine is at high risk of overheating. \
                 Top up immediately!"
                    .to_string(),
            ),
            FluidLevel::Low => tips.push(
                "Coolant level is low. Top it up to prevent overheating, especially in hot \
                 weather."
                    .to_string(),
            ),
            FluidLevel::Good => {}
        }
    }

    // Chain
    match condition.chain_lube_status {
        ChainLube::Rusty => tips.push(
            "Your chain is rusty! This indicates severe neglect and can lead to breakage. Get \
             it cleaned, lubricated, and inspected immediately."
                .to_string(),
        ),
        ChainLube::Dry => tips.push(
            "Your chain is dry and needs lubrication. A dry chain can wear out faster and \
             affect performance. Lube it up!"
                .to_string(),
        ),
        ChainLube::NeedsLube => tips.push(
            "Remember to lube your chain soon for smooth operation and extended life.".to_string(),
        ),
        ChainLube::Good => {}
    }
    match condition.chain_tension_status {
        ChainTension::Loose => tips.push(
            "Your chain is too loose. This can cause erratic power delivery and potentially \
             derail. Get it adjusted."
                .to_string(),
        ),
        ChainTension::Tight => tips.push(
            "Your chain is too tight. This puts excessive strain on the bearings and can \
             damage components. Get it adjusted."
                .to_string(),
        ),
        ChainTension::Good => {
            if matches!(metrics.next_chain_change_due_km, Some(due) if odometer >= due - 1000.0) {
                tips.push(format!(
                    "Your chain is nearing its typical lifespan, due around {} km. Consider a \
                     replacement soon.",
                    metrics.next_chain_change_due_km.unwrap_or_default()
                ));
            }
        }
    }

    // Battery
    if condition.battery_health_pct <= 20.0 {
        tips.push(
            "Your battery health is critically low. This is a high risk for starting issues \
             and breakdown. Consider replacing it immediately."
                .to_string(),
        );
    } else if condition.battery_health_pct <= 40.0 {
        tips.push(
            "Your battery health is low. Consider testing or replacing it to avoid unexpected \
             starting issues, especially in cold weather."
                .to_string(),
        );
    } else {
        tips.push(
            "Battery health looks good. If you don't ride often, consider a trickle charger."
                .to_string(),
        );
    }

    // Lights, horn, mirrors
    let lights = [
        condition.headlight_function,
        condition.taillight_function,
        condition.turn_signal_function,
    ];
    if lights.iter().any(|l| *l != LightFunction::Working)
        || condition.horn_function != HornFunction::Working
    {
        tips.push(
            "Critical safety check: One or more of your lights (headlight, taillight, turn \
             signals) or horn is not fully functional. Get this fixed immediately for your \
             safety and visibility."
                .to_string(),
        );
    }
    if condition.mirror_condition != MirrorCondition::Good {
        tips.push(
            "Your mirrors are not in good condition. Replace or repair them to ensure clear \
             rear visibility."
                .to_string(),
        );
    }

    if !condition.recent_issues.is_empty() {
        tips.push(format!(
            "You've reported these recent issues: {}. It's highly recommended to get these \
             checked by a qualified mechanic as soon as possible.",
            condition.recent_issues.join(", ")
        ));
    }
    if !condition.customizations.is_empty() {
        tips.push(format!(
            "Nice! Your bike has some customizations: {}. Ensure all aftermarket parts are \
             installed correctly and are road-legal.",
            condition.customizations.join(", ")
        ));
    }

    tips.join(" ")
}

/// Tips for getting the best out of the vehicle.
pub fn performance_tips(
    specs: &VehicleSpecs,
    sheet: &SpecSheet,
    metrics: &CalculatedMetrics,
) -> String {
    let mut tips = Vec::new();
    tips.push("Here are some tips to get the best out of your ride:".to_string());

    if let Some(ptw) = metrics.power_to_weight {
        if ptw > 0.15 {
            tips.push(format!(
                "Your {} {} has a fantastic power-to-weight ratio ({} HP/kg)! Enjoy its \
                 spirited performance, but always ride responsibly and within your limits.",
                specs.make, specs.model, ptw
            ));
        } else if ptw < 0.08 {
            tips.push(format!(
                "Your bike has a moderate power-to-weight ratio ({} HP/kg). Focus on smooth \
                 acceleration and maintaining momentum, especially during overtakes or with a \
                 pillion/luggage.",
                ptw
            ));
        }
    }

    if let Some(range) = metrics.estimated_range_km {
        if range < 200.0 {
            tips.push(format!(
                "With an estimated range of {} km, plan your fuel stops carefully, especially \
                 on long routes or in remote areas.",
                range
            ));
        } else {
            tips.push(format!(
                "Your bike offers a good estimated range of {} km. You can cover significant \
                 distances between refills, giving you more freedom.",
                range
            ));
        }
    }

    if sheet.fuel_efficiency_kmpl < 25.0 {
        tips.push(format!(
            "Your fuel efficiency is around {} km/l. To improve it, try maintaining consistent \
             speeds, avoiding aggressive throttle inputs, and ensuring proper tire pressure.",
            sheet.fuel_efficiency_kmpl
        ));
    } else {
        tips.push(format!(
            "Great fuel efficiency at {} km/l! Keep up the smooth riding habits to maximize \
             your mileage.",
            sheet.fuel_efficiency_kmpl
        ));
    }

    if sheet.ground_clearance_mm < 140.0 {
        tips.push(format!(
            "Your ground clearance ({} mm) is on the lower side. Be extra careful over speed \
             breakers, deep potholes, and rough terrain to avoid scraping the underbelly.",
            sheet.ground_clearance_mm
        ));
    } else if sheet.ground_clearance_mm >= 200.0 {
        tips.push(format!(
            "With {} mm ground clearance, your bike is well-suited for varied and even \
             challenging terrains. Explore with confidence, but always assess the path ahead!",
            sheet.ground_clearance_mm
        ));
    }

    if let Some(verdict) = &metrics.terrain_suitability {
        tips.push(format!(
            "Based on its design and your current setup: {}",
            verdict
        ));
    }
    match sheet.tire_type {
        TireType::OffRoad => tips.push(
            "You have off-road tires. These provide excellent grip on loose surfaces, but be \
             aware they might affect on-road handling, cornering, and braking, especially in \
             wet conditions."
                .to_string(),
        ),
        TireType::Road => tips.push(
            "You have road tires. These are optimized for asphalt and provide good grip and \
             handling on paved surfaces."
                .to_string(),
        ),
        TireType::DualSport => tips.push(
            "Your dual-sport tires offer a good balance for both on-road and light off-road \
             adventures. They are versatile for mixed terrain riding."
                .to_string(),
        ),
        TireType::Sport => tips.push(
            "Your sport tires offer excellent grip for spirited riding and track days. Ensure \
             they are at optimal temperature for maximum performance, and always be aware of \
             road conditions."
                .to_string(),
        ),
    }

    if sheet.has_abs {
        tips.push(
            "Your bike has ABS (Anti-lock Braking System), a great safety feature! It helps \
             prevent wheel lock-up during hard braking, especially on slippery surfaces."
                .to_string(),
        );
    }
    if sheet.has_traction_control {
        tips.push(
            "Traction Control helps manage wheel spin, especially on slippery roads or during \
             aggressive acceleration. It adds an extra layer of safety."
                .to_string(),
        );
    }
    if sheet.has_quick_shifter {
        tips.push(
            "Enjoy seamless gear changes with your quick shifter! It allows for faster \
             acceleration and smoother downshifts without using the clutch."
                .to_string(),
        );
    }

    if let Some(age) = metrics.age_of_vehicle_years {
        if age > 10 {
            tips.push(format!(
                "Your bike is {} years old. Older bikes might require a bit more care and \
                 attention to maintain peak performance. Regular checks are even more important.",
                age
            ));
        }
    }

    if !sheet.emission_standard.is_empty() {
        tips.push(format!(
            "Your bike is a {} model. Be aware of changing emission norms in some cities or \
             regions, which might affect future usability.",
            sheet.emission_standard
        ));
    }

    tips.join(" ")
}

/// Critical safety alerts from the current vehicle condition.
pub fn safety_alerts(
    sheet: &SpecSheet,
    condition: &VehicleCondition,
    metrics: &CalculatedMetrics,
) -> (String, Sentiment) {
    let mut alerts = Vec::new();
    let mut sentiment = Sentiment::Positive;

    if condition.tire_wear_front_pct <= 10.0 || condition.tire_wear_rear_pct <= 10.0 {
        alerts.push(
            "CRITICAL: Tire wear is dangerously low. Risk of loss of grip and blowouts. \
             Replace immediately!"
                .to_string(),
        );
        sentiment.escalate(Sentiment::Warning);
    }
    if condition.brake_pad_wear_front_pct <= 10.0 || condition.brake_pad_wear_rear_pct <= 10.0 {
        alerts.push(
            "CRITICAL: Brake pads are severely worn. Risk of brake failure. Replace \
             immediately!"
                .to_string(),
        );
        sentiment.escalate(Sentiment::Warning);
    }
    if condition.chain_lube_status == ChainLube::Rusty
        || condition.chain_tension_status != ChainTension::Good
    {
        alerts.push(
            "CRITICAL: Chain condition is poor (rusty or incorrect tension). Risk of chain \
             breakage or derailment. Address immediately!"
                .to_string(),
        );
        sentiment.escalate(Sentiment::Warning);
    }

    if condition.oil_level_status == FluidLevel::Critical {
        alerts.push(
            "CRITICAL: Engine oil level is dangerously low. Severe engine damage imminent. \
             Do NOT ride until topped up!"
                .to_string(),
        );
        sentiment.escalate(Sentiment::Warning);
    }
    if sheet.cooling_system == CoolingSystem::Liquid
        && condition.coolant_level_status == FluidLevel::Critical
    {
        alerts.push(
            "CRITICAL: Coolant level is dangerously low. High risk of engine overheating and \
             damage. Top up immediately!"
                .to_string(),
        );
        sentiment.escalate(Sentiment::Warning);
    }
    if condition.brake_fluid_level == FluidLevel::Critical {
        alerts.push(
            "CRITICAL: Brake fluid level is dangerously low. Risk of brake failure. Get it \
             checked and topped up immediately!"
                .to_string(),
        );
        sentiment.escalate(Sentiment::Warning);
    }

    if condition.battery_health_pct <= 10.0 {
        alerts.push(
            "CRITICAL: Battery health is extremely poor. High risk of breakdown and starting \
             failure."
                .to_string(),
        );
        sentiment.escalate(Sentiment::Warning);
    }
    let lights = [
        condition.headlight_function,
        condition.taillight_function,
        condition.turn_signal_function,
    ];
    if lights.contains(&LightFunction::NotWorking)
        || condition.horn_function == HornFunction::NotWorking
    {
        alerts.push(
            "CRITICAL: Essential safety component (lights or horn) is not working. Do NOT \
             ride, especially at night or in traffic, until fixed!"
                .to_string(),
        );
        sentiment.escalate(Sentiment::Warning);
    }
    if condition.mirror_condition == MirrorCondition::Missing {
        alerts.push(
            "CRITICAL: Mirror is missing. Riding without proper rear visibility is extremely \
             dangerous and illegal. Do NOT ride until replaced!"
                .to_string(),
        );
        sentiment.escalate(Sentiment::Warning);
    }

    if !condition.recent_issues.is_empty() {
        let critical = condition.recent_issues.iter().any(|issue| {
            let lower = issue.to_lowercase();
            CRITICAL_ISSUE_KEYWORDS.iter().any(|kw| lower.contains(kw))
        });
        if critical {
            alerts.push(format!(
                "URGENT: You've reported critical issues: {}. These can severely compromise \
                 safety. Get professional diagnosis immediately.",
                condition.recent_issues.join(", ")
            ));
            sentiment.escalate(Sentiment::Warning);
        } else {
            alerts.push(format!(
                "You've reported recent issues: {}. While not immediately critical, get them \
                 checked soon to prevent escalation.",
                condition.recent_issues.join(", ")
            ));
            sentiment.escalate(Sentiment::Cautionary);
        }
    }

    if metrics.maintenance_urgency == UrgencyLevel::Critical {
        alerts.push(
            "Overall maintenance status is CRITICAL. Riding is not recommended until all \
             identified issues are resolved."
                .to_string(),
        );
        sentiment.escalate(Sentiment::Warning);
    }

    if alerts.is_empty() {
        (
            "No immediate safety concerns detected. Your bike appears ready for the road!"
                .to_string(),
            Sentiment::Positive,
        )
    } else {
        (format!("Safety Alert: {}", alerts.join(" ")), sentiment)
    }
}

/// Overall vehicle sentiment from the safety pass and the urgency level.
pub fn overall_vehicle_sentiment(safety: Sentiment, urgency: UrgencyLevel) -> Sentiment {
    if safety == Sentiment::Warning || urgency == UrgencyLevel::Critical {
        Sentiment::Warning
    } else if safety == Sentiment::Cautionary || urgency == UrgencyLevel::High {
        Sentiment::Cautionary
    } else if urgency == UrgencyLevel::Moderate {
        Sentiment::Neutral
    } else {
        Sentiment::Positive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vehicle::{BrakeType, SuspensionType, TransmissionType};

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

    fn specs() -> VehicleSpecs {
        VehicleSpecs {
            make: "Royal Enfield".to_string(),
            model: "Himalayan".to_string(),
            year: Some(2022),
            sheet: Some(sheet()),
        }
    }

    #[test]
    fn test_rider_risk_all_clear() {
        let derived = RiderDerived {
            stamina_level: StaminaLevel::High,
            ..RiderDerived::default()
        };
        let (alert, sentiment) = rider_risk_assessment(
            &RiderProfile::default(),
            &derived,
            &TripPreferences::default(),
            &ExternalFactors::default(),
        );
        assert_eq!(alert, "Rider and trip conditions look good!");
        assert_eq!(sentiment, Sentiment::Positive);
    }

    #[test]
    fn test_rider_risk_low_stamina_is_cautionary() {
        let derived = RiderDerived {
            stamina_level: StaminaLevel::Low,
            ..RiderDerived::default()
        };
        let (alert, sentiment) = rider_risk_assessment(
            &RiderProfile::default(),
            &derived,
            &TripPreferences::default(),
            &ExternalFactors::default(),
        );
        assert!(alert.contains("stamina is low"));
        assert_eq!(sentiment, Sentiment::Cautionary);
    }

    #[test]
    fn test_rider_risk_high_fatigue_is_warning() {
        let profile = RiderProfile {
            recent_fatigue: FatigueLevel::High,
            ..RiderProfile::default()
        };
        let (alert, sentiment) = rider_risk_assessment(
            &profile,
            &RiderDerived::default(),
            &TripPreferences::default(),
            &ExternalFactors::default(),
        );
        assert!(alert.contains("High rider fatigue"));
        assert_eq!(sentiment, Sentiment::Warning);
    }

    #[test]
    fn test_rider_risk_never_downgrades() {
        // High fatigue (warning) followed by cautionary checks must stay warning.
        let profile = RiderProfile {
            recent_fatigue: FatigueLevel::High,
            sleep_hours: 4.0,
            ..RiderProfile::default()
        };
        let (_, sentiment) = rider_risk_assessment(
            &profile,
            &RiderDerived::default(),
            &TripPreferences::default(),
            &ExternalFactors::default(),
        );
        assert_eq!(sentiment, Sentiment::Warning);
    }

    #[test]
    fn test_coach_tips_greets_by_name() {
        let profile = RiderProfile {
            name: "Asha".to_string(),
            ..RiderProfile::default()
        };
        let tips = coach_tips(
            &profile,
            &RiderDerived::default(),
            &TripPreferences::default(),
            &ExternalFactors::default(),
        );
        assert!(tips.starts_with("Hello Asha!"));
        assert!(tips.ends_with("enjoy every moment!"));
    }

    #[test]
    fn test_safety_alerts_critical_tire_wear() {
        let condition = VehicleCondition {
            tire_wear_front_pct: 8.0,
            ..VehicleCondition::default()
        };
        let (alert, sentiment) = safety_alerts(&sheet(), &condition, &CalculatedMetrics::default());
        assert!(alert.contains("CRITICAL: Tire wear is dangerously low"));
        assert_eq!(sentiment, Sentiment::Warning);
    }

    #[test]
    fn test_safety_alerts_all_clear() {
        let (alert, sentiment) = safety_alerts(
            &sheet(),
            &VehicleCondition::default(),
            &CalculatedMetrics::default(),
        );
        assert!(alert.contains("No immediate safety concerns"));
        assert_eq!(sentiment, Sentiment::Positive);
    }

    #[test]
    fn test_safety_alerts_minor_issue_is_cautionary() {
        let condition = VehicleCondition {
            recent_issues: vec!["loose mudguard".to_string()],
            ..VehicleCondition::default()
        };
        let (alert, sentiment) = safety_alerts(&sheet(), &condition, &CalculatedMetrics::default());
        assert!(alert.contains("loose mudguard"));
        assert_eq!(sentiment, Sentiment::Cautionary);
    }

    #[test]
    fn test_maintenance_tips_overdue_service() {
        let condition = VehicleCondition {
            current_odometer_km: 11000.0,
            ..VehicleCondition::default()
        };
        let metrics = CalculatedMetrics {
            next_service_due_km: Some(10000.0),
            ..CalculatedMetrics::default()
        };
        let today = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        let tips = maintenance_tips(&specs(), &sheet(), &condition, &metrics, today);
        assert!(tips.contains("overdue for service by 1000 km"));
    }

    #[test]
    fn test_performance_tips_mentions_range_and_abs() {
        let metrics = CalculatedMetrics {
            estimated_range_km: Some(450.0),
            power_to_weight: Some(0.11),
            terrain_suitability: Some("Excellent for off-road and touring.".to_string()),
            ..CalculatedMetrics::default()
        };
        let tips = performance_tips(&specs(), &sheet(), &metrics);
        assert!(tips.contains("good estimated range of 450 km"));
        assert!(tips.contains("ABS"));
        assert!(tips.contains("Excellent for off-road and touring."));
    }

    #[test]
    fn test_overall_vehicle_sentiment_mapping() {
        assert_eq!(
            overall_vehicle_sentiment(Sentiment::Warning, UrgencyLevel::Low),
            Sentiment::Warning
        );
        assert_eq!(
            overall_vehicle_sentiment(Sentiment::Positive, UrgencyLevel::Critical),
            Sentiment::Warning
        );
        assert_eq!(
            overall_vehicle_sentiment(Sentiment::Positive, UrgencyLevel::High),
            Sentiment::Cautionary
        );
        assert_eq!(
            overall_vehicle_sentiment(Sentiment::Positive, UrgencyLevel::Moderate),
            Sentiment::Neutral
        );
        assert_eq!(
            overall_vehicle_sentiment(Sentiment::Positive, UrgencyLevel::Low),
            Sentiment::Positive
        );
    }
}
