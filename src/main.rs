// Ride Coach API v0.1
use axum::routing::{get, patch, post};
use axum::Router;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod domain;
mod errors;
mod helpers;
mod routes;
mod services;

use config::AppConfig;
use routes::AppState;
use services::specs::{SpecsClient, SpecsProvider};

/// Ride Coach API — OpenAPI specification.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ride Coach API",
        version = "0.1.0",
        description = "Motorcycle trip-planning and rider coaching API. \
            Holds per-session rider, vehicle, and trip state, derives stamina, \
            maintenance, and risk metrics, generates seeded multi-day itineraries \
            with stops and per-day risk scoring, and manages saved itinerary \
            snapshots.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Sessions", description = "Session lifecycle and rider-side updates"),
        (name = "Vehicle", description = "Vehicle identity, specs lookup, and condition"),
        (name = "Itineraries", description = "Itinerary generation and saved snapshots"),
    ),
    paths(
        routes::health::health_check,
        routes::sessions::create_session,
        routes::sessions::get_session,
        routes::sessions::reset_session,
        routes::sessions::patch_rider,
        routes::sessions::patch_preferences,
        routes::sessions::patch_factors,
        routes::vehicle::patch_vehicle_specs,
        routes::vehicle::patch_vehicle_condition,
        routes::itineraries::generate_itinerary,
        routes::itineraries::save_itinerary,
        routes::itineraries::list_itineraries,
        routes::itineraries::get_itinerary,
        routes::itineraries::select_itinerary,
        routes::itineraries::delete_itinerary,
    ),
    components(
        schemas(
            routes::health::HealthResponse,
            routes::sessions::SessionResponse,
            routes::sessions::SavedItinerarySummary,
            routes::vehicle::SpecsPatchResponse,
            routes::itineraries::GenerateRequest,
            routes::itineraries::SaveItineraryRequest,
            domain::rider::RiderProfile,
            domain::rider::RiderDerived,
            domain::rider::RiderRecommendation,
            domain::rider::RidingStyle,
            domain::rider::AdaptabilityLevel,
            domain::rider::FatigueLevel,
            domain::rider::FitnessLevel,
            domain::rider::DietQuality,
            domain::rider::PillionGender,
            domain::rider::BmiCategory,
            domain::rider::StaminaLevel,
            domain::trip::TripPreferences,
            domain::trip::ExternalFactors,
            domain::trip::Pace,
            domain::trip::ExpectedTerrain,
            domain::trip::ComfortPriority,
            domain::trip::WeatherTolerance,
            domain::trip::RoadConditions,
            domain::trip::WeatherForecast,
            domain::trip::TrafficDensity,
            domain::vehicle::VehicleSpecs,
            domain::vehicle::VehicleIdentity,
            domain::vehicle::SpecSheet,
            domain::vehicle::VehicleCondition,
            domain::vehicle::CalculatedMetrics,
            domain::vehicle::VehicleReport,
            domain::vehicle::TireType,
            domain::vehicle::BrakeType,
            domain::vehicle::SuspensionType,
            domain::vehicle::CoolingSystem,
            domain::vehicle::TransmissionType,
            domain::vehicle::FluidLevel,
            domain::vehicle::ChainLube,
            domain::vehicle::ChainTension,
            domain::vehicle::LightFunction,
            domain::vehicle::HornFunction,
            domain::vehicle::MirrorCondition,
            domain::vehicle::UrgencyLevel,
            domain::itinerary::TripPlan,
            domain::itinerary::ItineraryDay,
            domain::itinerary::StopPoint,
            domain::itinerary::StopKind,
            domain::itinerary::RiskLevel,
            domain::itinerary::Sentiment,
            domain::itinerary::OverallRecommendation,
            domain::itinerary::SavedItinerary,
            errors::ErrorResponse,
        )
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ride_coach_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();

    // Pick the specs-lookup provider
    let specs_provider = match &config.specs_base_url {
        Some(base_url) => {
            tracing::info!("Using remote specs provider at {}", base_url);
            SpecsProvider::Remote(SpecsClient::new(base_url, &config.specs_user_agent))
        }
        None => {
            tracing::info!("No SPECS_BASE_URL set, using the built-in specs catalog");
            SpecsProvider::Catalog
        }
    };

    // Build shared application state
    let state = AppState {
        sessions: Arc::new(RwLock::new(HashMap::new())),
        specs: Arc::new(specs_provider),
        fuel_price_per_litre: config.fuel_price_per_litre,
    };

    // CORS — session-scoped JSON API, no credentials
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PATCH,
            axum::http::Method::DELETE,
        ])
        .allow_headers(Any);

    // Build router
    let api_routes = Router::new()
        .route("/api/v1/health", get(routes::health::health_check))
        .route("/api/v1/sessions", post(routes::sessions::create_session))
        .route("/api/v1/sessions/:id", get(routes::sessions::get_session))
        .route(
            "/api/v1/sessions/:id/reset",
            post(routes::sessions::reset_session),
        )
        .route(
            "/api/v1/sessions/:id/rider",
            patch(routes::sessions::patch_rider),
        )
        .route(
            "/api/v1/sessions/:id/preferences",
            patch(routes::sessions::patch_preferences),
        )
        .route(
            "/api/v1/sessions/:id/factors",
            patch(routes::sessions::patch_factors),
        )
        .route(
            "/api/v1/sessions/:id/vehicle/specs",
            patch(routes::vehicle::patch_vehicle_specs),
        )
        .route(
            "/api/v1/sessions/:id/vehicle/condition",
            patch(routes::vehicle::patch_vehicle_condition),
        )
        .route(
            "/api/v1/sessions/:id/itinerary/generate",
            post(routes::itineraries::generate_itinerary),
        )
        .route(
            "/api/v1/sessions/:id/itineraries",
            post(routes::itineraries::save_itinerary).get(routes::itineraries::list_itineraries),
        )
        .route(
            "/api/v1/sessions/:id/itineraries/:itinerary_id",
            get(routes::itineraries::get_itinerary)
                .delete(routes::itineraries::delete_itinerary),
        )
        .route(
            "/api/v1/sessions/:id/itineraries/:itinerary_id/select",
            post(routes::itineraries::select_itinerary),
        )
        .with_state(state);

    let app = Router::new()
        .merge(api_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("API server listening on {}", addr);
    tracing::info!(
        "Swagger UI available at http://localhost:{}/swagger-ui/",
        config.port
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind TCP listener");
    axum::serve(listener, app)
        .await
        .expect("Server terminated unexpectedly");
}
