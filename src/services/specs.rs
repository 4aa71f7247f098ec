//! Vehicle specs lookup.
//!
//! Resolves (make, model, year) to a detailed [`SpecSheet`]. Two providers:
//!
//! - [`SpecsClient`]: remote HTTP service configured via `SPECS_BASE_URL`
//! - built-in catalog: a fixed table of common models, used when no remote
//!   service is configured
//!
//! Both are keyed by (make, model), case-insensitive; the year only
//! identifies the vehicle and does not change the sheet.

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

use crate::domain::vehicle::{
    BrakeType, CoolingSystem, SpecSheet, SuspensionType, TireType, TransmissionType,
};
use crate::errors::AppError;

/// Client for a remote specs-lookup service.
#[derive(Debug, Clone)]
pub struct SpecsClient {
    client: reqwest::Client,
    base_url: String,
    user_agent: String,
}

impl SpecsClient {
    pub fn new(base_url: &str, user_agent: &str) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("Failed to build HTTP client");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent: user_agent.to_string(),
        }
    }

    /// Fetch the spec sheet for a vehicle. `Ok(None)` means the service does
    /// not know the vehicle; transport and server failures are errors.
    pub async fn fetch_sheet(
        &self,
        make: &str,
        model: &str,
        year: i32,
    ) -> Result<Option<SpecSheet>, AppError> {
        let url = format!("{}/specs", self.base_url);

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&self.user_agent)
                .map_err(|e| AppError::InternalError(format!("Invalid User-Agent: {}", e)))?,
        );

        let year_param = year.to_string();
        let response = self
            .client
            .get(&url)
            .headers(headers)
            .query(&[("make", make), ("model", model), ("year", year_param.as_str())])
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Specs lookup request failed: {}", e))
            })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "Specs lookup returned HTTP {}",
                response.status()
            )));
        }

        let sheet: SpecSheet = response.json().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Specs lookup JSON parse error: {}", e))
        })?;
        Ok(Some(sheet))
    }
}

/// Specs lookup provider: remote service or the built-in catalog.
#[derive(Debug, Clone)]
pub enum SpecsProvider {
    Remote(SpecsClient),
    Catalog,
}

impl SpecsProvider {
    /// Provider mode label, reported by the health endpoint.
    pub fn mode(&self) -> &'static str {
        match self {
            SpecsProvider::Remote(_) => "remote",
            SpecsProvider::Catalog => "catalog",
        }
    }

    pub async fn lookup(
        &self,
        make: &str,
        model: &str,
        year: i32,
    ) -> Result<Option<SpecSheet>, AppError> {
        match self {
            SpecsProvider::Remote(client) => client.fetch_sheet(make, model, year).await,
            SpecsProvider::Catalog => Ok(catalog_lookup(make, model)),
        }
    }
}

/// Built-in spec sheets for a handful of common models.
fn catalog_lookup(make: &str, model: &str) -> Option<SpecSheet> {
    let make = make.trim().to_lowercase();
    let model = model.trim().to_lowercase();

    match (make.as_str(), model.as_str()) {
        ("honda", "cb350") => Some(SpecSheet {
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
        }),
        ("honda", "cbr650r") => Some(SpecSheet {
            engine_cc: 649.0,
            ground_clearance_mm: 130.0,
            vehicle_weight_kg: 208.0,
            fuel_tank_capacity_l: 15.4,
            fuel_efficiency_kmpl: 20.0,
            load_capacity_kg: 180.0,
            tire_type: TireType::Sport,
            brake_type: BrakeType::Abs,
            suspension_type: SuspensionType::Adjustable,
            cooling_system: CoolingSystem::Liquid,
            transmission_type: TransmissionType::Manual,
            service_interval_km: 12000.0,
            service_interval_months: 12,
            emission_standard: "BS6".to_string(),
            has_abs: true,
            has_traction_control: true,
            has_quick_shifter: true,
            typical_tire_lifespan_km: 15000.0,
            typical_brake_pad_lifespan_km: 12000.0,
            typical_chain_lifespan_km: 20000.0,
        }),
        ("royal enfield", "himalayan") => Some(SpecSheet {
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
        }),
        ("royal enfield", "classic 350") => Some(SpecSheet {
            engine_cc: 349.0,
            ground_clearance_mm: 170.0,
            vehicle_weight_kg: 195.0,
            fuel_tank_capacity_l: 13.0,
            fuel_efficiency_kmpl: 35.0,
            load_capacity_kg: 160.0,
            tire_type: TireType::Road,
            brake_type: BrakeType::Disc,
            suspension_type: SuspensionType::Standard,
            cooling_system: CoolingSystem::Air,
            transmission_type: TransmissionType::Manual,
            service_interval_km: 5000.0,
            service_interval_months: 6,
            emission_standard: "BS6".to_string(),
            has_abs: true,
            has_traction_control: false,
            has_quick_shifter: false,
            typical_tire_lifespan_km: 20000.0,
            typical_brake_pad_lifespan_km: 18000.0,
            typical_chain_lifespan_km: 30000.0,
        }),
        ("ktm", "390 duke") => Some(SpecSheet {
            engine_cc: 373.0,
            ground_clearance_mm: 185.0,
            vehicle_weight_kg: 163.0,
            fuel_tank_capacity_l: 13.4,
            fuel_efficiency_kmpl: 28.0,
            load_capacity_kg: 150.0,
            tire_type: TireType::Sport,
            brake_type: BrakeType::Abs,
            suspension_type: SuspensionType::UpsideDown,
            cooling_system: CoolingSystem::Liquid,
            transmission_type: TransmissionType::Manual,
            service_interval_km: 7500.0,
            service_interval_months: 12,
            emission_standard: "BS6".to_string(),
            has_abs: true,
            has_traction_control: true,
            has_quick_shifter: true,
            typical_tire_lifespan_km: 12000.0,
            typical_brake_pad_lifespan_km: 10000.0,
            typical_chain_lifespan_km: 18000.0,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_catalog_hit() {
        let sheet = catalog_lookup("Honda", "CB350").unwrap();
        assert_eq!(sheet.engine_cc, 348.0);
        assert_eq!(sheet.tire_type, TireType::DualSport);
    }

    #[test]
    fn test_catalog_is_case_insensitive() {
        assert!(catalog_lookup("ROYAL ENFIELD", "himalayan").is_some());
        assert!(catalog_lookup(" ktm ", " 390 Duke ").is_some());
    }

    #[test]
    fn test_catalog_miss() {
        assert!(catalog_lookup("Honda", "Goldwing").is_none());
    }

    #[tokio::test]
    async fn test_remote_lookup_success() {
        let server = MockServer::start().await;
        let body = serde_json::to_value(catalog_lookup("Honda", "CB350").unwrap()).unwrap();
        Mock::given(method("GET"))
            .and(path("/specs"))
            .and(query_param("make", "Honda"))
            .and(query_param("model", "CB350"))
            .and(query_param("year", "2022"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let client = SpecsClient::new(&server.uri(), "test-agent");
        let sheet = client.fetch_sheet("Honda", "CB350", 2022).await.unwrap();
        assert_eq!(sheet.unwrap().engine_cc, 348.0);
    }

    #[tokio::test]
    async fn test_remote_lookup_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/specs"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = SpecsClient::new(&server.uri(), "test-agent");
        let sheet = client.fetch_sheet("Honda", "Goldwing", 2022).await.unwrap();
        assert!(sheet.is_none());
    }

    #[tokio::test]
    async fn test_remote_lookup_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/specs"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = SpecsClient::new(&server.uri(), "test-agent");
        let result = client.fetch_sheet("Honda", "CB350", 2022).await;
        assert!(matches!(result, Err(AppError::ExternalServiceError(_))));
    }

    #[tokio::test]
    async fn test_provider_catalog_mode() {
        let provider = SpecsProvider::Catalog;
        assert_eq!(provider.mode(), "catalog");
        let sheet = provider.lookup("KTM", "390 Duke", 2023).await.unwrap();
        assert!(sheet.is_some());
    }
}
