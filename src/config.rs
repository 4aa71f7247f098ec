/// Application configuration, parsed from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    /// Base URL of the remote specs-lookup service. When unset, the
    /// built-in specs catalog answers lookups instead.
    pub specs_base_url: Option<String>,
    /// User-Agent sent to the remote specs-lookup service.
    pub specs_user_agent: String,
    /// Assumed fuel price used for the cost-per-100km metric.
    pub fuel_price_per_litre: f64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("PORT must be a valid u16"),
            specs_base_url: std::env::var("SPECS_BASE_URL").ok(),
            specs_user_agent: std::env::var("SPECS_USER_AGENT")
                .unwrap_or_else(|_| "RideCoach/0.1 ride-coach-api".to_string()),
            fuel_price_per_litre: std::env::var("FUEL_PRICE_PER_LITRE")
                .unwrap_or_else(|_| "100.0".to_string())
                .parse()
                .expect("FUEL_PRICE_PER_LITRE must be a valid number"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        // NOTE: set_var/remove_var in tests is unsafe in multi-threaded contexts
        // (Rust may run tests in parallel). This test only exercises the
        // default-value logic; cargo test runs this module's tests sequentially
        // within one test binary, so we accept the risk.
        unsafe {
            std::env::remove_var("PORT");
            std::env::remove_var("SPECS_BASE_URL");
            std::env::remove_var("SPECS_USER_AGENT");
            std::env::remove_var("FUEL_PRICE_PER_LITRE");
        }

        let config = AppConfig::from_env();

        assert_eq!(config.port, 8080);
        assert!(config.specs_base_url.is_none());
        assert!(config.specs_user_agent.contains("RideCoach"));
        assert_eq!(config.fuel_price_per_litre, 100.0);
    }
}
