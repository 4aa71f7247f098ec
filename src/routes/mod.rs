pub mod health;
pub mod itineraries;
pub mod sessions;
pub mod vehicle;

use std::sync::Arc;

use crate::services::session::SharedSessions;
use crate::services::specs::SpecsProvider;

/// Shared application state for all endpoints.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) sessions: SharedSessions,
    pub(crate) specs: Arc<SpecsProvider>,
    pub(crate) fuel_price_per_litre: f64,
}
