pub mod advice;
pub mod itinerary;
pub mod maintenance;
pub mod metrics;
pub mod session;
pub mod specs;
pub mod stamina;
