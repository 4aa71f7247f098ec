pub mod itinerary;
pub mod rider;
pub mod trip;
pub mod vehicle;
