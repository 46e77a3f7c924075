pub mod itinerary;
pub mod offer;
pub mod requests;
pub mod settings;
