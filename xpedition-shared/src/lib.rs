pub mod models;
pub mod pii;

pub use models::itinerary::{Itinerary, ItineraryChoice, NEW_ITINERARY};
pub use models::offer::{FlightOffer, FlightPayload};
pub use models::requests::{
    CreateItineraryRequest, CreateItineraryResponse, SaveFlightRequest, SaveFlightResponse,
    SettingsResponse, SettingsUpdate,
};
pub use models::settings::{FontSize, Theme};
pub use pii::Masked;
