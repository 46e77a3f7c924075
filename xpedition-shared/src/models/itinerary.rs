use serde::{Deserialize, Serialize};

/// Selector value that asks for a brand-new itinerary instead of an existing one.
pub const NEW_ITINERARY: &str = "new";

/// An itinerary the user already owns, as listed in the save selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Itinerary {
    pub id: String,
    pub name: String,
}

/// What the itinerary selector currently points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItineraryChoice {
    Unselected,
    CreateNew,
    Existing(String),
}

impl ItineraryChoice {
    pub fn from_value(value: &str) -> Self {
        match value.trim() {
            "" => ItineraryChoice::Unselected,
            NEW_ITINERARY => ItineraryChoice::CreateNew,
            id => ItineraryChoice::Existing(id.to_string()),
        }
    }
}
