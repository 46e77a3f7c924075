use serde::{Deserialize, Serialize};

/// Opaque flight details carried from a result card into the save workflow.
///
/// Filtering never looks inside; the payload is only snapshotted and posted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct FlightPayload(pub serde_json::Value);

impl FlightPayload {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Serialized form stored in `data-flight` attributes and the modal's hidden input.
    pub fn to_attribute(&self) -> String {
        self.0.to_string()
    }

    pub fn from_attribute(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw).map(Self)
    }
}

/// A flight offer as rendered in the search results list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightOffer {
    pub price: f64,
    pub stops: u32,
    pub airline: String,
    #[serde(default)]
    pub payload: FlightPayload,
}

impl FlightOffer {
    pub fn new(price: f64, stops: u32, airline: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            price,
            stops,
            airline: airline.into(),
            payload: FlightPayload(payload),
        }
    }
}
