use serde::{Deserialize, Deserializer, Serialize};

use crate::models::offer::FlightPayload;
use crate::models::settings::Theme;
use crate::pii::Masked;

// ============================================================================
// POST /save-flight
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct SaveFlightRequest {
    pub itinerary_id: String,
    pub flight_data: FlightPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaveFlightResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

// ============================================================================
// POST /create-itinerary
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CreateItineraryRequest {
    pub name: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateItineraryResponse {
    pub success: bool,
    #[serde(default, deserialize_with = "id_as_string")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Backends return itinerary ids either as JSON strings or as integers.
fn id_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

// ============================================================================
// POST /settings (form encoded)
// ============================================================================

#[derive(Debug, Clone)]
pub struct SettingsUpdate {
    pub csrf_token: Masked<String>,
    pub theme: Theme,
    pub font_size: String,
    pub notifications_enabled: bool,
    pub language: String,
}

impl SettingsUpdate {
    /// Field pairs in the order the settings form posts them.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("csrf_token", self.csrf_token.0.clone()),
            ("theme", self.theme.as_str().to_string()),
            ("font_size", self.font_size.clone()),
            ("notifications_enabled", self.notifications_enabled.to_string()),
            ("language", self.language.clone()),
        ]
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SettingsResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}
