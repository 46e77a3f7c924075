use async_trait::async_trait;
use xpedition_shared::{
    CreateItineraryRequest, CreateItineraryResponse, SaveFlightRequest, SaveFlightResponse,
    SettingsResponse, SettingsUpdate,
};

/// Failure to get a decodable answer from the backend at all.
///
/// Backend-reported failures (`success: false`) are not errors at this level;
/// they come back as regular responses.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("Malformed response: {0}")]
    Decode(String),
}

/// Backend endpoints the page talks to
#[async_trait]
pub trait TravelBackend: Send + Sync {
    async fn save_flight(&self, request: &SaveFlightRequest) -> Result<SaveFlightResponse, BackendError>;

    async fn create_itinerary(
        &self,
        request: &CreateItineraryRequest,
    ) -> Result<CreateItineraryResponse, BackendError>;

    async fn update_settings(&self, update: &SettingsUpdate) -> Result<SettingsResponse, BackendError>;
}
