use std::sync::Mutex;

use async_trait::async_trait;
use xpedition_core::{BackendError, TravelBackend};
use xpedition_shared::{
    CreateItineraryRequest, CreateItineraryResponse, SaveFlightRequest, SaveFlightResponse,
    SettingsResponse, SettingsUpdate,
};

/// Backend double that records every request. A `None` reply simulates a
/// transport failure.
pub struct RecordingBackend {
    save_reply: Option<SaveFlightResponse>,
    create_reply: Option<CreateItineraryResponse>,
    settings_reply: Option<SettingsResponse>,
    saves: Mutex<Vec<SaveFlightRequest>>,
    creates: Mutex<Vec<CreateItineraryRequest>>,
    settings: Mutex<Vec<SettingsUpdate>>,
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self {
            save_reply: Some(SaveFlightResponse { success: true, error: None }),
            create_reply: Some(CreateItineraryResponse {
                success: true,
                id: Some("1".to_string()),
                name: Some("Itinerary".to_string()),
                error: None,
            }),
            settings_reply: Some(SettingsResponse { success: true, message: None }),
            saves: Mutex::new(Vec::new()),
            creates: Mutex::new(Vec::new()),
            settings: Mutex::new(Vec::new()),
        }
    }
}

impl RecordingBackend {
    pub fn with_save_reply(mut self, reply: Option<SaveFlightResponse>) -> Self {
        self.save_reply = reply;
        self
    }

    pub fn with_create_reply(mut self, reply: Option<CreateItineraryResponse>) -> Self {
        self.create_reply = reply;
        self
    }

    pub fn with_settings_reply(mut self, reply: Option<SettingsResponse>) -> Self {
        self.settings_reply = reply;
        self
    }

    pub fn save_calls(&self) -> Vec<SaveFlightRequest> {
        self.saves.lock().unwrap().clone()
    }

    pub fn create_calls(&self) -> Vec<CreateItineraryRequest> {
        self.creates.lock().unwrap().clone()
    }

    pub fn settings_calls(&self) -> Vec<SettingsUpdate> {
        self.settings.lock().unwrap().clone()
    }
}

fn unreachable_backend() -> BackendError {
    BackendError::Transport("connection refused".to_string())
}

#[async_trait]
impl TravelBackend for RecordingBackend {
    async fn save_flight(&self, request: &SaveFlightRequest) -> Result<SaveFlightResponse, BackendError> {
        self.saves.lock().unwrap().push(request.clone());
        self.save_reply.clone().ok_or_else(unreachable_backend)
    }

    async fn create_itinerary(
        &self,
        request: &CreateItineraryRequest,
    ) -> Result<CreateItineraryResponse, BackendError> {
        self.creates.lock().unwrap().push(request.clone());
        self.create_reply.clone().ok_or_else(unreachable_backend)
    }

    async fn update_settings(&self, update: &SettingsUpdate) -> Result<SettingsResponse, BackendError> {
        self.settings.lock().unwrap().push(update.clone());
        self.settings_reply.clone().ok_or_else(unreachable_backend)
    }
}
