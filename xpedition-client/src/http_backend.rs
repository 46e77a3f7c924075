use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{error, info};
use xpedition_core::{BackendError, TravelBackend};
use xpedition_shared::{
    CreateItineraryRequest, CreateItineraryResponse, SaveFlightRequest, SaveFlightResponse,
    SettingsResponse, SettingsUpdate,
};

use crate::app_config::Config;
use crate::ClientError;

const REQUESTED_WITH: &str = "X-Requested-With";
const CSRF_HEADER: &str = "X-CSRF-Token";

/// `TravelBackend` over HTTP against the site's own endpoints.
#[derive(Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(REQUESTED_WITH, HeaderValue::from_static("XMLHttpRequest"));

        let client = reqwest::Client::builder()
            .user_agent(config.http.user_agent.clone())
            .default_headers(headers)
            .build()?;

        Ok(Self::with_client(client, &config.server.base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decodes the JSON body whatever the status code; the endpoints report
    /// failures in the body.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, BackendError> {
        let status = response.status();
        let body = response.bytes().await.map_err(transport)?;
        serde_json::from_slice(&body).map_err(|e| {
            error!("Undecodable response (HTTP {}): {}", status, e);
            BackendError::Decode(format!("{} (HTTP {})", e, status))
        })
    }
}

fn transport(err: reqwest::Error) -> BackendError {
    error!("Backend request failed: {}", err);
    BackendError::Transport(err.to_string())
}

#[async_trait]
impl TravelBackend for HttpBackend {
    async fn save_flight(&self, request: &SaveFlightRequest) -> Result<SaveFlightResponse, BackendError> {
        let response = self
            .client
            .post(self.endpoint("/save-flight"))
            .json(request)
            .send()
            .await
            .map_err(transport)?;

        let body: SaveFlightResponse = Self::decode(response).await?;
        info!("save-flight answered success={} for itinerary {}", body.success, request.itinerary_id);
        Ok(body)
    }

    async fn create_itinerary(
        &self,
        request: &CreateItineraryRequest,
    ) -> Result<CreateItineraryResponse, BackendError> {
        let response = self
            .client
            .post(self.endpoint("/create-itinerary"))
            .json(request)
            .send()
            .await
            .map_err(transport)?;

        let body: CreateItineraryResponse = Self::decode(response).await?;
        info!("create-itinerary answered success={} for {:?}", body.success, request.name);
        Ok(body)
    }

    async fn update_settings(&self, update: &SettingsUpdate) -> Result<SettingsResponse, BackendError> {
        let response = self
            .client
            .post(self.endpoint("/settings"))
            .header(CSRF_HEADER, update.csrf_token.expose().as_str())
            .form(&update.form_fields())
            .send()
            .await
            .map_err(transport)?;

        let body: SettingsResponse = Self::decode(response).await?;
        info!("settings answered success={} (theme={})", body.success, update.theme.as_str());
        Ok(body)
    }
}
