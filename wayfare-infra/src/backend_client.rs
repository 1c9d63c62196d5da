use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};
use wayfare_core::{BackendError, FlightRequest, HotelRequest, SearchResult, TravelBackend};
use crate::app_config::{BackendConfig, SecretsConfig};

#[derive(Serialize)]
struct CompleteSearchBody<'a> {
    flight_request: &'a FlightRequest,
    hotel_request: &'a HotelRequest,
}

/// Talks to the agent-orchestration service over JSON/HTTP.
pub struct HttpTravelBackend {
    client: Client,
    config: BackendConfig,
    secrets: SecretsConfig,
}

impl HttpTravelBackend {
    pub fn new(config: BackendConfig, secrets: SecretsConfig) -> Result<Self, BackendError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| BackendError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config, secrets })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn post<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<SearchResult, BackendError> {
        let url = self.endpoint(path);
        debug!("POST {}", url);

        let mut request = self.client.post(&url).json(body);
        if let Some(key) = &self.secrets.google_api_key {
            request = request.header("x-goog-api-key", key.expose());
        }
        if let Some(key) = &self.secrets.serp_api_key {
            request = request.header("x-serp-api-key", key.expose());
        }

        let response = request
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Travel backend {} responded {}", url, status);
            return Err(BackendError::Status { status: status.as_u16(), body });
        }

        response
            .json::<SearchResult>()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))
    }
}

#[async_trait]
impl TravelBackend for HttpTravelBackend {
    async fn complete_travel_search(
        &self,
        flight_request: &FlightRequest,
        hotel_request: &HotelRequest,
    ) -> Result<SearchResult, BackendError> {
        let body = CompleteSearchBody { flight_request, hotel_request };
        self.post(&self.config.complete_path, &body).await
    }

    async fn search_flights(&self, flight_request: &FlightRequest) -> Result<SearchResult, BackendError> {
        self.post(&self.config.flights_path, flight_request).await
    }

    async fn search_hotels(&self, hotel_request: &HotelRequest) -> Result<SearchResult, BackendError> {
        self.post(&self.config.hotels_path, hotel_request).await
    }
}
