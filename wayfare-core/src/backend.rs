use async_trait::async_trait;
use crate::search::{FlightRequest, HotelRequest, SearchResult};

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("request to travel backend failed: {0}")]
    Transport(String),
    #[error("travel backend returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response from travel backend: {0}")]
    Decode(String),
}

/// Entry points of the agent-orchestration backend that searches flights and
/// hotels and writes the AI recommendations.
#[async_trait]
pub trait TravelBackend: Send + Sync {
    /// Flights, hotels, both recommendations and an itinerary
    async fn complete_travel_search(
        &self,
        flight_request: &FlightRequest,
        hotel_request: &HotelRequest,
    ) -> Result<SearchResult, BackendError>;

    async fn search_flights(
        &self,
        flight_request: &FlightRequest,
    ) -> Result<SearchResult, BackendError>;

    async fn search_hotels(
        &self,
        hotel_request: &HotelRequest,
    ) -> Result<SearchResult, BackendError>;
}
