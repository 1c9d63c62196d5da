use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use crate::backend::{BackendError, TravelBackend};
use crate::search::{FlightRequest, HotelRequest, SearchMode, SearchResult};
use crate::{CoreError, CoreResult};

pub const DEFAULT_ORIGIN: &str = "ATL";
pub const DEFAULT_DESTINATION: &str = "LAX";

/// Raw values of the planner form, exactly as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerForm {
    #[serde(default)]
    pub mode: SearchMode,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub outbound_date: String,
    #[serde(default)]
    pub return_date: String,
    /// Browsers omit unchecked boxes, so a missing field means "off".
    #[serde(default, deserialize_with = "checkbox")]
    pub use_flight_destination: bool,
    #[serde(default)]
    pub hotel_location: String,
    #[serde(default)]
    pub check_in_date: String,
    #[serde(default)]
    pub check_out_date: String,
}

impl PlannerForm {
    /// Form as first shown: departure tomorrow, back a week later, hotel
    /// dates following the flights.
    pub fn with_defaults(today: NaiveDate) -> Self {
        let tomorrow = today + Days::new(1);
        let next_week = tomorrow + Days::new(7);
        Self {
            mode: SearchMode::default(),
            origin: DEFAULT_ORIGIN.to_string(),
            destination: DEFAULT_DESTINATION.to_string(),
            outbound_date: tomorrow.to_string(),
            return_date: next_week.to_string(),
            use_flight_destination: true,
            hotel_location: String::new(),
            check_in_date: tomorrow.to_string(),
            check_out_date: next_week.to_string(),
        }
    }

    pub fn defaults() -> Self {
        Self::with_defaults(Local::now().date_naive())
    }

    pub fn hotel_location(&self) -> &str {
        if self.use_flight_destination {
            &self.destination
        } else {
            &self.hotel_location
        }
    }

    pub fn validate(&self) -> CoreResult<SearchPlan> {
        require_route(&self.origin, &self.destination)?;

        Ok(SearchPlan {
            mode: self.mode,
            flight_request: FlightRequest {
                origin: self.origin.clone(),
                destination: self.destination.clone(),
                outbound_date: self.outbound_date.clone(),
                return_date: self.return_date.clone(),
            },
            hotel_request: HotelRequest {
                location: self.hotel_location().to_string(),
                check_in_date: self.check_in_date.clone(),
                check_out_date: self.check_out_date.clone(),
            },
        })
    }
}

impl Default for PlannerForm {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Presence check shared by every submission path, whatever the mode.
fn require_route(origin: &str, destination: &str) -> CoreResult<()> {
    if origin.trim().is_empty() || destination.trim().is_empty() {
        return Err(CoreError::ValidationError(
            "Please provide origin and destination.".to_string(),
        ));
    }
    Ok(())
}

fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(matches!(value.as_str(), "on" | "true" | "1"))
}

/// A validated submission: the mode plus both request objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPlan {
    #[serde(default)]
    pub mode: SearchMode,
    pub flight_request: FlightRequest,
    pub hotel_request: HotelRequest,
}

impl SearchPlan {
    pub fn validate(self) -> CoreResult<Self> {
        require_route(&self.flight_request.origin, &self.flight_request.destination)?;
        Ok(self)
    }

    /// Calls exactly one backend entry point, chosen by the mode.
    pub async fn dispatch(&self, backend: &dyn TravelBackend) -> Result<SearchResult, BackendError> {
        tracing::info!(
            mode = self.mode.label(),
            origin = %self.flight_request.origin,
            destination = %self.flight_request.destination,
            location = %self.hotel_request.location,
            "Dispatching travel search"
        );

        let result = match self.mode {
            SearchMode::Complete => {
                backend
                    .complete_travel_search(&self.flight_request, &self.hotel_request)
                    .await
            }
            SearchMode::FlightsOnly => backend.search_flights(&self.flight_request).await,
            SearchMode::HotelsOnly => backend.search_hotels(&self.hotel_request).await,
        };

        match &result {
            Ok(r) => tracing::info!(
                flights = r.flights.len(),
                hotels = r.hotels.len(),
                "Travel search finished"
            ),
            Err(e) => tracing::error!("Travel search failed: {}", e),
        }

        result
    }
}
