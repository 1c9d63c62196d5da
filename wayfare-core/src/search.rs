use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ============================================================================
// Search Mode
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SearchMode {
    #[default]
    #[serde(rename = "Complete (Flights + Hotels + Itinerary)")]
    Complete,
    #[serde(rename = "Flights Only")]
    FlightsOnly,
    #[serde(rename = "Hotels Only")]
    HotelsOnly,
}

impl SearchMode {
    pub const ALL: [SearchMode; 3] = [SearchMode::Complete, SearchMode::FlightsOnly, SearchMode::HotelsOnly];

    pub fn label(self) -> &'static str {
        match self {
            SearchMode::Complete => "Complete (Flights + Hotels + Itinerary)",
            SearchMode::FlightsOnly => "Flights Only",
            SearchMode::HotelsOnly => "Hotels Only",
        }
    }

    pub fn includes_flights(self) -> bool {
        self != SearchMode::HotelsOnly
    }

    pub fn includes_hotels(self) -> bool {
        self != SearchMode::FlightsOnly
    }
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightRequest {
    pub origin: String,
    pub destination: String,
    pub outbound_date: String,
    pub return_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelRequest {
    pub location: String,
    pub check_in_date: String,
    pub check_out_date: String,
}

// ============================================================================
// Backend Results
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightInfo {
    #[serde(default, deserialize_with = "display_string")]
    pub airline: String,
    #[serde(default, deserialize_with = "display_string")]
    pub price: String,
    #[serde(default, deserialize_with = "display_string")]
    pub duration: String,
    #[serde(default, deserialize_with = "display_string")]
    pub stops: String,
    #[serde(default, deserialize_with = "display_string")]
    pub departure: String,
    #[serde(default, deserialize_with = "display_string")]
    pub arrival: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HotelInfo {
    #[serde(default, deserialize_with = "display_string")]
    pub name: String,
    #[serde(default, deserialize_with = "display_string")]
    pub price: String,
    #[serde(default, deserialize_with = "display_string")]
    pub rating: String,
    #[serde(default, deserialize_with = "display_string")]
    pub location: String,
    #[serde(default, deserialize_with = "display_string")]
    pub link: String,
}

/// Aggregate answer from the orchestration backend. Every mode returns the
/// same shape; fields the mode does not produce come back empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub flights: Vec<FlightInfo>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub hotels: Vec<HotelInfo>,
    #[serde(default, deserialize_with = "display_string")]
    pub ai_flight_recommendation: String,
    #[serde(default, deserialize_with = "display_string")]
    pub ai_hotel_recommendation: String,
    #[serde(default)]
    pub itinerary: Option<String>,
}

/// Accepts strings, numbers and booleans alike; prices and ratings arrive in
/// either form depending on the upstream provider.
fn display_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
