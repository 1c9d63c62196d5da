pub mod backend;
pub mod planner;
pub mod search;

pub use backend::{BackendError, TravelBackend};
pub use planner::{PlannerForm, SearchPlan};
pub use search::{FlightInfo, FlightRequest, HotelInfo, HotelRequest, SearchMode, SearchResult};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{0}")]
    ValidationError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
