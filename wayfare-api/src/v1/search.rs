use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use wayfare_core::{SearchPlan, SearchResult};
use crate::{error::AppError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/v1/search", post(search))
}

/// POST /api/v1/search
/// JSON twin of the planner form: `{mode, flight_request, hotel_request}`.
/// Malformed bodies get the same `{"error": ..}` shape as every other failure.
async fn search(
    State(state): State<AppState>,
    payload: Result<Json<SearchPlan>, JsonRejection>,
) -> Result<Json<SearchResult>, AppError> {
    let Json(plan) = payload?;
    let plan = plan.validate()?;
    let result = plan.dispatch(state.backend.as_ref()).await?;
    Ok(Json(result))
}
