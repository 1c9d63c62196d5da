use axum::{
    extract::State,
    response::Html,
    routing::{get, post},
    Form, Router,
};
use wayfare_core::PlannerForm;
use crate::render::{self, SearchOutcome};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(show_planner))
        .route("/search", post(submit_search))
}

/// GET /
async fn show_planner() -> Html<String> {
    Html(render::page(&PlannerForm::defaults(), None))
}

/// POST /search
/// Validates the form, makes one backend call and renders whatever came back.
async fn submit_search(
    State(state): State<AppState>,
    Form(form): Form<PlannerForm>,
) -> Html<String> {
    let outcome = run_search(&state, &form).await;
    Html(render::page(&form, Some(&outcome)))
}

pub async fn run_search(state: &AppState, form: &PlannerForm) -> SearchOutcome {
    // 1. Presence check before anything leaves the process
    let plan = match form.validate() {
        Ok(plan) => plan,
        Err(e) => {
            tracing::warn!("Rejected planner submission: {}", e);
            return SearchOutcome::Invalid(e.to_string());
        }
    };

    // 2. Single backend call, awaited to completion
    match plan.dispatch(state.backend.as_ref()).await {
        Ok(result) => SearchOutcome::Found { mode: plan.mode, result },
        Err(e) => SearchOutcome::Failed(format!("Search failed: {}", e)),
    }
}
