use std::sync::Arc;
use wayfare_core::TravelBackend;

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn TravelBackend>,
}

impl AppState {
    pub fn new(backend: Arc<dyn TravelBackend>) -> Self {
        Self { backend }
    }
}
