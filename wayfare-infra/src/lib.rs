pub mod app_config;
pub mod backend_client;
pub mod llm;

pub use backend_client::HttpTravelBackend;
pub use llm::{GeminiModel, LanguageModel, LlmError, ModelId, RemoteModelConfig};
