pub mod api;
pub mod cleaner;
pub mod config;
pub mod errors;
pub mod fallback;
pub mod llm_providers;
pub mod logging;
pub mod model_discovery;
pub mod models;
pub mod pdf;
pub mod prompts;
pub mod response_parser;
pub mod study_service;

pub use config::Config;
pub use errors::*;
pub use llm_providers::{LLMProvider, LLMProviderFactory, LLMProviderType, TextGenerator};
pub use model_discovery::{discover_model, ModelGateway};
pub use models::*;
pub use study_service::StudyService;
