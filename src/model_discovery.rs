//! Startup model discovery and the resulting gateway handle.
//!
//! Discovery runs once. Its outcome, a [`ModelGateway`], is immutable and is
//! cloned into every request handler.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::LLMConfig;
use crate::errors::GatewayError;
use crate::llm_providers::{LLMProvider, LLMProviderFactory, TextGenerator};
use crate::{log_llm_operation, log_system_event};

/// The model the process talks to, or the reason it talks to none.
#[derive(Clone)]
pub enum ModelGateway {
    Available(Arc<dyn TextGenerator>),
    Disabled { reason: String },
}

impl ModelGateway {
    pub fn available(generator: impl TextGenerator + 'static) -> Self {
        ModelGateway::Available(Arc::new(generator))
    }

    pub fn disabled(reason: impl Into<String>) -> Self {
        ModelGateway::Disabled { reason: reason.into() }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, ModelGateway::Available(_))
    }

    pub fn model_name(&self) -> Option<&str> {
        match self {
            ModelGateway::Available(generator) => Some(generator.model_name()),
            ModelGateway::Disabled { .. } => None,
        }
    }

    /// Generate text, or fail immediately without network access when disabled.
    pub async fn generate(&self, prompt: &str, max_output_tokens: Option<u32>) -> Result<String, GatewayError> {
        match self {
            ModelGateway::Available(generator) => generator.generate(prompt, max_output_tokens).await,
            ModelGateway::Disabled { reason } => Err(GatewayError::Disabled(reason.clone())),
        }
    }
}

impl fmt::Debug for ModelGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelGateway::Available(generator) => f
                .debug_struct("Available")
                .field("provider", &generator.provider_name())
                .field("model", &generator.model_name())
                .finish(),
            ModelGateway::Disabled { reason } => f.debug_struct("Disabled").field("reason", reason).finish(),
        }
    }
}

/// Find a usable model for the configured provider.
///
/// Order: the configured `LLM_MODEL`, then the first generation-capable model
/// from the provider's listing, then the fixed candidate list. Each network
/// step is bounded by the discovery timeout. Never fails; a missing key or an
/// exhausted search yields a disabled gateway.
pub async fn discover_model(config: &LLMConfig) -> ModelGateway {
    let Some(api_key) = config.usable_api_key() else {
        warn!("No LLM API key configured; serving fallback content only");
        return ModelGateway::disabled("no API key configured");
    };

    let provider = LLMProviderFactory::create_provider(
        config.provider,
        api_key.to_string(),
        config.base_url.clone(),
        config.model.clone(),
    );
    let timeout = config.discovery_timeout();

    log_system_event!(
        startup,
        component = "model_discovery",
        format!("discovering models for provider {}", provider.provider_name())
    );

    match find_model(&provider, config.model.as_deref(), timeout).await {
        Some(model) => {
            info!(
                provider = provider.provider_name(),
                model = %model,
                "Selected generative model"
            );
            ModelGateway::available(provider.with_model(&model))
        }
        None => {
            warn!(
                provider = provider.provider_name(),
                "No usable model found; serving fallback content only"
            );
            ModelGateway::disabled(format!("no usable {} model found", provider.provider_name()))
        }
    }
}

async fn find_model(provider: &LLMProvider, configured: Option<&str>, timeout: Duration) -> Option<String> {
    if let Some(model) = configured {
        match bounded(timeout, provider.probe_model(model)).await {
            Ok(()) => return Some(model.to_string()),
            Err(e) => {
                log_llm_operation!(warn, "discover_model", format!("configured model '{}' unusable: {}", model, e));
            }
        }
    }

    match bounded(timeout, provider.list_models()).await {
        Ok(models) => {
            debug!(listed = models.len(), "Listed provider models");
            if let Some(model) = models.into_iter().find(|model| model.supports_generation) {
                return Some(model.name);
            }
            log_llm_operation!(warn, "discover_model", "listing contained no generation-capable model");
        }
        Err(e) => {
            log_llm_operation!(warn, "discover_model", format!("model listing failed: {}", e));
        }
    }

    for candidate in provider.candidate_models() {
        match bounded(timeout, provider.probe_model(candidate)).await {
            Ok(()) => return Some(candidate.to_string()),
            Err(e) => debug!(model = candidate, error = %e, "Candidate model unavailable"),
        }
    }

    None
}

/// Run a discovery request, failing with `GatewayError::Timeout` once `timeout` elapses.
async fn bounded<T>(
    timeout: Duration,
    request: impl Future<Output = Result<T, GatewayError>>,
) -> Result<T, GatewayError> {
    tokio::time::timeout(timeout, request)
        .await
        .unwrap_or(Err(GatewayError::Timeout(timeout)))
}
