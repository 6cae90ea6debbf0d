use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::errors::GatewayError;
use crate::log_llm_operation;

/// Anything that can turn a prompt into generated text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for `prompt`. `max_output_tokens` of `None` leaves the
    /// provider's default budget in place.
    async fn generate(&self, prompt: &str, max_output_tokens: Option<u32>) -> Result<String, GatewayError>;

    fn provider_name(&self) -> &'static str;

    fn model_name(&self) -> &str;
}

/// A model advertised by a provider's model-listing endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInfo {
    pub name: String,
    pub supports_generation: bool,
}

/// Enum-based LLM provider implementation
#[derive(Debug, Clone)]
pub enum LLMProvider {
    Gemini(GeminiProvider),
    OpenAI(OpenAIProvider),
}

impl LLMProvider {
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>, GatewayError> {
        match self {
            LLMProvider::Gemini(provider) => provider.list_models().await,
            LLMProvider::OpenAI(provider) => provider.list_models().await,
        }
    }

    /// Check that `model` exists and is reachable with the configured credential.
    pub async fn probe_model(&self, model: &str) -> Result<(), GatewayError> {
        match self {
            LLMProvider::Gemini(provider) => provider.probe_model(model).await,
            LLMProvider::OpenAI(provider) => provider.probe_model(model).await,
        }
    }

    /// Same provider and credential, pointed at a different model.
    pub fn with_model(&self, model: &str) -> Self {
        match self {
            LLMProvider::Gemini(provider) => LLMProvider::Gemini(GeminiProvider {
                model: model.to_string(),
                ..provider.clone()
            }),
            LLMProvider::OpenAI(provider) => LLMProvider::OpenAI(OpenAIProvider {
                model: model.to_string(),
                ..provider.clone()
            }),
        }
    }

    /// Ordered models to probe when the provider's listing is unusable.
    pub fn candidate_models(&self) -> &'static [&'static str] {
        match self {
            LLMProvider::Gemini(_) => &[
                "gemini-1.5-pro",
                "gemini-1.5-flash",
                "gemini-pro",
                "gemini-pro-vision",
                "gemini-2.0-flash",
            ],
            LLMProvider::OpenAI(_) => &["gpt-4o-mini", "gpt-4o", "gpt-3.5-turbo"],
        }
    }
}

#[async_trait]
impl TextGenerator for LLMProvider {
    async fn generate(&self, prompt: &str, max_output_tokens: Option<u32>) -> Result<String, GatewayError> {
        log_llm_operation!(
            start,
            "generate",
            provider = self.provider_name(),
            model = self.model_name(),
            max_tokens = max_output_tokens
        );
        let started = Instant::now();

        let result = match self {
            LLMProvider::Gemini(provider) => provider.generate(prompt, max_output_tokens).await,
            LLMProvider::OpenAI(provider) => provider.generate(prompt, max_output_tokens).await,
        };

        match &result {
            Ok(text) => {
                log_llm_operation!(
                    success,
                    "generate",
                    provider = self.provider_name(),
                    duration_ms = started.elapsed().as_millis() as u64,
                    response_length = text.len()
                );
            }
            Err(e) => {
                log_llm_operation!(error, "generate", provider = self.provider_name(), error = e);
            }
        }

        result
    }

    fn provider_name(&self) -> &'static str {
        match self {
            LLMProvider::Gemini(_) => GeminiProvider::NAME,
            LLMProvider::OpenAI(_) => OpenAIProvider::NAME,
        }
    }

    fn model_name(&self) -> &str {
        match self {
            LLMProvider::Gemini(provider) => &provider.model,
            LLMProvider::OpenAI(provider) => &provider.model,
        }
    }
}

/// Turn a non-success HTTP status into `GatewayError::Status`.
async fn ensure_success(provider: &'static str, response: Response) -> Result<Response, GatewayError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
    Err(GatewayError::Status { provider, status, body })
}

fn http_error(provider: &'static str) -> impl Fn(reqwest::Error) -> GatewayError {
    move |source| GatewayError::Http { provider, source }
}

/// Gemini provider implementation
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

/// Gemini-specific request structures
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiGenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: GeminiContent,
}

#[derive(Debug, Clone, Deserialize)]
struct GeminiModelList {
    #[serde(default)]
    models: Vec<GeminiModel>,
}

#[derive(Debug, Clone, Deserialize)]
struct GeminiModel {
    name: String,
    #[serde(rename = "supportedGenerationMethods", default)]
    supported_generation_methods: Vec<String>,
}

impl GeminiProvider {
    pub const NAME: &'static str = "Gemini";

    pub fn new(client: Client, api_key: String, base_url: Option<String>, model: Option<String>) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.unwrap_or_else(|| "https://generativelanguage.googleapis.com/v1beta".to_string()),
            model: model.unwrap_or_else(|| "gemini-1.5-flash".to_string()),
        }
    }

    async fn generate(&self, prompt: &str, max_output_tokens: Option<u32>) -> Result<String, GatewayError> {
        let request_body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: max_output_tokens.map(|max_output_tokens| GeminiGenerationConfig { max_output_tokens }),
        };

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let response = self
            .client
            .post(&url)
            .query(&[("key", &self.api_key)])
            .json(&request_body)
            .send()
            .await
            .map_err(http_error(Self::NAME))?;

        let gemini_response: GeminiResponse = ensure_success(Self::NAME, response)
            .await?
            .json()
            .await
            .map_err(http_error(Self::NAME))?;

        let candidate = gemini_response.candidates.first().ok_or(GatewayError::EmptyResponse {
            provider: Self::NAME,
            detail: "no candidates",
        })?;

        let text: String = candidate.content.parts.iter().map(|part| part.text.as_str()).collect();
        if text.trim().is_empty() {
            return Err(GatewayError::EmptyResponse {
                provider: Self::NAME,
                detail: "candidate has no text",
            });
        }

        Ok(text)
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, GatewayError> {
        let response = self
            .client
            .get(format!("{}/models", self.base_url))
            .query(&[("key", self.api_key.as_str()), ("pageSize", "1000")])
            .send()
            .await
            .map_err(http_error(Self::NAME))?;

        let listing: GeminiModelList = ensure_success(Self::NAME, response)
            .await?
            .json()
            .await
            .map_err(http_error(Self::NAME))?;

        Ok(listing
            .models
            .into_iter()
            .map(|model| ModelInfo {
                name: short_model_name(&model.name).to_string(),
                supports_generation: model
                    .supported_generation_methods
                    .iter()
                    .any(|method| method == "generateContent"),
            })
            .collect())
    }

    async fn probe_model(&self, model: &str) -> Result<(), GatewayError> {
        let response = self
            .client
            .get(format!("{}/models/{}", self.base_url, model))
            .query(&[("key", &self.api_key)])
            .send()
            .await
            .map_err(http_error(Self::NAME))?;

        ensure_success(Self::NAME, response).await.map(|_| ())
    }
}

/// `models/gemini-1.5-pro` -> `gemini-1.5-pro`
pub fn short_model_name(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

/// OpenAI-compatible chat completions provider
#[derive(Debug, Clone)]
pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

#[derive(Debug, Clone, Deserialize)]
struct OpenAIModelList {
    #[serde(default)]
    data: Vec<OpenAIModel>,
}

#[derive(Debug, Clone, Deserialize)]
struct OpenAIModel {
    id: String,
}

impl OpenAIProvider {
    pub const NAME: &'static str = "OpenAI";

    pub fn new(client: Client, api_key: String, base_url: Option<String>, model: Option<String>) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            model: model.unwrap_or_else(|| "gpt-4o-mini".to_string()),
        }
    }

    async fn generate(&self, prompt: &str, max_output_tokens: Option<u32>) -> Result<String, GatewayError> {
        let request_body = OpenAIRequest {
            model: self.model.clone(),
            messages: vec![OpenAIMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens: max_output_tokens,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(http_error(Self::NAME))?;

        let openai_response: OpenAIResponse = ensure_success(Self::NAME, response)
            .await?
            .json()
            .await
            .map_err(http_error(Self::NAME))?;

        let choice = openai_response.choices.into_iter().next().ok_or(GatewayError::EmptyResponse {
            provider: Self::NAME,
            detail: "no choices",
        })?;

        if choice.message.content.trim().is_empty() {
            return Err(GatewayError::EmptyResponse {
                provider: Self::NAME,
                detail: "choice has no content",
            });
        }

        Ok(choice.message.content)
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, GatewayError> {
        let response = self
            .client
            .get(format!("{}/models", self.base_url))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(http_error(Self::NAME))?;

        let listing: OpenAIModelList = ensure_success(Self::NAME, response)
            .await?
            .json()
            .await
            .map_err(http_error(Self::NAME))?;

        // The listing carries no capability data; chat models are the gpt family.
        Ok(listing
            .data
            .into_iter()
            .map(|model| ModelInfo {
                supports_generation: model.id.contains("gpt"),
                name: model.id,
            })
            .collect())
    }

    async fn probe_model(&self, model: &str) -> Result<(), GatewayError> {
        let response = self
            .client
            .get(format!("{}/models/{}", self.base_url, model))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(http_error(Self::NAME))?;

        ensure_success(Self::NAME, response).await.map(|_| ())
    }
}

/// Factory for creating LLM providers based on provider type
pub struct LLMProviderFactory;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum LLMProviderType {
    Gemini,
    OpenAI,
}

impl LLMProviderType {
    /// Parse an `LLM_PROVIDER` value; unknown names fall back to Gemini.
    pub fn from_config_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "gemini" | "google" => Some(LLMProviderType::Gemini),
            "openai" | "chatgpt" | "gpt" => Some(LLMProviderType::OpenAI),
            _ => None,
        }
    }
}

impl LLMProviderFactory {
    /// Create a new LLM provider instance based on provider type
    pub fn create_provider(
        provider_type: LLMProviderType,
        api_key: String,
        base_url: Option<String>,
        model: Option<String>,
    ) -> LLMProvider {
        let client = Client::new();
        match provider_type {
            LLMProviderType::Gemini => LLMProvider::Gemini(GeminiProvider::new(client, api_key, base_url, model)),
            LLMProviderType::OpenAI => LLMProvider::OpenAI(OpenAIProvider::new(client, api_key, base_url, model)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_type_parsing() {
        let cases = [
            ("gemini", Some(LLMProviderType::Gemini)),
            ("Google", Some(LLMProviderType::Gemini)),
            ("OPENAI", Some(LLMProviderType::OpenAI)),
            ("chatgpt", Some(LLMProviderType::OpenAI)),
            (" gpt ", Some(LLMProviderType::OpenAI)),
            ("claude", None),
            ("", None),
        ];

        for (input, expected) in cases {
            assert_eq!(LLMProviderType::from_config_str(input), expected, "input '{}'", input);
        }
    }

    #[test]
    fn test_factory_defaults() {
        let gemini = LLMProviderFactory::create_provider(LLMProviderType::Gemini, "key".to_string(), None, None);
        assert_eq!(gemini.provider_name(), "Gemini");
        assert_eq!(gemini.model_name(), "gemini-1.5-flash");

        let openai = LLMProviderFactory::create_provider(LLMProviderType::OpenAI, "key".to_string(), None, None);
        assert_eq!(openai.provider_name(), "OpenAI");
        assert_eq!(openai.model_name(), "gpt-4o-mini");
    }

    #[test]
    fn test_with_model_keeps_provider() {
        let provider = LLMProviderFactory::create_provider(LLMProviderType::Gemini, "key".to_string(), None, None);
        let switched = provider.with_model("gemini-pro");
        assert_eq!(switched.provider_name(), "Gemini");
        assert_eq!(switched.model_name(), "gemini-pro");
        assert_eq!(provider.model_name(), "gemini-1.5-flash");
    }

    #[test]
    fn test_candidate_lists() {
        let gemini = LLMProviderFactory::create_provider(LLMProviderType::Gemini, "key".to_string(), None, None);
        assert_eq!(gemini.candidate_models().first(), Some(&"gemini-1.5-pro"));
        assert_eq!(gemini.candidate_models().len(), 5);
    }

    #[test]
    fn test_short_model_name() {
        assert_eq!(short_model_name("models/gemini-1.5-pro"), "gemini-1.5-pro");
        assert_eq!(short_model_name("gemini-pro"), "gemini-pro");
    }

    #[test]
    fn test_gemini_request_omits_config_without_budget() {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: "hi".to_string() }],
            }],
            generation_config: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("generationConfig").is_none());

        let request = GeminiRequest {
            generation_config: Some(GeminiGenerationConfig { max_output_tokens: 400 }),
            ..request
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 400);
    }

    #[test]
    fn test_gemini_response_tolerates_missing_content() {
        let response: GeminiResponse =
            serde_json::from_str(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#).unwrap();
        assert!(response.candidates[0].content.parts.is_empty());
    }
}
