use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use agent_logging::agent_debug;

use crate::prompt::build_prompt;

/// Request header carrying the credential. Never placed in the URL, so the
/// key stays out of logs, proxies and history.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Generation method a usable model must advertise.
const GENERATE_METHOD: &str = "generateContent";

/// Name fragment marking the provider's fast tier.
const FAST_TIER_HINT: &str = "flash";

#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("invalid API key")]
    InvalidApiKey,
    #[error("provider returned http status {0}")]
    HttpStatus(u16),
    #[error("no text-generation models found")]
    NoUsableModel,
    #[error("{0}")]
    Api(String),
    #[error("malformed provider response")]
    MalformedResponse,
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
}

#[derive(Debug, Deserialize)]
struct ModelCatalog {
    #[serde(default)]
    models: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelEntry {
    name: String,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// HTTP client for the remote generation provider.
#[derive(Debug, Clone)]
pub struct GenerationClient {
    settings: ProviderSettings,
    http: reqwest::Client,
}

impl GenerationClient {
    pub fn new(settings: ProviderSettings) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ProviderError::Network(err.to_string()))?;
        Ok(Self { settings, http })
    }

    /// Lists the provider's models and picks a usable one: fast tier first,
    /// any generation-capable model second.
    pub async fn resolve_model(&self, api_key: &str) -> Result<String, ProviderError> {
        let url = format!("{}/models", self.settings.base_url);
        let response = self
            .http
            .get(url)
            .header(API_KEY_HEADER, api_key)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(match status.as_u16() {
                401 | 403 => ProviderError::InvalidApiKey,
                code => ProviderError::HttpStatus(code),
            });
        }

        let body = response.text().await.map_err(map_transport_error)?;
        let catalog: ModelCatalog =
            serde_json::from_str(&body).map_err(|_| ProviderError::MalformedResponse)?;

        let supports_generation = |model: &&ModelEntry| {
            model
                .supported_generation_methods
                .iter()
                .any(|method| method == GENERATE_METHOD)
        };
        let chosen = catalog
            .models
            .iter()
            .filter(supports_generation)
            .find(|model| model.name.contains(FAST_TIER_HINT))
            .or_else(|| catalog.models.iter().find(supports_generation))
            .ok_or(ProviderError::NoUsableModel)?;

        let name = chosen
            .name
            .strip_prefix("models/")
            .unwrap_or(&chosen.name)
            .to_string();
        agent_debug!("Resolved generation model {}", name);
        Ok(name)
    }

    /// Requests one completion from `model` for the given prompt text.
    pub async fn generate(
        &self,
        api_key: &str,
        model: &str,
        prompt_text: &str,
    ) -> Result<String, ProviderError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.settings.base_url, model
        );
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt_text.to_string(),
                }],
            }],
        };
        let body =
            serde_json::to_string(&request).map_err(|_| ProviderError::MalformedResponse)?;

        let response = self
            .http
            .post(url)
            .header(API_KEY_HEADER, api_key)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;
        let parsed: GenerateResponse = serde_json::from_str(&body).map_err(|_| {
            if status.is_success() {
                ProviderError::MalformedResponse
            } else {
                ProviderError::HttpStatus(status.as_u16())
            }
        })?;

        // An error body may arrive with any status; it carries the message
        // worth surfacing.
        if let Some(error) = parsed.error {
            return Err(ProviderError::Api(error.message));
        }

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .map(|part| part.text.trim().to_string())
            .ok_or(ProviderError::MalformedResponse)
    }

    /// Full generation round: resolve a model, build the prompt, request
    /// the completion.
    pub async fn draft_reply(
        &self,
        api_key: &str,
        post_text: &str,
        tone: &str,
    ) -> Result<String, ProviderError> {
        let model = self.resolve_model(api_key).await?;
        let prompt = build_prompt(post_text, tone);
        self.generate(api_key, &model, &prompt).await
    }
}

fn map_transport_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        return ProviderError::Timeout;
    }
    ProviderError::Network(err.to_string())
}
