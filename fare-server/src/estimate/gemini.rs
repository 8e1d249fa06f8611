//! Gemini-backed fare estimator.
//!
//! Sends the trip and pricing rules to the Gemini `generateContent` API with
//! a declared JSON response schema, then validates what comes back. No
//! retries are attempted; a failed call is reported to the caller.

use std::time::Duration;

use futures::future::BoxFuture;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::error::EstimateError;
use super::policy::PricingPolicy;
use super::prompt::{build_prompt, response_schema};
use super::provider::FareEstimator;
use super::response::parse_estimate;
use super::types::{EstimateInput, EstimateResult};

/// Default base URL for the Gemini API.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Configuration for the Gemini estimator.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key sent in the x-goog-api-key header
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Model name
    pub model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Sampling temperature
    pub temperature: f32,
}

impl GeminiConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: 20,
            temperature: 0.2,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Pull the answer text out of a `generateContent` response body.
fn extract_text(body: &str) -> Result<String, EstimateError> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| EstimateError::invalid_response(e.to_string(), Some(body)))?;

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| EstimateError::invalid_response("no candidates", Some(body)))?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = candidate.finish_reason.as_deref().unwrap_or("unknown");
        return Err(EstimateError::invalid_response(
            format!("empty candidate (finish reason: {reason})"),
            Some(body),
        ));
    }

    Ok(text)
}

/// Fare estimator backed by the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiEstimator {
    http: reqwest::Client,
    endpoint: String,
    temperature: f32,
    policy: PricingPolicy,
}

impl GeminiEstimator {
    /// Create a new estimator with the given configuration and pricing rules.
    pub fn new(config: GeminiConfig, policy: PricingPolicy) -> Result<Self, EstimateError> {
        let mut headers = HeaderMap::new();

        let api_key =
            HeaderValue::from_str(&config.api_key).map_err(|_| EstimateError::Api {
                status: 0,
                message: "Invalid API key format".to_string(),
            })?;
        headers.insert("x-goog-api-key", api_key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint(),
            temperature: config.temperature,
            policy,
        })
    }

    async fn request_estimate(&self, input: &EstimateInput) -> Result<EstimateResult, EstimateError> {
        let prompt = build_prompt(input, &self.policy);
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: &prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: response_schema(),
                temperature: self.temperature,
            },
        };

        let response = self.http.post(&self.endpoint).json(&request).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(EstimateError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(EstimateError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EstimateError::Api {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let body = response.text().await?;
        let text = extract_text(&body)?;
        debug!(chars = text.len(), "received estimate from provider");

        parse_estimate(&text)
    }
}

impl FareEstimator for GeminiEstimator {
    fn estimate<'a>(
        &'a self,
        input: &'a EstimateInput,
    ) -> BoxFuture<'a, Result<EstimateResult, EstimateError>> {
        Box::pin(self.request_estimate(input))
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}
