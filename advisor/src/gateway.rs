//! Text-generation gateway.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use monster_fighter_reference::LlmConfig;

use crate::error::{AdvisorError, Result};

/// Prompt-in, text-out access to a language model.
pub trait LlmGateway: Send + Sync {
    /// Returns the model's reply to `prompt`, trimmed.
    fn generate(&self, prompt: &str) -> Result<String>;
}

/// Client for Gemini's `generateContent` REST endpoint.
pub struct GeminiGateway {
    http: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiGateway {
    pub fn new(endpoint: &str, model: &str, api_key: String, timeout: Duration) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key,
        })
    }

    /// Creates a gateway reading the key from the first set variable in
    /// `config.api_key_env`.
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        let api_key = config
            .api_key_env
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|value| !value.trim().is_empty())
            .ok_or_else(|| AdvisorError::MissingApiKey {
                checked: config.api_key_env.clone(),
            })?;
        Self::new(
            &config.endpoint,
            &config.model,
            api_key,
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl LlmGateway for GeminiGateway {
    fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        debug!(model = %self.model, prompt_len = prompt.len(), "Sending generateContent request");
        let response = self
            .http
            .post(format!(
                "{}/models/{}:generateContent",
                self.endpoint, self.model
            ))
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            warn!(status = status.as_u16(), "LLM request rejected");
            return Err(AdvisorError::StatusError {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text()?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        response_text(parsed)
    }
}

fn response_text(response: GenerateContentResponse) -> Result<String> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    let text = text.trim();
    if text.is_empty() {
        return Err(AdvisorError::EmptyResponse);
    }
    Ok(text.to_string())
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}
