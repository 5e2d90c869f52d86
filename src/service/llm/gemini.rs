//! Integration with the Gemini `generateContent` REST API.
//!
//! One prompt is sent as a single user turn; the reply is the text of the first
//! candidate. There is no retry: a failed call is reported to the caller, which
//! decides what the user sees.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::base::{config::Config, types::Res};

use super::{GenericLlmClient, LlmClient};

// Extra methods on `LlmClient` applied by the gemini implementation.

impl LlmClient {
    /// Creates a new Gemini LLM client.
    pub fn gemini(config: &Config) -> Res<Self> {
        let client = GeminiLlmClient::new(config)?;
        Ok(Self { inner: Arc::new(client) })
    }
}

// Wire types.

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
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
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

// Specific implementations.

/// Gemini LLM client implementation.
#[derive(Clone)]
pub struct GeminiLlmClient {
    client: reqwest::Client,
    api_key: String,
    url: String,
}

impl GeminiLlmClient {
    /// Create a new Gemini LLM client.
    #[instrument(name = "GeminiLlmClient::new", skip_all)]
    pub fn new(config: &Config) -> Res<Self> {
        let client = reqwest::Client::builder().timeout(Duration::from_secs(config.request_timeout_secs)).build()?;
        let url = format!("{}/models/{}:generateContent", config.gemini_api_base.trim_end_matches('/'), config.gemini_model);

        Ok(Self {
            client,
            api_key: config.gemini_api_key.clone(),
            url,
        })
    }
}

#[async_trait]
impl GenericLlmClient for GeminiLlmClient {
    #[instrument(name = "GeminiLlmClient::generate", skip_all)]
    async fn generate(&self, prompt: &str) -> Res<String> {
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Gemini request failed: {e}"))?;

        let status = response.status();
        let raw = response.text().await.map_err(|e| anyhow::anyhow!("Failed to read Gemini response: {e}"))?;

        if !status.is_success() {
            return Err(anyhow::anyhow!("Gemini returned status {status}: {raw}"));
        }

        let text = parse_generate_content_response(&raw)?;
        debug!("Gemini returned {} characters.", text.len());

        Ok(text)
    }
}

/// Extract the completion text from a raw `generateContent` response body.
fn parse_generate_content_response(raw: &str) -> Res<String> {
    let parsed: GenerateContentResponse = serde_json::from_str(raw).map_err(|e| anyhow::anyhow!("Malformed Gemini response: {e}"))?;

    let Some(candidate) = parsed.candidates.into_iter().next() else {
        let reason = parsed.prompt_feedback.and_then(|f| f.block_reason).unwrap_or_else(|| "none given".to_string());
        return Err(anyhow::anyhow!("Gemini response contained no candidates (block reason: {reason})."));
    };

    let text = candidate
        .content
        .map(|content| content.parts.into_iter().filter_map(|part| part.text).collect::<String>())
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".to_string());
        return Err(anyhow::anyhow!("Gemini returned no text (finish reason: {reason})."));
    }

    Ok(text)
}

// Tests.
