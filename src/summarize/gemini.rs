//! Gemini generateContent client.
//!
//! Thin adapter over the hosted generative-language API. The [`LanguageModel`]
//! trait is the seam: the pipeline only sees "prompt in, text out", so tests
//! swap in [`MockLanguageModel`] and the HTTP layer is exercised separately
//! against a mock server.

use crate::defaults;
use crate::error::{LecternError, Result};
use crate::secret::ApiKey;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Trait for text generation against a language model.
///
/// This trait allows swapping implementations (hosted Gemini vs mock).
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generate text for a single prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Identifier of the underlying model.
    fn model_id(&self) -> &str;
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct PromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

/// Client for the Gemini generateContent endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: ApiKey,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a client for the hosted API.
    pub fn new(api_key: ApiKey, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model: model.into(),
            base_url: defaults::API_BASE_URL.to_string(),
        }
    }

    /// Override the API base URL (tests point this at a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url,
            self.model,
            self.api_key.expose()
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| LecternError::ApiRequest {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LecternError::ApiStatus {
                status: status.as_u16(),
                message: body,
            });
        }

        let parsed: GenerateResponse =
            response.json().await.map_err(|e| LecternError::ApiResponse {
                message: format!("invalid JSON body: {e}"),
            })?;

        if let Some(feedback) = parsed.prompt_feedback
            && let Some(reason) = feedback.block_reason
        {
            return Err(LecternError::PromptBlocked { reason });
        }

        let text = parsed
            .candidates
            .and_then(|candidates| candidates.into_iter().next())
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| LecternError::ApiResponse {
                message: "no generated text in response".to_string(),
            })?;

        Ok(text.trim().to_string())
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

/// Mock language model for testing.
///
/// Records every prompt it receives so tests can assert call counts and
/// prompt contents.
#[derive(Debug, Default)]
pub struct MockLanguageModel {
    response: String,
    echo: bool,
    should_fail: bool,
    prompts: std::sync::Mutex<Vec<String>>,
}

impl MockLanguageModel {
    pub fn new() -> Self {
        Self {
            response: "mock generated text".to_string(),
            ..Self::default()
        }
    }

    /// Return a fixed response for every prompt.
    pub fn with_response(mut self, response: &str) -> Self {
        self.response = response.to_string();
        self
    }

    /// Return each prompt verbatim (useful for chunk-order assertions).
    pub fn echoing(mut self) -> Self {
        self.echo = true;
        self
    }

    /// Fail every call with an API error.
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl LanguageModel for MockLanguageModel {
    async fn generate(&self, prompt: &str) -> Result<String> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        if self.should_fail {
            return Err(LecternError::ApiRequest {
                message: "mock language model failure".to_string(),
            });
        }
        if self.echo {
            Ok(prompt.to_string())
        } else {
            Ok(self.response.clone())
        }
    }

    fn model_id(&self) -> &str {
        "mock-model"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GeminiClient {
        GeminiClient::new(ApiKey::new("test-key"), "gemini-2.5-flash")
            .with_base_url(server.uri())
    }

    #[tokio::test]
    async fn generate_extracts_candidate_text() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [
                    { "content": { "parts": [ { "text": "  A tidy summary.  " } ] } }
                ]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let text = client.generate("Summarize this").await.unwrap();
        assert_eq!(text, "A tidy summary.");
    }

    #[tokio::test]
    async fn generate_sends_prompt_in_request_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({
                "contents": [ { "parts": [ { "text": "the exact prompt" } ] } ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [
                    { "content": { "parts": [ { "text": "ok" } ] } }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.generate("the exact prompt").await.unwrap();
    }

    #[tokio::test]
    async fn generate_maps_http_error_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        match client.generate("prompt").await {
            Err(LecternError::ApiStatus { status, message }) => {
                assert_eq!(status, 429);
                assert!(message.contains("quota"));
            }
            other => panic!("Expected ApiStatus, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn generate_surfaces_blocked_prompt() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "promptFeedback": { "blockReason": "SAFETY" }
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        match client.generate("prompt").await {
            Err(LecternError::PromptBlocked { reason }) => assert_eq!(reason, "SAFETY"),
            other => panic!("Expected PromptBlocked, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn generate_rejects_empty_candidates() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": []
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(matches!(
            client.generate("prompt").await,
            Err(LecternError::ApiResponse { .. })
        ));
    }

    #[tokio::test]
    async fn mock_records_prompts_in_order() {
        let mock = MockLanguageModel::new().with_response("out");
        mock.generate("first").await.unwrap();
        mock.generate("second").await.unwrap();
        assert_eq!(mock.prompts(), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn mock_failure_is_structured_error() {
        let mock = MockLanguageModel::new().with_failure();
        assert!(matches!(
            mock.generate("p").await,
            Err(LecternError::ApiRequest { .. })
        ));
    }
}
