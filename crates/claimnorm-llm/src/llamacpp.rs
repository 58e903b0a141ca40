//! llama.cpp Server Client
//!
//! Talks to the HTTP server bundled with llama.cpp, which hosts a single
//! GGUF model (for example a quantized Mistral 7B Instruct). The model is
//! loaded by the server process, not by this crate.
//!
//! # Examples
//!
//! ```no_run
//! use claimnorm_llm::LlamaCppClient;
//!
//! let client = LlamaCppClient::new("http://localhost:8080")
//!     .unwrap()
//!     .with_model_label("mistral-7b-instruct-v0.2.Q4_K_M");
//! ```

use crate::http::{self, PostRequest};
use crate::InferenceError;
use claimnorm_domain::{CompletionOptions, InferenceClient};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default llama.cpp server endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080";

/// Label reported when none was configured
pub const DEFAULT_MODEL_LABEL: &str = "llama.cpp";

/// Client for a llama.cpp server
pub struct LlamaCppClient {
    endpoint: String,
    model_label: String,
    client: reqwest::Client,
    timeout: Duration,
    max_retries: u32,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    prompt: &'a str,
    n_predict: u32,
    temperature: f32,
    stop: &'a [String],
    stream: bool,
}

#[derive(Deserialize)]
struct CompletionResponse {
    content: String,
}

impl LlamaCppClient {
    /// Create a client for the server at `endpoint`
    pub fn new(endpoint: impl Into<String>) -> Result<Self, InferenceError> {
        Ok(Self {
            endpoint: endpoint.into(),
            model_label: DEFAULT_MODEL_LABEL.to_string(),
            client: http::build_client()?,
            timeout: Duration::from_secs(crate::ollama::DEFAULT_TIMEOUT_SECS),
            max_retries: crate::ollama::DEFAULT_MAX_RETRIES,
        })
    }

    /// Name to report for the served model
    pub fn with_model_label(mut self, label: impl Into<String>) -> Self {
        self.model_label = label.into();
        self
    }

    /// Set the number of attempts per request
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check that the server is up and has finished loading its model
    pub async fn health_check(&self) -> Result<(), InferenceError> {
        let url = http::join_url(&self.endpoint, "health");
        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| http::classify(e, self.timeout))?;

        match response.status() {
            status if status.is_success() => Ok(()),
            reqwest::StatusCode::SERVICE_UNAVAILABLE => Err(InferenceError::Unavailable(
                "model is still loading".to_string(),
            )),
            status => Err(InferenceError::Communication(format!("HTTP {}", status))),
        }
    }

    /// Generate a completion
    pub async fn generate(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, InferenceError> {
        let url = http::join_url(&self.endpoint, "completion");
        let body = CompletionRequest {
            prompt,
            n_predict: options.max_tokens,
            temperature: options.temperature,
            stop: &options.stop_sequences,
            stream: false,
        };

        debug!(endpoint = %self.endpoint, prompt_chars = prompt.len(), "Calling llama.cpp server");

        let response: CompletionResponse = http::post_json(
            &self.client,
            PostRequest {
                url: &url,
                body: &body,
                model: &self.model_label,
                timeout: self.timeout,
                max_retries: self.max_retries,
            },
        )
        .await?;

        Ok(response.content)
    }
}

impl InferenceClient for LlamaCppClient {
    type Error = InferenceError;

    fn complete(&self, prompt: &str, options: &CompletionOptions) -> Result<String, Self::Error> {
        http::block_on(self.generate(prompt, options))
    }

    fn model_name(&self) -> &str {
        &self.model_label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llamacpp_client_creation() {
        let client = LlamaCppClient::new(DEFAULT_ENDPOINT).unwrap();
        assert_eq!(client.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(client.model_name(), DEFAULT_MODEL_LABEL);
    }

    #[test]
    fn test_model_label() {
        let client = LlamaCppClient::new(DEFAULT_ENDPOINT)
            .unwrap()
            .with_model_label("mistral-7b");
        assert_eq!(client.model_name(), "mistral-7b");
    }

    #[test]
    fn test_request_body_shape() {
        let stop = vec!["</s>".to_string()];
        let body = CompletionRequest {
            prompt: "p",
            n_predict: 128,
            temperature: 0.1,
            stop: &stop,
            stream: false,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["n_predict"], 128);
        assert_eq!(json["stop"][0], "</s>");
        assert_eq!(json["stream"], false);
    }

    #[test]
    fn test_response_ignores_extra_fields() {
        let raw = r#"{"content": "{}", "stop": true, "tokens_predicted": 2, "model": "x.gguf"}"#;
        let parsed: CompletionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.content, "{}");
    }

    #[tokio::test]
    async fn test_health_check_unreachable() {
        let client = LlamaCppClient::new("http://127.0.0.1:1").unwrap();
        let result = client.health_check().await;
        assert!(matches!(result, Err(InferenceError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_complete_inside_current_thread_runtime() {
        let client = LlamaCppClient::new("http://127.0.0.1:1")
            .unwrap()
            .with_max_retries(1);
        let result = client.complete("Pipe burst", &CompletionOptions::default());
        assert!(matches!(result, Err(InferenceError::Unavailable(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_complete_inside_multi_thread_runtime() {
        let client = LlamaCppClient::new("http://127.0.0.1:1")
            .unwrap()
            .with_max_retries(1);
        let result = client.complete("Pipe burst", &CompletionOptions::default());
        assert!(matches!(result, Err(InferenceError::Unavailable(_))));
    }

    #[tokio::test]
    #[ignore] // Only run when a llama.cpp server is available
    async fn test_llamacpp_generate_integration() {
        let client = LlamaCppClient::new(DEFAULT_ENDPOINT).unwrap();
        if client.health_check().await.is_ok() {
            let text = client
                .generate("Say 'hello'", &CompletionOptions::default())
                .await
                .unwrap();
            assert!(!text.is_empty());
        }
    }
}
