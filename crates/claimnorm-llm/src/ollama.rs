//! Ollama Client Implementation
//!
//! Provides integration with Ollama's local generation API.
//!
//! # Features
//!
//! - Async HTTP communication with Ollama API
//! - Configurable endpoint, model, and timeout
//! - Retry logic with exponential backoff
//! - Completion options mapped onto Ollama's `options` block
//!
//! # Examples
//!
//! ```no_run
//! use claimnorm_llm::OllamaClient;
//!
//! let client = OllamaClient::new("http://localhost:11434", "mistral").unwrap();
//!
//! // `generate` is async; the `InferenceClient` impl is the blocking wrapper
//! ```

use crate::http::{self, PostRequest};
use crate::InferenceError;
use claimnorm_domain::{CompletionOptions, InferenceClient};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default timeout for inference requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of attempts per request
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Ollama API client for local inference
pub struct OllamaClient {
    endpoint: String,
    model: String,
    client: reqwest::Client,
    timeout: Duration,
    max_retries: u32,
}

/// Request body for Ollama generate API
#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: OllamaOptions<'a>,
}

#[derive(Serialize)]
struct OllamaOptions<'a> {
    num_predict: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    stop: &'a [String],
}

/// Response from Ollama generate API
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
    #[allow(dead_code)]
    done: bool,
}

impl OllamaClient {
    /// Create a new Ollama client
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint (e.g., "http://localhost:11434")
    /// - `model`: Model to use (e.g., "mistral")
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Result<Self, InferenceError> {
        Ok(Self {
            endpoint: endpoint.into(),
            model: model.into(),
            client: http::build_client()?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Create a new Ollama client on `http://localhost:11434`
    pub fn default_endpoint(model: impl Into<String>) -> Result<Self, InferenceError> {
        Self::new(DEFAULT_ENDPOINT, model)
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

    /// Generate text using the Ollama API
    ///
    /// # Errors
    ///
    /// - `Unavailable` if Ollama is not running
    /// - `Timeout` if the request exceeds the configured timeout
    /// - `ModelNotAvailable` if the model has not been pulled
    /// - `InvalidResponse` if the body is not an Ollama generate response
    pub async fn generate(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, InferenceError> {
        let url = http::join_url(&self.endpoint, "api/generate");

        let body = OllamaGenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: OllamaOptions {
                num_predict: options.max_tokens,
                temperature: options.temperature,
                stop: &options.stop_sequences,
            },
        };

        debug!(model = %self.model, prompt_chars = prompt.len(), "Calling Ollama");

        let response: OllamaGenerateResponse = http::post_json(
            &self.client,
            PostRequest {
                url: &url,
                body: &body,
                model: &self.model,
                timeout: self.timeout,
                max_retries: self.max_retries,
            },
        )
        .await?;

        Ok(response.response)
    }
}

impl InferenceClient for OllamaClient {
    type Error = InferenceError;

    fn complete(&self, prompt: &str, options: &CompletionOptions) -> Result<String, Self::Error> {
        http::block_on(self.generate(prompt, options))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ollama_client_creation() {
        let client = OllamaClient::new("http://localhost:11434", "mistral").unwrap();
        assert_eq!(client.endpoint, "http://localhost:11434");
        assert_eq!(client.model, "mistral");
        assert_eq!(client.max_retries, DEFAULT_MAX_RETRIES);
        assert_eq!(client.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_ollama_client_default_endpoint() {
        let client = OllamaClient::default_endpoint("mistral").unwrap();
        assert_eq!(client.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(client.model_name(), "mistral");
    }

    #[test]
    fn test_ollama_client_builders() {
        let client = OllamaClient::default_endpoint("mistral")
            .unwrap()
            .with_max_retries(5)
            .with_timeout(Duration::from_secs(2));
        assert_eq!(client.max_retries, 5);
        assert_eq!(client.timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_request_body_shape() {
        let stop = vec!["</s>".to_string()];
        let body = OllamaGenerateRequest {
            model: "mistral",
            prompt: "hi",
            stream: false,
            options: OllamaOptions {
                num_predict: 256,
                temperature: 0.5,
                stop: &stop,
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "mistral");
        assert_eq!(json["stream"], false);
        assert_eq!(json["options"]["num_predict"], 256);
        assert_eq!(json["options"]["stop"][0], "</s>");
    }

    #[test]
    fn test_empty_stop_is_omitted() {
        let body = OllamaOptions {
            num_predict: 10,
            temperature: 0.0,
            stop: &[],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("stop").is_none());
    }

    #[test]
    fn test_complete_unreachable_is_unavailable() {
        let client = OllamaClient::new("http://127.0.0.1:1", "mistral")
            .unwrap()
            .with_max_retries(1);
        let result = client.complete("Car hit a pole", &CompletionOptions::default());
        assert!(matches!(result, Err(InferenceError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_complete_inside_current_thread_runtime() {
        let client = OllamaClient::new("http://127.0.0.1:1", "mistral")
            .unwrap()
            .with_max_retries(1);
        let result = client.complete("Car hit a pole", &CompletionOptions::default());
        assert!(matches!(result, Err(InferenceError::Unavailable(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_complete_inside_multi_thread_runtime() {
        let client = OllamaClient::new("http://127.0.0.1:1", "mistral")
            .unwrap()
            .with_max_retries(1);
        let result = client.complete("Car hit a pole", &CompletionOptions::default());
        assert!(matches!(result, Err(InferenceError::Unavailable(_))));
    }

    // Integration tests (requires running Ollama)
    #[tokio::test]
    #[ignore] // Only run when Ollama is available
    async fn test_ollama_generate_integration() {
        let client = OllamaClient::default_endpoint("mistral").unwrap();
        let result = client
            .generate("Say 'hello' and nothing else", &CompletionOptions::default())
            .await;

        if let Ok(response) = result {
            assert!(!response.is_empty());
        }
    }

    #[tokio::test]
    async fn test_ollama_unreachable_is_unavailable() {
        // Nothing listens on port 1
        let client = OllamaClient::new("http://127.0.0.1:1", "mistral")
            .unwrap()
            .with_max_retries(1);

        let result = client.generate("test", &CompletionOptions::default()).await;

        match result {
            Err(InferenceError::Unavailable(_)) => {} // Expected
            other => panic!("Expected Unavailable error, got {:?}", other),
        }
    }
}
