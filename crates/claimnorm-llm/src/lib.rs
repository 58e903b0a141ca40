//! claimnorm Inference Layer
//!
//! Implementations of the `InferenceClient` trait from `claimnorm-domain`.
//!
//! # Clients
//!
//! - `MockClient`: Deterministic scripted client for testing
//! - `OllamaClient`: Local Ollama API integration
//! - `LlamaCppClient`: llama.cpp server hosting a GGUF model
//!
//! All clients report failures as [`InferenceError`]; the normalization
//! pipeline turns any of them into a fallback record.
//!
//! # Examples
//!
//! ```
//! use claimnorm_llm::MockClient;
//! use claimnorm_domain::{CompletionOptions, InferenceClient};
//!
//! let client = MockClient::new(r#"{"loss_type": "Fire"}"#);
//! let text = client.complete("any prompt", &CompletionOptions::default()).unwrap();
//! assert_eq!(text, r#"{"loss_type": "Fire"}"#);
//! ```

#![warn(missing_docs)]

mod http;
pub mod llamacpp;
pub mod ollama;

use claimnorm_domain::{CompletionOptions, InferenceClient};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use thiserror::Error;

pub use llamacpp::LlamaCppClient;
pub use ollama::OllamaClient;

/// Errors that can occur while talking to an inference engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InferenceError {
    /// Engine not reachable or model not loaded yet
    #[error("Inference engine unavailable: {0}")]
    Unavailable(String),

    /// Request exceeded the client timeout
    #[error("Inference request timed out after {0:?}")]
    Timeout(Duration),

    /// Engine is up but does not serve the requested model
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Engine answered with a body we could not read
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Other transport or HTTP failure
    #[error("Communication error: {0}")]
    Communication(String),
}

impl InferenceError {
    /// Whether a retry could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            InferenceError::Unavailable(_)
                | InferenceError::Timeout(_)
                | InferenceError::Communication(_)
        )
    }
}

type Scripted = Result<String, InferenceError>;

/// Mock inference client for deterministic testing
///
/// Returns pre-configured completions without any network calls. Responses
/// are picked in this order: a response registered for the exact prompt,
/// then the next queued response, then the default.
///
/// # Examples
///
/// ```
/// use claimnorm_llm::{InferenceError, MockClient};
/// use claimnorm_domain::{CompletionOptions, InferenceClient};
///
/// let options = CompletionOptions::default();
///
/// let client = MockClient::new("default");
/// client.push_response("first");
/// client.push_error(InferenceError::Unavailable("not loaded".into()));
///
/// assert_eq!(client.complete("p", &options).unwrap(), "first");
/// assert!(client.complete("p", &options).is_err());
/// assert_eq!(client.complete("p", &options).unwrap(), "default");
/// assert_eq!(client.call_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct MockClient {
    default_response: Scripted,
    responses: Arc<Mutex<HashMap<String, Scripted>>>,
    queue: Arc<Mutex<VecDeque<Scripted>>>,
    call_count: Arc<Mutex<usize>>,
    last_options: Arc<Mutex<Option<CompletionOptions>>>,
}

impl MockClient {
    /// Create a MockClient with a fixed completion for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self::with_default(Ok(response.into()))
    }

    /// Create a MockClient that fails every call with `error`
    pub fn failing(error: InferenceError) -> Self {
        Self::with_default(Err(error))
    }

    fn with_default(default_response: Scripted) -> Self {
        Self {
            default_response,
            responses: Arc::new(Mutex::new(HashMap::new())),
            queue: Arc::new(Mutex::new(VecDeque::new())),
            call_count: Arc::new(Mutex::new(0)),
            last_options: Arc::new(Mutex::new(None)),
        }
    }

    /// Register a completion for one exact prompt
    pub fn add_response(&self, prompt: impl Into<String>, response: impl Into<String>) {
        lock(&self.responses).insert(prompt.into(), Ok(response.into()));
    }

    /// Register a failure for one exact prompt
    pub fn add_error(&self, prompt: impl Into<String>, error: InferenceError) {
        lock(&self.responses).insert(prompt.into(), Err(error));
    }

    /// Queue a completion for the next call
    pub fn push_response(&self, response: impl Into<String>) {
        lock(&self.queue).push_back(Ok(response.into()));
    }

    /// Queue a failure for the next call
    pub fn push_error(&self, error: InferenceError) {
        lock(&self.queue).push_back(Err(error));
    }

    /// Get the number of times complete was called
    pub fn call_count(&self) -> usize {
        *lock(&self.call_count)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *lock(&self.call_count) = 0;
    }

    /// Options passed with the most recent call
    pub fn last_options(&self) -> Option<CompletionOptions> {
        lock(&self.last_options).clone()
    }
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl InferenceClient for MockClient {
    type Error = InferenceError;

    fn complete(&self, prompt: &str, options: &CompletionOptions) -> Result<String, Self::Error> {
        *lock(&self.call_count) += 1;
        *lock(&self.last_options) = Some(options.clone());

        if let Some(scripted) = lock(&self.responses).get(prompt) {
            return scripted.clone();
        }
        if let Some(scripted) = lock(&self.queue).pop_front() {
            return scripted;
        }
        self.default_response.clone()
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

// A panicking test thread must not wedge every later call on the mock.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
