//! Inference client selection.

use crate::config::{BackendConfig, BackendKind};
use crate::error::Result;
use claimnorm_domain::InferenceClient;
use claimnorm_llm::{InferenceError, LlamaCppClient, OllamaClient};
use std::time::Duration;
use tracing::debug;

/// Any configured inference client.
pub type EngineClient = Box<dyn InferenceClient<Error = InferenceError>>;

/// Build the client described by `backend`.
pub fn build_client(backend: &BackendConfig) -> Result<EngineClient> {
    let timeout = Duration::from_secs(backend.timeout_secs);

    debug!(
        "Using {:?} backend at {} (model '{}')",
        backend.kind,
        backend.endpoint(),
        backend.model
    );

    let client: EngineClient = match backend.kind {
        BackendKind::Ollama => Box::new(
            OllamaClient::new(backend.endpoint(), &backend.model)?
                .with_timeout(timeout)
                .with_max_retries(backend.max_retries),
        ),
        BackendKind::LlamaCpp => Box::new(
            LlamaCppClient::new(backend.endpoint())?
                .with_model_label(&backend.model)
                .with_timeout(timeout)
                .with_max_retries(backend.max_retries),
        ),
    };

    Ok(client)
}
