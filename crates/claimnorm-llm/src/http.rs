//! HTTP plumbing shared by the engine clients

use crate::InferenceError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::time::Duration;
use tokio::runtime::{Handle, RuntimeFlavor};
use tracing::{debug, warn};

/// Build the underlying HTTP client
pub(crate) fn build_client() -> Result<reqwest::Client, InferenceError> {
    reqwest::Client::builder()
        .build()
        .map_err(|e| InferenceError::Communication(format!("Failed to build HTTP client: {}", e)))
}

/// Map a transport error onto the inference taxonomy
pub(crate) fn classify(err: reqwest::Error, timeout: Duration) -> InferenceError {
    if err.is_timeout() {
        InferenceError::Timeout(timeout)
    } else if err.is_connect() {
        InferenceError::Unavailable(format!("Request failed: {}", err))
    } else {
        InferenceError::Communication(format!("Request failed: {}", err))
    }
}

/// Request parameters shared by every POST to an engine
pub(crate) struct PostRequest<'a, B> {
    pub url: &'a str,
    pub body: &'a B,
    pub model: &'a str,
    pub timeout: Duration,
    pub max_retries: u32,
}

/// POST a JSON body and decode the JSON answer, retrying with backoff
pub(crate) async fn post_json<B, R>(
    client: &reqwest::Client,
    request: PostRequest<'_, B>,
) -> Result<R, InferenceError>
where
    B: Serialize,
    R: DeserializeOwned,
{
    let mut attempts = 0;
    let mut last_error = None;

    while attempts < request.max_retries.max(1) {
        let outcome = client
            .post(request.url)
            .timeout(request.timeout)
            .json(request.body)
            .send()
            .await;

        let error = match outcome {
            Ok(response) if response.status().is_success() => {
                return response.json::<R>().await.map_err(|e| {
                    InferenceError::InvalidResponse(format!("Failed to parse response: {}", e))
                });
            }
            Ok(response) if response.status() == reqwest::StatusCode::NOT_FOUND => {
                return Err(InferenceError::ModelNotAvailable(request.model.to_string()));
            }
            Ok(response) if response.status() == reqwest::StatusCode::SERVICE_UNAVAILABLE => {
                InferenceError::Unavailable("engine is loading the model".to_string())
            }
            Ok(response) => {
                let status = response.status();
                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                InferenceError::Communication(format!("HTTP {}: {}", status, error_text))
            }
            Err(e) => classify(e, request.timeout),
        };

        if !error.is_retryable() {
            return Err(error);
        }
        warn!(url = %request.url, attempt = attempts + 1, "Inference request failed: {}", error);
        last_error = Some(error);

        attempts += 1;
        if attempts < request.max_retries {
            // Exponential backoff: 1s, 2s, 4s, etc.
            let delay = Duration::from_secs(2u64.pow(attempts - 1));
            debug!("Retrying in {:?}", delay);
            tokio::time::sleep(delay).await;
        }
    }

    Err(last_error
        .unwrap_or_else(|| InferenceError::Communication("Max retries exceeded".to_string())))
}

/// Drive an engine future to completion from synchronous code
///
/// Inside a multi-thread tokio runtime the future runs on the current
/// handle via `block_in_place`. A current-thread runtime cannot be blocked,
/// so the call reports `Unavailable` instead.
pub(crate) fn block_on<F, T>(future: F) -> Result<T, InferenceError>
where
    F: Future<Output = Result<T, InferenceError>>,
{
    if let Ok(handle) = Handle::try_current() {
        return match handle.runtime_flavor() {
            RuntimeFlavor::CurrentThread => Err(InferenceError::Unavailable(
                "blocking call made from a current-thread async runtime; use generate()"
                    .to_string(),
            )),
            _ => tokio::task::block_in_place(|| handle.block_on(future)),
        };
    }

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| InferenceError::Unavailable(format!("Failed to start runtime: {}", e)))?
        .block_on(future)
}

/// Join an endpoint and an API path without doubling slashes
pub(crate) fn join_url(endpoint: &str, path: &str) -> String {
    format!("{}/{}", endpoint.trim_end_matches('/'), path.trim_start_matches('/'))
}
