//! Trait definitions for external interactions
//!
//! The pipeline depends only on these traits, never on a particular model
//! runtime. Implementations live in `claimnorm-llm`.

use crate::CompletionOptions;

/// Trait for text-generation engines
///
/// Implemented by the infrastructure layer (claimnorm-llm). A single call is
/// the only blocking point of the normalization pipeline.
pub trait InferenceClient {
    /// Error type for completion failures
    type Error;

    /// Complete `prompt` and return the raw generated text
    fn complete(&self, prompt: &str, options: &CompletionOptions) -> Result<String, Self::Error>;

    /// Name of the model behind this client, for diagnostics
    fn model_name(&self) -> &str {
        "unknown"
    }
}

impl<T: InferenceClient + ?Sized> InferenceClient for Box<T> {
    type Error = T::Error;

    fn complete(&self, prompt: &str, options: &CompletionOptions) -> Result<String, Self::Error> {
        (**self).complete(prompt, options)
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

impl<T: InferenceClient + ?Sized> InferenceClient for &T {
    type Error = T::Error;

    fn complete(&self, prompt: &str, options: &CompletionOptions) -> Result<String, Self::Error> {
        (**self).complete(prompt, options)
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}
