//! claimnorm Domain Layer
//!
//! Core types shared by every other crate in the workspace: the structured
//! claim record produced by the normalization pipeline, its severity scale,
//! completion options, and the trait boundary to the text-generation engine.
//!
//! ## Key Concepts
//!
//! - **ClaimRecord**: the eight-field structured form of a free-text claim
//! - **Severity**: the closed four-value severity scale
//! - **InferenceClient**: the `complete(prompt, options) -> text` capability
//!
//! ## Architecture
//!
//! This crate holds no I/O. Engine implementations live in `claimnorm-llm`,
//! the pipeline lives in `claimnorm-normalizer`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod options;
pub mod record;
pub mod severity;
pub mod traits;

// Re-exports for convenience
pub use options::CompletionOptions;
pub use record::ClaimRecord;
pub use severity::Severity;
pub use traits::InferenceClient;
