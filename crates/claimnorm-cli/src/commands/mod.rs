//! Command implementations.

pub mod config;
pub mod normalize;
pub mod prompt;
pub mod samples;

pub use self::config::execute_config;
pub use self::normalize::execute_normalize;
pub use self::prompt::execute_prompt;
pub use self::samples::execute_samples;
