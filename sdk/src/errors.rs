//! Error types and handling
//!
//! This module provides the error types used by the StoryMap engine outside
//! the adapter boundary. Provider failures never surface here: adapters
//! convert them to "no data" and the orchestrator substitutes fallback
//! content. What remains are start-up problems (configuration, IO) that the
//! CLI reports to the user.
//!
//! # Security
//!
//! Error messages never include provider credentials. Anything derived from
//! a provider response is scrubbed by the engine before it is logged.

use thiserror::Error;

/// Trait for StoryMap error extensions
///
/// Provides a user-facing hint and whether retrying could help.
pub trait StoryMapErrorExt {
    /// Returns a user-friendly hint for the error
    ///
    /// The hint is safe to display to end users and never contains
    /// credentials or internal paths.
    fn user_hint(&self) -> &str;

    /// Returns whether the error is recoverable
    fn is_recoverable(&self) -> bool;
}

/// Main engine error type
///
/// # Examples
///
/// ```
/// use sdk::errors::{EngineError, StoryMapErrorExt};
///
/// let error = EngineError::Config("bad log level".to_string());
/// println!("Hint: {}", error.user_hint());
/// assert!(error.is_recoverable());
///
/// let fatal = EngineError::HomeDirUnavailable;
/// assert!(!fatal.is_recoverable());
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not determine home directory")]
    HomeDirUnavailable,

    // Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoryMapErrorExt for EngineError {
    fn user_hint(&self) -> &str {
        match self {
            Self::Config(_) => "Check your config.toml file for errors",
            Self::HomeDirUnavailable => "Pass an explicit --config path",
            Self::Io(_) => "File system operation failed",
        }
    }

    fn is_recoverable(&self) -> bool {
        !matches!(self, Self::HomeDirUnavailable)
    }
}
