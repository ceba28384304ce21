//! StoryMap Engine Library
//!
//! Data orchestration for StoryMap: adapters for the external providers,
//! built-in fallback content, and the orchestrator that combines them into
//! results for the map and card views. Used by the `storymap` binary and
//! the integration tests.

/// External provider adapters
pub mod adapters;

/// CLI interface module
pub mod cli;

/// Climate event aggregation
pub mod climate;

/// Configuration management module
pub mod config;

/// Built-in content used when providers yield nothing
pub mod fallback;

/// Command handlers module
pub mod handlers;

/// Request orchestration
pub mod orchestrator;

/// Provider credentials and redaction
pub mod secrets;

/// Telemetry and Observability
pub mod telemetry;
