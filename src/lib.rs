//! `VoiceGuide` - Multilingual tourist assistant backend for Dubai
//!
//! This library provides the answer pipeline with cultural-etiquette
//! extraction, gazetteer-based place resolution with mock directions,
//! and the HTTP API serving both.

pub mod api;
pub mod assistant;
pub mod completion;
pub mod config;
pub mod error;
pub mod language;
pub mod locations;
pub mod logging;
pub mod models;
pub mod web;

// Re-export core types for public API
pub use api::AppState;
pub use assistant::DubaiAssistant;
pub use completion::{CompletionRequest, CompletionService, OpenAiClient};
pub use config::VoiceGuideConfig;
pub use error::VoiceGuideError;
pub use language::Language;
pub use locations::{DirectionsEstimate, Gazetteer, LocationService};
pub use models::{AssistantQuery, AssistantResponse, LocationQuery, LocationQueryResponse};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, VoiceGuideError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
