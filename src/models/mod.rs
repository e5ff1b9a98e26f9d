//! Data models for the VoiceGuide backend
//!
//! This module contains the core domain models organized by concern:
//! - Location: Coordinates and gazetteer entries
//! - Etiquette: Etiquette categories and extracted records
//! - Query: Request and response payloads of the HTTP API

pub mod etiquette;
pub mod location;
pub mod query;

// Re-export all public types for convenient access
pub use etiquette::{EtiquetteCategory, EtiquetteRecord};
pub use location::{Coordinates, GazetteerEntry};
pub use query::{AssistantQuery, AssistantResponse, LocationQuery, LocationQueryResponse};
