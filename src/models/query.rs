//! Request and response payloads exchanged with the frontend

use serde::{Deserialize, Serialize};

use super::{Coordinates, EtiquetteRecord, GazetteerEntry};
use crate::VoiceGuideError;
use crate::locations::DirectionsEstimate;

fn default_language() -> String {
    "en".to_string()
}

/// A tourist question for the assistant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantQuery {
    /// The user's question about Dubai
    pub query: String,
    /// Language tag for the answer, e.g. `en` or `ar-AE`
    #[serde(default = "default_language")]
    pub language: String,
    /// Where the user currently is, if the browser shared it
    #[serde(default)]
    pub current_location: Option<Coordinates>,
}

impl AssistantQuery {
    pub fn new(query: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            language: language.into(),
            current_location: None,
        }
    }

    pub fn validate(&self) -> crate::Result<()> {
        validate_query_text(&self.query)?;
        if let Some(position) = &self.current_location {
            position.validate()?;
        }
        Ok(())
    }
}

/// Answer returned by the assistant
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssistantResponse {
    pub answer: String,
    #[serde(default)]
    pub suggested_followups: Vec<String>,
    #[serde(rename = "etiquette_info", default)]
    pub etiquette: Option<EtiquetteRecord>,
}

/// A question about places in Dubai
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationQuery {
    pub query: String,
    #[serde(default)]
    pub current_location: Option<Coordinates>,
}

impl LocationQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            current_location: None,
        }
    }

    pub fn validate(&self) -> crate::Result<()> {
        validate_query_text(&self.query)?;
        if let Some(position) = &self.current_location {
            position.validate()?;
        }
        Ok(())
    }
}

/// Places matching a location query, framed for the map widget
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationQueryResponse {
    pub locations: Vec<GazetteerEntry>,
    pub primary_location: Option<String>,
    pub directions: Option<DirectionsEstimate>,
    pub map_center: Coordinates,
    pub zoom_level: u8,
}

fn validate_query_text(query: &str) -> crate::Result<()> {
    if query.trim().is_empty() {
        return Err(VoiceGuideError::validation("Query cannot be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_defaults_to_english() {
        let query: AssistantQuery =
            serde_json::from_str(r#"{"query": "Where is the Dubai Frame?"}"#).unwrap();
        assert_eq!(query.language, "en");
        assert!(query.current_location.is_none());
    }

    #[test]
    fn test_blank_query_is_rejected() {
        let query = AssistantQuery::new("   ", "en");
        assert!(matches!(
            query.validate(),
            Err(VoiceGuideError::Validation { .. })
        ));
    }

    #[test]
    fn test_out_of_range_position_is_rejected() {
        let mut query = LocationQuery::new("Take me to JBR Beach");
        query.current_location = Some(Coordinates::new(125.0, 55.0));
        assert!(query.validate().is_err());
    }

    #[test]
    fn test_response_without_etiquette_serializes_null() {
        let response = AssistantResponse {
            answer: "The metro opens at 5am.".to_string(),
            suggested_followups: vec![],
            etiquette: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json["etiquette_info"].is_null());
        assert_eq!(json["suggested_followups"], serde_json::json!([]));
    }
}
