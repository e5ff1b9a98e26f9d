//! Gazetteer Resolution Module
//!
//! Delegates entity recognition for free-text place questions to the
//! completion service in JSON mode, then validates every id it returns
//! against the gazetteer.

use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

use super::Gazetteer;
use crate::VoiceGuideError;
use crate::completion::{ChatMessage, CompletionRequest, CompletionService};

/// Endpoints of a directions request, both present by construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    pub origin_id: String,
    pub destination_id: String,
}

/// Validated outcome of resolving a place question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedQuery {
    /// Known gazetteer ids in the order the model listed them, without duplicates
    pub matching_ids: Vec<String>,
    /// Always one of `matching_ids` when present
    pub primary_id: Option<String>,
    /// Set only when both endpoints are known gazetteer ids
    pub route: Option<RouteRequest>,
}

impl ResolvedQuery {
    #[must_use]
    pub fn is_directions_request(&self) -> bool {
        self.route.is_some()
    }

    /// Default landmark as the only match, no directions
    #[must_use]
    pub fn fallback(gazetteer: &Gazetteer) -> Self {
        let id = gazetteer.default_entry().id.clone();
        Self {
            matching_ids: vec![id.clone()],
            primary_id: Some(id),
            route: None,
        }
    }
}

/// Reply shape requested from the model; every field may be missing or null
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawResolution {
    location_ids: Option<Vec<String>>,
    primary_location_id: Option<String>,
    is_directions_request: Option<bool>,
    origin_id: Option<String>,
    destination_id: Option<String>,
}

/// Resolves place questions against a fixed gazetteer
pub struct GazetteerResolver {
    completion: Arc<dyn CompletionService>,
    gazetteer: Arc<Gazetteer>,
}

impl GazetteerResolver {
    pub fn new(completion: Arc<dyn CompletionService>, gazetteer: Arc<Gazetteer>) -> Self {
        Self {
            completion,
            gazetteer,
        }
    }

    /// Resolve a question; never fails, degrading to [`ResolvedQuery::fallback`]
    pub async fn resolve(&self, query: &str) -> ResolvedQuery {
        debug!("Resolving place question: {}", query);

        match self.request_resolution(query).await {
            Ok(raw) => {
                let resolved = validate(raw, &self.gazetteer);
                debug!(
                    "Resolved {} location(s), primary: {:?}, directions: {}",
                    resolved.matching_ids.len(),
                    resolved.primary_id,
                    resolved.is_directions_request()
                );
                resolved
            }
            Err(e) => {
                warn!("Location resolution failed, using default landmark: {}", e);
                ResolvedQuery::fallback(&self.gazetteer)
            }
        }
    }

    async fn request_resolution(&self, query: &str) -> crate::Result<RawResolution> {
        let request = CompletionRequest::new(vec![
            ChatMessage::system(system_prompt(&self.gazetteer)),
            ChatMessage::user(query),
        ])
        .json();

        let reply = self.completion.complete(request).await?;
        serde_json::from_str(&reply).map_err(|e| {
            VoiceGuideError::upstream(format!("Unparseable resolution reply: {e}"))
        })
    }
}

fn validate(raw: RawResolution, gazetteer: &Gazetteer) -> ResolvedQuery {
    let location_ids = raw.location_ids.unwrap_or_default();
    let mut matching_ids: Vec<String> = Vec::with_capacity(location_ids.len());
    for id in location_ids {
        if !gazetteer.contains(&id) {
            debug!("Dropping unknown location id '{}'", id);
        } else if !matching_ids.contains(&id) {
            matching_ids.push(id);
        }
    }

    let primary_id = raw.primary_location_id.filter(|id| gazetteer.contains(id));
    if let Some(primary) = &primary_id
        && !matching_ids.contains(primary)
    {
        matching_ids.push(primary.clone());
    }

    let route = match (
        raw.is_directions_request.unwrap_or(false),
        raw.origin_id,
        raw.destination_id,
    ) {
        (true, Some(origin_id), Some(destination_id))
            if gazetteer.contains(&origin_id) && gazetteer.contains(&destination_id) =>
        {
            Some(RouteRequest {
                origin_id,
                destination_id,
            })
        }
        (true, origin_id, destination_id) => {
            debug!(
                "Clearing directions request with endpoints {:?} -> {:?}",
                origin_id, destination_id
            );
            None
        }
        _ => None,
    };

    ResolvedQuery {
        matching_ids,
        primary_id,
        route,
    }
}

fn system_prompt(gazetteer: &Gazetteer) -> String {
    let listing = gazetteer
        .entries()
        .map(|entry| {
            format!(
                "- {} (ID: {}, Category: {})",
                entry.name, entry.id, entry.category
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are the location search system of a Dubai tourism app.
Work out which of the known places a user question refers to.

Available Dubai locations:
{listing}

Reply with a JSON object containing:
1. "location_ids": IDs from the list above that match the question
2. "primary_location_id": the main place asked about, one of "location_ids"
3. "is_directions_request": true if the user wants to travel between two places
4. "origin_id": starting place ID for directions, otherwise null
5. "destination_id": destination place ID for directions, otherwise null

Question "What is the Burj Khalifa?" gives:
{{"location_ids": ["burj-khalifa"], "primary_location_id": "burj-khalifa", "is_directions_request": false, "origin_id": null, "destination_id": null}}

Question "How do I get from Palm Jumeirah to Dubai Mall?" gives:
{{"location_ids": ["palm-jumeirah", "dubai-mall"], "primary_location_id": "dubai-mall", "is_directions_request": true, "origin_id": "palm-jumeirah", "destination_id": "dubai-mall"}}

Never include places that are not in the list."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::scripted::ScriptedCompletion;

    fn resolver(completion: Arc<ScriptedCompletion>) -> GazetteerResolver {
        GazetteerResolver::new(completion, Arc::new(Gazetteer::dubai()))
    }

    #[tokio::test]
    async fn test_unknown_ids_are_dropped() {
        let completion = Arc::new(ScriptedCompletion::replying(&[
            r#"{"location_ids": ["burj-khalifa", "atlantis", "dubai-mall", "burj-khalifa"], "primary_location_id": "atlantis"}"#,
        ]));
        let resolved = resolver(completion).resolve("Tall buildings and malls").await;

        assert_eq!(resolved.matching_ids, vec!["burj-khalifa", "dubai-mall"]);
        assert_eq!(resolved.primary_id, None);
        assert!(!resolved.is_directions_request());
    }

    #[tokio::test]
    async fn test_directions_request() {
        let completion = Arc::new(ScriptedCompletion::replying(&[
            r#"{"location_ids": ["palm-jumeirah", "dubai-mall"], "primary_location_id": "dubai-mall", "is_directions_request": true, "origin_id": "palm-jumeirah", "destination_id": "dubai-mall"}"#,
        ]));
        let resolved = resolver(completion.clone())
            .resolve("How do I get from Palm Jumeirah to Dubai Mall?")
            .await;

        assert_eq!(resolved.primary_id.as_deref(), Some("dubai-mall"));
        assert_eq!(
            resolved.route,
            Some(RouteRequest {
                origin_id: "palm-jumeirah".to_string(),
                destination_id: "dubai-mall".to_string(),
            })
        );

        let request = &completion.recorded()[0];
        assert!(request.json_mode);
        assert!(request.messages[0].content.contains("- JBR Beach (ID: jbr-beach, Category: beach)"));
        assert_eq!(
            request.messages[1].content,
            "How do I get from Palm Jumeirah to Dubai Mall?"
        );
    }

    #[tokio::test]
    async fn test_directions_flag_without_destination_is_cleared() {
        let completion = Arc::new(ScriptedCompletion::replying(&[
            r#"{"location_ids": ["dubai-frame"], "is_directions_request": true, "origin_id": "dubai-frame", "destination_id": null}"#,
        ]));
        let resolved = resolver(completion).resolve("Directions from the Frame").await;
        assert!(resolved.route.is_none());
    }

    #[tokio::test]
    async fn test_unknown_route_endpoint_clears_directions() {
        let completion = Arc::new(ScriptedCompletion::replying(&[
            r#"{"location_ids": ["dubai-mall"], "primary_location_id": "dubai-mall", "is_directions_request": true, "origin_id": "my-hotel", "destination_id": "dubai-mall"}"#,
        ]));
        let resolved = resolver(completion).resolve("From my hotel to Dubai Mall").await;
        assert_eq!(resolved.matching_ids, vec!["dubai-mall"]);
        assert!(resolved.route.is_none());
    }

    #[tokio::test]
    async fn test_null_fields_are_treated_as_missing() {
        let completion = Arc::new(ScriptedCompletion::replying(&[
            r#"{"location_ids": ["dubai-frame"], "primary_location_id": "dubai-frame", "is_directions_request": null, "origin_id": null, "destination_id": null}"#,
            r#"{"location_ids": null, "primary_location_id": null, "is_directions_request": false}"#,
        ]));
        let resolver = resolver(completion);

        let resolved = resolver.resolve("What is the Dubai Frame?").await;
        assert_eq!(resolved.matching_ids, vec!["dubai-frame"]);
        assert_eq!(resolved.primary_id.as_deref(), Some("dubai-frame"));
        assert!(resolved.route.is_none());

        let resolved = resolver.resolve("Is it hot in August?").await;
        assert!(resolved.matching_ids.is_empty());
        assert!(resolved.primary_id.is_none());
    }

    #[tokio::test]
    async fn test_primary_missing_from_list_is_appended() {
        let completion = Arc::new(ScriptedCompletion::replying(&[
            r#"{"location_ids": ["jbr-beach"], "primary_location_id": "dubai-marina"}"#,
        ]));
        let resolved = resolver(completion).resolve("Marina walk and beach").await;
        assert_eq!(resolved.matching_ids, vec!["jbr-beach", "dubai-marina"]);
        assert_eq!(resolved.primary_id.as_deref(), Some("dubai-marina"));
    }

    #[tokio::test]
    async fn test_invalid_json_falls_back() {
        let completion = Arc::new(ScriptedCompletion::replying(&["Burj Khalifa, obviously"]));
        let resolved = resolver(completion).resolve("Tallest building?").await;
        assert_eq!(resolved, ResolvedQuery::fallback(&Gazetteer::dubai()));
        assert_eq!(resolved.primary_id.as_deref(), Some("burj-khalifa"));
    }

    #[tokio::test]
    async fn test_upstream_failure_falls_back() {
        let completion = Arc::new(ScriptedCompletion::new(vec![Err(
            VoiceGuideError::upstream("rate limited"),
        )]));
        let resolved = resolver(completion).resolve("Where is the souk?").await;
        assert_eq!(resolved.matching_ids, vec!["burj-khalifa"]);
        assert!(resolved.route.is_none());
    }

    #[tokio::test]
    async fn test_empty_object_resolves_to_nothing() {
        let completion = Arc::new(ScriptedCompletion::replying(&["{}"]));
        let resolved = resolver(completion).resolve("Is it hot in August?").await;
        assert!(resolved.matching_ids.is_empty());
        assert!(resolved.primary_id.is_none());
    }
}
