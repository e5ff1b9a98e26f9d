//! HTTP handlers for the assistant, location and utility endpoints

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderValue, header::CONTENT_TYPE},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    VoiceGuideError,
    assistant::DubaiAssistant,
    locations::LocationService,
    models::{AssistantQuery, AssistantResponse, LocationQuery, LocationQueryResponse},
};

/// Shared handles for every request handler
#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<DubaiAssistant>,
    pub locations: Arc<LocationService>,
    pub maps_api_key: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct HealthStatus {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct MapsApiKey {
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/dubai-assistant/query", post(query_assistant))
        .route("/dubai-assistant/stream", post(stream_assistant))
        .route("/dubai-locations/query", post(query_locations))
        .route("/google-maps/api-key", get(maps_api_key))
        .route("/health", get(health))
        .with_state(state)
}

async fn query_assistant(
    State(state): State<AppState>,
    Json(query): Json<AssistantQuery>,
) -> Result<Json<AssistantResponse>, VoiceGuideError> {
    let response = state.assistant.answer(&query).await?;
    Ok(Json(response))
}

async fn stream_assistant(
    State(state): State<AppState>,
    Json(query): Json<AssistantQuery>,
) -> Result<Response, VoiceGuideError> {
    let mut chunks = state.assistant.stream(&query).await?;

    // A failure after the first byte can no longer change the status code
    let body = async_stream::stream! {
        while let Some(chunk) = chunks.next().await {
            match chunk {
                Ok(text) => yield Ok::<_, Infallible>(text),
                Err(e) => {
                    warn!("Answer stream interrupted: {}", e);
                    yield Ok(format!("Error: {e}"));
                    break;
                }
            }
        }
    };

    let mut response = Response::new(Body::from_stream(body));
    response.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    Ok(response)
}

async fn query_locations(
    State(state): State<AppState>,
    Json(query): Json<LocationQuery>,
) -> Result<Json<LocationQueryResponse>, VoiceGuideError> {
    let response = state.locations.query(&query).await?;
    Ok(Json(response))
}

async fn maps_api_key(State(state): State<AppState>) -> impl IntoResponse {
    let body = match state.maps_api_key {
        Some(api_key) => MapsApiKey {
            api_key,
            error: None,
        },
        None => MapsApiKey {
            api_key: String::new(),
            error: Some("Google Maps API key is not configured".to_string()),
        },
    };
    Json(body)
}

async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
    })
}
