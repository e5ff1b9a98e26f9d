//! Client for OpenAI compatible `/chat/completions` endpoints

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{StatusCode, header::CONTENT_TYPE};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

use super::sse::{SseDecoder, SseEvent};
use super::{ChatMessage, CompletionRequest, CompletionService, TextStream};
use crate::VoiceGuideError;
use crate::config::VoiceGuideConfig;

/// Chat-completion API client with retries for transient failures
pub struct OpenAiClient {
    client: ClientWithMiddleware,
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenAiClient {
    /// Create a new client; fails when no API key is configured
    pub fn new(config: &VoiceGuideConfig) -> crate::Result<Self> {
        let api_key = config.api_key()?.to_string();
        let timeout = Duration::from_secs(config.completion.timeout_seconds);

        // Whole-request timeouts are set per call; streams only bound each read.
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .read_timeout(timeout)
            .user_agent(concat!("VoiceGuide/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| VoiceGuideError::config(format!("Failed to create HTTP client: {e}")))?;

        let retry_policy =
            ExponentialBackoff::builder().build_with_max_retries(config.completion.max_retries);
        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            api_key,
            base_url: config.completion.base_url.trim_end_matches('/').to_string(),
            model: config.completion.model.clone(),
            timeout,
        })
    }

    fn body<'a>(&'a self, request: &'a CompletionRequest, stream: bool) -> ChatCompletionBody<'a> {
        ChatCompletionBody {
            model: &self.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format: request.json_mode.then_some(ResponseFormat {
                kind: "json_object",
            }),
            stream,
        }
    }

    async fn send(
        &self,
        body: &ChatCompletionBody<'_>,
        timeout: Option<Duration>,
    ) -> crate::Result<reqwest::Response> {
        let url = format!("{}/chat/completions", self.base_url);
        let payload = serde_json::to_vec(body).map_err(|e| {
            VoiceGuideError::upstream(format!("Failed to encode completion request: {e}"))
        })?;

        debug!(
            "Sending {} messages to {} (stream: {})",
            body.messages.len(),
            url,
            body.stream
        );

        let mut request = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .body(payload);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| {
            error!("Completion request failed: {}", e);
            VoiceGuideError::upstream(format!("Completion request failed: {e}"))
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response.text().await.unwrap_or_default();
        warn!("Completion API returned {}: {}", status, error_text);

        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                VoiceGuideError::upstream("Completion API rejected the configured API key")
            }
            StatusCode::TOO_MANY_REQUESTS => {
                VoiceGuideError::upstream("Completion API rate limit or quota exceeded")
            }
            _ => VoiceGuideError::upstream(format!(
                "Completion API request failed with status: {} - {}",
                status,
                status.canonical_reason().unwrap_or("Unknown error")
            )),
        })
    }
}

#[async_trait]
impl CompletionService for OpenAiClient {
    #[instrument(skip(self, request), fields(model = %self.model, json = request.json_mode))]
    async fn complete(&self, request: CompletionRequest) -> crate::Result<String> {
        let start_time = Instant::now();
        let body = self.body(&request, false);
        let response = self.send(&body, Some(self.timeout)).await?;

        let parsed: ChatCompletionResponse = response.json().await.map_err(|e| {
            error!("Failed to parse completion response: {}", e);
            VoiceGuideError::upstream(format!("Invalid completion response: {e}"))
        })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| VoiceGuideError::upstream("Completion response contained no message"))?;

        info!(
            "Completion finished in {:.3}s ({} chars)",
            start_time.elapsed().as_secs_f64(),
            content.len()
        );

        Ok(content)
    }

    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn stream(&self, request: CompletionRequest) -> crate::Result<TextStream> {
        let body = self.body(&request, true);
        let response = self.send(&body, None).await?;
        let mut bytes = response.bytes_stream();

        let stream = async_stream::stream! {
            let mut decoder = SseDecoder::new();
            let mut done = false;

            while let Some(chunk) = bytes.next().await {
                let chunk = match chunk {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        error!("Completion stream interrupted: {}", e);
                        yield Err(VoiceGuideError::upstream(format!(
                            "Completion stream interrupted: {e}"
                        )));
                        return;
                    }
                };

                for event in decoder.push(&chunk) {
                    match event {
                        SseEvent::Delta(text) => yield Ok::<String, VoiceGuideError>(text),
                        SseEvent::Done => done = true,
                    }
                }

                if done {
                    break;
                }
            }

            if !done {
                if let Some(SseEvent::Delta(text)) = decoder.finish() {
                    yield Ok(text);
                }
            }
            debug!("Completion stream finished");
        };

        Ok(Box::pin(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> OpenAiClient {
        let mut config = VoiceGuideConfig::default();
        config.completion.api_key = Some("sk-test-key-123".to_string());
        config.completion.base_url = "https://llm.example.com/v1/".to_string();
        OpenAiClient::new(&config).unwrap()
    }

    #[test]
    fn test_client_requires_api_key() {
        let config = VoiceGuideConfig::default();
        assert!(matches!(
            OpenAiClient::new(&config),
            Err(VoiceGuideError::Config { .. })
        ));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        assert_eq!(test_client().base_url, "https://llm.example.com/v1");
    }

    #[test]
    fn test_json_mode_body() {
        let client = test_client();
        let request = CompletionRequest::new(vec![ChatMessage::user("Where is JBR?")]).json();
        let body = serde_json::to_value(client.body(&request, false)).unwrap();

        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["response_format"]["type"], "json_object");
        assert!(body.get("stream").is_none());
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn test_streaming_body_with_sampling() {
        let client = test_client();
        let request = CompletionRequest::new(vec![ChatMessage::user("Hi")])
            .with_temperature(0.7)
            .with_max_tokens(800);
        let body = serde_json::to_value(client.body(&request, true)).unwrap();

        assert_eq!(body["stream"], true);
        assert_eq!(body["max_tokens"], 800);
        assert!(body.get("response_format").is_none());
    }
}
