//! Chat-completion service abstraction
//!
//! Everything that talks to the language model goes through
//! [`CompletionService`], so the assistant and the location resolver can be
//! exercised against a scripted service in tests.

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};

pub mod openai;
pub mod sse;

pub use openai::OpenAiClient;

/// Stream of text deltas in arrival order
pub type TextStream = BoxStream<'static, crate::Result<String>>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A role-tagged chat message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// One generation request
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    /// Ask the model for a single JSON object
    pub json_mode: bool,
}

impl CompletionRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            temperature: None,
            max_tokens: None,
            json_mode: false,
        }
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    #[must_use]
    pub fn json(mut self) -> Self {
        self.json_mode = true;
        self
    }
}

/// Black-box text generator
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Generate a complete reply
    async fn complete(&self, request: CompletionRequest) -> crate::Result<String>;

    /// Generate a reply as a stream of text chunks
    async fn stream(&self, request: CompletionRequest) -> crate::Result<TextStream>;
}

#[cfg(test)]
pub(crate) mod scripted {
    use super::*;
    use crate::VoiceGuideError;
    use futures::stream;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays canned replies and records every request it receives
    #[derive(Default)]
    pub struct ScriptedCompletion {
        replies: Mutex<VecDeque<crate::Result<String>>>,
        pub requests: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedCompletion {
        pub fn new(replies: Vec<crate::Result<String>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn replying(replies: &[&str]) -> Self {
            Self::new(replies.iter().map(|r| Ok(r.to_string())).collect())
        }

        pub fn recorded(&self) -> Vec<CompletionRequest> {
            self.requests.lock().unwrap().clone()
        }

        fn next_reply(&self, request: CompletionRequest) -> crate::Result<String> {
            self.requests.lock().unwrap().push(request);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(VoiceGuideError::upstream("no scripted reply left")))
        }
    }

    #[async_trait]
    impl CompletionService for ScriptedCompletion {
        async fn complete(&self, request: CompletionRequest) -> crate::Result<String> {
            self.next_reply(request)
        }

        async fn stream(&self, request: CompletionRequest) -> crate::Result<TextStream> {
            let reply = self.next_reply(request)?;
            let chunks: Vec<crate::Result<String>> = reply
                .split_inclusive(' ')
                .map(|chunk| Ok(chunk.to_string()))
                .collect();
            Ok(Box::pin(stream::iter(chunks)))
        }
    }
}
