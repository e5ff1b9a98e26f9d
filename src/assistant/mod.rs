//! Dubai tourist assistant
//!
//! Answers free-form questions through the completion service:
//! - Category detection for cultural-etiquette questions
//! - Prompt assembly with a language directive
//! - Etiquette block extraction from the answer
//! - Follow-up suggestions generated from the visible answer

use std::sync::Arc;
use tracing::{debug, info, instrument};

pub mod category;
pub mod etiquette;
pub mod followups;
pub mod prompts;

use crate::completion::{ChatMessage, CompletionRequest, CompletionService, TextStream};
use crate::config::AssistantConfig;
use crate::language::Language;
use crate::models::{AssistantQuery, AssistantResponse, EtiquetteCategory};

/// Orchestrates the answer and follow-up calls for one query at a time
pub struct DubaiAssistant {
    completion: Arc<dyn CompletionService>,
    settings: AssistantConfig,
}

impl DubaiAssistant {
    pub fn new(completion: Arc<dyn CompletionService>, settings: AssistantConfig) -> Self {
        Self {
            completion,
            settings,
        }
    }

    /// Answer a query, attaching etiquette guidance and follow-up questions.
    ///
    /// The follow-up call needs the visible answer, so the two calls run
    /// one after the other. A failure in either fails the whole query.
    #[instrument(skip(self, query), fields(language = %query.language))]
    pub async fn answer(&self, query: &AssistantQuery) -> crate::Result<AssistantResponse> {
        query.validate()?;

        let language = Language::from_tag(&query.language);
        let category = category::detect(&query.query);
        info!(
            "Answering query (language: {}, etiquette: {})",
            language,
            category.map_or("none", EtiquetteCategory::id)
        );

        let raw_answer = self
            .completion
            .complete(self.answer_request(&query.query, language, category))
            .await?;

        let (answer, etiquette) = match category {
            Some(category) => {
                let extraction = etiquette::extract(&raw_answer, category);
                debug!("Etiquette record extracted: {}", extraction.record.is_some());
                (extraction.answer, extraction.record)
            }
            None => (raw_answer, None),
        };

        let suggested_followups = self.followups(&query.query, &answer, language).await?;

        Ok(AssistantResponse {
            answer,
            suggested_followups,
            etiquette,
        })
    }

    /// Stream the plain answer for a query, chunk by chunk
    #[instrument(skip(self, query), fields(language = %query.language))]
    pub async fn stream(&self, query: &AssistantQuery) -> crate::Result<TextStream> {
        query.validate()?;

        let language = Language::from_tag(&query.language);
        info!("Streaming answer (language: {})", language);
        self.completion
            .stream(self.answer_request(&query.query, language, None))
            .await
    }

    fn answer_request(
        &self,
        question: &str,
        language: Language,
        category: Option<EtiquetteCategory>,
    ) -> CompletionRequest {
        CompletionRequest::new(vec![
            ChatMessage::system(prompts::answer_system_prompt(language, category)),
            ChatMessage::user(question),
        ])
        .with_temperature(self.settings.temperature)
        .with_max_tokens(self.settings.answer_max_tokens)
    }

    async fn followups(
        &self,
        question: &str,
        answer: &str,
        language: Language,
    ) -> crate::Result<Vec<String>> {
        let request = CompletionRequest::new(vec![
            ChatMessage::system(prompts::followup_system_prompt(language)),
            ChatMessage::user(prompts::followup_user_prompt(question, answer)),
        ])
        .with_temperature(self.settings.temperature)
        .with_max_tokens(self.settings.followup_max_tokens);

        let text = self.completion.complete(request).await?;
        let followups = followups::extract(&text);
        debug!("Extracted {} follow-up suggestions", followups.len());
        Ok(followups)
    }
}
