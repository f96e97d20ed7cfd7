use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::constants::quiz_prompt::{build_quiz_prompt, MAX_QUESTION_COUNT};
use crate::models::domain::Question;
use crate::services::completion_provider::{CompletionProvider, CompletionRequest, ProviderError};
use crate::services::response_parser::{parse_questions_with_report, ParseReport};
use crate::services::text_sanitizer::sanitize;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    #[error("Invalid generation request: {0}")]
    InvalidRequest(String),

    #[error("Question generation failed: {0}")]
    Provider(#[from] ProviderError),
}

pub type GenerationResult = Result<Vec<Question>, GenerationError>;

/// Sanitized content plus the number of questions to ask for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationRequest {
    pub content: String,
    pub requested_count: usize,
}

impl GenerationRequest {
    pub fn new(raw_content: &str, requested_count: usize) -> Result<Self, GenerationError> {
        if !(1..=MAX_QUESTION_COUNT).contains(&requested_count) {
            return Err(GenerationError::InvalidRequest(format!(
                "question count must be between 1 and {}, got {}",
                MAX_QUESTION_COUNT, requested_count
            )));
        }

        let content = sanitize(raw_content);
        if content.is_empty() {
            return Err(GenerationError::InvalidRequest(
                "content has no text to generate questions from".to_string(),
            ));
        }

        Ok(Self {
            content,
            requested_count,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RetryPolicy {
    /// Extra attempts after the first call.
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl RetryPolicy {
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let factor = 1u32 << attempt.min(16);
        self.initial_backoff.saturating_mul(factor).min(self.max_backoff)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(8),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GenerationSettings {
    pub max_tokens: u32,
    pub temperature: f32,
    pub completion_count: u8,
    /// Upper bound for a single provider attempt.
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_tokens: 1000,
            temperature: 0.7,
            completion_count: 1,
            timeout: Duration::from_secs(60),
            retry: RetryPolicy::default(),
        }
    }
}

/// Turns note content into multiple-choice questions through a completion provider.
///
/// The generator holds no per-call state and can be shared across request handlers. Dropping
/// a pending `generate` future cancels the provider call in flight.
pub struct QuestionGenerator {
    provider: Arc<dyn CompletionProvider>,
    settings: GenerationSettings,
}

impl QuestionGenerator {
    pub fn new(provider: Arc<dyn CompletionProvider>, settings: GenerationSettings) -> Self {
        Self { provider, settings }
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    pub async fn generate(&self, content: &str, requested_count: usize) -> GenerationResult {
        self.generate_with_report(content, requested_count)
            .await
            .map(|report| report.questions)
    }

    /// Like [`generate`](Self::generate), but also returns the sections that were dropped.
    pub async fn generate_with_report(
        &self,
        content: &str,
        requested_count: usize,
    ) -> Result<ParseReport, GenerationError> {
        let request = GenerationRequest::new(content, requested_count)?;
        let completion = CompletionRequest {
            prompt: build_quiz_prompt(&request.content, request.requested_count),
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
            completion_count: self.settings.completion_count,
        };

        let reply = self.complete_with_retry(&completion).await.map_err(|err| {
            log::error!("Question generation failed: {}", err);
            GenerationError::Provider(err)
        })?;

        let report = parse_questions_with_report(&reply);
        for diagnostic in &report.skipped {
            log::warn!(
                "Dropped reply section {}: {}",
                diagnostic.index,
                diagnostic.reason
            );
        }
        if !report.answer_mismatches.is_empty() {
            log::warn!(
                "{} question(s) name an answer that is not among their options",
                report.answer_mismatches.len()
            );
        }
        log::info!(
            "Generated {} of {} requested questions",
            report.questions.len(),
            request.requested_count
        );

        Ok(report)
    }

    async fn complete_with_retry(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        let retry = &self.settings.retry;
        let mut attempt = 0;

        loop {
            log::debug!("Requesting completion, attempt {}", attempt + 1);

            let outcome = tokio::time::timeout(self.settings.timeout, self.provider.complete(request))
                .await
                .unwrap_or(Err(ProviderError::Timeout(self.settings.timeout)));

            match outcome {
                Ok(reply) => return Ok(reply),
                Err(err) if err.is_retryable() && attempt < retry.max_retries => {
                    let backoff = retry.backoff_for(attempt);
                    log::warn!(
                        "Completion attempt {} failed: {}; retrying in {:?}",
                        attempt + 1,
                        err,
                        backoff
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
