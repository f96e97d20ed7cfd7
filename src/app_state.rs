use std::sync::Arc;

use crate::{
    config::Config,
    errors::AppResult,
    repositories::{InMemoryNoteRepository, NoteRepository},
    services::{
        completion_provider::CompletionProvider, openai_provider::OpenAiCompletionProvider,
        question_generator::QuestionGenerator,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub question_generator: Arc<QuestionGenerator>,
    pub note_repository: Arc<dyn NoteRepository>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        config.validate()?;

        let provider = Arc::new(OpenAiCompletionProvider::new(config.provider_credentials()));
        log::info!("Using completion model {}", provider.model());

        Ok(Self::with_parts(
            config,
            provider,
            Arc::new(InMemoryNoteRepository::new()),
        ))
    }

    /// Wires the state around an explicit provider and note store.
    pub fn with_parts(
        config: Config,
        provider: Arc<dyn CompletionProvider>,
        note_repository: Arc<dyn NoteRepository>,
    ) -> Self {
        let question_generator = Arc::new(QuestionGenerator::new(
            provider,
            config.generation_settings(),
        ));

        Self {
            question_generator,
            note_repository,
            config: Arc::new(config),
        }
    }
}
