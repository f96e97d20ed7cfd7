use serde::Deserialize;
use validator::Validate;

use crate::constants::quiz_prompt::DEFAULT_QUESTION_COUNT;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateQuestionsRequest {
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: String,

    #[validate(range(min = 1, max = 10))]
    pub num_questions: Option<u8>,
}

impl GenerateQuestionsRequest {
    pub fn question_count(&self) -> usize {
        self.num_questions
            .map(usize::from)
            .unwrap_or(DEFAULT_QUESTION_COUNT)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct QuestionCountParams {
    #[validate(range(min = 1, max = 10))]
    pub num_questions: Option<u8>,
}

impl QuestionCountParams {
    pub fn question_count(&self) -> usize {
        self.num_questions
            .map(usize::from)
            .unwrap_or(DEFAULT_QUESTION_COUNT)
    }
}
