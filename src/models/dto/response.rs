use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::domain::{Answer, OptionLabel, Question};

/// Wire shape of a generated question: `{question, options, answer}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionDto {
    pub question: String,
    pub options: BTreeMap<OptionLabel, String>,
    pub answer: AnswerDto,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<OptionLabel>,
    pub text: String,
}

impl From<Answer> for AnswerDto {
    fn from(answer: Answer) -> Self {
        AnswerDto {
            label: answer.label,
            text: answer.text,
        }
    }
}

impl From<Question> for QuestionDto {
    fn from(question: Question) -> Self {
        QuestionDto {
            question: question.question,
            options: question.options,
            answer: question.answer.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
