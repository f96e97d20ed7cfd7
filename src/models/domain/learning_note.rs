use serde::{Deserialize, Serialize};

/// The slice of a learning note that question generation needs.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct LearningNote {
    pub id: i64,
    pub title: String,
    /// HTML produced by the note editor.
    pub content: String,
}

impl LearningNote {
    pub fn new(id: i64, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
        }
    }
}
