use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Letter identifying an option or the correct answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    pub const ALL: [OptionLabel; 4] = [OptionLabel::A, OptionLabel::B, OptionLabel::C, OptionLabel::D];

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(OptionLabel::A),
            'B' => Some(OptionLabel::B),
            'C' => Some(OptionLabel::C),
            'D' => Some(OptionLabel::D),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionLabel::A => "A",
            OptionLabel::B => "B",
            OptionLabel::C => "C",
            OptionLabel::D => "D",
        }
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Answer {
    /// `None` when the provider named the answer without an `X)` prefix.
    pub label: Option<OptionLabel>,
    pub text: String,
}

impl Answer {
    pub fn new(label: Option<OptionLabel>, text: impl Into<String>) -> Self {
        Self {
            label,
            text: text.into(),
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label {
            Some(label) => write!(f, "{}) {}", label, self.text),
            None => f.write_str(&self.text),
        }
    }
}

/// A multiple-choice question recovered from a provider reply.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub question: String,
    pub options: BTreeMap<OptionLabel, String>,
    pub answer: Answer,
}

impl Question {
    /// True when the answer carries a label and that label is one of the options.
    pub fn answer_matches_option(&self) -> bool {
        self.answer
            .label
            .is_some_and(|label| self.options.contains_key(&label))
    }
}
