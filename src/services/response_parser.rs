use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::constants::quiz_prompt::{ANSWER_MARKER, QUESTION_MARKER, SECTION_DELIMITER};
use crate::models::domain::{Answer, OptionLabel, Question};

static NUMBERED_QUESTION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[#\s]*(?P<open>[*_]*)\s*Question\s*\d+\s*(?P<close>[*_]*)\s*[:.)](?P<rest>.*)$")
        .expect("NUMBERED_QUESTION_REGEX is a valid regex pattern")
});

static NUMBERED_ANSWER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<open>[*_]*)\s*Answer\s*(?P<close>[*_]*)\s*:(?P<rest>.*)$")
        .expect("NUMBERED_ANSWER_REGEX is a valid regex pattern")
});

static OPTION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[-*•]\s*)?(?P<label>[A-D])\)\s*(?P<text>.*)$")
        .expect("OPTION_REGEX is a valid regex pattern")
});

static LABELLED_ANSWER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<label>[A-D])(?:\)\s*(?P<text>.*)|\s*)$")
        .expect("LABELLED_ANSWER_REGEX is a valid regex pattern")
});

/// The two section layouts providers are known to produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Grammar {
    /// `<Question>: ...` / `A) ...` / `<Answer>: C) ...`
    Tagged,
    /// `Question 1: ...` / `- A) ...` / `Answer: C) ...`, optionally with markdown emphasis.
    Numbered,
}

impl Grammar {
    /// Finds the first question line of a section and the grammar it was written in.
    fn detect(lines: &[&str]) -> Option<(Grammar, String)> {
        lines.iter().find_map(|line| {
            [Grammar::Tagged, Grammar::Numbered]
                .into_iter()
                .find_map(|grammar| grammar.question_text(line).map(|text| (grammar, text)))
        })
    }

    fn question_text(self, line: &str) -> Option<String> {
        let text = match self {
            Grammar::Tagged => line.strip_prefix(QUESTION_MARKER)?.trim(),
            Grammar::Numbered => unwrap_emphasis(&NUMBERED_QUESTION_REGEX.captures(line)?),
        };
        (!text.is_empty()).then(|| text.to_string())
    }

    fn answer_body<'a>(self, line: &'a str) -> Option<&'a str> {
        let body = match self {
            Grammar::Tagged => line.strip_prefix(ANSWER_MARKER)?.trim(),
            Grammar::Numbered => unwrap_emphasis(&NUMBERED_ANSWER_REGEX.captures(line)?),
        };
        (!body.is_empty()).then_some(body)
    }
}

/// Text after a numbered marker, minus the emphasis opened before the marker.
///
/// Only the opening token is removed from the end, so `_` and `*` inside the text survive.
fn unwrap_emphasis<'a>(captures: &Captures<'a>) -> &'a str {
    let open = captures.name("open").map_or("", |m| m.as_str());
    let close = captures.name("close").map_or("", |m| m.as_str());
    let rest = captures.name("rest").map_or("", |m| m.as_str().trim());

    if open.is_empty() || close == open {
        return rest;
    }
    match rest.strip_prefix(open) {
        Some(text) => text.trim(),
        None => rest.strip_suffix(open).unwrap_or(rest).trim(),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    MissingQuestion,
    MissingAnswer,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingQuestion => write!(f, "no question line"),
            SkipReason::MissingAnswer => write!(f, "no answer line"),
        }
    }
}

/// A section that produced no question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionDiagnostic {
    /// Position of the section in the reply, counting empty sections.
    pub index: usize,
    pub reason: SkipReason,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub questions: Vec<Question>,
    pub skipped: Vec<SectionDiagnostic>,
    /// Indices into `questions` whose answer label is not one of their options.
    pub answer_mismatches: Vec<usize>,
}

/// Recovers questions from a provider reply, dropping sections that cannot be read.
pub fn parse_questions(reply: &str) -> Vec<Question> {
    parse_questions_with_report(reply).questions
}

pub fn parse_questions_with_report(reply: &str) -> ParseReport {
    let mut report = ParseReport::default();

    for (index, section) in reply.split(SECTION_DELIMITER).enumerate() {
        let section = section.trim();
        if section.is_empty() {
            continue;
        }

        match parse_section(section) {
            Ok(question) => {
                if !question.answer_matches_option() {
                    report.answer_mismatches.push(report.questions.len());
                }
                report.questions.push(question);
            }
            Err(reason) => report.skipped.push(SectionDiagnostic { index, reason }),
        }
    }

    report
}

fn parse_section(section: &str) -> Result<Question, SkipReason> {
    let lines: Vec<&str> = section
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let (grammar, question) = Grammar::detect(&lines).ok_or(SkipReason::MissingQuestion)?;
    let options = extract_options(&lines);
    let answer_body = lines
        .iter()
        .find_map(|line| grammar.answer_body(line))
        .ok_or(SkipReason::MissingAnswer)?;

    Ok(Question {
        question,
        answer: split_answer(answer_body, &options),
        options,
    })
}

fn extract_options(lines: &[&str]) -> BTreeMap<OptionLabel, String> {
    let mut options = BTreeMap::new();

    for line in lines {
        let Some(captures) = OPTION_REGEX.captures(line) else {
            continue;
        };
        let label = captures
            .name("label")
            .and_then(|m| m.as_str().chars().next())
            .and_then(OptionLabel::from_char);
        if let Some(label) = label {
            let text = captures.name("text").map_or("", |m| m.as_str().trim());
            options.insert(label, text.to_string());
        }
    }

    options
}

/// `C) text` splits into label and text; a bare `C` borrows the option text.
fn split_answer(body: &str, options: &BTreeMap<OptionLabel, String>) -> Answer {
    let Some(captures) = LABELLED_ANSWER_REGEX.captures(body) else {
        return Answer::new(None, body);
    };
    let label = captures
        .name("label")
        .and_then(|m| m.as_str().chars().next())
        .and_then(OptionLabel::from_char);

    let text = captures
        .name("text")
        .map(|m| m.as_str().trim())
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .or_else(|| label.and_then(|label| options.get(&label).cloned()))
        .unwrap_or_default();

    Answer::new(label, text)
}
