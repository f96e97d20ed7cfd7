pub const DEFAULT_QUESTION_COUNT: usize = 3;
pub const MAX_QUESTION_COUNT: usize = 10;

pub const SECTION_DELIMITER: &str = "---";
pub const QUESTION_MARKER: &str = "<Question>:";
pub const OPTIONS_MARKER: &str = "<Options>:";
pub const ANSWER_MARKER: &str = "<Answer>:";

const QUIZ_MAKER_ROLE: &str = "You are an expert Multiple-Choice Question maker.";

const QUIZ_FORMAT_INSTRUCTIONS: &str = "### Output Format:

Write every question using exactly this layout, with nothing before or after it:

<Question>: question generated from the content
<Options>:
A) Option 1
B) Option 2
C) Option 3
D) Option 4
<Answer>: A) Option 1

### Rules:

- Provide exactly four options labelled A) to D), one per line.
- The <Answer> line repeats the letter and the full text of the correct option.
- Separate consecutive questions with a line containing only ---
- Do not number the questions and do not add commentary.";

/// Renders the instruction sent to the completion provider.
pub fn build_quiz_prompt(content: &str, requested_count: usize) -> String {
    format!(
        "{QUIZ_MAKER_ROLE}\n\
         Create {requested_count} multiple-choice questions based on the following content:\n\n\
         ### Content:\n\n\
         {content}\n\n\
         {QUIZ_FORMAT_INSTRUCTIONS}\n"
    )
}
