pub mod question_handler;

pub use question_handler::{generate_note_questions, generate_questions, health_check};
