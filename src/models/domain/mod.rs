pub mod learning_note;
pub mod question;
pub use learning_note::LearningNote;
pub use question::{Answer, OptionLabel, Question};
