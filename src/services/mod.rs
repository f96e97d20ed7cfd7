pub mod completion_provider;
pub mod openai_provider;
pub mod question_generator;
pub mod response_parser;
pub mod text_sanitizer;
