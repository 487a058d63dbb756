//! Prompt composition for the translate and grammar-check modes.

mod language;
mod templates;

pub use language::{SUPPORTED_LANGUAGES, language_name, print_languages, validate_language};
pub use templates::{grammar_check_prompt, translate_instruction};
