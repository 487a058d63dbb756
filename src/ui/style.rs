//! Styling for the plain-text commands (`languages`, `providers`) and
//! messages printed outside the chat screen.

use owo_colors::OwoColorize;
use std::fmt::Display;

/// Styles for different semantic elements.
pub struct Style;

impl Style {
    /// Section headers (e.g., "Configured providers")
    pub fn header<T: Display>(text: T) -> String {
        format!("{}", text.bold())
    }

    /// Labels/keys (e.g., "endpoint", "models")
    pub fn label<T: Display>(text: T) -> String {
        format!("{}", text.dimmed())
    }

    /// Primary values such as provider and model names
    pub fn value<T: Display>(text: T) -> String {
        format!("{}", text.cyan())
    }

    /// Supplementary info (e.g., endpoints, language names)
    pub fn secondary<T: Display>(text: T) -> String {
        format!("{}", text.dimmed())
    }

    pub fn success<T: Display>(text: T) -> String {
        format!("{}", text.green())
    }

    pub fn warning<T: Display>(text: T) -> String {
        format!("{}", text.yellow())
    }

    /// Language codes
    pub fn code<T: Display>(text: T) -> String {
        format!("{}", text.yellow())
    }

    pub fn default_marker() -> String {
        format!("{}", "(default)".dimmed())
    }
}
