//! Structured grammar-check verdicts parsed from free-text provider replies.

use serde::Deserialize;
use thiserror::Error;

/// A word the provider flagged, with its position in the space-split sentence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FalseWord {
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub index: usize,
}

/// The provider's judgement of a sentence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GrammarVerdict {
    #[serde(default)]
    pub correct: bool,
    #[serde(default, rename = "falseWords")]
    pub false_words: Vec<FalseWord>,
    #[serde(default)]
    pub fixed: String,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarParseError {
    #[error("response contains no JSON object")]
    NoObject,
    #[error("invalid grammar JSON: {0}")]
    Json(String),
}

/// Parses a grammar verdict out of a raw provider reply.
///
/// Models often wrap the object in a Markdown fence or add a sentence around
/// it, so the outermost `{...}` span is what gets decoded.
pub fn parse_verdict(raw: &str) -> Result<GrammarVerdict, GrammarParseError> {
    let start = raw.find('{').ok_or(GrammarParseError::NoObject)?;
    let end = raw.rfind('}').ok_or(GrammarParseError::NoObject)?;
    if end < start {
        return Err(GrammarParseError::NoObject);
    }

    serde_json::from_str(&raw[start..=end]).map_err(|e| GrammarParseError::Json(e.to_string()))
}

/// Outcome of a grammar check as delivered to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarReport {
    /// The text that was checked, without the instruction prompt.
    pub origin: String,
    pub verdict: GrammarVerdict,
    /// Set when the reply could not be parsed and `verdict` is the default.
    pub parse_error: Option<GrammarParseError>,
}

impl GrammarReport {
    /// Folds a parse result into a report; failures keep the origin and an
    /// empty verdict.
    pub fn from_parse(origin: String, parsed: Result<GrammarVerdict, GrammarParseError>) -> Self {
        match parsed {
            Ok(verdict) => Self {
                origin,
                verdict,
                parse_error: None,
            },
            Err(err) => Self {
                origin,
                verdict: GrammarVerdict::default(),
                parse_error: Some(err),
            },
        }
    }

    /// Corrected text worth putting on the clipboard, if any.
    pub fn correction(&self) -> Option<&str> {
        let fixed = self.verdict.fixed.trim();
        (self.parse_error.is_none() && !fixed.is_empty()).then_some(fixed)
    }
}
