//! Text normalisation: HTML extraction and the motion trimming cascade.

pub mod html;
pub mod pipeline;
pub mod trim;

use crate::config::Settings;

pub use pipeline::{TrimInput, TrimPipeline, TrimStep};

/// Outcome of cleaning a user-supplied motion text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputVerdict {
    Empty,
    TooShort(String),
    Ready(String),
}

impl InputVerdict {
    /// Canned reply shown instead of a cleaned text that cannot be used.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            InputVerdict::Empty => Some("Please enter some text"),
            InputVerdict::TooShort(_) => Some("Please enter a longer text"),
            InputVerdict::Ready(_) => None,
        }
    }
}

/// Clean free text the way motion bodies are cleaned, minus the title steps,
/// and reject what is too short to summarise.
pub fn clean_input_text(text: &str, settings: &Settings) -> InputVerdict {
    if text.trim().is_empty() {
        return InputVerdict::Empty;
    }
    let cleaned = TrimPipeline::for_free_text().run_text(text);
    if cleaned.chars().count() < settings.min_input_chars {
        InputVerdict::TooShort(cleaned)
    } else {
        InputVerdict::Ready(cleaned)
    }
}
