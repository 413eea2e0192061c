//! Summary and title generation use-cases.
//!
//! # Responsibility
//! - Build the instruction prompts embedding content and style parameters.
//! - Map every generation failure to a fixed fallback string.
//!
//! # Invariants
//! - `summarize` and `suggest_title` each issue exactly one generator call.
//! - On success the generated text is returned verbatim.
//! - Failures are logged on the diagnostic channel and never propagated.

use crate::ai::gemini::TextGenerator;
use crate::model::note::{DetailLevel, SummaryLength};
use log::{info, warn};
use std::time::Instant;

/// Fixed text substituted when summary generation fails.
pub const SUMMARY_FALLBACK_TEXT: &str = "Failed to generate summary. Please try again.";
/// Fixed text substituted when title suggestion fails.
pub const TITLE_FALLBACK_TEXT: &str = "Untitled Note";

/// Pass-through facade over one text generator.
pub struct SummaryService<G: TextGenerator> {
    generator: G,
}

impl<G: TextGenerator> SummaryService<G> {
    /// Creates a service using the provided generator implementation.
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Generates a summary of `text` honoring the two style parameters.
    ///
    /// Returns the generated text verbatim, or the fixed fallback on any
    /// failure.
    pub fn summarize(&self, text: &str, length: SummaryLength, detail: DetailLevel) -> String {
        let prompt = summary_prompt(text, length, detail);
        self.dispatch("summary", &prompt, SUMMARY_FALLBACK_TEXT)
    }

    /// Generates a short title suggestion for `text`.
    ///
    /// Returns the generated text verbatim, or the fixed fallback on any
    /// failure.
    pub fn suggest_title(&self, text: &str) -> String {
        let prompt = title_prompt(text);
        self.dispatch("title", &prompt, TITLE_FALLBACK_TEXT)
    }

    fn dispatch(&self, kind: &str, prompt: &str, fallback: &str) -> String {
        let started_at = Instant::now();
        match self.generator.generate(prompt) {
            Ok(generated) => {
                info!(
                    "event=ai_generate module=ai status=ok kind={kind} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                generated
            }
            Err(err) => {
                warn!(
                    "event=ai_generate module=ai status=error kind={kind} duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                fallback.to_string()
            }
        }
    }
}

/// Builds the summary instruction prompt.
pub fn summary_prompt(text: &str, length: SummaryLength, detail: DetailLevel) -> String {
    format!(
        "Summarize the following text.\n\
         Length: {}\n\
         Detail level: {}\n\
         \n\
         Text to summarize:\n\
         {text}",
        length_instruction(length),
        detail_instruction(detail),
    )
}

/// Builds the title instruction prompt.
pub fn title_prompt(text: &str) -> String {
    format!(
        "Write a concise, descriptive title for the following text.\n\
         The title must be at most 10 words and capture the main topic.\n\
         \n\
         Text:\n\
         {text}"
    )
}

fn length_instruction(length: SummaryLength) -> &'static str {
    match length {
        SummaryLength::Short => "short (1-2 paragraphs)",
        SummaryLength::Medium => "medium (3-4 paragraphs)",
        SummaryLength::Long => "long (5+ paragraphs)",
    }
}

fn detail_instruction(detail: DetailLevel) -> &'static str {
    match detail {
        DetailLevel::Low => "low (main points only)",
        DetailLevel::Medium => "medium (important details)",
        DetailLevel::High => "high (comprehensive)",
    }
}
