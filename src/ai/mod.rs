//! External language-model integration.
//!
//! `gemini` holds the HTTP client and the `LanguageModel` seam; `classifier`
//! turns free text into a (sentiment, reason) suggestion with a deterministic
//! fallback; `report` produces the narrative executive document. Both callers
//! absorb model failures — nothing in this module raises into the
//! record-entry workflow.

/// Sentiment/reason classification with fallback
pub mod classifier;
/// Gemini API client and the language-model trait
pub mod gemini;
/// Narrative executive report generation
pub mod report;

pub use classifier::{SentimentClassifier, Suggestion};
pub use gemini::{AiError, GeminiClient, LanguageModel};
pub use report::{render_summary_table, ReportGenerator};
