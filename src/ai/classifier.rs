//! Classifier adapter: free text in, (sentiment, reason) suggestion out.
//!
//! The external call is best-effort. Whatever goes wrong — network failure,
//! a malformed completion, an out-of-set value — the adapter answers with the
//! fixed fallback suggestion instead of an error, so classification can never
//! block the record-entry flow. One attempt per call, nothing cached.

use serde::Deserialize;
use tracing::warn;

use crate::ai::gemini::LanguageModel;
use crate::models::{Classification, Reason, Sentiment};

/// The deterministic answer used whenever the model cannot be consulted
const FALLBACK: Classification = Classification {
    sentiment: Sentiment::Neutro,
    reason: Reason::Suporte,
};

/// Outcome of a classification request.
///
/// Always carries a usable classification; `Fallback` marks the fixed default
/// returned when the external call failed. The caller may prefer its own
/// pre-filled values over a fallback — the suggestion never overrides them
/// silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suggestion {
    /// The model produced a valid in-set classification
    Model(Classification),
    /// The external call failed; this is the fixed default
    Fallback(Classification),
}

impl Suggestion {
    /// The fixed fallback suggestion: neutral sentiment, support reason
    #[must_use]
    pub const fn fallback() -> Self {
        Self::Fallback(FALLBACK)
    }

    /// The carried classification, regardless of origin
    #[must_use]
    pub const fn classification(&self) -> Classification {
        match self {
            Self::Model(c) | Self::Fallback(c) => *c,
        }
    }

    /// True when the external call failed and the default was substituted
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// Shape the model is instructed to answer with
#[derive(Debug, Deserialize)]
struct RawClassification {
    sentiment: String,
    reason: String,
}

/// Classifier over an external language model
pub struct SentimentClassifier {
    model: Box<dyn LanguageModel>,
}

impl SentimentClassifier {
    /// Create a classifier backed by the given model
    #[must_use]
    pub fn new(model: Box<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Classify a contact message into a (sentiment, reason) suggestion.
    ///
    /// The prompt asks for exactly a two-field JSON object; the reason set
    /// offered to the model is the four-value subset of the capture-time set.
    pub async fn classify(&self, text: &str) -> Suggestion {
        let prompt = build_prompt(text);

        match self.model.generate(&prompt).await {
            Ok(completion) => match parse_completion(&completion) {
                Some(classification) => Suggestion::Model(classification),
                None => {
                    warn!("Classifier completion was unparseable, using fallback");
                    Suggestion::fallback()
                }
            },
            Err(e) => {
                warn!(error = %e, "Classification call failed, using fallback");
                Suggestion::fallback()
            }
        }
    }
}

fn build_prompt(text: &str) -> String {
    format!(
        "Analise o seguinte texto de atendimento de rede social e retorne um JSON com:\n\
         1. \"sentiment\": (Positivo, Neutro ou Negativo)\n\
         2. \"reason\": (Comercial, Suporte, Bug ou Elogio)\n\n\
         Texto: \"{text}\"\n\n\
         Retorne APENAS o JSON."
    )
}

/// Extract and parse the JSON payload from a completion.
///
/// Models routinely wrap the object in Markdown fences or prose; everything
/// outside the outermost braces is discarded before parsing. Out-of-set
/// values are treated the same as a parse failure.
fn parse_completion(completion: &str) -> Option<Classification> {
    let start = completion.find('{')?;
    let end = completion.rfind('}')?;
    let payload = completion.get(start..=end)?;

    let raw: RawClassification = serde_json::from_str(payload).ok()?;

    let sentiment = raw.sentiment.parse::<Sentiment>().ok()?;
    let reason = raw.reason.parse::<Reason>().ok()?;

    Some(Classification { sentiment, reason })
}
