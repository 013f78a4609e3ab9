//! Social Metrics - Contact Tabulation and CX Reporting
//!
//! A Rust library for recording customer-service contacts received across
//! social networks, classifying them by sentiment and reason, and producing
//! aggregated dashboards and a narrative executive report.
//!
//! # Features
//!
//! - Append-only SQLite record store
//! - AI-assisted sentiment/reason classification with a deterministic fallback
//! - Filtering by network, reason and date range
//! - Summary metrics and word-cloud corpus for dashboards
//! - Narrative executive report generation
//! - CSV/JSON record export

/// Aggregation engine: summary metrics and the word corpus
pub mod aggregate;
/// External language-model integration (classifier and report generator)
pub mod ai;
/// Configuration management
pub mod config;
/// Record store operations and connection pooling
pub mod db;
/// Error types
pub mod error;
/// Report and record export
pub mod export;
/// Filter layer for user-chosen criteria
pub mod filter;
/// Logging setup and utilities
pub mod logging;
/// Metrics collection
pub mod metrics;
/// Data models and structures
pub mod models;
/// Database schema definitions
pub mod schema;
/// Word-frequency analysis over the message corpus
pub mod text;
/// Input validation and sanitization
pub mod validation;

// Re-export key components for easier access
pub use aggregate::{summarize, word_frequency_corpus};
pub use ai::{GeminiClient, LanguageModel, ReportGenerator, SentimentClassifier, Suggestion};
pub use db::Database;
pub use error::{Result, TabulationError};
pub use filter::FilterCriteria;
pub use models::{
    Classification, DateRange, ExportFormat, NewTabulation, Reason, Sentiment, SocialNetwork,
    SummaryView, TabulationRecord,
};
