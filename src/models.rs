//! Data models for tabulation records and aggregation
//!
//! This module contains all data structures used throughout the application:
//! the closed enums for social network, contact reason and sentiment, the
//! tabulation record itself, its insert input, and the derived summary view.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::TabulationError;

/// Social network a contact arrived through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SocialNetwork {
    /// Instagram comments and direct messages
    Instagram,
    /// Facebook posts and comments
    Facebook,
    /// TikTok comments
    TikTok,
    /// Messenger conversations
    Messenger,
    /// YouTube video comments (records carry the video link)
    YouTube,
    /// Play Store reviews (records carry the star rating)
    PlayStore,
}

impl SocialNetwork {
    /// All networks in capture-form order
    pub const ALL: [Self; 6] = [
        Self::Instagram,
        Self::Facebook,
        Self::TikTok,
        Self::Messenger,
        Self::YouTube,
        Self::PlayStore,
    ];

    /// Stable wire value, as stored in the `tabulations` table
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Instagram => "Instagram",
            Self::Facebook => "Facebook",
            Self::TikTok => "TikTok",
            Self::Messenger => "Messenger",
            Self::YouTube => "YouTube",
            Self::PlayStore => "PlayStore",
        }
    }
}

impl fmt::Display for SocialNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SocialNetwork {
    type Err = TabulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Instagram" => Ok(Self::Instagram),
            "Facebook" => Ok(Self::Facebook),
            "TikTok" => Ok(Self::TikTok),
            "Messenger" => Ok(Self::Messenger),
            "YouTube" => Ok(Self::YouTube),
            "PlayStore" => Ok(Self::PlayStore),
            other => Err(TabulationError::Validation(format!(
                "Unknown social network: {other}. Expected one of: Instagram, Facebook, TikTok, Messenger, YouTube, PlayStore"
            ))),
        }
    }
}

/// Reason a customer made contact.
///
/// This is the capture-time set. The classifier is only ever prompted for
/// the four values `Comercial`, `Suporte`, `Bug` and `Elogio`; the remaining
/// variants can only be chosen manually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reason {
    /// Commercial or product questions (wire value "Comercial/Produto")
    #[serde(rename = "Comercial/Produto")]
    Comercial,
    /// Support requests
    Suporte,
    /// Bug reports
    Bug,
    /// Compliments
    Elogio,
    /// Complaints (wire value "Reclamação")
    #[serde(rename = "Reclamação")]
    Reclamacao,
    /// Hidden/moderated contacts
    Oculto,
    /// Anything else
    Outro,
}

impl Reason {
    /// All reasons in capture-form order
    pub const ALL: [Self; 7] = [
        Self::Comercial,
        Self::Suporte,
        Self::Bug,
        Self::Elogio,
        Self::Reclamacao,
        Self::Oculto,
        Self::Outro,
    ];

    /// Stable wire value, as stored in the `tabulations` table
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Comercial => "Comercial/Produto",
            Self::Suporte => "Suporte",
            Self::Bug => "Bug",
            Self::Elogio => "Elogio",
            Self::Reclamacao => "Reclamação",
            Self::Oculto => "Oculto",
            Self::Outro => "Outro",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Reason {
    type Err = TabulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "Comercial" and "Produto" are accepted as aliases: the classifier
        // answers "Comercial" and pre-existing rows may hold "Produto".
        match s.trim() {
            "Comercial/Produto" | "Comercial" | "Produto" => Ok(Self::Comercial),
            "Suporte" => Ok(Self::Suporte),
            "Bug" => Ok(Self::Bug),
            "Elogio" => Ok(Self::Elogio),
            "Reclamação" | "Reclamacao" => Ok(Self::Reclamacao),
            "Oculto" => Ok(Self::Oculto),
            "Outro" => Ok(Self::Outro),
            other => Err(TabulationError::Validation(format!(
                "Unknown contact reason: {other}"
            ))),
        }
    }
}

/// Sentiment of a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    /// Positive contact
    Positivo,
    /// Neutral contact
    Neutro,
    /// Negative contact
    Negativo,
}

impl Sentiment {
    /// All sentiments in capture-form order
    pub const ALL: [Self; 3] = [Self::Positivo, Self::Neutro, Self::Negativo];

    /// Stable wire value, as stored in the `tabulations` table
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Positivo => "Positivo",
            Self::Neutro => "Neutro",
            Self::Negativo => "Negativo",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = TabulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Positivo" => Ok(Self::Positivo),
            "Neutro" => Ok(Self::Neutro),
            "Negativo" => Ok(Self::Negativo),
            other => Err(TabulationError::Validation(format!(
                "Unknown sentiment: {other}. Expected one of: Positivo, Neutro, Negativo"
            ))),
        }
    }
}

/// One committed customer-service contact event.
///
/// Records are append-only: created exactly once by the store, never updated
/// or deleted. `id`, `created_at` and `date_only` are assigned at insert time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabulationRecord {
    /// Database primary key, monotonically assigned by the store
    pub id: i64,
    /// Timestamp assigned by the store at insert, immutable afterwards
    pub created_at: NaiveDateTime,
    /// Calendar date of `created_at`, stored redundantly for date filtering
    pub date_only: NaiveDate,
    /// Customer name
    pub client_name: String,
    /// Network the contact arrived through
    pub social_network: SocialNetwork,
    /// Main message text, when the contact carried one
    pub message_text: Option<String>,
    /// Video link, meaningful only for YouTube contacts
    pub link: Option<String>,
    /// Star rating 1-5, meaningful only for Play Store contacts
    pub rating: Option<u8>,
    /// Why the customer made contact
    pub reason: Reason,
    /// Sentiment of the contact
    pub sentiment: Sentiment,
    /// Routing destination for the contact
    pub destination_center: String,
}

/// Input for creating a new tabulation record.
///
/// Carries everything the operator typed; the store derives `id`,
/// `created_at` and `date_only` on insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTabulation {
    /// Customer name, required
    pub client_name: String,
    /// Network the contact arrived through
    pub social_network: SocialNetwork,
    /// Main message text
    pub message_text: Option<String>,
    /// Video link, meaningful only for YouTube contacts
    pub link: Option<String>,
    /// Star rating 1-5, meaningful only for Play Store contacts
    pub rating: Option<u8>,
    /// Why the customer made contact
    pub reason: Reason,
    /// Sentiment of the contact
    pub sentiment: Sentiment,
    /// Routing destination for the contact
    pub destination_center: String,
}

/// A (sentiment, reason) pair, either chosen manually or suggested by the
/// classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Suggested sentiment
    pub sentiment: Sentiment,
    /// Suggested reason
    pub reason: Reason,
}

/// Date range for filtering records by their `date_only` component.
///
/// The range is only applied when both bounds are present; a half-open or
/// empty range lets every date pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    /// Start date (inclusive, optional)
    pub start: Option<NaiveDate>,
    /// End date (inclusive, optional)
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// True when both bounds are present and the range is enforced
    #[must_use]
    pub const fn is_bounded(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Whether a date passes this range
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => date >= start && date <= end,
            _ => true,
        }
    }
}

/// In-memory summary of a filtered record set.
///
/// Computed fresh on every request and never cached. Count vectors preserve
/// the order in which each key first appeared in the input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryView {
    /// Number of records summarized
    pub total_count: usize,
    /// Share of records with positive sentiment, 0-100; 0 for an empty input
    pub positive_percentage: f64,
    /// Network with the most records; ties go to the first one encountered
    pub most_active_network: Option<SocialNetwork>,
    /// Records per network, in order of first appearance
    pub network_counts: Vec<(SocialNetwork, usize)>,
    /// Records per reason, in order of first appearance
    pub reason_counts: Vec<(Reason, usize)>,
}

/// Output format for exported records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format
    Csv,
    /// JSON format
    Json,
}

impl ExportFormat {
    /// Get the file extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = TabulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(TabulationError::Validation(format!(
                "Unknown export format: {other}. Expected csv or json"
            ))),
        }
    }
}

/// Distinct networks present in a record set
#[must_use]
pub fn distinct_networks(records: &[TabulationRecord]) -> HashSet<SocialNetwork> {
    records.iter().map(|r| r.social_network).collect()
}

/// Distinct reasons present in a record set
#[must_use]
pub fn distinct_reasons(records: &[TabulationRecord]) -> HashSet<Reason> {
    records.iter().map(|r| r.reason).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_wire_values_round_trip() {
        for reason in Reason::ALL {
            assert_eq!(reason.as_str().parse::<Reason>().unwrap(), reason);
        }
    }

    #[test]
    fn test_reason_accepts_classifier_alias() {
        assert_eq!("Comercial".parse::<Reason>().unwrap(), Reason::Comercial);
        assert_eq!("Produto".parse::<Reason>().unwrap(), Reason::Comercial);
    }

    #[test]
    fn test_unknown_network_is_rejected() {
        assert!("Orkut".parse::<SocialNetwork>().is_err());
    }

    #[test]
    fn test_date_range_unbounded_passes_everything() {
        let range = DateRange {
            start: Some(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()),
            end: None,
        };
        assert!(range.contains(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()));
    }
}
