//! Database schema definitions
//!
//! This module provides constants for the table and column names used with
//! rusqlite. The layout is the compatibility surface with pre-existing
//! `social_metrics.db` files and must not change.

/// Tabulations table schema
pub mod tabulations {
    /// Table name
    pub const TABLE: &str = "tabulations";
    /// Primary key column
    pub const ID: &str = "id";
    /// Insert timestamp column
    pub const TIMESTAMP: &str = "timestamp";
    /// Customer name column
    pub const CLIENT_NAME: &str = "client_name";
    /// Social network column
    pub const SOCIAL_NETWORK: &str = "social_network";
    /// Main message text column
    pub const MESSAGE_TEXT: &str = "message_text";
    /// Video link column (YouTube contacts)
    pub const LINK: &str = "link";
    /// Star rating column (Play Store contacts), stored as text
    pub const RATING: &str = "rating";
    /// Contact reason column
    pub const REASON: &str = "reason";
    /// Routing destination column
    pub const DESTINATION_CENTER: &str = "destination_center";
    /// Sentiment column
    pub const SENTIMENT: &str = "sentiment";
    /// Redundant calendar-date column derived from `timestamp`
    pub const DATE_ONLY: &str = "date_only";
}
