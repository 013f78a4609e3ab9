//! Filter layer: user-chosen predicates applied to the full record set.
//!
//! Criteria are an explicit value passed into each operation; there is no
//! process-wide filter state.

use std::collections::HashSet;

use crate::models::{
    distinct_networks, distinct_reasons, DateRange, Reason, SocialNetwork, TabulationRecord,
};

/// User-chosen filter criteria.
///
/// A record passes when its network AND reason are members of the respective
/// sets, and its date passes `date_range` (enforced only when both bounds are
/// present). An empty `networks` or `reasons` set matches nothing — it is a
/// vacuous match, never a wildcard. Use [`FilterCriteria::match_all`] to build
/// criteria that select everything currently observed.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    /// Networks a record may belong to
    pub networks: HashSet<SocialNetwork>,
    /// Reasons a record may carry
    pub reasons: HashSet<Reason>,
    /// Date window on `date_only`, enforced only when fully bounded
    pub date_range: DateRange,
}

impl FilterCriteria {
    /// Criteria selecting every network and reason present in `records`,
    /// with an unbounded date range.
    ///
    /// Mirrors a fresh dashboard where every observed value starts selected.
    #[must_use]
    pub fn match_all(records: &[TabulationRecord]) -> Self {
        Self {
            networks: distinct_networks(records),
            reasons: distinct_reasons(records),
            date_range: DateRange::default(),
        }
    }

    /// Whether a single record passes these criteria
    #[must_use]
    pub fn matches(&self, record: &TabulationRecord) -> bool {
        self.networks.contains(&record.social_network)
            && self.reasons.contains(&record.reason)
            && self.date_range.contains(record.date_only)
    }

    /// Apply the criteria to an ordered record set.
    ///
    /// Returns the matching subsequence in the input's relative order.
    #[must_use]
    pub fn apply(&self, records: &[TabulationRecord]) -> Vec<TabulationRecord> {
        records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(network: SocialNetwork, reason: Reason) -> TabulationRecord {
        let created_at = NaiveDate::from_ymd_opt(2026, 8, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();

        TabulationRecord {
            id: 1,
            created_at,
            date_only: created_at.date(),
            client_name: "Maria Oliveira".to_string(),
            social_network: network,
            message_text: None,
            link: None,
            rating: None,
            reason,
            sentiment: crate::models::Sentiment::Neutro,
            destination_center: String::new(),
        }
    }

    #[test]
    fn test_default_criteria_match_nothing() {
        let records = vec![record(SocialNetwork::Instagram, Reason::Suporte)];
        assert!(FilterCriteria::default().apply(&records).is_empty());
    }

    #[test]
    fn test_match_all_passes_everything() {
        let records = vec![
            record(SocialNetwork::Instagram, Reason::Suporte),
            record(SocialNetwork::PlayStore, Reason::Bug),
        ];
        assert_eq!(FilterCriteria::match_all(&records).apply(&records).len(), 2);
    }
}
