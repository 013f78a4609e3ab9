//! Aggregation engine: summary metrics computed from a filtered record set.
//!
//! Both functions here are pure: no side effects, deterministic for a given
//! record sequence. Nothing is cached across requests; dashboards call
//! `summarize` fresh every time.

use crate::models::{Sentiment, SocialNetwork, SummaryView, TabulationRecord};

/// Compute the dashboard summary for a record set.
///
/// `positive_percentage` is defined as 0 for an empty input. Count vectors
/// preserve the order in which each key first appeared, and the most active
/// network breaks ties in favor of the first one encountered.
#[must_use]
pub fn summarize(records: &[TabulationRecord]) -> SummaryView {
    let total_count = records.len();

    let positive_count = records
        .iter()
        .filter(|r| r.sentiment == Sentiment::Positivo)
        .count();

    let positive_percentage = if total_count == 0 {
        0.0
    } else {
        (positive_count as f64 / total_count as f64) * 100.0
    };

    let mut network_counts: Vec<(SocialNetwork, usize)> = Vec::new();
    let mut reason_counts = Vec::new();

    for record in records {
        bump(&mut network_counts, record.social_network);
        bump(&mut reason_counts, record.reason);
    }

    // Strict comparison keeps the first-encountered network on ties.
    let mut most_active_network = None;
    let mut best = 0;
    for (network, count) in &network_counts {
        if *count > best {
            most_active_network = Some(*network);
            best = *count;
        }
    }

    SummaryView {
        total_count,
        positive_percentage,
        most_active_network,
        network_counts,
        reason_counts,
    }
}

/// Concatenate all non-empty message texts into the word-cloud corpus.
///
/// Entries that are absent or blank contribute nothing; the result is the
/// remaining texts joined by single spaces, or an empty string. Renderers
/// treat an empty corpus as "nothing to render".
#[must_use]
pub fn word_frequency_corpus(records: &[TabulationRecord]) -> String {
    records
        .iter()
        .filter_map(|r| r.message_text.as_deref())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn bump<K: PartialEq>(counts: &mut Vec<(K, usize)>, key: K) {
    match counts.iter_mut().find(|(k, _)| *k == key) {
        Some((_, count)) => *count += 1,
        None => counts.push((key, 1)),
    }
}
