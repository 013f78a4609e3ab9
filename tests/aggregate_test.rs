use chrono::NaiveDate;
use proptest::prelude::*;
use social_metrics::models::{Reason, Sentiment, SocialNetwork, TabulationRecord};
use social_metrics::{summarize, word_frequency_corpus};

fn make_record(
    network: SocialNetwork,
    sentiment: Sentiment,
    message: Option<&str>,
) -> TabulationRecord {
    let created_at = NaiveDate::from_ymd_opt(2026, 8, 3)
        .expect("valid date")
        .and_hms_opt(15, 0, 0)
        .expect("valid time");

    TabulationRecord {
        id: 0,
        created_at,
        date_only: created_at.date(),
        client_name: "Ana Costa".to_string(),
        social_network: network,
        message_text: message.map(ToString::to_string),
        link: None,
        rating: None,
        reason: Reason::Outro,
        sentiment,
        destination_center: String::new(),
    }
}

#[test]
fn test_summarize_empty_has_no_division_fault() {
    let summary = summarize(&[]);
    assert_eq!(summary.total_count, 0);
    assert_eq!(summary.positive_percentage, 0.0);
    assert_eq!(summary.most_active_network, None);
    assert!(summary.network_counts.is_empty());
    assert!(summary.reason_counts.is_empty());
}

#[test]
fn test_positive_percentage_three_of_four() {
    let records = vec![
        make_record(SocialNetwork::Instagram, Sentiment::Positivo, None),
        make_record(SocialNetwork::Instagram, Sentiment::Positivo, None),
        make_record(SocialNetwork::Facebook, Sentiment::Positivo, None),
        make_record(SocialNetwork::Facebook, Sentiment::Negativo, None),
    ];

    let summary = summarize(&records);
    assert_eq!(summary.total_count, 4);
    assert_eq!(summary.positive_percentage, 75.0);
}

#[test]
fn test_network_counts_preserve_first_appearance_order() {
    let records = vec![
        make_record(SocialNetwork::YouTube, Sentiment::Neutro, None),
        make_record(SocialNetwork::Instagram, Sentiment::Neutro, None),
        make_record(SocialNetwork::YouTube, Sentiment::Neutro, None),
    ];

    let summary = summarize(&records);
    assert_eq!(
        summary.network_counts,
        vec![(SocialNetwork::YouTube, 2), (SocialNetwork::Instagram, 1)]
    );
    assert_eq!(summary.most_active_network, Some(SocialNetwork::YouTube));
}

#[test]
fn test_corpus_skips_empty_and_absent_messages() {
    let records = vec![
        make_record(SocialNetwork::Instagram, Sentiment::Neutro, Some("")),
        make_record(SocialNetwork::Instagram, Sentiment::Neutro, Some("hello world")),
        make_record(SocialNetwork::Instagram, Sentiment::Neutro, None),
    ];

    assert_eq!(word_frequency_corpus(&records), "hello world");
}

#[test]
fn test_corpus_of_empty_input_is_empty() {
    assert_eq!(word_frequency_corpus(&[]), "");
}

#[test]
fn test_corpus_joins_with_single_spaces() {
    let records = vec![
        make_record(SocialNetwork::Instagram, Sentiment::Neutro, Some("  primeira  ")),
        make_record(SocialNetwork::TikTok, Sentiment::Neutro, Some("segunda")),
    ];

    assert_eq!(word_frequency_corpus(&records), "primeira segunda");
}

proptest! {
    #[test]
    fn prop_network_counts_sum_to_total(
        picks in proptest::collection::vec((0usize..6, 0usize..3), 1..50)
    ) {
        let records: Vec<TabulationRecord> = picks
            .iter()
            .map(|(n, s)| make_record(SocialNetwork::ALL[*n], Sentiment::ALL[*s], None))
            .collect();

        let summary = summarize(&records);
        let network_sum: usize = summary.network_counts.iter().map(|(_, c)| c).sum();
        let reason_sum: usize = summary.reason_counts.iter().map(|(_, c)| c).sum();

        prop_assert_eq!(summary.total_count, records.len());
        prop_assert_eq!(network_sum, summary.total_count);
        prop_assert_eq!(reason_sum, summary.total_count);
    }

    #[test]
    fn prop_positive_percentage_is_bounded(
        picks in proptest::collection::vec(0usize..3, 0..50)
    ) {
        let records: Vec<TabulationRecord> = picks
            .iter()
            .map(|s| make_record(SocialNetwork::Instagram, Sentiment::ALL[*s], None))
            .collect();

        let summary = summarize(&records);
        prop_assert!((0.0..=100.0).contains(&summary.positive_percentage));
    }
}
