//! End-to-end flow: insert → list → filter → summarize, on a real store.

use social_metrics::db::Database;
use social_metrics::filter::FilterCriteria;
use social_metrics::models::{
    DateRange, NewTabulation, Reason, Sentiment, SocialNetwork,
};
use social_metrics::summarize;

fn contact(
    client: &str,
    network: SocialNetwork,
    sentiment: Sentiment,
    rating: Option<u8>,
) -> NewTabulation {
    NewTabulation {
        client_name: client.to_string(),
        social_network: network,
        message_text: Some("Tive um problema com meu pedido #123.".to_string()),
        link: None,
        rating,
        reason: Reason::Suporte,
        sentiment,
        destination_center: "Central SP".to_string(),
    }
}

#[test]
fn test_instagram_slice_of_mixed_records() {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = dir.path().join("pipeline.db");
    let db = Database::new(&db_path.to_string_lossy()).expect("Failed to create database");

    db.insert(contact("João Silva", SocialNetwork::Instagram, Sentiment::Positivo, None))
        .expect("insert");
    db.insert(contact("Maria Oliveira", SocialNetwork::Instagram, Sentiment::Negativo, None))
        .expect("insert");
    db.insert(contact("Carlos Souza", SocialNetwork::PlayStore, Sentiment::Positivo, Some(5)))
        .expect("insert");

    let records = db.list_all().expect("list_all");
    assert_eq!(records.len(), 3);

    let criteria = FilterCriteria {
        networks: [SocialNetwork::Instagram].into_iter().collect(),
        reasons: Reason::ALL.into_iter().collect(),
        date_range: DateRange::default(),
    };

    let filtered = criteria.apply(&records);
    let summary = summarize(&filtered);

    assert_eq!(summary.total_count, 2);
    assert_eq!(summary.positive_percentage, 50.0);
    assert_eq!(summary.most_active_network, Some(SocialNetwork::Instagram));
    assert_eq!(
        summary.network_counts,
        vec![(SocialNetwork::Instagram, 2)]
    );
}
