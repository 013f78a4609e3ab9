use chrono::NaiveDate;
use social_metrics::db::Database;
use social_metrics::models::{NewTabulation, Reason, Sentiment, SocialNetwork};
use social_metrics::TabulationError;

fn test_db() -> (tempfile::TempDir, Database) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = dir.path().join("test.db");
    let db = Database::new(&db_path.to_string_lossy()).expect("Failed to create database");
    (dir, db)
}

fn sample(client: &str, network: SocialNetwork, sentiment: Sentiment) -> NewTabulation {
    NewTabulation {
        client_name: client.to_string(),
        social_network: network,
        message_text: Some("Não consigo acessar minha conta".to_string()),
        link: None,
        rating: None,
        reason: Reason::Suporte,
        sentiment,
        destination_center: "Central SP".to_string(),
    }
}

#[test]
fn test_insert_then_list_preserves_fields() {
    let (_dir, db) = test_db();
    assert_eq!(db.count().expect("count"), 0);

    let mut new = sample("Maria Oliveira", SocialNetwork::PlayStore, Sentiment::Negativo);
    new.rating = Some(2);

    let inserted = db.insert(new).expect("insert");
    assert!(inserted.id > 0);
    assert_eq!(inserted.date_only, inserted.created_at.date());

    let records = db.list_all().expect("list_all");
    assert_eq!(records.len(), 1);

    let record = &records[0];
    assert_eq!(record.id, inserted.id);
    assert_eq!(record.client_name, "Maria Oliveira");
    assert_eq!(record.social_network, SocialNetwork::PlayStore);
    assert_eq!(
        record.message_text.as_deref(),
        Some("Não consigo acessar minha conta")
    );
    assert_eq!(record.link, None);
    assert_eq!(record.rating, Some(2));
    assert_eq!(record.reason, Reason::Suporte);
    assert_eq!(record.sentiment, Sentiment::Negativo);
    assert_eq!(record.destination_center, "Central SP");
}

#[test]
fn test_insert_increments_count_by_one() {
    let (_dir, db) = test_db();

    db.insert(sample("João Silva", SocialNetwork::Instagram, Sentiment::Positivo))
        .expect("first insert");
    let before = db.count().expect("count");

    db.insert(sample("Ana Costa", SocialNetwork::Facebook, Sentiment::Neutro))
        .expect("second insert");

    assert_eq!(db.count().expect("count"), before + 1);
}

#[test]
fn test_empty_client_name_is_rejected_and_nothing_persisted() {
    let (_dir, db) = test_db();

    let result = db.insert(sample("   ", SocialNetwork::Instagram, Sentiment::Neutro));
    assert!(matches!(result, Err(TabulationError::Validation(_))));
    assert_eq!(db.count().expect("count"), 0);
}

#[test]
fn test_out_of_range_rating_is_rejected() {
    let (_dir, db) = test_db();

    let mut new = sample("Pedro Santos", SocialNetwork::PlayStore, Sentiment::Positivo);
    new.rating = Some(9);

    let result = db.insert(new);
    assert!(matches!(result, Err(TabulationError::Validation(_))));
    assert_eq!(db.count().expect("count"), 0);
}

#[test]
fn test_list_all_returns_most_recent_first() {
    let (_dir, db) = test_db();

    let day = |d: u32| {
        NaiveDate::from_ymd_opt(2026, 8, d)
            .expect("valid date")
            .and_hms_opt(9, 0, 0)
            .expect("valid time")
    };

    db.insert_at(sample("A", SocialNetwork::Instagram, Sentiment::Neutro), day(2))
        .expect("insert");
    db.insert_at(sample("B", SocialNetwork::Facebook, Sentiment::Neutro), day(4))
        .expect("insert");
    db.insert_at(sample("C", SocialNetwork::TikTok, Sentiment::Neutro), day(3))
        .expect("insert");

    let records = db.list_all().expect("list_all");
    let clients: Vec<&str> = records.iter().map(|r| r.client_name.as_str()).collect();
    assert_eq!(clients, vec!["B", "C", "A"]);
}

#[test]
fn test_legacy_rows_with_star_ratings_are_readable() {
    let (_dir, db) = test_db();

    // Rows written by the previous tooling: star-suffixed rating text and a
    // space-separated timestamp.
    let conn = db.get_connection().expect("connection");
    conn.execute(
        "INSERT INTO tabulations (timestamp, client_name, social_network, message_text, \
         link, rating, reason, destination_center, sentiment, date_only) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        rusqlite::params![
            "2025-11-20 14:30:00",
            "Julia Lima",
            "PlayStore",
            "Melhor marca do mercado!",
            "",
            "4⭐",
            "Elogio",
            "Central SP",
            "Positivo",
            "2025-11-20",
        ],
    )
    .expect("raw insert");

    let records = db.list_all().expect("list_all");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].rating, Some(4));
    assert_eq!(records[0].link, None);
    assert_eq!(records[0].sentiment, Sentiment::Positivo);
    assert_eq!(
        records[0].date_only,
        NaiveDate::from_ymd_opt(2025, 11, 20).expect("valid date")
    );
}
