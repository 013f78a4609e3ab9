//! Unit tests for boundary validation

use chrono::NaiveDate;
use social_metrics::models::{DateRange, NewTabulation, Reason, Sentiment, SocialNetwork};
use social_metrics::validation::InputValidator;

#[test]
fn test_validate_client_name_valid() {
    assert!(InputValidator::validate_client_name("Maria Oliveira").is_ok());
}

#[test]
fn test_validate_client_name_empty() {
    assert!(InputValidator::validate_client_name("").is_err());
}

#[test]
fn test_validate_client_name_whitespace_only() {
    assert!(InputValidator::validate_client_name("   ").is_err());
}

#[test]
fn test_validate_client_name_too_long() {
    let long_name = "a".repeat(101);
    assert!(InputValidator::validate_client_name(&long_name).is_err());
}

#[test]
fn test_validate_client_name_with_null_byte() {
    assert!(InputValidator::validate_client_name("Maria\0Oliveira").is_err());
}

#[test]
fn test_validate_client_name_unicode() {
    assert!(InputValidator::validate_client_name("João Conceição").is_ok());
}

#[test]
fn test_validate_rating_bounds() {
    assert!(InputValidator::validate_rating(SocialNetwork::PlayStore, 1).is_ok());
    assert!(InputValidator::validate_rating(SocialNetwork::PlayStore, 5).is_ok());
    assert!(InputValidator::validate_rating(SocialNetwork::PlayStore, 0).is_err());
    assert!(InputValidator::validate_rating(SocialNetwork::PlayStore, 6).is_err());
}

#[test]
fn test_validate_link_requires_http() {
    assert!(InputValidator::validate_link(
        SocialNetwork::YouTube,
        "https://youtu.be/abc123"
    )
    .is_ok());
    assert!(InputValidator::validate_link(SocialNetwork::YouTube, "youtu.be/abc123").is_err());
    assert!(InputValidator::validate_link(SocialNetwork::YouTube, "  ").is_err());
}

#[test]
fn test_validate_message_text_length() {
    assert!(InputValidator::validate_message_text("Olá, preciso de ajuda").is_ok());
    assert!(InputValidator::validate_message_text(&"x".repeat(10_001)).is_err());
}

#[test]
fn test_validate_date_range_rejects_inverted_bounds() {
    let range = DateRange {
        start: NaiveDate::from_ymd_opt(2026, 8, 10),
        end: NaiveDate::from_ymd_opt(2026, 8, 1),
    };
    assert!(InputValidator::validate_date_range(&range).is_err());
}

#[test]
fn test_validate_date_range_half_open_is_fine() {
    let range = DateRange {
        start: NaiveDate::from_ymd_opt(2026, 8, 10),
        end: None,
    };
    assert!(InputValidator::validate_date_range(&range).is_ok());
}

#[test]
fn test_validate_new_tabulation_composes_field_checks() {
    let valid = NewTabulation {
        client_name: "Pedro Santos".to_string(),
        social_network: SocialNetwork::YouTube,
        message_text: Some("O vídeo de vocês é muito explicativo".to_string()),
        link: Some("https://youtu.be/abc123".to_string()),
        rating: None,
        reason: Reason::Elogio,
        sentiment: Sentiment::Positivo,
        destination_center: "Central SP".to_string(),
    };
    assert!(InputValidator::validate_new_tabulation(&valid).is_ok());

    let mut invalid = valid.clone();
    invalid.client_name = String::new();
    assert!(InputValidator::validate_new_tabulation(&invalid).is_err());
}

#[test]
fn test_sanitize_text_strips_control_characters() {
    assert_eq!(
        InputValidator::sanitize_text("  Olá\u{0} mundo\u{7} "),
        "Olá mundo"
    );
}
