//! Input validation at the boundary where raw operator input becomes a record.
//!
//! Validation failures are `TabulationError::Validation` and are raised before
//! anything touches the store, so a rejected insert leaves no partial state.

use tracing::warn;

use crate::error::{Result, TabulationError};
use crate::models::{DateRange, NewTabulation, SocialNetwork};

/// Validation utilities for input sanitization and edge case handling
#[derive(Debug, Copy, Clone)]
pub struct InputValidator;

impl InputValidator {
    /// Validate a customer name
    pub fn validate_client_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(TabulationError::Validation(
                "Client name cannot be empty".to_string(),
            ));
        }

        if name.len() > 100 {
            return Err(TabulationError::Validation(
                "Client name too long (max 100 characters)".to_string(),
            ));
        }

        if name.contains('\0') || name.contains('\r') || name.contains('\n') {
            return Err(TabulationError::Validation(
                "Client name contains invalid characters".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate the main message text
    pub fn validate_message_text(text: &str) -> Result<()> {
        if text.len() > 10_000 {
            return Err(TabulationError::Validation(
                "Message text too long (max 10,000 characters)".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate a video link.
    ///
    /// Links are only meaningful for YouTube contacts; one supplied for
    /// another network is kept but logged.
    pub fn validate_link(network: SocialNetwork, link: &str) -> Result<()> {
        if link.trim().is_empty() {
            return Err(TabulationError::Validation(
                "Link cannot be blank when supplied".to_string(),
            ));
        }

        if !link.starts_with("http://") && !link.starts_with("https://") {
            return Err(TabulationError::Validation(format!(
                "Link must be an http(s) URL: {link}"
            )));
        }

        if network != SocialNetwork::YouTube {
            warn!(network = %network, "Link supplied for a non-YouTube contact");
        }

        Ok(())
    }

    /// Validate a star rating.
    ///
    /// Ratings are only meaningful for Play Store contacts; one supplied for
    /// another network is kept but logged.
    pub fn validate_rating(network: SocialNetwork, rating: u8) -> Result<()> {
        if !(1..=5).contains(&rating) {
            return Err(TabulationError::Validation(format!(
                "Rating must be between 1 and 5 stars, got {rating}"
            )));
        }

        if network != SocialNetwork::PlayStore {
            warn!(network = %network, "Rating supplied for a non-PlayStore contact");
        }

        Ok(())
    }

    /// Validate a routing destination
    pub fn validate_destination_center(destination: &str) -> Result<()> {
        if destination.len() > 100 {
            return Err(TabulationError::Validation(
                "Destination center too long (max 100 characters)".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate a filter date range
    pub fn validate_date_range(range: &DateRange) -> Result<()> {
        if let (Some(start), Some(end)) = (range.start, range.end) {
            if start > end {
                return Err(TabulationError::Validation(
                    "Start date cannot be after end date".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Validate a full insert input before it reaches the store
    pub fn validate_new_tabulation(new: &NewTabulation) -> Result<()> {
        Self::validate_client_name(&new.client_name)?;
        Self::validate_destination_center(&new.destination_center)?;

        if let Some(text) = &new.message_text {
            Self::validate_message_text(text)?;
        }

        if let Some(link) = &new.link {
            Self::validate_link(new.social_network, link)?;
        }

        if let Some(rating) = new.rating {
            Self::validate_rating(new.social_network, rating)?;
        }

        Ok(())
    }

    /// Sanitize text input
    #[must_use]
    pub fn sanitize_text(text: &str) -> String {
        text.chars()
            .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
            .collect::<String>()
            .trim()
            .to_string()
    }
}
