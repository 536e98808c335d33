//! Error types for the deck advisor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Malformed event: {0}")]
    MalformedEvent(String),

    #[error("Card not found in catalog: {0}")]
    CardNotFound(String),

    #[error("Catalog fetch failed for {card_id}: {reason}")]
    CatalogFetch { card_id: String, reason: String },

    #[error("Invalid card format: {0}")]
    InvalidCardFormat(String),

    #[error("Invalid deck format: {0}")]
    InvalidDeckFormat(String),

    #[error("No priority ranking for card {0} (deck list and ranking table disagree)")]
    RankingMissing(String),

    #[error("A continuation is already pending ({remaining} draws outstanding)")]
    ContinuationPending { remaining: u8 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl AdvisorError {
    /// Transient failures are worth retrying at the catalog boundary
    pub fn is_transient(&self) -> bool {
        matches!(self, AdvisorError::IoError(_) | AdvisorError::CatalogFetch { .. })
    }
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
