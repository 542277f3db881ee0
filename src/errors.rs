use std::time::Duration;

use thiserror::Error;

/// Errors raised while fetching device messages or maintaining the ledger.
///
/// Classification itself never fails; everything here comes from the
/// message source, the configuration, or ledger input.
#[derive(Error, Debug)]
pub enum SignalError {
    /// The user declined the device read permission
    #[error("Permission denied")]
    PermissionDenied,

    /// The message store does not exist on this platform
    #[error("Unsupported platform")]
    UnsupportedPlatform,

    /// Transport or platform failure while reading the message store
    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    /// The source did not answer in time
    #[error("Fetch timed out after {0:?}")]
    Timeout(Duration),

    /// The consumer went away before the fetch resolved
    #[error("Fetch cancelled")]
    Cancelled,

    /// The pipeline builder was run without a message source
    #[error("Message source is required")]
    MissingSource,

    /// A device row could not be turned into a message or call record
    #[error("Malformed device row: {0}")]
    MalformedRow(String),

    // ── Conversion and input errors ─────────────────────────────────────────

    /// Timestamp is not a valid epoch-millis value
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Keyword rule set failed validation
    #[error("Invalid keyword rules: {0}")]
    InvalidKeywordRules(String),

    #[error("Invalid amount pattern: {0}")]
    InvalidPattern(String),

    /// Tried to turn an `other` message into a ledger entry
    #[error("Message is not a financial transaction")]
    NotATransaction,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Entry needs a title or category")]
    MissingCategory,

    #[error("Invalid entry type: {0}")]
    InvalidEntryType(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SignalError {
    /// Whether retrying (or re-prompting for permission) can succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SignalError::PermissionDenied | SignalError::FetchFailed(_) | SignalError::Timeout(_)
        )
    }
}

/// Convenience alias for results carrying [`SignalError`]
pub type SignalResult<T> = Result<T, SignalError>;
