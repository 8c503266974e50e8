// src/error.rs
//! Error types shared across the identity core.
//!
//! Every failure in the core is a value-level `IdentityError`; nothing is
//! retried internally and no operation reports partial success. Callers in
//! the API layer map these onto HTTP status codes.

use chrono::NaiveDate;
use thiserror::Error;

/// Result alias used throughout the identity core.
pub type IdentityResult<T> = Result<T, IdentityError>;

/// All failure modes of the identity core.
///
/// Unknown selection keys are intentionally NOT represented here: the
/// disclosure selector drops them silently (logged at debug level) rather
/// than failing the whole projection on untrusted caller input.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The supplied account address is not a 0x-prefixed 40-digit hex string.
    #[error("invalid account address: {0}")]
    InvalidAddress(String),

    /// Date of birth lies after the evaluation date.
    #[error("date of birth {dob} is after the evaluation date {as_of}")]
    InvalidDateOfBirth { dob: NaiveDate, as_of: NaiveDate },

    /// Age threshold must be a positive number of years.
    #[error("age threshold must be a positive integer, got {0}")]
    InvalidThreshold(u32),

    /// The scanned text is neither a legacy JSON credential nor a
    /// well-formed line-structured credential. Always fatal to the decode
    /// attempt; no partial payload is ever produced.
    #[error("malformed credential payload: {0}")]
    MalformedCredential(String),

    /// The ledger holds no record at the requested index for this owner.
    #[error("no identity record at index {index} for owner {owner}")]
    RecordNotFound { owner: String, index: usize },
}
