// src/models/payload.rs
//! Credential payload data model.
//!
//! Defines the transport-ready representation of a disclosure: the value
//! that travels through the QR channel, plus the derived age claim types.
//! All of these are constructed fresh per sharing action and discarded
//! after use; nothing here is persisted.

use serde::{Deserialize, Serialize};

/// Result of evaluating a date of birth against an age threshold.
///
/// Derived, never persisted; recomputed on every disclosure so the claim
/// reflects the age at sharing time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeClaim {
    /// Full calendar years completed as of the evaluation date.
    pub computed_age: u32,

    /// The threshold the age was compared against, in years.
    pub threshold: u32,

    /// `computed_age >= threshold`.
    pub satisfied: bool,
}

impl AgeClaim {
    /// The subset of the claim that is embedded in a credential payload.
    ///
    /// The computed age itself stays on the holder's device; only the
    /// threshold and the pass/fail outcome are transported.
    pub fn assertion(&self) -> AgeAssertion {
        AgeAssertion {
            satisfied: self.satisfied,
            threshold: self.threshold,
        }
    }
}

/// Transported form of an age claim: outcome and threshold, no birth date
/// and no computed age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeAssertion {
    pub satisfied: bool,
    pub threshold: u32,
}

/// The value actually handed to the QR generator (after encoding) and
/// recovered from a QR scan (after decoding).
///
/// `fields` keeps the selector's canonical order so that repeated
/// projections of the same selection produce byte-identical QR payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialPayload {
    /// Decentralized identifier of the disclosing record. Always present;
    /// not subject to field selection.
    pub identifier: String,

    /// Disclosed `(label, value)` pairs in canonical order.
    pub fields: Vec<(String, String)>,

    /// Attached when the holder opted into an age verification.
    pub age_claim: Option<AgeAssertion>,
}

impl CredentialPayload {
    /// A payload carrying only the identifier. The selector starts from
    /// this and appends the chosen fields.
    pub fn bare(identifier: impl Into<String>) -> Self {
        CredentialPayload {
            identifier: identifier.into(),
            fields: Vec::new(),
            age_claim: None,
        }
    }
}

/// Offline classification of a decoded payload, produced by the
/// verification presenter for display on the scanning device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationSummary {
    pub identifier: String,

    /// Labels of the fields that carried a non-empty value.
    pub present_fields: Vec<String>,

    /// The age verification outcome, when the payload carried one.
    pub age_result: Option<AgeAssertion>,
}
