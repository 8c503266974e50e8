// src/disclosure/mod.rs
//! Selective disclosure of identity attributes.
//!
//! This is the protocol core of the system: deciding which attributes of a
//! registered identity record are embedded in a shareable credential,
//! attaching an age claim, and encoding the result for QR transport. The
//! flow is strictly forward (select fields, evaluate the age claim,
//! encode), and a change in selection restarts from a fresh
//! [`DisclosureRequest`]; an already-encoded payload is never edited in
//! place.
//!
//! Every operation in this module tree is a pure, synchronous computation:
//! the record is an already-fetched input, never awaited here.

pub mod age;
pub mod codec;
pub mod presenter;
pub mod selector;

use crate::error::IdentityResult;
use crate::models::identity::IdentityRecord;
use crate::models::payload::CredentialPayload;
use chrono::{NaiveDate, Utc};
use std::collections::HashSet;

/// One credential-sharing action: the record to disclose from, the chosen
/// field keys, and an optional age threshold to attest against.
///
/// Constructed fresh per sharing action and discarded after use. Callers
/// cancel by simply dropping a request that was never prepared.
#[derive(Debug, Clone)]
pub struct DisclosureRequest {
    pub record: IdentityRecord,
    pub selected_fields: HashSet<String>,
    pub age_threshold: Option<u32>,
}

/// Builds the credential payload for a disclosure request, evaluating the
/// age claim against today's date.
pub fn prepare(request: &DisclosureRequest) -> IdentityResult<CredentialPayload> {
    prepare_as_of(request, Utc::now().date_naive())
}

/// Builds the credential payload for a disclosure request with an injected
/// evaluation date.
///
/// Projects the selected fields, then, when a threshold is set, evaluates
/// the age claim and attaches its transported subset. The full claim
/// (including the computed age) never leaves this function.
///
/// # Errors
/// Propagates `InvalidDateOfBirth` and `InvalidThreshold` from the age
/// claim evaluator. Field projection itself cannot fail.
pub fn prepare_as_of(
    request: &DisclosureRequest,
    as_of: NaiveDate,
) -> IdentityResult<CredentialPayload> {
    let mut payload = selector::project(&request.record, &request.selected_fields);
    if let Some(threshold) = request.age_threshold {
        let claim = age::evaluate_age(request.record.date_of_birth, threshold, as_of)?;
        payload.age_claim = Some(claim.assertion());
    }
    Ok(payload)
}
