// src/disclosure/codec.rs
//! Credential payload codec for the QR channel.
//!
//! Encodes a credential payload into a newline-delimited, human-legible
//! text block and decodes scanned text back into structured fields. The
//! plain-text format is deliberate: the holder can visually audit exactly
//! what is being disclosed before a scan propagates it, at the cost of a
//! few bytes against the QR capacity (error-correction level H is the
//! deployment recommendation).
//!
//! Two inbound shapes are accepted: the structured `Label: value` lines
//! this codec itself produces, and the bare-JSON object payloads emitted
//! by earlier producers in the same ecosystem.

use crate::error::{IdentityError, IdentityResult};
use crate::models::payload::{AgeAssertion, CredentialPayload};
use serde_json::Value;

/// Label of the identifier line, always the first line of an encoded
/// payload.
const IDENTIFIER_LABEL: &str = "Document ID";

/// Label of the age claim line, always the last line when present.
const AGE_LABEL: &str = "Age Verification";

/// Separator between a label and its value.
const SEPARATOR: &str = ": ";

/// Recognized keys of the legacy JSON payload shape, in the order their
/// values are emitted. Decoding keeps this order so legacy payloads decode
/// deterministically regardless of JSON key order.
const LEGACY_FIELD_KEYS: [&str; 6] = [
    "name",
    "aadharNumber",
    "dateOfBirth",
    "gender",
    "address",
    "createdAt",
];

/// Serializes a credential payload into the exact string handed to the QR
/// image generator. No additional framing is added.
///
/// Format: `Document ID: <identifier>`, one `<Label>: <value>` line per
/// disclosed field in selector order, then
/// `Age Verification: <Verified|Not Verified> (<threshold>+)` when an age
/// assertion is attached.
pub fn encode(payload: &CredentialPayload) -> String {
    let mut lines = Vec::with_capacity(payload.fields.len() + 2);
    lines.push(format!(
        "{}{}{}",
        IDENTIFIER_LABEL,
        SEPARATOR,
        single_line(&payload.identifier)
    ));

    for (label, value) in &payload.fields {
        lines.push(format!(
            "{}{}{}",
            single_line(label),
            SEPARATOR,
            single_line(value)
        ));
    }

    if let Some(claim) = &payload.age_claim {
        let status = if claim.satisfied { "Verified" } else { "Not Verified" };
        lines.push(format!(
            "{}{}{} ({}+)",
            AGE_LABEL, SEPARATOR, status, claim.threshold
        ));
    }

    lines.join("\n")
}

/// Collapses embedded line breaks to single spaces so an encoded label or
/// value can never masquerade as an extra payload line. The selector
/// already flattens projected values; this guards payloads built by other
/// producers.
fn single_line(text: &str) -> String {
    if text.contains(['\n', '\r']) {
        text.replace("\r\n", " ").replace(['\n', '\r'], " ")
    } else {
        text.to_string()
    }
}

/// Deserializes the string recovered from a QR scan.
///
/// A JSON object parse is attempted first (legacy producers); anything
/// that is not a JSON object falls through to line-based parsing.
///
/// # Errors
/// Returns `IdentityError::MalformedCredential` when the text fits neither
/// shape. Decoding is all-or-nothing: a payload is never partially
/// populated from corrupt input.
pub fn decode(text: &str) -> IdentityResult<CredentialPayload> {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        if let Some(object) = value.as_object() {
            return decode_legacy(object);
        }
        // A bare JSON scalar or array is not a credential; let the line
        // parser produce the error
    }
    decode_lines(text)
}

/// Decodes the legacy bare-JSON object shape
/// `{ "identifier": ..., "<field>": ... }`.
fn decode_legacy(object: &serde_json::Map<String, Value>) -> IdentityResult<CredentialPayload> {
    let identifier = object
        .get("identifier")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            IdentityError::MalformedCredential("legacy payload has no identifier".into())
        })?;

    let mut payload = CredentialPayload::bare(identifier);
    for key in LEGACY_FIELD_KEYS {
        if let Some(value) = object.get(key) {
            // A recognized key with a non-string value violates the
            // shape; failing beats a partially-populated payload
            let value = value.as_str().ok_or_else(|| {
                IdentityError::MalformedCredential(format!(
                    "legacy payload key '{}' is not a string",
                    key
                ))
            })?;
            payload.fields.push((key.to_string(), value.to_string()));
        }
    }

    for key in object.keys() {
        if key != "identifier" && !LEGACY_FIELD_KEYS.contains(&key.as_str()) {
            log::debug!("ignoring unrecognized legacy payload key '{}'", key);
        }
    }

    Ok(payload)
}

/// Decodes the structured `Label: value` line format.
fn decode_lines(text: &str) -> IdentityResult<CredentialPayload> {
    if text.trim().is_empty() {
        return Err(IdentityError::MalformedCredential(
            "empty credential text".into(),
        ));
    }

    let mut identifier: Option<String> = None;
    let mut fields: Vec<(String, String)> = Vec::new();
    let mut age_claim: Option<AgeAssertion> = None;

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let (label, value) = line.split_once(SEPARATOR).ok_or_else(|| {
            IdentityError::MalformedCredential(format!("line without '{}': {}", SEPARATOR, line))
        })?;

        match label {
            IDENTIFIER_LABEL => identifier = Some(value.to_string()),
            AGE_LABEL => age_claim = Some(parse_age_value(value)?),
            _ => fields.push((label.to_string(), value.to_string())),
        }
    }

    let identifier = identifier.ok_or_else(|| {
        IdentityError::MalformedCredential("credential has no Document ID line".into())
    })?;

    Ok(CredentialPayload {
        identifier,
        fields,
        age_claim,
    })
}

/// Parses the value part of an age line, e.g. `Verified (18+)`.
fn parse_age_value(value: &str) -> IdentityResult<AgeAssertion> {
    let malformed =
        || IdentityError::MalformedCredential(format!("unparseable age line: {}", value));

    let (status, rest) = value.rsplit_once(" (").ok_or_else(malformed)?;
    let threshold = rest
        .strip_suffix("+)")
        .and_then(|t| t.parse::<u32>().ok())
        .ok_or_else(malformed)?;

    let satisfied = match status {
        "Verified" => true,
        "Not Verified" => false,
        _ => return Err(malformed()),
    };

    Ok(AgeAssertion {
        satisfied,
        threshold,
    })
}
