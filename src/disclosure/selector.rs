// src/disclosure/selector.rs
//! Disclosure field selection.
//!
//! Projects a full identity record down to the caller-chosen subset of
//! fields. The projection is minimizing by construction: anything not
//! explicitly selected is absent from the output, and the output order is
//! the canonical field list order rather than the iteration order of the
//! selection set, so repeated projections yield identical QR payloads.

use crate::models::identity::IdentityRecord;
use crate::models::payload::CredentialPayload;
use std::collections::HashSet;

/// Canonical, ordered list of the disclosable field keys of an identity
/// record. The identifier is always disclosed and is not listed here; the
/// date of birth is never disclosed directly (only through an age claim).
pub const DISCLOSABLE_FIELDS: [&str; 5] =
    ["name", "documentNumber", "gender", "address", "createdAt"];

/// Human-readable label and rendered value for one disclosable field.
///
/// Returns `None` for keys outside the canonical list.
fn field_entry(record: &IdentityRecord, key: &str) -> Option<(String, String)> {
    let (label, value) = match key {
        "name" => ("Name", flatten_line_breaks(&record.name)),
        "documentNumber" => ("Document Number", flatten_line_breaks(&record.document_number)),
        "gender" => ("Gender", record.gender.to_string()),
        "address" => ("Address", flatten_line_breaks(&record.address)),
        "createdAt" => ("Created At", record.created_at.to_rfc3339()),
        _ => return None,
    };
    Some((label.to_string(), value))
}

/// Collapses embedded line breaks to single spaces.
///
/// The codec's text format is line-delimited, so a projected value must
/// never span lines; registration accepts free text (a postal address may
/// arrive with line breaks) and the projection is where it is squeezed
/// onto one line.
fn flatten_line_breaks(value: &str) -> String {
    value.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

/// Produces the minimized projection of `record` containing only the
/// selected fields, plus the identifier.
///
/// # Arguments
/// * `record` - The full identity record; not mutated
/// * `selected_fields` - Caller-chosen field keys
///
/// # Behavior
/// Selection keys outside [`DISCLOSABLE_FIELDS`] come from untrusted
/// callers and are dropped silently (logged at debug level) instead of
/// failing the projection. An empty selection is valid: the payload then
/// carries only the identifier.
pub fn project(record: &IdentityRecord, selected_fields: &HashSet<String>) -> CredentialPayload {
    let mut payload = CredentialPayload::bare(&record.identifier);

    for key in DISCLOSABLE_FIELDS {
        if selected_fields.contains(key) {
            if let Some(entry) = field_entry(record, key) {
                payload.fields.push(entry);
            }
        }
    }

    for key in selected_fields {
        if !DISCLOSABLE_FIELDS.contains(&key.as_str()) {
            log::debug!("ignoring unknown disclosure field '{}'", key);
        }
    }

    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disclosure::test_support::sample_record;

    fn selection(keys: &[&str]) -> HashSet<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_project_contains_exactly_the_selected_fields() {
        let record = sample_record();
        let payload = project(&record, &selection(&["name", "gender"]));

        assert_eq!(payload.identifier, record.identifier);
        assert_eq!(
            payload.fields,
            vec![
                ("Name".to_string(), "Jane Doe".to_string()),
                ("Gender".to_string(), "F".to_string()),
            ]
        );
        assert!(payload.age_claim.is_none());
    }

    #[test]
    fn test_project_order_is_canonical_not_selection_order() {
        let record = sample_record();
        // HashSet iteration order is arbitrary; the output must not be
        let payload = project(
            &record,
            &selection(&["createdAt", "address", "gender", "documentNumber", "name"]),
        );

        let labels: Vec<&str> = payload.fields.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Name", "Document Number", "Gender", "Address", "Created At"]
        );
    }

    #[test]
    fn test_project_ignores_unknown_keys() {
        let record = sample_record();
        let payload = project(&record, &selection(&["name", "dateOfBirth", "ssn"]));

        // dateOfBirth is intentionally not disclosable; ssn does not exist
        assert_eq!(payload.fields.len(), 1);
        assert_eq!(payload.fields[0].0, "Name");
    }

    #[test]
    fn test_project_with_empty_selection_keeps_identifier_only() {
        let record = sample_record();
        let payload = project(&record, &HashSet::new());

        assert_eq!(payload.identifier, record.identifier);
        assert!(payload.fields.is_empty());
    }

    #[test]
    fn test_project_does_not_mutate_the_record() {
        let record = sample_record();
        let before = record.clone();
        let _ = project(&record, &selection(&["name", "address"]));
        assert_eq!(record.name, before.name);
        assert_eq!(record.address, before.address);
    }

    #[test]
    fn test_project_flattens_embedded_line_breaks() {
        let mut record = sample_record();
        record.address = "Flat 4\nRose Court".into();
        record.name = "Jane\r\nDoe".into();

        let payload = project(&record, &selection(&["name", "address"]));
        assert_eq!(
            payload.fields,
            vec![
                ("Name".to_string(), "Jane Doe".to_string()),
                ("Address".to_string(), "Flat 4 Rose Court".to_string()),
            ]
        );
    }

    #[test]
    fn test_created_at_renders_as_rfc3339() {
        let record = sample_record();
        let payload = project(&record, &selection(&["createdAt"]));
        assert_eq!(payload.fields[0].1, record.created_at.to_rfc3339());
    }
}
