// src/scan/extractor.rs
//! Candidate field extraction from scanned document text.
//!
//! Consumes the raw text an OCR pass produced from an uploaded identity
//! document and pulls out candidate attribute values. Everything returned
//! here is UNTRUSTED caller input: the user confirms or corrects the
//! candidates before registration, and the ledger re-validates on create.
//! Extraction therefore never errors; unrecognized text is simply not
//! extracted.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which record attribute a recognized label maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Name,
    DateOfBirth,
    Gender,
    Address,
    DocumentNumber,
}

/// Label spellings seen on scanned identity documents, normalized to
/// lowercase alphanumeric form.
static LABEL_ALIASES: Lazy<HashMap<&'static str, FieldKind>> = Lazy::new(|| {
    HashMap::from([
        ("name", FieldKind::Name),
        ("fullname", FieldKind::Name),
        ("dob", FieldKind::DateOfBirth),
        ("dateofbirth", FieldKind::DateOfBirth),
        ("birthdate", FieldKind::DateOfBirth),
        ("yearofbirth", FieldKind::DateOfBirth),
        ("gender", FieldKind::Gender),
        ("sex", FieldKind::Gender),
        ("address", FieldKind::Address),
        ("addr", FieldKind::Address),
        ("aadhar", FieldKind::DocumentNumber),
        ("aadharno", FieldKind::DocumentNumber),
        ("aadharnumber", FieldKind::DocumentNumber),
        ("documentno", FieldKind::DocumentNumber),
        ("documentnumber", FieldKind::DocumentNumber),
        ("idno", FieldKind::DocumentNumber),
        ("idnumber", FieldKind::DocumentNumber),
    ])
});

/// Candidate attribute values extracted from one scanned document.
///
/// All fields are optional raw strings; nothing is validated or typed at
/// this stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannedFields {
    pub name: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub document_number: Option<String>,
}

impl ScannedFields {
    fn set(&mut self, kind: FieldKind, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        // First hit wins; later heuristics never overwrite a labeled value
        let slot = match kind {
            FieldKind::Name => &mut self.name,
            FieldKind::DateOfBirth => &mut self.date_of_birth,
            FieldKind::Gender => &mut self.gender,
            FieldKind::Address => &mut self.address,
            FieldKind::DocumentNumber => &mut self.document_number,
        };
        if slot.is_none() {
            *slot = Some(value.to_string());
        }
    }
}

/// Extracts candidate attribute values from raw OCR text.
///
/// Two passes per line: labeled lines (`Label: value`, label matched
/// against [`LABEL_ALIASES`]) take priority; unlabeled lines are scanned
/// for tokens shaped like grouped 12-digit document numbers or dates.
pub fn extract_fields(raw_text: &str) -> ScannedFields {
    let mut fields = ScannedFields::default();

    for line in raw_text.lines() {
        if let Some((label, value)) = line.split_once(':') {
            if let Some(kind) = LABEL_ALIASES.get(normalize_label(label).as_str()) {
                fields.set(*kind, value);
                continue;
            }
        }
        scan_bare_tokens(line, &mut fields);
    }

    fields
}

/// Lowercases a label and strips everything but letters and digits, so
/// "Date of Birth", "date-of-birth" and "DateOfBirth" all match.
fn normalize_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Heuristics over an unlabeled line: grouped document numbers and
/// date-shaped tokens.
fn scan_bare_tokens(line: &str, fields: &mut ScannedFields) {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    // Aadhar-style print layout: three groups of four digits
    for window in tokens.windows(3) {
        if window.iter().all(|t| is_digit_group(t, 4)) {
            fields.set(FieldKind::DocumentNumber, &window.join("-"));
        }
    }

    for token in &tokens {
        if is_digit_group(token, 12) || is_grouped_document_number(token) {
            fields.set(FieldKind::DocumentNumber, token);
        }
        if looks_like_date(token) {
            fields.set(FieldKind::DateOfBirth, token);
        }
    }
}

fn is_digit_group(token: &str, len: usize) -> bool {
    token.len() == len && token.chars().all(|c| c.is_ascii_digit())
}

/// `dddd-dddd-dddd`, the canonical printed Aadhar grouping.
fn is_grouped_document_number(token: &str) -> bool {
    let groups: Vec<&str> = token.split('-').collect();
    groups.len() == 3 && groups.iter().all(|g| is_digit_group(g, 4))
}

/// `yyyy-mm-dd` or `dd/mm/yyyy`; digits only checked positionally, the
/// value stays an untrusted candidate either way.
fn looks_like_date(token: &str) -> bool {
    let bytes = token.as_bytes();
    if bytes.len() != 10 {
        return false;
    }
    let digits_elsewhere = |a: usize, b: usize| {
        bytes
            .iter()
            .enumerate()
            .all(|(i, c)| i == a || i == b || c.is_ascii_digit())
    };
    (bytes[4] == b'-' && bytes[7] == b'-' && digits_elsewhere(4, 7))
        || (bytes[2] == b'/' && bytes[5] == b'/' && digits_elsewhere(2, 5))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_labeled_fields() {
        let text = "Name: John Doe\nDOB: 1990-01-01\nGender: M\nAddress: 123 Main St, City\nAadhar No: 1234-5678-9012";
        let fields = extract_fields(text);

        assert_eq!(fields.name.as_deref(), Some("John Doe"));
        assert_eq!(fields.date_of_birth.as_deref(), Some("1990-01-01"));
        assert_eq!(fields.gender.as_deref(), Some("M"));
        assert_eq!(fields.address.as_deref(), Some("123 Main St, City"));
        assert_eq!(fields.document_number.as_deref(), Some("1234-5678-9012"));
    }

    #[test]
    fn test_label_matching_tolerates_spelling_variants() {
        let fields = extract_fields("Date of Birth: 15/06/1990\nFull Name: Jane Doe");
        assert_eq!(fields.date_of_birth.as_deref(), Some("15/06/1990"));
        assert_eq!(fields.name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_bare_grouped_document_number_is_picked_up() {
        let fields = extract_fields("GOVERNMENT OF INDIA\n1234 5678 9012");
        assert_eq!(fields.document_number.as_deref(), Some("1234-5678-9012"));
    }

    #[test]
    fn test_bare_hyphenated_and_plain_numbers() {
        assert_eq!(
            extract_fields("1234-5678-9012").document_number.as_deref(),
            Some("1234-5678-9012")
        );
        assert_eq!(
            extract_fields("123456789012").document_number.as_deref(),
            Some("123456789012")
        );
    }

    #[test]
    fn test_bare_date_token_is_a_dob_candidate() {
        let fields = extract_fields("JANE DOE\n1990-06-15\nFEMALE");
        assert_eq!(fields.date_of_birth.as_deref(), Some("1990-06-15"));
    }

    #[test]
    fn test_labeled_value_wins_over_later_heuristic() {
        let fields = extract_fields("DOB: 1990-06-15\n2001-01-01");
        assert_eq!(fields.date_of_birth.as_deref(), Some("1990-06-15"));
    }

    #[test]
    fn test_unrecognized_text_extracts_nothing() {
        let fields = extract_fields("completely unrelated scan noise\nlorem ipsum");
        assert_eq!(fields, ScannedFields::default());
    }

    #[test]
    fn test_empty_labeled_value_is_ignored() {
        let fields = extract_fields("Name:   \nGender: F");
        assert!(fields.name.is_none());
        assert_eq!(fields.gender.as_deref(), Some("F"));
    }

    #[test]
    fn test_short_number_is_not_a_document_number() {
        assert!(extract_fields("1234 5678").document_number.is_none());
    }
}
