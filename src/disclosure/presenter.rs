// src/disclosure/presenter.rs
//! Verification result presentation.
//!
//! Classifies a decoded credential payload for display on the verifier's
//! device: which fields arrived with a value, and whether the age check
//! passed. Works entirely offline from the decoded payload: the scanning
//! device is typically not the registration device and has no ledger
//! access.

use crate::models::payload::{CredentialPayload, VerificationSummary};

/// Summarizes a decoded payload.
///
/// A field counts as present when its decoded value is non-empty after
/// trimming. The payload is only classified, never validated against the
/// ledger; a failed decode must be surfaced as an error upstream, not fed
/// through here.
pub fn summarize(payload: &CredentialPayload) -> VerificationSummary {
    let present_fields = payload
        .fields
        .iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(label, _)| label.clone())
        .collect();

    VerificationSummary {
        identifier: payload.identifier.clone(),
        present_fields,
        age_result: payload.age_claim,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::payload::AgeAssertion;

    #[test]
    fn test_summarize_lists_non_empty_fields_in_order() {
        let payload = CredentialPayload {
            identifier: "did:ethr:0xabc".into(),
            fields: vec![
                ("Name".to_string(), "Jane Doe".to_string()),
                ("Gender".to_string(), "F".to_string()),
            ],
            age_claim: None,
        };

        let summary = summarize(&payload);
        assert_eq!(summary.identifier, "did:ethr:0xabc");
        assert_eq!(summary.present_fields, vec!["Name", "Gender"]);
        assert!(summary.age_result.is_none());
    }

    #[test]
    fn test_summarize_drops_empty_and_blank_values() {
        let payload = CredentialPayload {
            identifier: "did:ethr:0xabc".into(),
            fields: vec![
                ("Name".to_string(), "Jane Doe".to_string()),
                ("Address".to_string(), String::new()),
                ("Gender".to_string(), "   ".to_string()),
            ],
            age_claim: None,
        };

        assert_eq!(summarize(&payload).present_fields, vec!["Name"]);
    }

    #[test]
    fn test_summarize_passes_the_age_result_through() {
        let payload = CredentialPayload {
            identifier: "did:ethr:0xabc".into(),
            fields: vec![],
            age_claim: Some(AgeAssertion {
                satisfied: false,
                threshold: 21,
            }),
        };

        let result = summarize(&payload).age_result.unwrap();
        assert!(!result.satisfied);
        assert_eq!(result.threshold, 21);
    }
}
