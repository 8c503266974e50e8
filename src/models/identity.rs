// src/models/identity.rs
//! Identity record data model.
//!
//! Defines the attribute record backing one registered identity document.
//! Records are owned by the registry ledger; the disclosure core treats
//! them as read-only input.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Gender attribute of an identity record.
///
/// Serialized as the single letters `M`/`F`/`O`, matching the values the
/// document-scanning frontend emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "O")]
    Other,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Gender::Male => "M",
            Gender::Female => "F",
            Gender::Other => "O",
        };
        write!(f, "{}", letter)
    }
}

impl FromStr for Gender {
    type Err = String;

    /// Parses both the single-letter form and the spelled-out form,
    /// case-insensitively. Scanned documents use either.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "male" => Ok(Gender::Male),
            "f" | "female" => Ok(Gender::Female),
            "o" | "other" => Ok(Gender::Other),
            other => Err(format!("unrecognized gender value '{}'", other)),
        }
    }
}

/// One registered identity document.
///
/// Created once at registration and mutated only by the registry ledger
/// (the `active`/`updated_at` pair changes on deactivation). The
/// disclosure selector never modifies a record.
///
/// # Invariant
/// `identifier` is globally unique and of the form
/// `did:ethr:<owner-address-lowercase>[:<disambiguator>]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityRecord {
    /// The record's decentralized identifier.
    pub identifier: String,

    /// Account address of the registering wallet, lowercase hex.
    pub owner_address: String,

    /// Full name as printed on the source document.
    pub name: String,

    /// Date of birth; feeds the age claim evaluator.
    pub date_of_birth: NaiveDate,

    pub gender: Gender,

    /// Postal address as printed on the source document.
    pub address: String,

    /// National-ID number of the source document (e.g. an Aadhar number).
    pub document_number: String,

    /// Cleared when the owner deactivates the record.
    pub active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_roundtrip_letters() {
        assert_eq!("M".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("F".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!("O".parse::<Gender>().unwrap(), Gender::Other);
        assert_eq!(Gender::Female.to_string(), "F");
    }

    #[test]
    fn test_gender_parses_spelled_out_forms() {
        assert_eq!("male".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("Female".parse::<Gender>().unwrap(), Gender::Female);
        assert!("unknown".parse::<Gender>().is_err());
    }

    #[test]
    fn test_record_serializes_with_camel_case_keys() {
        let record = IdentityRecord {
            identifier: "did:ethr:0xabc".into(),
            owner_address: "0xabc".into(),
            name: "Jane Doe".into(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 6, 15).unwrap(),
            gender: Gender::Female,
            address: "123 Main St, City".into(),
            document_number: "1234-5678-9012".into(),
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"dateOfBirth\""));
        assert!(json.contains("\"documentNumber\""));
        assert!(json.contains("\"gender\":\"F\""));
    }
}
