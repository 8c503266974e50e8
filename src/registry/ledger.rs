// src/registry/ledger.rs
//! In-memory identity ledger.
//!
//! Append-only store of identity records keyed by owner account address.
//! This stands in for the on-chain registry contract: records are created
//! once, listed and fetched by index, and only the active flag is ever
//! mutated afterwards. The disclosure core consumes records from here as
//! already-resolved values.
//!
//! # Note
//! For production use this would be backed by the registry contract; the
//! in-memory map keeps the same interface.

use crate::did::generator;
use crate::error::{IdentityError, IdentityResult};
use crate::models::identity::{Gender, IdentityRecord};
use chrono::{NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

/// Thread-safe in-memory ledger of identity records.
///
/// Owner addresses are normalized to lowercase on every operation, so
/// lookups are case-insensitive. Each owner may hold multiple records;
/// indices are stable because records are never removed.
pub struct IdentityLedger {
    /// Records per lowercase owner address, in creation order.
    records: Mutex<HashMap<String, Vec<IdentityRecord>>>,

    /// Last DID suffix handed out. Forced strictly increasing so two
    /// registrations within the same millisecond still derive distinct
    /// identifiers.
    last_suffix: Mutex<u64>,
}

impl IdentityLedger {
    /// Creates a new empty ledger.
    pub fn new() -> Self {
        IdentityLedger {
            records: Mutex::new(HashMap::new()),
            last_suffix: Mutex::new(0),
        }
    }

    /// Registers a new identity record for an owner.
    ///
    /// Derives the record's DID from the owner address and a monotonic
    /// millisecond suffix, stamps the creation time, and appends the
    /// record to the owner's list.
    ///
    /// # Arguments
    /// * `owner_address` - Hex account address of the registering wallet
    /// * `name`, `date_of_birth`, `gender`, `address`, `document_number` -
    ///   attribute values, typically confirmed from a document scan
    ///
    /// # Returns
    /// The identifier of the newly created record.
    ///
    /// # Errors
    /// - `InvalidAddress` if the owner address is malformed
    /// - `InvalidDateOfBirth` if the date of birth lies in the future
    pub fn create_record(
        &self,
        owner_address: &str,
        name: &str,
        date_of_birth: NaiveDate,
        gender: Gender,
        address: &str,
        document_number: &str,
    ) -> IdentityResult<String> {
        let owner = generator::validate_address(owner_address)?;

        let now = Utc::now();
        let today = now.date_naive();
        if date_of_birth > today {
            return Err(IdentityError::InvalidDateOfBirth {
                dob: date_of_birth,
                as_of: today,
            });
        }

        let suffix = self.next_suffix(now.timestamp_millis() as u64);
        let identifier = generator::generate(&owner, Some(&suffix.to_string()))?;

        let record = IdentityRecord {
            identifier: identifier.clone(),
            owner_address: owner.clone(),
            name: name.to_string(),
            date_of_birth,
            gender,
            address: address.to_string(),
            document_number: document_number.to_string(),
            active: true,
            created_at: now,
            updated_at: now,
        };

        let mut records = self.records.lock().unwrap();
        records.entry(owner.clone()).or_default().push(record);
        log::info!("registered identity {} for owner {}", identifier, owner);

        Ok(identifier)
    }

    /// Lists the identifiers of all records held by an owner, in creation
    /// order. Unknown owners yield an empty list rather than an error.
    pub fn list_record_identifiers(&self, owner_address: &str) -> Vec<String> {
        let owner = owner_address.trim().to_ascii_lowercase();
        let records = self.records.lock().unwrap();
        records
            .get(&owner)
            .map(|list| list.iter().map(|r| r.identifier.clone()).collect())
            .unwrap_or_default()
    }

    /// Fetches one record of an owner by index.
    ///
    /// # Errors
    /// `RecordNotFound` when the owner has no record at that index.
    pub fn get_record_details(
        &self,
        owner_address: &str,
        index: usize,
    ) -> IdentityResult<IdentityRecord> {
        let owner = owner_address.trim().to_ascii_lowercase();
        let records = self.records.lock().unwrap();
        records
            .get(&owner)
            .and_then(|list| list.get(index))
            .cloned()
            .ok_or(IdentityError::RecordNotFound { owner, index })
    }

    /// Marks a record inactive and bumps its update timestamp. The record
    /// stays listed so indices remain stable.
    ///
    /// # Errors
    /// `RecordNotFound` when the owner has no record at that index.
    pub fn deactivate_record(&self, owner_address: &str, index: usize) -> IdentityResult<()> {
        let owner = owner_address.trim().to_ascii_lowercase();
        let mut records = self.records.lock().unwrap();
        let record = records
            .get_mut(&owner)
            .and_then(|list| list.get_mut(index))
            .ok_or(IdentityError::RecordNotFound {
                owner: owner.clone(),
                index,
            })?;

        record.active = false;
        record.updated_at = Utc::now();
        Ok(())
    }

    /// Returns a strictly increasing DID suffix at or after the given
    /// millisecond timestamp.
    fn next_suffix(&self, now_millis: u64) -> u64 {
        let mut last = self.last_suffix.lock().unwrap();
        let suffix = now_millis.max(*last + 1);
        *last = suffix;
        suffix
    }
}

impl Default for IdentityLedger {
    fn default() -> Self {
        Self::new()
    }
}
