// src/did/generator.rs
//! Decentralized identifier (DID) generation.
//!
//! Derives a stable `did:ethr:` identifier from a wallet account address,
//! optionally suffixed with a disambiguator so one owner can hold several
//! records. Pure string derivation; registering the identifier is the
//! ledger's job.

use crate::error::{IdentityError, IdentityResult};

/// DID method tag used for all identifiers produced by this system.
pub const DID_METHOD: &str = "ethr";

/// Expected length of a hex account address including the `0x` prefix.
const ADDRESS_LEN: usize = 42;

/// Derives a DID string from an account address.
///
/// The address is lowercased before use, so differently-cased spellings of
/// the same account always derive the same identifier. When a
/// `disambiguator` is given (typically the creation timestamp in
/// milliseconds) it is appended as a final `:` segment.
///
/// # Arguments
/// * `owner_address` - Hex account address, `0x` + 40 hex digits
/// * `disambiguator` - Optional uniqueness suffix
///
/// # Errors
/// Returns `IdentityError::InvalidAddress` if the address is not a
/// syntactically valid account address.
pub fn generate(owner_address: &str, disambiguator: Option<&str>) -> IdentityResult<String> {
    let address = validate_address(owner_address)?;
    let did = match disambiguator {
        Some(suffix) => format!("did:{}:{}:{}", DID_METHOD, address, suffix),
        None => format!("did:{}:{}", DID_METHOD, address),
    };
    Ok(did)
}

/// Checks address syntax and returns the lowercase form.
///
/// # Errors
/// Returns `IdentityError::InvalidAddress` if the input is missing the
/// `0x` prefix, has the wrong length, or contains non-hex characters.
pub fn validate_address(owner_address: &str) -> IdentityResult<String> {
    let trimmed = owner_address.trim();
    let valid = trimmed.len() == ADDRESS_LEN
        && trimmed.starts_with("0x")
        && trimmed[2..].chars().all(|c| c.is_ascii_hexdigit());
    if !valid {
        return Err(IdentityError::InvalidAddress(trimmed.to_string()));
    }
    Ok(trimmed.to_ascii_lowercase())
}
