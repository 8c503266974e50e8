// src/wallet/signer.rs
//! Wallet signing capability.
//!
//! Supplies the two things the identity core ever needs from a wallet: an
//! account address string and a sign(message) capability for attestation.
//! The signer is passed explicitly (as an `Arc`) into whatever component
//! needs it, never held as ambient global state.
//!
//! Uses the following cryptographic primitives:
//! - secp256k1 curve (via `k256` crate)
//! - Keccak-256 hashing (via `ethers` crate)

use ethers::utils::keccak256;
use k256::ecdsa::signature::hazmat::PrehashSigner;
use k256::ecdsa::{Signature, SigningKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{PublicKey, SecretKey};

/// In-process wallet backed by a freshly generated secp256k1 key.
///
/// Stands in for the browser-injected wallet of the original product: it
/// yields an Ethereum-style account address and signs arbitrary messages.
/// The secret key never leaves this struct.
#[derive(Clone)]
pub struct LocalSigner {
    /// Securely stored private key (never exposed)
    secret_key: SecretKey,
    /// Derived public key for verification
    pub public_key: PublicKey,
}

impl LocalSigner {
    /// Generates a signer with a fresh random key.
    pub fn new() -> Self {
        let secret_key = SecretKey::random(&mut rand::thread_rng());
        let public_key = secret_key.public_key();
        LocalSigner {
            secret_key,
            public_key,
        }
    }

    /// The account address of this wallet: the last 20 bytes of the
    /// Keccak-256 hash of the uncompressed public key, as lowercase hex
    /// with a `0x` prefix. Valid input for the DID generator.
    pub fn address(&self) -> String {
        let encoded = self.public_key.to_encoded_point(false);
        // Skip the 0x04 uncompressed-point marker
        let hash = keccak256(&encoded.as_bytes()[1..]);
        format!("0x{}", ethers::utils::hex::encode(&hash[12..]))
    }

    /// Signs a message using ECDSA (secp256k1) over its Keccak-256 hash.
    ///
    /// # Arguments
    /// * `message` - Raw message bytes to sign
    ///
    /// # Returns
    /// 64-byte compact ECDSA signature (R || S values)
    pub fn sign_message(&self, message: &[u8]) -> Vec<u8> {
        let hash = keccak256(message);
        let signing_key = SigningKey::from(&self.secret_key);
        let signature: Signature = signing_key
            .sign_prehash(&hash)
            .expect("signing a 32-byte prehash cannot fail");
        signature.to_vec()
    }
}

impl Default for LocalSigner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::did::generator;

    #[test]
    fn test_address_is_a_valid_account_address() {
        let signer = LocalSigner::new();
        let address = signer.address();
        assert!(generator::validate_address(&address).is_ok());
        // Already lowercase, so validation is a no-op rewrite
        assert_eq!(generator::validate_address(&address).unwrap(), address);
    }

    #[test]
    fn test_addresses_differ_between_wallets() {
        assert_ne!(LocalSigner::new().address(), LocalSigner::new().address());
    }

    #[test]
    fn test_signature_is_compact_and_deterministic() {
        let signer = LocalSigner::new();
        let first = signer.sign_message(b"Register DID: did:ethr:0xabc");
        let second = signer.sign_message(b"Register DID: did:ethr:0xabc");

        // RFC 6979 deterministic ECDSA: same key + message, same signature
        assert_eq!(first.len(), 64);
        assert_eq!(first, second);
    }

    #[test]
    fn test_different_messages_yield_different_signatures() {
        let signer = LocalSigner::new();
        assert_ne!(signer.sign_message(b"a"), signer.sign_message(b"b"));
    }
}
