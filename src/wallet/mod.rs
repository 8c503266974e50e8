// src/wallet/mod.rs
//! Wallet signing capability.

pub mod signer;
