// src/did/mod.rs
//! Decentralized identifier derivation.

pub mod generator;
