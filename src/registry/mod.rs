// src/registry/mod.rs
//! Identity record registry.

pub mod ledger;
