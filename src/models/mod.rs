// src/models/mod.rs
//! Data structures for the identity core.

pub mod identity;
pub mod payload;
