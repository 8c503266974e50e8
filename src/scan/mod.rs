// src/scan/mod.rs
//! Scanned-document field extraction.

pub mod extractor;
