// src/services/mod.rs
//! Service layer: HTTP surface over the identity core.

pub mod api_server;
