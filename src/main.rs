// src/main.rs

//! # OneID - Main Entry Point
//!
//! Wires up the identity system and starts the API server.
//!
//! ## Architecture Overview
//! 1. **Registry Layer**: in-memory `IdentityLedger` of identity records
//! 2. **Disclosure Layer**: selective disclosure, age claims, QR codec
//! 3. **Wallet Layer**: local signing key and account address
//! 4. **Services Layer**: Axum REST API over all of the above
//!
//! ## Environment Variables
//! - `ONEID_BIND_ADDR`: (Optional) socket address to listen on
//!   (default: 127.0.0.1:3000)
//! - `RUST_LOG`: (Optional) log filter, e.g. `info`

use crate::registry::ledger::IdentityLedger;
use crate::services::api_server::ApiServer;
use crate::wallet::signer::LocalSigner;
use anyhow::Context;
use dotenv::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;

// Module declarations (organized by functional domain)
mod did; // decentralized identifier derivation
mod disclosure; // selective disclosure, age claims, QR codec
mod error; // shared error types
mod models; // data structures
mod registry; // identity record ledger
mod scan; // scanned-document field extraction
mod services; // REST API
mod wallet; // signing capability

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();
    env_logger::init();

    let addr: SocketAddr = std::env::var("ONEID_BIND_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
        .parse()
        .context("ONEID_BIND_ADDR is not a valid socket address")?;

    // Initialize core components
    let ledger = Arc::new(IdentityLedger::new());
    let signer = Arc::new(LocalSigner::new());
    log::info!("server wallet address: {}", signer.address());

    let api_server = ApiServer::new(ledger, signer);

    println!("API server running at http://{}", addr);
    println!("Available endpoints:");
    println!("- POST /register-identity");
    println!("- GET  /identities/:owner");
    println!("- GET  /identities/:owner/:index");
    println!("- POST /deactivate-identity");
    println!("- POST /share-credential");
    println!("- POST /decode-credential");
    println!("- POST /scan-document");
    println!("- POST /sign-message");
    println!("- GET  /wallet-address");

    api_server.run(addr).await
}
