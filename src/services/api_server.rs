// src/services/api_server.rs
//! API Server for the OneID identity system
//!
//! This module provides the REST API interface for the credential-sharing
//! flow: identity registration, record lookup, selective disclosure into a
//! QR payload, verifier-side decoding, scanned-document field extraction,
//! and the wallet signing surface.
//!
//! The API is built using Axum. All identity-core errors surface as
//! value-level failures mapped onto HTTP status codes here; nothing is
//! retried. CORS is permissive because the expected caller is a browser
//! wallet frontend.

use crate::disclosure::{self, codec, presenter, DisclosureRequest};
use crate::error::IdentityError;
use crate::models::identity::{Gender, IdentityRecord};
use crate::models::payload::VerificationSummary;
use crate::registry::ledger::IdentityLedger;
use crate::scan::extractor::{self, ScannedFields};
use crate::wallet::signer::LocalSigner;
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

// API request and response structures

/// Request payload for registering a new identity record
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterIdentityRequest {
    owner_address: String,
    name: String,
    date_of_birth: NaiveDate,
    gender: Gender,
    address: String,
    document_number: String,
}

/// Response for identity registration
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterIdentityResponse {
    identifier: String,
}

/// Response listing an owner's record identifiers
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListIdentitiesResponse {
    identifiers: Vec<String>,
}

/// Request payload for deactivating a record
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeactivateIdentityRequest {
    owner_address: String,
    index: usize,
}

/// Response for record deactivation
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeactivateIdentityResponse {
    deactivated: bool,
}

/// Request payload for sharing a credential: which record, which fields,
/// and an optional age threshold to attest against
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShareCredentialRequest {
    owner_address: String,
    index: usize,
    selected_fields: Vec<String>,
    age_threshold: Option<u32>,
}

/// Response carrying the exact string to hand to the QR generator
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShareCredentialResponse {
    qr_payload: String,
}

/// Request payload for decoding a scanned credential
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DecodeCredentialRequest {
    payload: String,
}

/// Request payload for extracting fields from scanned document text
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScanDocumentRequest {
    text: String,
}

/// Request payload for signing a message
#[derive(Serialize, Deserialize)]
struct SignMessageRequest {
    message: String,
}

/// Response containing a message signature
#[derive(Serialize, Deserialize)]
struct SignMessageResponse {
    signature: String,
}

/// Response containing the wallet's account address
#[derive(Serialize, Deserialize)]
struct WalletAddressResponse {
    address: String,
}

/// Error body returned for every failed request
#[derive(Serialize, Deserialize)]
struct ErrorResponse {
    error: String,
}

type ApiRejection = (StatusCode, Json<ErrorResponse>);

/// Maps an identity-core error onto an HTTP rejection.
fn reject(err: IdentityError) -> ApiRejection {
    let status = match err {
        IdentityError::RecordNotFound { .. } => StatusCode::NOT_FOUND,
        _ => StatusCode::BAD_REQUEST,
    };
    log::warn!("request rejected: {}", err);
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

/// API server state containing all service dependencies
#[derive(Clone)]
pub struct ApiServer {
    /// In-memory registry of identity records
    ledger: Arc<IdentityLedger>,

    /// Wallet capability: account address plus sign(message)
    signer: Arc<LocalSigner>,
}

impl ApiServer {
    /// Creates a new instance of the API server
    ///
    /// # Arguments
    /// * `ledger` - Registry of identity records
    /// * `signer` - Wallet signing capability
    pub fn new(ledger: Arc<IdentityLedger>, signer: Arc<LocalSigner>) -> Self {
        ApiServer { ledger, signer }
    }

    /// Starts the API server and begins listening for requests
    ///
    /// # Arguments
    /// * `addr` - Socket address to bind to (e.g., "127.0.0.1:3000")
    pub async fn run(&self, addr: SocketAddr) -> anyhow::Result<()> {
        let app = Router::new()
            .route("/register-identity", post(Self::register_identity_handler))
            .route("/identities/:owner", get(Self::list_identities_handler))
            .route(
                "/identities/:owner/:index",
                get(Self::get_identity_handler),
            )
            .route(
                "/deactivate-identity",
                post(Self::deactivate_identity_handler),
            )
            .route("/share-credential", post(Self::share_credential_handler))
            .route("/decode-credential", post(Self::decode_credential_handler))
            .route("/scan-document", post(Self::scan_document_handler))
            .route("/sign-message", post(Self::sign_message_handler))
            .route("/wallet-address", get(Self::wallet_address_handler))
            .layer(CorsLayer::permissive())
            .with_state(Arc::new(self.clone()));

        let listener = tokio::net::TcpListener::bind(addr).await?;
        log::info!("API server listening on {}", addr);
        axum::serve(listener, app).await?;
        Ok(())
    }

    // =====================
    // Registry Handlers
    // =====================

    /// Registers a new identity record
    ///
    /// # Endpoint
    /// POST /register-identity
    ///
    /// # Responses
    /// - 200 OK: Returns the new record's identifier
    /// - 400 Bad Request: Invalid owner address or future date of birth
    async fn register_identity_handler(
        State(state): State<Arc<ApiServer>>,
        Json(payload): Json<RegisterIdentityRequest>,
    ) -> Result<Json<RegisterIdentityResponse>, ApiRejection> {
        let identifier = state
            .ledger
            .create_record(
                &payload.owner_address,
                &payload.name,
                payload.date_of_birth,
                payload.gender,
                &payload.address,
                &payload.document_number,
            )
            .map_err(reject)?;

        Ok(Json(RegisterIdentityResponse { identifier }))
    }

    /// Lists the record identifiers held by an owner
    ///
    /// # Endpoint
    /// GET /identities/:owner
    async fn list_identities_handler(
        Path(owner): Path<String>,
        State(state): State<Arc<ApiServer>>,
    ) -> Json<ListIdentitiesResponse> {
        Json(ListIdentitiesResponse {
            identifiers: state.ledger.list_record_identifiers(&owner),
        })
    }

    /// Fetches one identity record by owner and index
    ///
    /// # Endpoint
    /// GET /identities/:owner/:index
    ///
    /// # Responses
    /// - 200 OK: Returns the record
    /// - 404 Not Found: No record at that index
    async fn get_identity_handler(
        Path((owner, index)): Path<(String, usize)>,
        State(state): State<Arc<ApiServer>>,
    ) -> Result<Json<IdentityRecord>, ApiRejection> {
        let record = state
            .ledger
            .get_record_details(&owner, index)
            .map_err(reject)?;
        Ok(Json(record))
    }

    /// Deactivates an identity record
    ///
    /// # Endpoint
    /// POST /deactivate-identity
    async fn deactivate_identity_handler(
        State(state): State<Arc<ApiServer>>,
        Json(payload): Json<DeactivateIdentityRequest>,
    ) -> Result<Json<DeactivateIdentityResponse>, ApiRejection> {
        state
            .ledger
            .deactivate_record(&payload.owner_address, payload.index)
            .map_err(reject)?;
        Ok(Json(DeactivateIdentityResponse { deactivated: true }))
    }

    // =====================
    // Disclosure Handlers
    // =====================

    /// Builds a selective-disclosure credential and encodes it for QR
    /// transport
    ///
    /// # Endpoint
    /// POST /share-credential
    ///
    /// # Responses
    /// - 200 OK: Returns the QR payload text
    /// - 400 Bad Request: Invalid age threshold or date of birth
    /// - 404 Not Found: No record at that index
    async fn share_credential_handler(
        State(state): State<Arc<ApiServer>>,
        Json(payload): Json<ShareCredentialRequest>,
    ) -> Result<Json<ShareCredentialResponse>, ApiRejection> {
        let record = state
            .ledger
            .get_record_details(&payload.owner_address, payload.index)
            .map_err(reject)?;

        let request = DisclosureRequest {
            record,
            selected_fields: payload.selected_fields.into_iter().collect::<HashSet<_>>(),
            age_threshold: payload.age_threshold,
        };
        let credential = disclosure::prepare(&request).map_err(reject)?;

        Ok(Json(ShareCredentialResponse {
            qr_payload: codec::encode(&credential),
        }))
    }

    /// Decodes a scanned credential and summarizes it for display
    ///
    /// # Endpoint
    /// POST /decode-credential
    ///
    /// # Responses
    /// - 200 OK: Returns the verification summary
    /// - 400 Bad Request: Malformed credential text
    async fn decode_credential_handler(
        State(_state): State<Arc<ApiServer>>,
        Json(payload): Json<DecodeCredentialRequest>,
    ) -> Result<Json<VerificationSummary>, ApiRejection> {
        let decoded = codec::decode(&payload.payload).map_err(reject)?;
        Ok(Json(presenter::summarize(&decoded)))
    }

    /// Extracts candidate attribute values from scanned document text
    ///
    /// # Endpoint
    /// POST /scan-document
    async fn scan_document_handler(
        State(_state): State<Arc<ApiServer>>,
        Json(payload): Json<ScanDocumentRequest>,
    ) -> Json<ScannedFields> {
        Json(extractor::extract_fields(&payload.text))
    }

    // =====================
    // Wallet Handlers
    // =====================

    /// Signs a message with the server wallet
    ///
    /// # Endpoint
    /// POST /sign-message
    async fn sign_message_handler(
        State(state): State<Arc<ApiServer>>,
        Json(payload): Json<SignMessageRequest>,
    ) -> Json<SignMessageResponse> {
        let signature = state.signer.sign_message(payload.message.as_bytes());
        Json(SignMessageResponse {
            signature: ethers::utils::hex::encode(signature),
        })
    }

    /// Returns the server wallet's account address
    ///
    /// # Endpoint
    /// GET /wallet-address
    async fn wallet_address_handler(
        State(state): State<Arc<ApiServer>>,
    ) -> Json<WalletAddressResponse> {
        Json(WalletAddressResponse {
            address: state.signer.address(),
        })
    }
}
