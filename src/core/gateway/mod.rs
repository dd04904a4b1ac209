//! Lead persistence gateway
//!
//! This module provides the append-only write path for captured leads:
//! - [`LeadGateway`] - the storage seam used by the lead API
//! - [`FirestoreGateway`] - Cloud Firestore implementation over its REST API

mod firestore;

use async_trait::async_trait;

use crate::core::lead::{LeadReceipt, LeadRecord};

pub use firestore::{
    DEFAULT_BASE_URL, DEFAULT_COLLECTION, DEFAULT_DATABASE, FirestoreGateway, FirestoreSettings,
    new_document_id,
};

/// Gateway error types
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Lead store is not configured")]
    NotConfigured,

    #[error("Failed to reach lead store: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Lead store denied the write: {0}")]
    PermissionDenied(String),

    #[error("Lead store unavailable: {0}")]
    Unavailable(String),

    #[error("Lead store rejected the write ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Unexpected lead store response: {0}")]
    MalformedResponse(String),
}

/// Append-only storage for leads.
///
/// `save` writes one new document and never updates or deletes. Failures are
/// returned as values; there is no retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeadGateway: Send + Sync {
    async fn save(&self, record: &LeadRecord) -> Result<LeadReceipt, GatewayError>;
}
