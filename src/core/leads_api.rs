//! Lead API endpoints
//!
//! Provides the REST endpoint the lead capture form posts to:
//! - POST /api/leads - Validate a lead and append it to the lead store
//!
//! The store credentials stay on the server; the browser only talks to this API.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use std::sync::Arc;

use crate::core::gateway::{GatewayError, LeadGateway};
use crate::core::lead::{LEADS_ENDPOINT, LeadReceipt, LeadRecord, ValidationError};

/// Lead API state containing the injected gateway
#[derive(Clone)]
pub struct LeadsApiState {
    pub gateway: Arc<dyn LeadGateway>,
}

impl LeadsApiState {
    pub fn new(gateway: impl LeadGateway + 'static) -> Self {
        Self {
            gateway: Arc::new(gateway),
        }
    }
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }
}

/// Lead API error types
#[derive(Debug, thiserror::Error)]
pub enum LeadApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl IntoResponse for LeadApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            LeadApiError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_FAILED"),
            LeadApiError::Gateway(GatewayError::NotConfigured) => {
                (StatusCode::SERVICE_UNAVAILABLE, "STORE_NOT_CONFIGURED")
            }
            LeadApiError::Gateway(_) => (StatusCode::BAD_GATEWAY, "PERSISTENCE_FAILED"),
        };

        let body = ApiError::new(self.to_string(), code);

        (status, Json(body)).into_response()
    }
}

/// Create the lead API router
pub fn leads_api_router(state: LeadsApiState) -> Router {
    Router::new()
        .route(LEADS_ENDPOINT, post(create_lead_handler))
        .with_state(state)
}

/// POST /api/leads
/// Validate the submitted lead and store it
async fn create_lead_handler(
    State(state): State<LeadsApiState>,
    Json(record): Json<LeadRecord>,
) -> Result<(StatusCode, Json<LeadReceipt>), LeadApiError> {
    record.validate()?;

    let receipt = state
        .gateway
        .save(&record)
        .await
        .inspect_err(|err| tracing::error!("Failed to save lead: {}", err))?;

    tracing::info!("Lead stored: {}", receipt.id);

    Ok((StatusCode::CREATED, Json(receipt)))
}
