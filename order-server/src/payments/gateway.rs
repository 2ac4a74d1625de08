//! Payment gateway client
//!
//! Razorpay-compatible REST API (no SDK dependency). [`LocalGateway`] mints
//! references in-process for development and tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Gateway request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Gateway rejected request ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("Gateway response invalid: {0}")]
    InvalidResponse(String),
}

/// Order creation request in minor units
#[derive(Debug, Clone, Serialize)]
pub struct GatewayOrderRequest {
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
    pub notes: HashMap<String, String>,
}

/// Gateway-side order
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GatewayOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_order(&self, request: &GatewayOrderRequest) -> Result<GatewayOrder, GatewayError>;
}

/// Remote gateway over HTTPS with basic auth
pub struct RazorpayGateway {
    client: reqwest::Client,
    base_url: String,
    key_id: String,
    key_secret: String,
}

impl RazorpayGateway {
    pub fn new(
        base_url: impl Into<String>,
        key_id: impl Into<String>,
        key_secret: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            key_id: key_id.into(),
            key_secret: key_secret.into(),
        })
    }
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    async fn create_order(&self, request: &GatewayOrderRequest) -> Result<GatewayOrder, GatewayError> {
        let resp = self
            .client
            .post(format!("{}/v1/orders", self.base_url))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let order: GatewayOrder = resp.json().await?;
        if order.id.is_empty() {
            return Err(GatewayError::InvalidResponse("empty order id".to_string()));
        }
        Ok(order)
    }
}

/// In-process gateway that echoes the request back with a fresh reference
#[derive(Default)]
pub struct LocalGateway {
    counter: AtomicU64,
}

impl LocalGateway {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentGateway for LocalGateway {
    async fn create_order(&self, request: &GatewayOrderRequest) -> Result<GatewayOrder, GatewayError> {
        let seq = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        Ok(GatewayOrder {
            id: format!("order_local_{seq}_{}", &suffix[..12]),
            amount: request.amount,
            currency: request.currency.clone(),
        })
    }
}
