//! HTTP client for the backend identity endpoints.
//!
//! The bridge exchanges a provider-verified identity for an application
//! session and submits onboarding data. Response bodies are forwarded
//! verbatim; any non-2xx status is an error carrying the status code.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, error};

use crate::error::BackendError;
use crate::traits::BaseIdentityBridge;
use crate::types::VerifiedIdentity;

/// reqwest-backed identity bridge.
///
/// The client keeps a cookie store so backend session cookies set during
/// the identity exchange ride along on subsequent calls (onboarding).
#[derive(Debug, Clone)]
pub struct HttpIdentityBridge {
    client: Client,
    base_url: String,
}

impl HttpIdentityBridge {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .expect("reqwest client should build with default TLS");

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, BackendError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self.client.post(&url).json(body).send().await.map_err(|e| {
            error!("Backend call to {} failed: {}", path, e);
            BackendError::Transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("Backend returned {} for {}", status, path);
            return Err(BackendError::Status(status.as_u16()));
        }

        let data = response
            .json::<Value>()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        debug!("Backend response from {}: {}", path, data);
        Ok(data)
    }
}

#[async_trait]
impl BaseIdentityBridge for HttpIdentityBridge {
    async fn exchange_identity(
        &self,
        identity: &VerifiedIdentity,
    ) -> Result<Value, BackendError> {
        self.post_json(
            "/api/auth/firebase-verify",
            &json!({
                "firebase_uid": identity.uid,
                "phone_number": identity.phone_number,
            }),
        )
        .await
    }

    async fn submit_onboarding(&self, user_data: Value) -> Result<Value, BackendError> {
        self.post_json("/api/auth/complete-onboarding", &user_data).await
    }
}
