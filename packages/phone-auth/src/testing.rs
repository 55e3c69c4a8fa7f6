// Mock implementations for testing
//
// Provides in-memory providers that can be injected into PhoneAuth or
// OtpSession. Every mock records its calls so tests can assert both
// outcomes and the absence of provider contact.

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::challenge::{Challenge, ChallengeEvent, ChallengeSize};
use crate::error::BackendError;
use crate::traits::{
    BaseChallengeProvider, BaseChallengeWidget, BaseIdentityBridge, BaseOtpProvider,
    BasePendingVerification,
};
use crate::types::VerifiedIdentity;

// =============================================================================
// Mock Challenge Provider
// =============================================================================

pub struct MockChallengeProvider {
    create_calls: Arc<Mutex<Vec<String>>>,
    requested_sizes: Arc<Mutex<Vec<ChallengeSize>>>,
    cleared: Arc<Mutex<usize>>,
    failure: Arc<Mutex<Option<String>>>,
}

impl MockChallengeProvider {
    pub fn new() -> Self {
        Self {
            create_calls: Arc::new(Mutex::new(Vec::new())),
            requested_sizes: Arc::new(Mutex::new(Vec::new())),
            cleared: Arc::new(Mutex::new(0)),
            failure: Arc::new(Mutex::new(None)),
        }
    }

    /// Make every widget construction fail with the given message.
    pub fn with_failure(self, message: &str) -> Self {
        *self.failure.lock().unwrap() = Some(message.to_string());
        self
    }

    /// Container ids passed to create_widget, in order.
    pub fn create_calls(&self) -> Vec<String> {
        self.create_calls.lock().unwrap().clone()
    }

    /// Sizes passed to create_widget, in order.
    pub fn requested_sizes(&self) -> Vec<ChallengeSize> {
        self.requested_sizes.lock().unwrap().clone()
    }

    /// How many widgets were constructed.
    pub fn created_count(&self) -> usize {
        self.create_calls.lock().unwrap().len()
    }

    /// How many widgets were cleared.
    pub fn cleared_count(&self) -> usize {
        *self.cleared.lock().unwrap()
    }
}

impl Default for MockChallengeProvider {
    fn default() -> Self {
        Self::new()
    }
}

struct MockChallengeWidget {
    token: String,
    cleared: Arc<Mutex<usize>>,
}

#[async_trait]
impl BaseChallengeWidget for MockChallengeWidget {
    async fn token(&self) -> Result<String> {
        Ok(self.token.clone())
    }

    fn clear(&self) {
        *self.cleared.lock().unwrap() += 1;
    }
}

#[async_trait]
impl BaseChallengeProvider for MockChallengeProvider {
    async fn create_widget(
        &self,
        container_id: &str,
        size: ChallengeSize,
    ) -> Result<Box<dyn BaseChallengeWidget>> {
        self.create_calls
            .lock()
            .unwrap()
            .push(container_id.to_string());
        self.requested_sizes.lock().unwrap().push(size);

        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(anyhow!(message));
        }

        Ok(Box::new(MockChallengeWidget {
            token: format!("mock-challenge-token-{}", Uuid::new_v4()),
            cleared: self.cleared.clone(),
        }))
    }
}

// =============================================================================
// Mock OTP Provider
// =============================================================================

pub struct MockOtpProvider {
    accept_code: String,
    send_errors: Arc<Mutex<Vec<String>>>,
    send_calls: Arc<Mutex<Vec<String>>>,
    confirm_calls: Arc<Mutex<Vec<String>>>,
}

impl MockOtpProvider {
    /// Accepts code "123456" by default.
    pub fn new() -> Self {
        Self {
            accept_code: "123456".to_string(),
            send_errors: Arc::new(Mutex::new(Vec::new())),
            send_calls: Arc::new(Mutex::new(Vec::new())),
            confirm_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Change which code the provider accepts.
    pub fn with_accepted_code(mut self, code: &str) -> Self {
        self.accept_code = code.to_string();
        self
    }

    /// Queue a send failure; each queued error fails one send.
    pub fn with_send_error(self, message: &str) -> Self {
        self.send_errors.lock().unwrap().push(message.to_string());
        self
    }

    /// Phone numbers passed to send_code, in order.
    pub fn send_calls(&self) -> Vec<String> {
        self.send_calls.lock().unwrap().clone()
    }

    /// Codes passed to confirm across all issued handles, in order.
    pub fn confirm_calls(&self) -> Vec<String> {
        self.confirm_calls.lock().unwrap().clone()
    }
}

impl Default for MockOtpProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseOtpProvider for MockOtpProvider {
    async fn send_code(
        &self,
        phone_number: &str,
        challenge: &Challenge,
    ) -> Result<Box<dyn BasePendingVerification>> {
        // A live challenge must be able to produce a token; a produced
        // token means the widget was solved.
        let _token = challenge.token().await?;
        challenge.note_event(ChallengeEvent::Solved);

        self.send_calls.lock().unwrap().push(phone_number.to_string());

        let mut errors = self.send_errors.lock().unwrap();
        if !errors.is_empty() {
            return Err(anyhow!(errors.remove(0)));
        }

        Ok(Box::new(MockPendingVerification {
            verification_id: Uuid::new_v4().to_string(),
            phone_number: phone_number.to_string(),
            accept_code: self.accept_code.clone(),
            confirm_calls: self.confirm_calls.clone(),
        }))
    }
}

struct MockPendingVerification {
    verification_id: String,
    phone_number: String,
    accept_code: String,
    confirm_calls: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl BasePendingVerification for MockPendingVerification {
    fn verification_id(&self) -> &str {
        &self.verification_id
    }

    async fn confirm(self: Box<Self>, code: &str) -> Result<VerifiedIdentity> {
        self.confirm_calls.lock().unwrap().push(code.to_string());

        if code == self.accept_code {
            Ok(VerifiedIdentity {
                uid: format!("mock-user-{}", self.verification_id),
                phone_number: self.phone_number,
            })
        } else {
            Err(anyhow!("Invalid verification code"))
        }
    }
}

// =============================================================================
// Mock Identity Bridge
// =============================================================================

pub struct MockIdentityBridge {
    exchange_response: Arc<Mutex<Value>>,
    exchange_status: Arc<Mutex<Option<u16>>>,
    exchange_calls: Arc<Mutex<Vec<VerifiedIdentity>>>,
    onboarding_response: Arc<Mutex<Value>>,
    onboarding_status: Arc<Mutex<Option<u16>>>,
    onboarding_calls: Arc<Mutex<Vec<Value>>>,
}

impl MockIdentityBridge {
    pub fn new() -> Self {
        Self {
            exchange_response: Arc::new(Mutex::new(json!({"status": "ok"}))),
            exchange_status: Arc::new(Mutex::new(None)),
            exchange_calls: Arc::new(Mutex::new(Vec::new())),
            onboarding_response: Arc::new(Mutex::new(json!({"status": "onboarded"}))),
            onboarding_status: Arc::new(Mutex::new(None)),
            onboarding_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_exchange_response(self, response: Value) -> Self {
        *self.exchange_response.lock().unwrap() = response;
        self
    }

    /// Make every identity exchange fail with this HTTP status.
    pub fn with_exchange_status(self, status: u16) -> Self {
        *self.exchange_status.lock().unwrap() = Some(status);
        self
    }

    pub fn with_onboarding_response(self, response: Value) -> Self {
        *self.onboarding_response.lock().unwrap() = response;
        self
    }

    /// Make every onboarding submission fail with this HTTP status.
    pub fn with_onboarding_status(self, status: u16) -> Self {
        *self.onboarding_status.lock().unwrap() = Some(status);
        self
    }

    /// Identities passed to exchange_identity, in order.
    pub fn exchange_calls(&self) -> Vec<VerifiedIdentity> {
        self.exchange_calls.lock().unwrap().clone()
    }

    /// Payloads passed to submit_onboarding, in order.
    pub fn onboarding_calls(&self) -> Vec<Value> {
        self.onboarding_calls.lock().unwrap().clone()
    }
}

impl Default for MockIdentityBridge {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseIdentityBridge for MockIdentityBridge {
    async fn exchange_identity(
        &self,
        identity: &VerifiedIdentity,
    ) -> Result<Value, BackendError> {
        self.exchange_calls.lock().unwrap().push(identity.clone());

        if let Some(status) = *self.exchange_status.lock().unwrap() {
            return Err(BackendError::Status(status));
        }

        Ok(self.exchange_response.lock().unwrap().clone())
    }

    async fn submit_onboarding(&self, user_data: Value) -> Result<Value, BackendError> {
        self.onboarding_calls.lock().unwrap().push(user_data);

        if let Some(status) = *self.onboarding_status.lock().unwrap() {
            return Err(BackendError::Status(status));
        }

        Ok(self.onboarding_response.lock().unwrap().clone())
    }
}
