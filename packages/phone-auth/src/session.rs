//! OTP verification state machine.
//!
//! One session owns one phone-verification attempt:
//!   Idle → Sending → AwaitingCode → Verifying → {Verified | Failed}
//!
//! At most one pending verification is live per session; starting a new
//! send discards any prior one. Operations take `&mut self`, so
//! overlapping calls on the same session are unrepresentable — use one
//! session per concurrent login flow.

use std::sync::Arc;

use tracing::{error, info};

use crate::challenge::ChallengeManager;
use crate::error::AuthError;
use crate::traits::{BaseOtpProvider, BasePendingVerification};
use crate::types::{OtpSent, VerifiedIdentity};

/// Default UI container the challenge widget mounts into.
pub const DEFAULT_CONTAINER_ID: &str = "recaptcha-container";

/// Where a verification attempt currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Sending,
    AwaitingCode,
    Verifying,
    Verified,
    Failed,
}

/// State machine for one phone-verification attempt.
pub struct OtpSession {
    provider: Arc<dyn BaseOtpProvider>,
    challenges: ChallengeManager,
    container_id: String,
    state: SessionState,
    pending: Option<Box<dyn BasePendingVerification>>,
}

impl OtpSession {
    pub fn new(provider: Arc<dyn BaseOtpProvider>, challenges: ChallengeManager) -> Self {
        Self {
            provider,
            challenges,
            container_id: DEFAULT_CONTAINER_ID.to_string(),
            state: SessionState::Idle,
            pending: None,
        }
    }

    /// Mount the challenge widget into a different UI container.
    pub fn with_container_id(mut self, container_id: impl Into<String>) -> Self {
        self.container_id = container_id.into();
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether a pending verification is awaiting a code.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Send an OTP to `phone_number`.
    ///
    /// Re-entrant: a new send always starts fresh, discarding any prior
    /// pending verification. On provider failure the cached challenge is
    /// invalidated, since a failed send usually means the challenge is
    /// expired or used up.
    pub async fn send_otp(&mut self, phone_number: &str) -> Result<OtpSent, AuthError> {
        self.pending = None;
        self.state = SessionState::Sending;

        // Full format validation belongs to the provider; only the
        // international-prefix shape is checked here.
        if phone_number.is_empty() || !phone_number.starts_with('+') {
            self.state = SessionState::Failed;
            return Err(AuthError::Send(
                "Phone number must include country code (e.g., +1234567890)".to_string(),
            ));
        }

        let challenge = match self.challenges.acquire(&self.container_id).await {
            Ok(challenge) => challenge,
            Err(e) => {
                error!("Challenge setup failed: {}", e);
                self.state = SessionState::Failed;
                return Err(e);
            }
        };

        info!("Sending OTP to {}", phone_number);
        match self.provider.send_code(phone_number, challenge).await {
            Ok(pending) => {
                let verification_id = pending.verification_id().to_string();
                self.pending = Some(pending);
                self.state = SessionState::AwaitingCode;
                info!("OTP sent successfully to {}", phone_number);
                Ok(OtpSent {
                    message: "OTP sent to your phone".to_string(),
                    verification_id,
                })
            }
            Err(e) => {
                error!("Failed to send OTP: {}", e);
                self.challenges.invalidate();
                self.state = SessionState::Failed;
                Err(AuthError::Send(e.to_string()))
            }
        }
    }

    /// Check `code` against the pending verification.
    ///
    /// Fails immediately with the sequence error when no send preceded
    /// this call, without contacting the provider. The pending handle is
    /// consumed whether or not the code is accepted; a retry always
    /// requires a fresh send.
    pub async fn confirm_code(&mut self, code: &str) -> Result<VerifiedIdentity, AuthError> {
        let pending = self.pending.take().ok_or(AuthError::Sequence)?;
        self.state = SessionState::Verifying;

        info!("Verifying OTP code");
        match pending.confirm(code).await {
            Ok(identity) => {
                self.state = SessionState::Verified;
                info!("OTP verified for {}", identity.uid);
                Ok(identity)
            }
            Err(e) => {
                error!("OTP verification failed: {}", e);
                self.state = SessionState::Failed;
                Err(AuthError::Confirm(e.to_string()))
            }
        }
    }
}
