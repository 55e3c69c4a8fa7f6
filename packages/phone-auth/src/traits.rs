// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no flow logic. The state
// machine and challenge lifecycle live in session.rs / challenge.rs and
// use these traits so every external collaborator can be faked.
//
// Naming convention: Base* for trait names (e.g., BaseOtpProvider)

use anyhow::Result;
use async_trait::async_trait;

use crate::challenge::{Challenge, ChallengeSize};
use crate::error::BackendError;
use crate::types::VerifiedIdentity;

// =============================================================================
// Challenge Provider Trait (Infrastructure - human-presence widget)
// =============================================================================

/// Handle to a live challenge widget owned by the provider.
#[async_trait]
pub trait BaseChallengeWidget: Send + Sync {
    /// Produce the solved-challenge token gating an OTP send.
    async fn token(&self) -> Result<String>;

    /// Release the provider-side resource.
    fn clear(&self);
}

#[async_trait]
pub trait BaseChallengeProvider: Send + Sync {
    /// Construct a challenge widget bound to a UI container.
    async fn create_widget(
        &self,
        container_id: &str,
        size: ChallengeSize,
    ) -> Result<Box<dyn BaseChallengeWidget>>;
}

// =============================================================================
// OTP Provider Trait (Infrastructure - code delivery and confirmation)
// =============================================================================

/// One outstanding server-side code challenge.
///
/// Single use: `confirm` consumes the handle whether or not the code is
/// accepted, so a retry always requires a fresh send.
#[async_trait]
pub trait BasePendingVerification: Send + Sync {
    /// Identifier of the outstanding verification.
    fn verification_id(&self) -> &str;

    /// Check `code` against the outstanding verification.
    async fn confirm(self: Box<Self>, code: &str) -> Result<VerifiedIdentity>;
}

#[async_trait]
pub trait BaseOtpProvider: Send + Sync {
    /// Send a code to `phone_number`, gated by a live challenge.
    async fn send_code(
        &self,
        phone_number: &str,
        challenge: &Challenge,
    ) -> Result<Box<dyn BasePendingVerification>>;
}

// =============================================================================
// Identity Bridge Trait (Infrastructure - backend session endpoints)
// =============================================================================

#[async_trait]
pub trait BaseIdentityBridge: Send + Sync {
    /// Exchange a provider-verified identity for an application session.
    /// The response body is forwarded verbatim.
    async fn exchange_identity(
        &self,
        identity: &VerifiedIdentity,
    ) -> Result<serde_json::Value, BackendError>;

    /// Submit onboarding data for a new user. Independent of the
    /// verification state machine.
    async fn submit_onboarding(
        &self,
        user_data: serde_json::Value,
    ) -> Result<serde_json::Value, BackendError>;
}
