//! Composition root: the externally visible auth object.
//!
//! `PhoneAuth` wires one `OtpSession` (which owns the challenge
//! lifecycle) to one identity bridge. Verify is an explicit two-step
//! pipeline — confirm the code with the provider, then exchange the
//! identity with the backend — and both steps must succeed.

use std::sync::Arc;

use crate::challenge::ChallengeManager;
use crate::error::AuthError;
use crate::session::OtpSession;
use crate::traits::{BaseChallengeProvider, BaseIdentityBridge, BaseOtpProvider};
use crate::types::{OtpSent, OtpVerified};

/// Phone OTP login flow: send a code, verify it, exchange the verified
/// identity for an application session.
///
/// One instance per login attempt. Nothing here is process-global;
/// concurrent flows get independent instances.
pub struct PhoneAuth {
    session: OtpSession,
    bridge: Arc<dyn BaseIdentityBridge>,
}

impl PhoneAuth {
    pub fn new(
        otp_provider: Arc<dyn BaseOtpProvider>,
        challenge_provider: Arc<dyn BaseChallengeProvider>,
        bridge: Arc<dyn BaseIdentityBridge>,
    ) -> Self {
        Self {
            session: OtpSession::new(otp_provider, ChallengeManager::new(challenge_provider)),
            bridge,
        }
    }

    /// Mount the challenge widget into a different UI container.
    pub fn with_container_id(mut self, container_id: impl Into<String>) -> Self {
        self.session = self.session.with_container_id(container_id);
        self
    }

    /// State inspection, mainly for UIs and tests.
    pub fn session(&self) -> &OtpSession {
        &self.session
    }

    /// Send an OTP to `phone_number`.
    pub async fn send_otp(&mut self, phone_number: &str) -> Result<OtpSent, AuthError> {
        self.session.send_otp(phone_number).await
    }

    /// Verify the user-entered code, then exchange the verified identity
    /// with the backend. A backend failure after a provider-confirmed
    /// code fails the whole verify; there is no partial success.
    pub async fn verify_otp(&mut self, code: &str) -> Result<OtpVerified, AuthError> {
        let firebase_user = self.session.confirm_code(code).await?;
        let backend_response = self.bridge.exchange_identity(&firebase_user).await?;

        Ok(OtpVerified {
            firebase_user,
            backend_response,
        })
    }

    /// Submit onboarding data for a new user. Callable any time after a
    /// session exists; does not touch the verification state machine.
    pub async fn complete_onboarding(
        &self,
        user_data: serde_json::Value,
    ) -> Result<serde_json::Value, AuthError> {
        Ok(self.bridge.submit_onboarding(user_data).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BackendError;
    use crate::session::SessionState;
    use crate::testing::{MockChallengeProvider, MockIdentityBridge, MockOtpProvider};
    use serde_json::json;

    fn facade(
        provider: &Arc<MockOtpProvider>,
        challenges: &Arc<MockChallengeProvider>,
        bridge: &Arc<MockIdentityBridge>,
    ) -> PhoneAuth {
        PhoneAuth::new(provider.clone(), challenges.clone(), bridge.clone())
    }

    #[tokio::test]
    async fn verify_composes_confirm_and_exchange() {
        let provider = Arc::new(MockOtpProvider::new());
        let challenges = Arc::new(MockChallengeProvider::new());
        let bridge =
            Arc::new(MockIdentityBridge::new().with_exchange_response(json!({"status": "ok"})));
        let mut auth = facade(&provider, &challenges, &bridge);

        auth.send_otp("+15551234567").await.unwrap();
        let verified = auth.verify_otp("123456").await.unwrap();

        assert_eq!(verified.firebase_user.phone_number, "+15551234567");
        assert_eq!(verified.backend_response, json!({"status": "ok"}));
        assert_eq!(bridge.exchange_calls().len(), 1);
        assert_eq!(bridge.exchange_calls()[0], verified.firebase_user);
    }

    #[tokio::test]
    async fn verify_before_send_never_reaches_the_bridge() {
        let provider = Arc::new(MockOtpProvider::new());
        let challenges = Arc::new(MockChallengeProvider::new());
        let bridge = Arc::new(MockIdentityBridge::new());
        let mut auth = facade(&provider, &challenges, &bridge);

        let err = auth.verify_otp("123456").await.unwrap_err();
        assert!(matches!(err, AuthError::Sequence));
        assert!(bridge.exchange_calls().is_empty());
    }

    #[tokio::test]
    async fn backend_failure_degrades_the_whole_verify() {
        let provider = Arc::new(MockOtpProvider::new());
        let challenges = Arc::new(MockChallengeProvider::new());
        let bridge = Arc::new(MockIdentityBridge::new().with_exchange_status(500));
        let mut auth = facade(&provider, &challenges, &bridge);

        auth.send_otp("+15551234567").await.unwrap();
        let err = auth.verify_otp("123456").await.unwrap_err();

        match err {
            AuthError::Backend(BackendError::Status(code)) => assert_eq!(code, 500),
            other => panic!("expected backend error, got {other:?}"),
        }
        // The provider did confirm the code; only the exchange failed.
        assert_eq!(provider.confirm_calls(), vec!["123456".to_string()]);
    }

    #[tokio::test]
    async fn onboarding_does_not_touch_the_state_machine() {
        let provider = Arc::new(MockOtpProvider::new());
        let challenges = Arc::new(MockChallengeProvider::new());
        let bridge = Arc::new(MockIdentityBridge::new().with_onboarding_status(400));
        let auth = facade(&provider, &challenges, &bridge);

        let err = auth
            .complete_onboarding(json!({"name": "A"}))
            .await
            .unwrap_err();

        match err {
            AuthError::Backend(BackendError::Status(code)) => assert_eq!(code, 400),
            other => panic!("expected backend error, got {other:?}"),
        }
        assert_eq!(auth.session().state(), SessionState::Idle);
        assert_eq!(bridge.onboarding_calls(), vec![json!({"name": "A"})]);
    }
}
