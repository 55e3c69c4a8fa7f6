//! Firebase adapters for the provider traits.
//!
//! The `firebase` crate is a thin REST client; these wrappers map it
//! onto `BaseOtpProvider` / `BasePendingVerification` so the flow never
//! sees Firebase types. The challenge widget itself is UI-bound and
//! stays outside this crate — callers supply their own
//! `BaseChallengeProvider` for the mount point they render into.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use firebase::FirebaseService;

use crate::challenge::{Challenge, ChallengeEvent};
use crate::traits::{BaseOtpProvider, BasePendingVerification};
use crate::types::VerifiedIdentity;

/// Wrapper around FirebaseService that implements BaseOtpProvider.
pub struct FirebaseAdapter(pub Arc<FirebaseService>);

impl FirebaseAdapter {
    pub fn new(service: Arc<FirebaseService>) -> Self {
        Self(service)
    }
}

#[async_trait]
impl BaseOtpProvider for FirebaseAdapter {
    async fn send_code(
        &self,
        phone_number: &str,
        challenge: &Challenge,
    ) -> Result<Box<dyn BasePendingVerification>> {
        // A produced token means the invisible widget was solved.
        let token = challenge.token().await?;
        challenge.note_event(ChallengeEvent::Solved);

        let response = self
            .0
            .send_verification_code(phone_number, &token)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))?;

        Ok(Box::new(FirebasePending {
            service: self.0.clone(),
            session_info: response.session_info,
            phone_number: phone_number.to_string(),
        }))
    }
}

/// One outstanding Firebase phone challenge, keyed by `session_info`.
struct FirebasePending {
    service: Arc<FirebaseService>,
    session_info: String,
    phone_number: String,
}

#[async_trait]
impl BasePendingVerification for FirebasePending {
    fn verification_id(&self) -> &str {
        &self.session_info
    }

    async fn confirm(self: Box<Self>, code: &str) -> Result<VerifiedIdentity> {
        let response = self
            .service
            .sign_in_with_phone_number(&self.session_info, code)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))?;

        Ok(VerifiedIdentity {
            uid: response.local_id,
            // Firebase echoes the number back; fall back to what we sent.
            phone_number: response.phone_number.unwrap_or(self.phone_number),
        })
    }
}
