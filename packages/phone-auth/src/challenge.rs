//! Human-presence challenge lifecycle.
//!
//! One cached challenge per manager, created lazily on first use and
//! rebuilt after invalidation. The manager owns the widget exclusively;
//! it is never shared across concurrent login flows.

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::AuthError;
use crate::traits::{BaseChallengeProvider, BaseChallengeWidget};

/// Rendering mode requested from the challenge provider. The flow only
/// ever mounts invisible widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeSize {
    Invisible,
}

impl ChallengeSize {
    /// Wire value the provider expects for this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Invisible => "invisible",
        }
    }
}

/// Notifications from the challenge widget. They carry no control flow;
/// the flow only logs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeEvent {
    Solved,
    Expired,
}

/// A live challenge bound to one UI container.
pub struct Challenge {
    container_id: String,
    widget: Box<dyn BaseChallengeWidget>,
}

// The widget handle is an opaque capability object.
impl std::fmt::Debug for Challenge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Challenge")
            .field("container_id", &self.container_id)
            .finish_non_exhaustive()
    }
}

impl Challenge {
    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    /// Solved-challenge token for the delivery provider.
    pub async fn token(&self) -> anyhow::Result<String> {
        self.widget.token().await
    }

    /// Record a solved/expired notification from the widget.
    pub fn note_event(&self, event: ChallengeEvent) {
        match event {
            ChallengeEvent::Solved => debug!("Challenge solved in #{}", self.container_id),
            ChallengeEvent::Expired => info!("Challenge expired in #{}", self.container_id),
        }
    }
}

/// Owns the single cached challenge for one login flow.
pub struct ChallengeManager {
    provider: Arc<dyn BaseChallengeProvider>,
    current: Option<Challenge>,
}

impl ChallengeManager {
    pub fn new(provider: Arc<dyn BaseChallengeProvider>) -> Self {
        Self {
            provider,
            current: None,
        }
    }

    /// Return the cached challenge, constructing one if none is live.
    /// Construction failures propagate to the caller as-is.
    pub async fn acquire(&mut self, container_id: &str) -> Result<&Challenge, AuthError> {
        if self.current.is_none() {
            let widget = self
                .provider
                .create_widget(container_id, ChallengeSize::Invisible)
                .await
                .map_err(|e| AuthError::ChallengeSetup(e.to_string()))?;

            debug!("Created challenge widget in #{}", container_id);
            self.current = Some(Challenge {
                container_id: container_id.to_string(),
                widget,
            });
        }

        Ok(self.current.as_ref().expect("challenge populated above"))
    }

    /// Release the provider resource and clear the cache. The next
    /// `acquire` builds a fresh challenge.
    pub fn invalidate(&mut self) {
        if let Some(challenge) = self.current.take() {
            challenge.widget.clear();
            info!("Challenge invalidated for #{}", challenge.container_id);
        }
    }

    /// Whether a challenge is currently cached.
    pub fn has_challenge(&self) -> bool {
        self.current.is_some()
    }
}
