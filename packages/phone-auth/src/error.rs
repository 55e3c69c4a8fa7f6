//! Error taxonomy for the OTP flow.
//!
//! Every variant carries a human-readable message; nothing is retried
//! automatically. Retry is always caller-initiated via a fresh send.

use thiserror::Error;

/// Errors surfaced by the OTP flow.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Constructing the human-presence challenge failed. Surfaced to
    /// callers as a send failure.
    #[error("Failed to set up verification challenge: {0}")]
    ChallengeSetup(String),

    /// The delivery provider rejected the send (bad number, quota,
    /// network). The cached challenge is invalidated when this occurs.
    #[error("{0}")]
    Send(String),

    /// Verify was attempted with no outstanding verification.
    #[error("Please send OTP first")]
    Sequence,

    /// The provider rejected the submitted code (wrong or expired). The
    /// pending verification is consumed; the caller must send again.
    #[error("{0}")]
    Confirm(String),

    /// The backend identity exchange or onboarding call failed. A verify
    /// that succeeds at the provider but fails at the backend surfaces
    /// this as the overall outcome.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors from the backend HTTP endpoints.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend answered with a non-2xx status.
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// The request never completed (connect, timeout, malformed body).
    #[error("Backend request failed: {0}")]
    Transport(String),
}

impl BackendError {
    /// The HTTP status code, when the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status(code) => Some(*code),
            Self::Transport(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_error_has_fixed_message() {
        assert_eq!(AuthError::Sequence.to_string(), "Please send OTP first");
    }

    #[test]
    fn backend_status_error_format() {
        let err = AuthError::from(BackendError::Status(500));
        assert_eq!(err.to_string(), "HTTP error! status: 500");
    }

    #[test]
    fn backend_status_accessor() {
        assert_eq!(BackendError::Status(400).status(), Some(400));
        assert_eq!(BackendError::Transport("refused".into()).status(), None);
    }
}
