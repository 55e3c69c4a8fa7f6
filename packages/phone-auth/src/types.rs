//! Flow result types.
//!
//! Simple, serializable types returned by the auth operations.

use serde::{Deserialize, Serialize};

/// Result of sending an OTP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpSent {
    pub message: String,
    pub verification_id: String,
}

/// Identity produced by a successful code confirmation. Immutable;
/// produced once per verification and handed to the identity bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedIdentity {
    /// Stable user identifier from the delivery provider.
    pub uid: String,
    pub phone_number: String,
}

/// Result of a full verify: the provider-confirmed identity plus the
/// backend's session payload, forwarded verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpVerified {
    pub firebase_user: VerifiedIdentity,
    pub backend_response: serde_json::Value,
}
