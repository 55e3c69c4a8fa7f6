use serde::{Deserialize, Serialize};

/// Response from `accounts:sendVerificationCode`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendCodeResponse {
    /// Opaque handle for the outstanding code, consumed by sign-in.
    pub session_info: String,
}

/// Response from `accounts:signInWithPhoneNumber`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub id_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Stable Firebase user id.
    pub local_id: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub is_new_user: bool,
}
