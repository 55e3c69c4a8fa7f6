// https://firebase.google.com/docs/reference/rest/auth#section-send-verification-code

pub mod models;
use reqwest::Client;
use serde_json::json;

use crate::models::{SendCodeResponse, SignInResponse};

const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";

#[derive(Debug, Clone)]
pub struct FirebaseOptions {
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct FirebaseService {
    options: FirebaseOptions,
}

impl FirebaseService {
    pub fn new(options: FirebaseOptions) -> Self {
        Self { options }
    }

    /// Ask Firebase to text a verification code to `phone_number`.
    ///
    /// `challenge_token` is the solved reCAPTCHA token gating the send.
    /// The returned `session_info` identifies the outstanding code and is
    /// required to complete sign-in.
    pub async fn send_verification_code(
        &self,
        phone_number: &str,
        challenge_token: &str,
    ) -> Result<SendCodeResponse, &'static str> {
        let url = format!(
            "{base}/accounts:sendVerificationCode?key={key}",
            base = IDENTITY_TOOLKIT_URL,
            key = self.options.api_key
        );

        let body = json!({
            "phoneNumber": phone_number,
            "recaptchaToken": challenge_token,
        });

        let client = Client::new();
        let res = client.post(url).json(&body).send().await;

        match res {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() {
                    // Log the error response from Firebase
                    let error_body = response.text().await.unwrap_or_default();
                    eprintln!("Firebase error ({}): {}", status, error_body);
                    return Err("Firebase returned an error");
                }

                let result = response.json::<SendCodeResponse>().await;
                match result {
                    Ok(data) => Ok(data),
                    Err(e) => {
                        eprintln!("Failed to parse Firebase response: {}", e);
                        Err("Error parsing send code response")
                    }
                }
            }
            Err(e) => {
                eprintln!("Request to Firebase failed: {}", e);
                Err("Error sending verification code")
            }
        }
    }

    /// Exchange an outstanding `session_info` plus the user-entered code
    /// for a signed-in Firebase user. One attempt per `session_info`.
    pub async fn sign_in_with_phone_number(
        &self,
        session_info: &str,
        code: &str,
    ) -> Result<SignInResponse, &'static str> {
        let url = format!(
            "{base}/accounts:signInWithPhoneNumber?key={key}",
            base = IDENTITY_TOOLKIT_URL,
            key = self.options.api_key
        );

        let body = json!({
            "sessionInfo": session_info,
            "code": code,
        });

        let client = Client::new();
        let res = client.post(url).json(&body).send().await;

        match res {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() {
                    let error_body = response.text().await.unwrap_or_default();
                    eprintln!("Firebase error ({}): {}", status, error_body);
                    return Err("Invalid or expired code");
                }

                let data = response.json::<SignInResponse>().await;
                match data {
                    Ok(result) => Ok(result),
                    Err(e) => {
                        eprintln!("Failed to parse Firebase response: {}", e);
                        Err("Error parsing sign in response")
                    }
                }
            }
            Err(e) => {
                eprintln!("Request to Firebase failed: {}", e);
                Err("Error verifying code")
            }
        }
    }
}
