// Phone OTP Authentication Flow
//
// This crate implements the client-side login flow for phone-number OTP
// authentication: solve a human-presence challenge, ask the delivery
// provider to text a code, confirm the user-entered code, then exchange
// the verified identity with the backend for an application session.
//
// External collaborators (challenge widget, OTP delivery, backend HTTP
// service) sit behind Base* traits so every flow is testable with the
// fakes in `testing`.

pub mod bridge;
pub mod challenge;
pub mod error;
pub mod facade;
pub mod firebase;
pub mod session;
pub mod testing;
pub mod traits;
pub mod types;

pub use bridge::HttpIdentityBridge;
pub use challenge::{Challenge, ChallengeEvent, ChallengeManager, ChallengeSize};
pub use error::{AuthError, BackendError};
pub use facade::PhoneAuth;
pub use firebase::FirebaseAdapter;
pub use session::{OtpSession, SessionState, DEFAULT_CONTAINER_ID};
pub use traits::{
    BaseChallengeProvider, BaseChallengeWidget, BaseIdentityBridge, BaseOtpProvider,
    BasePendingVerification,
};
pub use types::{OtpSent, OtpVerified, VerifiedIdentity};
