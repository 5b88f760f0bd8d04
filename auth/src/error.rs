//! Error types for authentication operations.

use thiserror::Error;

/// Result type alias for authentication operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Error taxonomy for the phone-OTP flow.
///
/// Every variant is non-fatal: a failure clears the relevant busy flag,
/// surfaces an error message, and leaves the flow on its current step.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The phone number was rejected by the provider.
    #[error("Invalid phone number")]
    InvalidNumber,

    /// The provider refused to issue more challenges.
    #[error("SMS quota exceeded, try again later")]
    QuotaExceeded,

    /// A provider call failed at the transport level.
    #[error("Network error: {0}")]
    Network(String),

    /// The OTP code did not match.
    #[error("Invalid verification code")]
    InvalidCode,

    /// The challenge expired before verification.
    #[error("Verification code has expired")]
    ChallengeExpired,

    /// The provider rejected the session.
    #[error("Unauthorized")]
    Unauthorized,

    /// Provider sign-out failed.
    #[error("Sign out failed: {0}")]
    SignOutFailed(String),

    /// Subscribing to session notifications failed.
    #[error("Session subscription failed: {0}")]
    SubscriptionFailed(String),

    /// Internal error (should not be exposed to users).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Returns `true` if this error is due to invalid user input.
    ///
    /// # Examples
    ///
    /// ```
    /// # use otpgate_auth::AuthError;
    /// assert!(AuthError::InvalidCode.is_user_error());
    /// assert!(!AuthError::Network("timeout".into()).is_user_error());
    /// ```
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(self, Self::InvalidNumber | Self::InvalidCode)
    }

    /// Returns `true` if retrying the same input might succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_) | Self::QuotaExceeded)
    }
}
