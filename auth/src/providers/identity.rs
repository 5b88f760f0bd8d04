//! Identity provider trait.

use crate::error::Result;
use crate::state::{ChallengeHandle, Identity};
use crate::widget::WidgetToken;
use futures::stream::BoxStream;

/// Identity provider.
///
/// This trait abstracts over the external authentication service that owns
/// challenge issuance, OTP verification, and session tokens. All calls are
/// failure-prone network operations.
///
/// # Implementation Notes
///
/// - The provider owns session lifetime; this crate only observes it
/// - `session_changes` must emit the current state promptly on subscribe
/// - No retry logic here; the flow surfaces failures to the user
pub trait IdentityProvider: Send + Sync {
    /// Subscribe to session change notifications.
    ///
    /// Emits the current identity (or `None` when signed out) on every
    /// session change, starting with the state known at subscription time.
    fn session_changes(&self) -> BoxStream<'static, Option<Identity>>;

    /// Send an OTP to `number` and open a challenge.
    ///
    /// # Arguments
    ///
    /// - `number`: Canonical dialable phone number (`+` plus digits)
    /// - `token`: Anti-automation token from the attached widget
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The number is rejected → `AuthError::InvalidNumber`
    /// - The quota is exhausted → `AuthError::QuotaExceeded`
    /// - The request fails → `AuthError::Network`
    fn request_phone_challenge(
        &self,
        number: &str,
        token: &WidgetToken,
    ) -> impl std::future::Future<Output = Result<ChallengeHandle>> + Send;

    /// Verify an OTP code against a pending challenge.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The code does not match → `AuthError::InvalidCode`
    /// - The challenge expired → `AuthError::ChallengeExpired`
    /// - The request fails → `AuthError::Network`
    fn verify_challenge(
        &self,
        challenge: ChallengeHandle,
        code: &str,
    ) -> impl std::future::Future<Output = Result<Identity>> + Send;

    /// Set the display name on a verified identity.
    ///
    /// # Errors
    ///
    /// Returns error if the session is no longer valid or the request
    /// fails.
    fn update_display_name(
        &self,
        identity: &Identity,
        name: &str,
    ) -> impl std::future::Future<Output = Result<Identity>> + Send;

    /// Terminate the current session.
    ///
    /// On success the provider emits a `None` session change.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails; the local session state is left
    /// untouched in that case.
    fn sign_out(&self) -> impl std::future::Future<Output = Result<()>> + Send;
}
