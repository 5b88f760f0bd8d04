//! Authentication actions.
//!
//! This module defines all possible actions in the authentication flow.
//! Actions are either commands (user intent) or events (results of effects
//! and provider notifications).

use crate::error::AuthError;
use crate::state::{ChallengeHandle, Identity};

/// All actions processed by the auth reducers.
///
/// Commands originate from the UI layer; events are produced by effects
/// (provider call results) and by the session subscription.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    // ═══════════════════════════════════════════════════════════════
    // Commands
    // ═══════════════════════════════════════════════════════════════
    /// Submit the phone number and request an OTP challenge.
    SubmitPhone {
        /// Raw user input, normalized before the provider call.
        raw: String,
    },

    /// Type one character into the focused OTP slot.
    EnterDigit {
        /// The typed character; non-digits are ignored.
        ch: char,
    },

    /// Backspace in the OTP input.
    Backspace,

    /// Paste text into the OTP input.
    PasteDigits {
        /// Pasted text; digits are extracted and truncated to fit.
        text: String,
    },

    /// Explicitly submit the OTP code for verification.
    SubmitOtp,

    /// Submit the display name to complete enrollment.
    SubmitName {
        /// Raw user input, trimmed before the provider call.
        raw: String,
    },

    /// Sign out of the current session.
    SignOut,

    // ═══════════════════════════════════════════════════════════════
    // Events
    // ═══════════════════════════════════════════════════════════════
    /// An OTP challenge was issued for the submitted number.
    ChallengeSent {
        /// Handle to verify against.
        challenge: ChallengeHandle,
    },

    /// The challenge request failed.
    ChallengeRequestFailed {
        /// Provider error.
        error: AuthError,
    },

    /// The OTP code was verified.
    VerificationSucceeded {
        /// Identity reported by the provider.
        identity: Identity,
    },

    /// The OTP code was rejected.
    VerificationFailed {
        /// Provider error.
        error: AuthError,
    },

    /// The display name was saved.
    ProfileUpdated {
        /// Updated identity.
        identity: Identity,
    },

    /// The display name update failed.
    ProfileUpdateFailed {
        /// Provider error.
        error: AuthError,
    },

    /// Provider sign-out completed.
    SignedOut,

    /// Provider sign-out failed.
    SignOutFailed {
        /// Provider error.
        error: AuthError,
    },

    /// The provider reported a session change.
    SessionChanged {
        /// Current identity, `None` when signed out.
        identity: Option<Identity>,
    },

    /// No session notification arrived within the bootstrap timeout.
    SessionBootstrapTimedOut,
}
