//! Authentication state types.
//!
//! This module defines the core state types for the phone-OTP flow.
//! All types are `Clone` to support the functional architecture pattern.

use crate::constants::OTP_LEN;
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════
// ID Types
// ═══════════════════════════════════════════════════════════════════════

/// Unique identifier for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub uuid::Uuid);

impl UserId {
    /// Generate a new random `UserId`.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

/// Opaque handle to a pending phone challenge.
///
/// Issued by the identity provider when an OTP is sent, and required to
/// verify the code the user enters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChallengeHandle(pub uuid::Uuid);

impl ChallengeHandle {
    /// Generate a new random `ChallengeHandle`.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for ChallengeHandle {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Identity & Session
// ═══════════════════════════════════════════════════════════════════════

/// Authenticated identity, as reported by the identity provider.
///
/// The provider owns identity records; this is a read-only cache of the
/// latest session notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Unique user identifier.
    pub id: UserId,

    /// Phone number in canonical dialable form.
    pub phone_number: String,

    /// Display name, absent until the user has completed enrollment.
    pub display_name: Option<String>,
}

impl Identity {
    /// Whether this identity has completed enrollment.
    ///
    /// An identity with an absent or blank display name is incomplete and
    /// must not pass the protected-route gate. Both gates share this
    /// predicate so they can never disagree about completeness.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.display_name
            .as_deref()
            .is_some_and(|name| !name.trim().is_empty())
    }
}

/// Process-wide session state, fed by provider notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Current identity, `None` when signed out.
    pub identity: Option<Identity>,

    /// `true` until the first provider notification (or bootstrap timeout).
    pub loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            identity: None,
            loading: true,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Challenge Flow
// ═══════════════════════════════════════════════════════════════════════

/// Ordered OTP digit slots with a focus index.
///
/// Models the segmented code input: six slots filled left to right, with
/// the focus tracking where the next digit lands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpDigits {
    slots: [Option<char>; OTP_LEN],
    focus: usize,
}

impl OtpDigits {
    /// Place a digit in the focused slot and advance focus.
    ///
    /// Non-digit characters are ignored. Returns `true` if a slot changed.
    pub fn enter(&mut self, ch: char) -> bool {
        if !ch.is_ascii_digit() || self.focus >= OTP_LEN {
            return false;
        }
        self.slots[self.focus] = Some(ch);
        self.focus = (self.focus + 1).min(OTP_LEN);
        true
    }

    /// Clear the focused slot, or move back and clear the previous one.
    ///
    /// Mirrors backspace in a segmented input: a non-empty focused slot is
    /// cleared in place; an empty one moves focus back first. A no-op when
    /// focus is at slot 0 and that slot is empty.
    pub fn backspace(&mut self) {
        let slot = self.focus.min(OTP_LEN - 1);
        if self.slots[slot].is_some() && self.focus < OTP_LEN {
            self.slots[slot] = None;
        } else if self.focus > 0 {
            self.focus -= 1;
            self.slots[self.focus] = None;
        }
    }

    /// Fill slots left to right from the digits of `text`.
    ///
    /// Non-digits are skipped and anything past the last slot is truncated.
    pub fn paste(&mut self, text: &str) {
        let digits: Vec<char> = text.chars().filter(char::is_ascii_digit).collect();
        for (slot, ch) in self.slots.iter_mut().zip(digits.iter()) {
            *slot = Some(*ch);
        }
        self.focus = self.slots.iter().position(Option::is_none).unwrap_or(OTP_LEN);
    }

    /// Reset all slots and move focus back to the first one.
    pub fn clear(&mut self) {
        self.slots = [None; OTP_LEN];
        self.focus = 0;
    }

    /// The complete code, if every slot is filled.
    #[must_use]
    pub fn code(&self) -> Option<String> {
        self.slots.iter().copied().collect::<Option<String>>()
    }

    /// Whether every slot is filled.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Index of the slot the next digit lands in.
    #[must_use]
    pub const fn focus(&self) -> usize {
        self.focus
    }
}

/// Current step of the challenge flow.
///
/// Each submitting step carries its own `busy` flag, so "busy on a step we
/// are not on" is unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    /// Phone number entry.
    Phone {
        /// Raw user input, kept as typed.
        input: String,
        /// A challenge request is in flight.
        busy: bool,
    },

    /// OTP code entry for a pending challenge.
    Otp {
        /// Handle of the challenge being verified.
        challenge: ChallengeHandle,
        /// Digit slots.
        digits: OtpDigits,
        /// A verification call is in flight.
        busy: bool,
        /// Failed verification attempts against this challenge.
        attempts: u32,
    },

    /// Display name entry for a verified but incomplete identity.
    Name {
        /// The identity being completed.
        identity: Identity,
        /// Raw user input, kept as typed.
        input: String,
        /// A profile update is in flight.
        busy: bool,
    },
}

impl Default for Step {
    fn default() -> Self {
        Self::Phone {
            input: String::new(),
            busy: false,
        }
    }
}

/// Kind of a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    /// Something went wrong.
    Error,
    /// Something succeeded.
    Success,
}

/// User-facing message shown alongside the flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message text.
    pub text: String,
    /// Error or success.
    pub kind: MessageKind,
}

impl Message {
    /// Build an error message.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Error,
        }
    }

    /// Build a success message.
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Success,
        }
    }
}

/// State of the phone → OTP → name flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeState {
    /// Current step with its per-step data.
    pub step: Step,

    /// Latest user-facing message, if any.
    pub message: Option<Message>,
}

/// Root authentication state managed by the auth store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthState {
    /// Session state fed by provider notifications.
    pub session: SessionState,

    /// Challenge flow state.
    pub challenge: ChallengeState,
}
