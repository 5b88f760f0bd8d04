//! Phone challenge flow reducer.
//!
//! This reducer implements the linear phone → OTP → name machine.
//!
//! # Flow
//!
//! 1. User submits a phone number
//! 2. Provider sends an OTP and opens a challenge
//! 3. User fills the six digit slots; the last digit auto-submits
//! 4. Provider verifies the code and reports the identity
//! 5. Complete identity → navigate home; incomplete → ask for a name
//! 6. Name saved → navigate home
//!
//! # Re-entrancy
//!
//! Every submitting step carries a `busy` flag, set synchronously inside
//! the reduction before the effect is issued and cleared when the matching
//! result event arrives. The flag is the sole duplicate-submission guard
//! and is honored by every dispatch path, including digit auto-submit.

use crate::actions::AuthAction;
use crate::environment::AuthEnvironment;
use crate::guards::Route;
use crate::phone;
use crate::providers::{IdentityProvider, Navigator};
use crate::state::{ChallengeHandle, ChallengeState, Message, OtpDigits, Step};
use otpgate_core::effect::Effect;
use otpgate_core::reducer::Reducer;
use otpgate_core::{SmallVec, smallvec};
use std::sync::Arc;

/// Phone challenge flow reducer.
///
/// Handles phone-number OTP authentication and enrollment completion.
#[derive(Debug, Clone)]
pub struct ChallengeFlowReducer<P, N> {
    /// Phantom data to hold type parameters.
    _phantom: std::marker::PhantomData<(P, N)>,
}

impl<P, N> ChallengeFlowReducer<P, N> {
    /// Create a new challenge flow reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<P, N> Default for ChallengeFlowReducer<P, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, N> ChallengeFlowReducer<P, N>
where
    P: IdentityProvider + Clone + 'static,
    N: Navigator + Clone + 'static,
{
    /// Effect verifying `code` against the pending challenge.
    fn verify(
        env: &AuthEnvironment<P, N>,
        challenge: ChallengeHandle,
        code: String,
    ) -> Effect<AuthAction> {
        let provider = env.provider.clone();
        Effect::future(async move {
            match provider.verify_challenge(challenge, &code).await {
                Ok(identity) => Some(AuthAction::VerificationSucceeded { identity }),
                Err(error) => Some(AuthAction::VerificationFailed { error }),
            }
        })
    }

    /// Effect navigating to the home route.
    fn navigate_home(env: &AuthEnvironment<P, N>) -> Effect<AuthAction> {
        let navigator = env.navigator.clone();
        Effect::future(async move {
            navigator.navigate(Route::Home);
            None
        })
    }
}

impl<P, N> Reducer for ChallengeFlowReducer<P, N>
where
    P: IdentityProvider + Clone + 'static,
    N: Navigator + Clone + 'static,
{
    type State = ChallengeState;
    type Action = AuthAction;
    type Environment = AuthEnvironment<P, N>;

    #[allow(clippy::too_many_lines)] // One arm per action keeps the flow readable
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ═══════════════════════════════════════════════════════════════
            // SubmitPhone: normalize the number and request a challenge
            // ═══════════════════════════════════════════════════════════════
            AuthAction::SubmitPhone { raw } => {
                let Step::Phone { input, busy } = &mut state.step else {
                    return smallvec![Effect::None];
                };
                if *busy {
                    return smallvec![Effect::None];
                }

                // Digitless input is suppressed, not surfaced
                let Some(number) = phone::normalize(&raw, &env.config.default_country_code)
                else {
                    return smallvec![Effect::None];
                };

                *input = raw;
                *busy = true;
                state.message = None;

                let provider = env.provider.clone();
                let widget = Arc::clone(&env.widget);

                smallvec![Effect::future(async move {
                    // Widget attachment is idempotent; first caller creates it
                    let token = widget.attach();
                    match provider.request_phone_challenge(&number, &token).await {
                        Ok(challenge) => Some(AuthAction::ChallengeSent { challenge }),
                        Err(error) => Some(AuthAction::ChallengeRequestFailed { error }),
                    }
                })]
            },

            // ═══════════════════════════════════════════════════════════════
            // ChallengeSent: move to OTP entry
            // ═══════════════════════════════════════════════════════════════
            AuthAction::ChallengeSent { challenge } => {
                if matches!(state.step, Step::Phone { busy: true, .. }) {
                    state.step = Step::Otp {
                        challenge,
                        digits: OtpDigits::default(),
                        busy: false,
                        attempts: 0,
                    };
                    state.message = Some(Message::success("Code sent, check your phone"));
                } else {
                    tracing::warn!("ChallengeSent without a pending phone submission, ignoring");
                }
                smallvec![Effect::None]
            },

            AuthAction::ChallengeRequestFailed { error } => {
                if let Step::Phone { busy, .. } = &mut state.step {
                    *busy = false;
                    tracing::warn!(%error, "Challenge request failed");
                    state.message = Some(Message::error(error.to_string()));
                } else {
                    tracing::warn!(%error, "Stale challenge failure, ignoring");
                }
                smallvec![Effect::None]
            },

            // ═══════════════════════════════════════════════════════════════
            // OTP digit editing: filling the last slot auto-submits
            // ═══════════════════════════════════════════════════════════════
            AuthAction::EnterDigit { ch } => {
                let Step::Otp {
                    challenge,
                    digits,
                    busy,
                    ..
                } = &mut state.step
                else {
                    return smallvec![Effect::None];
                };
                if *busy {
                    return smallvec![Effect::None];
                }

                digits.enter(ch);
                if let Some(code) = digits.code() {
                    *busy = true;
                    let challenge = *challenge;
                    state.message = None;
                    return smallvec![Self::verify(env, challenge, code)];
                }
                smallvec![Effect::None]
            },

            AuthAction::Backspace => {
                if let Step::Otp {
                    digits, busy: false, ..
                } = &mut state.step
                {
                    digits.backspace();
                }
                smallvec![Effect::None]
            },

            AuthAction::PasteDigits { text } => {
                let Step::Otp {
                    challenge,
                    digits,
                    busy,
                    ..
                } = &mut state.step
                else {
                    return smallvec![Effect::None];
                };
                if *busy {
                    return smallvec![Effect::None];
                }

                digits.paste(&text);
                if let Some(code) = digits.code() {
                    *busy = true;
                    let challenge = *challenge;
                    state.message = None;
                    return smallvec![Self::verify(env, challenge, code)];
                }
                smallvec![Effect::None]
            },

            AuthAction::SubmitOtp => {
                let Step::Otp {
                    challenge,
                    digits,
                    busy,
                    ..
                } = &mut state.step
                else {
                    return smallvec![Effect::None];
                };
                if *busy {
                    return smallvec![Effect::None];
                }

                // Only a complete code can be submitted
                let Some(code) = digits.code() else {
                    return smallvec![Effect::None];
                };

                *busy = true;
                let challenge = *challenge;
                state.message = None;
                smallvec![Self::verify(env, challenge, code)]
            },

            // ═══════════════════════════════════════════════════════════════
            // Verification results
            // ═══════════════════════════════════════════════════════════════
            AuthAction::VerificationSucceeded { identity } => {
                if !matches!(state.step, Step::Otp { busy: true, .. }) {
                    tracing::warn!("Stale verification success, ignoring");
                    return smallvec![Effect::None];
                }

                if identity.is_complete() {
                    state.step = Step::default();
                    state.message = Some(Message::success("Signed in"));
                    smallvec![Self::navigate_home(env)]
                } else {
                    // Enrollment is unfinished: ask for a display name
                    state.step = Step::Name {
                        identity,
                        input: String::new(),
                        busy: false,
                    };
                    state.message = None;
                    smallvec![Effect::None]
                }
            },

            AuthAction::VerificationFailed { error } => {
                let Step::Otp {
                    digits,
                    busy,
                    attempts,
                    ..
                } = &mut state.step
                else {
                    tracing::warn!(%error, "Stale verification failure, ignoring");
                    return smallvec![Effect::None];
                };

                *busy = false;
                digits.clear();
                *attempts += 1;
                tracing::warn!(%error, attempts = *attempts, "OTP verification failed");

                if *attempts >= env.config.max_verify_attempts {
                    // Challenge exhausted: back to phone entry
                    state.step = Step::default();
                    state.message =
                        Some(Message::error("Too many failed attempts, request a new code"));
                } else {
                    state.message = Some(Message::error(error.to_string()));
                }
                smallvec![Effect::None]
            },

            // ═══════════════════════════════════════════════════════════════
            // SubmitName: complete enrollment
            // ═══════════════════════════════════════════════════════════════
            AuthAction::SubmitName { raw } => {
                let Step::Name {
                    identity,
                    input,
                    busy,
                } = &mut state.step
                else {
                    return smallvec![Effect::None];
                };
                if *busy {
                    return smallvec![Effect::None];
                }

                let name = raw.trim().to_string();
                if name.is_empty() {
                    return smallvec![Effect::None];
                }

                *busy = true;
                let identity = identity.clone();
                *input = raw;
                state.message = None;

                let provider = env.provider.clone();
                smallvec![Effect::future(async move {
                    match provider.update_display_name(&identity, &name).await {
                        Ok(identity) => Some(AuthAction::ProfileUpdated { identity }),
                        Err(error) => Some(AuthAction::ProfileUpdateFailed { error }),
                    }
                })]
            },

            AuthAction::ProfileUpdated { identity: _ } => {
                if !matches!(state.step, Step::Name { busy: true, .. }) {
                    tracing::warn!("Stale profile update, ignoring");
                    return smallvec![Effect::None];
                }
                state.step = Step::default();
                state.message = Some(Message::success("Signed in"));
                smallvec![Self::navigate_home(env)]
            },

            AuthAction::ProfileUpdateFailed { error } => {
                if let Step::Name { busy, .. } = &mut state.step {
                    *busy = false;
                    tracing::warn!(%error, "Display name update failed");
                    state.message = Some(Message::error(error.to_string()));
                } else {
                    tracing::warn!(%error, "Stale profile failure, ignoring");
                }
                smallvec![Effect::None]
            },

            // ═══════════════════════════════════════════════════════════════
            // Sign-out failure: session state stays, the user sees the error
            // ═══════════════════════════════════════════════════════════════
            AuthAction::SignOutFailed { error } => {
                state.message = Some(Message::error(error.to_string()));
                smallvec![Effect::None]
            },

            // Remaining session actions are not handled by this reducer
            _ => smallvec![Effect::None],
        }
    }
}
