//! Session reducer.
//!
//! Applies provider session notifications to the process-wide session
//! state and handles sign-out. The provider owns the session; this reducer
//! only mirrors what it reports.

use crate::actions::AuthAction;
use crate::environment::AuthEnvironment;
use crate::providers::{IdentityProvider, Navigator};
use crate::state::SessionState;
use otpgate_core::effect::Effect;
use otpgate_core::reducer::Reducer;
use otpgate_core::{SmallVec, smallvec};

/// Session reducer.
///
/// Handles `SessionChanged` notifications, the bootstrap timeout, and
/// sign-out.
#[derive(Debug, Clone)]
pub struct SessionReducer<P, N> {
    /// Phantom data to hold type parameters.
    _phantom: std::marker::PhantomData<(P, N)>,
}

impl<P, N> SessionReducer<P, N> {
    /// Create a new session reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<P, N> Default for SessionReducer<P, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, N> Reducer for SessionReducer<P, N>
where
    P: IdentityProvider + Clone + 'static,
    N: Navigator + Clone + 'static,
{
    type State = SessionState;
    type Action = AuthAction;
    type Environment = AuthEnvironment<P, N>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AuthAction::SessionChanged { identity } => {
                tracing::debug!(signed_in = identity.is_some(), "Session changed");
                state.loading = false;
                state.identity = identity;
                smallvec![Effect::None]
            },

            AuthAction::SessionBootstrapTimedOut => {
                // Only meaningful before the first notification
                if state.loading {
                    tracing::warn!("No session notification before bootstrap timeout");
                    state.loading = false;
                }
                smallvec![Effect::None]
            },

            AuthAction::SignOut => {
                let provider = env.provider.clone();
                smallvec![Effect::future(async move {
                    match provider.sign_out().await {
                        Ok(()) => Some(AuthAction::SignedOut),
                        Err(error) => Some(AuthAction::SignOutFailed { error }),
                    }
                })]
            },

            AuthAction::SignedOut => {
                // Identity is cleared by the provider's session notification
                tracing::debug!("Signed out");
                smallvec![Effect::None]
            },

            AuthAction::SignOutFailed { error } => {
                // The flow reducer surfaces the error message; the session
                // is still live as far as the provider is concerned
                tracing::warn!(%error, "Sign out failed, session state unchanged");
                smallvec![Effect::None]
            },

            // Challenge flow actions are not handled by this reducer
            _ => smallvec![Effect::None],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthError;
    use crate::mocks::{MockIdentityProvider, MockNavigator, test_environment};
    use crate::state::{Identity, UserId};
    use otpgate_testing::ReducerTest;
    use otpgate_testing::reducer_test::assertions;

    type TestReducer = SessionReducer<MockIdentityProvider, MockNavigator>;

    fn identity() -> Identity {
        Identity {
            id: UserId::new(),
            phone_number: "+15551234567".to_string(),
            display_name: Some("Alice".to_string()),
        }
    }

    #[test]
    fn test_session_changed_replaces_identity_and_clears_loading() {
        ReducerTest::new(TestReducer::new())
            .with_env(test_environment())
            .given_state(SessionState::default())
            .when_action(AuthAction::SessionChanged {
                identity: Some(identity()),
            })
            .then_state(|state| {
                assert!(!state.loading);
                assert!(state.identity.is_some());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_signed_out_notification_clears_identity() {
        ReducerTest::new(TestReducer::new())
            .with_env(test_environment())
            .given_state(SessionState {
                identity: Some(identity()),
                loading: false,
            })
            .when_action(AuthAction::SessionChanged { identity: None })
            .then_state(|state| {
                assert!(state.identity.is_none());
                assert!(!state.loading);
            })
            .run();
    }

    #[test]
    fn test_bootstrap_timeout_only_affects_loading() {
        ReducerTest::new(TestReducer::new())
            .with_env(test_environment())
            .given_state(SessionState::default())
            .when_action(AuthAction::SessionBootstrapTimedOut)
            .then_state(|state| {
                assert!(!state.loading);
                assert!(state.identity.is_none());
            })
            .run();

        // After bootstrap it is a no-op
        ReducerTest::new(TestReducer::new())
            .with_env(test_environment())
            .given_state(SessionState {
                identity: Some(identity()),
                loading: false,
            })
            .when_action(AuthAction::SessionBootstrapTimedOut)
            .then_state(|state| {
                assert!(state.identity.is_some());
            })
            .run();
    }

    #[test]
    fn test_sign_out_issues_provider_call() {
        ReducerTest::new(TestReducer::new())
            .with_env(test_environment())
            .given_state(SessionState {
                identity: Some(identity()),
                loading: false,
            })
            .when_action(AuthAction::SignOut)
            .then_state(|state| {
                // State untouched until the provider notification arrives
                assert!(state.identity.is_some());
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn test_sign_out_failure_leaves_session_untouched() {
        ReducerTest::new(TestReducer::new())
            .with_env(test_environment())
            .given_state(SessionState {
                identity: Some(identity()),
                loading: false,
            })
            .when_action(AuthAction::SignOutFailed {
                error: AuthError::SignOutFailed("network down".to_string()),
            })
            .then_state(|state| {
                assert!(state.identity.is_some());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }
}
