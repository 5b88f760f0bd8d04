//! Authentication reducers.
//!
//! The flow is split into two reducers combined over [`AuthState`]:
//!
//! - [`SessionReducer`] applies provider session notifications and handles
//!   sign-out
//! - [`ChallengeFlowReducer`] drives the phone → OTP → name machine

pub mod challenge;
pub mod session;

pub use challenge::ChallengeFlowReducer;
pub use session::SessionReducer;

use crate::actions::AuthAction;
use crate::environment::AuthEnvironment;
use crate::providers::{IdentityProvider, Navigator};
use crate::state::AuthState;
use otpgate_core::composition::{CombinedReducer, combine_reducers, scope_reducer};

/// The combined reducer over the full [`AuthState`].
pub type AuthReducer<P, N> = CombinedReducer<AuthState, AuthAction, AuthEnvironment<P, N>>;

/// Build the combined auth reducer.
///
/// Scopes [`SessionReducer`] onto the session slice and
/// [`ChallengeFlowReducer`] onto the challenge slice; both see every
/// action and ignore the ones that are not theirs.
#[must_use]
pub fn auth_reducer<P, N>() -> AuthReducer<P, N>
where
    P: IdentityProvider + Clone + 'static,
    N: Navigator + Clone + 'static,
{
    combine_reducers(vec![
        Box::new(scope_reducer(
            SessionReducer::new(),
            |state: &AuthState| &state.session,
            |state: &mut AuthState, session| state.session = session,
        )),
        Box::new(scope_reducer(
            ChallengeFlowReducer::new(),
            |state: &AuthState| &state.challenge,
            |state: &mut AuthState, challenge| state.challenge = challenge,
        )),
    ])
}
