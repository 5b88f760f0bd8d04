//! Route guards.
//!
//! Pure functions reconciling the process-wide session state with
//! navigation. The crate exposes decisions, not widgets: the UI layer maps
//! [`GateDecision`] to rendering, redirecting, or showing a placeholder.

use crate::state::SessionState;

/// Application routes the guards can redirect to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Login page (the challenge flow).
    Login,
    /// Protected home page.
    Home,
}

/// What a guard decided for the current session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Render the guarded view.
    Render,
    /// Redirect to another route.
    Redirect(Route),
    /// Session still bootstrapping; show nothing yet.
    Placeholder,
}

/// Guard for protected routes.
///
/// Renders only for a complete identity; anything else is sent back to
/// login. While the session is bootstrapping, neither renders nor
/// redirects.
#[must_use]
pub fn auth_gate(session: &SessionState) -> GateDecision {
    if session.loading {
        return GateDecision::Placeholder;
    }
    match &session.identity {
        Some(identity) if identity.is_complete() => GateDecision::Render,
        _ => GateDecision::Redirect(Route::Login),
    }
}

/// Guard for guest-only routes (the login page).
///
/// A complete identity has nothing to do on the login page and is sent
/// home; an absent or incomplete identity may proceed through the flow.
#[must_use]
pub fn guest_gate(session: &SessionState) -> GateDecision {
    if session.loading {
        return GateDecision::Placeholder;
    }
    match &session.identity {
        Some(identity) if identity.is_complete() => GateDecision::Redirect(Route::Home),
        _ => GateDecision::Render,
    }
}
