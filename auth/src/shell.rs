//! Application shell.
//!
//! Wires the store, the session bridge, and the route guards into a single
//! owner. The host application holds one `AppShell`, starts it, evaluates
//! view decisions against it, and shuts it down on exit.

use crate::actions::AuthAction;
use crate::config::AuthConfig;
use crate::environment::AuthEnvironment;
use crate::guards::{GateDecision, auth_gate, guest_gate};
use crate::providers::{IdentityProvider, Navigator};
use crate::reducers::{AuthReducer, auth_reducer};
use crate::session::{SessionBridge, SessionHandle};
use crate::state::{AuthState, ChallengeState, SessionState};
use crate::widget::{WidgetAnchor, WidgetToken};
use otpgate_runtime::{EffectHandle, Store, StoreError};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// The store type used by the shell.
pub type AuthStore<P, N> = Store<AuthState, AuthAction, AuthEnvironment<P, N>, AuthReducer<P, N>>;

/// Application shell owning the auth runtime.
///
/// # Example
///
/// ```ignore
/// let shell = AppShell::new(provider, navigator, AuthConfig::default());
/// shell.start();
///
/// match shell.protected_view().await {
///     GateDecision::Render => render_home(),
///     GateDecision::Redirect(route) => redirect(route),
///     GateDecision::Placeholder => render_spinner(),
/// }
/// ```
pub struct AppShell<P, N>
where
    P: IdentityProvider + Clone + 'static,
    N: Navigator + Clone + Send + Sync + 'static,
{
    store: AuthStore<P, N>,
    bridge: SessionBridge,
    session_handle: Mutex<Option<SessionHandle>>,
}

impl<P, N> AppShell<P, N>
where
    P: IdentityProvider + Clone + 'static,
    N: Navigator + Clone + Send + Sync + 'static,
{
    /// Create a shell with a default widget anchor.
    #[must_use]
    pub fn new(provider: P, navigator: N, config: AuthConfig) -> Self {
        let widget = Arc::new(WidgetAnchor::new(|| {
            WidgetToken::new(uuid::Uuid::new_v4().to_string())
        }));
        Self::with_widget(provider, navigator, widget, config)
    }

    /// Create a shell around an existing widget anchor.
    #[must_use]
    pub fn with_widget(
        provider: P,
        navigator: N,
        widget: Arc<WidgetAnchor>,
        config: AuthConfig,
    ) -> Self {
        let environment = AuthEnvironment::new(provider, navigator, widget, config);
        let store = Store::new(AuthState::default(), auth_reducer(), environment);

        Self {
            store,
            bridge: SessionBridge::new(),
            session_handle: Mutex::new(None),
        }
    }

    /// Start the session subscription.
    ///
    /// Returns `false` when the subscription was already running.
    pub fn start(&self) -> bool {
        match self.bridge.initialize(&self.store) {
            Some(handle) => {
                self.session_handle
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .replace(handle);
                true
            },
            None => false,
        }
    }

    /// The underlying store, for sending actions and observing them.
    pub const fn store(&self) -> &AuthStore<P, N> {
        &self.store
    }

    /// Send an action through the store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after shutdown started.
    pub async fn send(&self, action: AuthAction) -> Result<EffectHandle, StoreError> {
        self.store.send(action).await
    }

    /// Current session state.
    pub async fn session(&self) -> SessionState {
        self.store.state(|s| s.session.clone()).await
    }

    /// Current challenge flow state.
    pub async fn challenge(&self) -> ChallengeState {
        self.store.state(|s| s.challenge.clone()).await
    }

    /// Gate decision for the login page.
    pub async fn login_view(&self) -> GateDecision {
        self.store.state(|s| guest_gate(&s.session)).await
    }

    /// Gate decision for protected pages.
    pub async fn protected_view(&self) -> GateDecision {
        self.store.state(|s| auth_gate(&s.session)).await
    }

    /// Sign out of the current session.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after shutdown started.
    pub async fn sign_out(&self) -> Result<EffectHandle, StoreError> {
        self.store.send(AuthAction::SignOut).await
    }

    /// Tear down the session subscription, drain the store, and release
    /// the widget.
    ///
    /// Effects that complete after this point are rejected by the store
    /// and can no longer mutate state.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if effects are still
    /// running when the timeout expires.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        if let Some(handle) = self
            .session_handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            handle.detach();
        }

        let result = self.store.shutdown(timeout).await;
        self.store.environment().widget.teardown();
        result
    }
}
