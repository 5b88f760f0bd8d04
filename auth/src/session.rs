//! Session subscription bridge.
//!
//! Connects the identity provider's session notification stream to the
//! auth store. One subscription per process: the bridge guards attachment
//! with an atomic flag, and the returned handle re-arms the guard when the
//! subscription is torn down.

use crate::actions::AuthAction;
use crate::environment::AuthEnvironment;
use crate::providers::{IdentityProvider, Navigator};
use crate::state::AuthState;
use futures::StreamExt;
use otpgate_core::reducer::Reducer;
use otpgate_runtime::Store;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::task::JoinHandle;

/// Handle to a running session subscription.
///
/// Dropping or [`detach`](Self::detach)-ing the handle aborts the
/// subscription task and allows a later `initialize` to attach again.
#[derive(Debug)]
pub struct SessionHandle {
    task: Option<JoinHandle<()>>,
    attached: Arc<AtomicBool>,
}

impl SessionHandle {
    /// Stop the subscription and re-arm the bridge.
    pub fn detach(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            self.attached.store(false, Ordering::Release);
            tracing::debug!("Session subscription detached");
        }
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Process-level bridge between provider notifications and the store.
#[derive(Debug, Default)]
pub struct SessionBridge {
    attached: Arc<AtomicBool>,
}

impl SessionBridge {
    /// Create a detached bridge.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a subscription is currently running.
    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::Acquire)
    }

    /// Subscribe to the provider's session changes and pump them into the
    /// store as [`AuthAction::SessionChanged`] actions.
    ///
    /// If no notification arrives within the configured bootstrap timeout,
    /// [`AuthAction::SessionBootstrapTimedOut`] is sent so the gates stop
    /// reporting a loading session; the subscription stays alive for late
    /// notifications.
    ///
    /// Idempotent: returns `None` when a subscription is already attached.
    pub fn initialize<P, N, R>(
        &self,
        store: &Store<AuthState, AuthAction, AuthEnvironment<P, N>, R>,
    ) -> Option<SessionHandle>
    where
        P: IdentityProvider + Clone + 'static,
        N: Navigator + Clone + Send + Sync + 'static,
        R: Reducer<State = AuthState, Action = AuthAction, Environment = AuthEnvironment<P, N>>
            + Clone
            + Send
            + Sync
            + 'static,
    {
        if self
            .attached
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!("Session subscription already attached, ignoring");
            return None;
        }

        let bootstrap_timeout = store.environment().config.bootstrap_timeout;
        let mut stream = store.environment().provider.session_changes();
        let store = store.clone();

        let task = tokio::spawn(async move {
            tracing::debug!("Session subscription attached");

            match tokio::time::timeout(bootstrap_timeout, stream.next()).await {
                Ok(Some(identity)) => {
                    let _ = store.send(AuthAction::SessionChanged { identity }).await;
                },
                Ok(None) => {
                    tracing::warn!("Session stream ended before first notification");
                    let _ = store.send(AuthAction::SessionBootstrapTimedOut).await;
                    return;
                },
                Err(_) => {
                    let _ = store.send(AuthAction::SessionBootstrapTimedOut).await;
                },
            }

            while let Some(identity) = stream.next().await {
                if store
                    .send(AuthAction::SessionChanged { identity })
                    .await
                    .is_err()
                {
                    // Store is shutting down
                    break;
                }
            }
        });

        Some(SessionHandle {
            task: Some(task),
            attached: Arc::clone(&self.attached),
        })
    }
}
