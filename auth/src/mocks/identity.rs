//! Mock identity provider for testing.

use crate::error::Result;
use crate::providers::IdentityProvider;
use crate::state::{ChallengeHandle, Identity, UserId};
use crate::widget::WidgetToken;
use futures::stream::BoxStream;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::broadcast;

#[derive(Default)]
struct Inner {
    challenge_results: VecDeque<Result<ChallengeHandle>>,
    verify_results: VecDeque<Result<Identity>>,
    profile_results: VecDeque<Result<Identity>>,
    sign_out_results: VecDeque<Result<()>>,

    challenge_requests: Vec<(String, WidgetToken)>,
    verify_requests: Vec<(ChallengeHandle, String)>,
    profile_requests: Vec<String>,
    sign_outs: usize,
}

/// Mock identity provider.
///
/// Scripted outcomes are queued per operation and consumed in order;
/// unscripted calls succeed with sensible defaults. Successful mutations
/// emit the matching session notification, like the real provider would.
#[derive(Clone)]
pub struct MockIdentityProvider {
    inner: Arc<Mutex<Inner>>,
    session_tx: broadcast::Sender<Option<Identity>>,
    subscriptions: Arc<AtomicUsize>,
}

impl MockIdentityProvider {
    /// Create a new mock identity provider.
    #[must_use]
    pub fn new() -> Self {
        let (session_tx, _) = broadcast::channel(16);
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            session_tx,
            subscriptions: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue the outcome of the next challenge request.
    pub fn script_challenge(&self, result: Result<ChallengeHandle>) {
        self.lock().challenge_results.push_back(result);
    }

    /// Queue the outcome of the next verification.
    pub fn script_verify(&self, result: Result<Identity>) {
        self.lock().verify_results.push_back(result);
    }

    /// Queue the outcome of the next profile update.
    pub fn script_profile(&self, result: Result<Identity>) {
        self.lock().profile_results.push_back(result);
    }

    /// Queue the outcome of the next sign-out.
    pub fn script_sign_out(&self, result: Result<()>) {
        self.lock().sign_out_results.push_back(result);
    }

    /// Emit a session change notification to all subscribers.
    pub fn emit_session(&self, identity: Option<Identity>) {
        let _ = self.session_tx.send(identity);
    }

    /// Number of `session_changes` subscriptions taken.
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.load(Ordering::SeqCst)
    }

    /// Recorded challenge requests (number, token).
    pub fn challenge_requests(&self) -> Vec<(String, WidgetToken)> {
        self.lock().challenge_requests.clone()
    }

    /// Recorded verification requests (challenge, code).
    pub fn verify_requests(&self) -> Vec<(ChallengeHandle, String)> {
        self.lock().verify_requests.clone()
    }

    /// Recorded display names submitted for update.
    pub fn profile_requests(&self) -> Vec<String> {
        self.lock().profile_requests.clone()
    }

    /// Number of sign-out calls made.
    pub fn sign_out_count(&self) -> usize {
        self.lock().sign_outs
    }

    fn default_identity(name: Option<&str>) -> Identity {
        Identity {
            id: UserId::new(),
            phone_number: "+15551234567".to_string(),
            display_name: name.map(str::to_string),
        }
    }
}

impl Default for MockIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityProvider for MockIdentityProvider {
    fn session_changes(&self) -> BoxStream<'static, Option<Identity>> {
        self.subscriptions.fetch_add(1, Ordering::SeqCst);
        let rx = self.session_tx.subscribe();
        Box::pin(futures::stream::unfold(rx, |mut rx| async move {
            match rx.recv().await {
                Ok(identity) => Some((identity, rx)),
                Err(_) => None,
            }
        }))
    }

    fn request_phone_challenge(
        &self,
        number: &str,
        token: &WidgetToken,
    ) -> impl Future<Output = Result<ChallengeHandle>> + Send {
        let this = self.clone();
        let number = number.to_string();
        let token = token.clone();
        async move {
            let mut inner = this.lock();
            inner.challenge_requests.push((number, token));
            inner
                .challenge_results
                .pop_front()
                .unwrap_or_else(|| Ok(ChallengeHandle::new()))
        }
    }

    fn verify_challenge(
        &self,
        challenge: ChallengeHandle,
        code: &str,
    ) -> impl Future<Output = Result<Identity>> + Send {
        let this = self.clone();
        let code = code.to_string();
        async move {
            let result = {
                let mut inner = this.lock();
                inner.verify_requests.push((challenge, code));
                inner
                    .verify_results
                    .pop_front()
                    .unwrap_or_else(|| Ok(Self::default_identity(Some("Tester"))))
            };
            if let Ok(identity) = &result {
                this.emit_session(Some(identity.clone()));
            }
            result
        }
    }

    fn update_display_name(
        &self,
        identity: &Identity,
        name: &str,
    ) -> impl Future<Output = Result<Identity>> + Send {
        let this = self.clone();
        let identity = identity.clone();
        let name = name.to_string();
        async move {
            let result = {
                let mut inner = this.lock();
                inner.profile_requests.push(name.clone());
                inner.profile_results.pop_front().unwrap_or_else(|| {
                    Ok(Identity {
                        display_name: Some(name),
                        ..identity
                    })
                })
            };
            if let Ok(updated) = &result {
                this.emit_session(Some(updated.clone()));
            }
            result
        }
    }

    fn sign_out(&self) -> impl Future<Output = Result<()>> + Send {
        let this = self.clone();
        async move {
            let result = {
                let mut inner = this.lock();
                inner.sign_outs += 1;
                inner.sign_out_results.pop_front().unwrap_or(Ok(()))
            };
            if result.is_ok() {
                this.emit_session(None);
            }
            result
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)] // Test code can use expect

    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn test_scripted_results_consumed_in_order() {
        let provider = MockIdentityProvider::new();
        provider.script_verify(Err(crate::error::AuthError::InvalidCode));

        let challenge = ChallengeHandle::new();
        let first = provider.verify_challenge(challenge, "000000").await;
        assert!(first.is_err());

        // Unscripted call falls back to a default success
        let second = provider.verify_challenge(challenge, "123456").await;
        assert!(second.is_ok());
        assert_eq!(provider.verify_requests().len(), 2);
    }

    #[tokio::test]
    async fn test_sign_out_emits_session_cleared() {
        let provider = MockIdentityProvider::new();
        let mut changes = provider.session_changes();

        provider.sign_out().await.expect("sign out");

        let notification = changes.next().await.expect("notification");
        assert!(notification.is_none());
        assert_eq!(provider.sign_out_count(), 1);
    }
}
