//! Integration tests for the session subscription, gates, and shutdown.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use otpgate_auth::mocks::{MockIdentityProvider, MockNavigator, test_environment};
use otpgate_auth::reducers::auth_reducer;
use otpgate_auth::{
    AppShell, AuthAction, AuthConfig, AuthError, AuthState, GateDecision, Identity, MessageKind,
    Route, SessionBridge, SessionState, UserId,
};
use otpgate_runtime::{Store, StoreError};
use std::time::Duration;

fn complete_identity() -> Identity {
    Identity {
        id: UserId::new(),
        phone_number: "+15551234567".to_string(),
        display_name: Some("Alice".to_string()),
    }
}

async fn wait_for<P, N, F>(shell: &AppShell<P, N>, pred: F) -> SessionState
where
    P: otpgate_auth::IdentityProvider + Clone + 'static,
    N: otpgate_auth::Navigator + Clone + Send + Sync + 'static,
    F: Fn(&SessionState) -> bool,
{
    for _ in 0..100 {
        let session = shell.session().await;
        if pred(&session) {
            return session;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("session never reached the expected state");
}

#[tokio::test]
async fn start_attaches_exactly_one_subscription() {
    let provider = MockIdentityProvider::new();
    let shell = AppShell::new(
        provider.clone(),
        MockNavigator::new(),
        AuthConfig::default(),
    );

    assert!(shell.start());
    assert!(!shell.start());
    assert_eq!(provider.subscription_count(), 1);
}

#[tokio::test]
async fn first_notification_ends_loading_and_flips_gates() {
    let provider = MockIdentityProvider::new();
    let shell = AppShell::new(
        provider.clone(),
        MockNavigator::new(),
        AuthConfig::default(),
    );

    assert_eq!(shell.protected_view().await, GateDecision::Placeholder);
    assert_eq!(shell.login_view().await, GateDecision::Placeholder);

    shell.start();
    provider.emit_session(Some(complete_identity()));

    let session = wait_for(&shell, |s| !s.loading).await;
    assert!(session.identity.is_some());
    assert_eq!(shell.protected_view().await, GateDecision::Render);
    assert_eq!(
        shell.login_view().await,
        GateDecision::Redirect(Route::Home)
    );
}

#[tokio::test]
async fn bootstrap_timeout_unblocks_gates_without_identity() {
    let provider = MockIdentityProvider::new();
    let config = AuthConfig::default().with_bootstrap_timeout(Duration::from_millis(50));
    let shell = AppShell::new(provider.clone(), MockNavigator::new(), config);

    shell.start();

    let session = wait_for(&shell, |s| !s.loading).await;
    assert_eq!(session.identity, None);
    assert_eq!(
        shell.protected_view().await,
        GateDecision::Redirect(Route::Login)
    );
    assert_eq!(shell.login_view().await, GateDecision::Render);

    // The subscription stays alive: a late notification still applies
    provider.emit_session(Some(complete_identity()));
    wait_for(&shell, |s| s.identity.is_some()).await;
    assert_eq!(shell.protected_view().await, GateDecision::Render);
}

#[tokio::test]
async fn sign_out_clears_the_session() {
    let provider = MockIdentityProvider::new();
    let shell = AppShell::new(
        provider.clone(),
        MockNavigator::new(),
        AuthConfig::default(),
    );

    shell.start();
    provider.emit_session(Some(complete_identity()));
    wait_for(&shell, |s| s.identity.is_some()).await;

    let mut handle = shell.sign_out().await.expect("send");
    handle.wait().await;

    // The mock emits a signed-out notification on success
    let session = wait_for(&shell, |s| s.identity.is_none()).await;
    assert!(!session.loading);
    assert_eq!(provider.sign_out_count(), 1);
    assert_eq!(
        shell.login_view().await,
        GateDecision::Render
    );
}

#[tokio::test]
async fn sign_out_failure_keeps_the_session() {
    let provider = MockIdentityProvider::new();
    let shell = AppShell::new(
        provider.clone(),
        MockNavigator::new(),
        AuthConfig::default(),
    );
    provider.script_sign_out(Err(AuthError::SignOutFailed("backend down".to_string())));

    shell.start();
    provider.emit_session(Some(complete_identity()));
    wait_for(&shell, |s| s.identity.is_some()).await;

    let mut handle = shell.sign_out().await.expect("send");
    handle.wait().await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(shell.session().await.identity.is_some());
    assert_eq!(shell.protected_view().await, GateDecision::Render);

    // The failure is visible to the user, not just logged
    let message = shell
        .challenge()
        .await
        .message
        .expect("an error message should be surfaced on sign-out failure");
    assert_eq!(message.kind, MessageKind::Error);
}

#[tokio::test]
async fn bridge_reattaches_after_detach() {
    let env = test_environment();
    let store = Store::new(AuthState::default(), auth_reducer(), env);
    let bridge = SessionBridge::new();

    let handle = bridge.initialize(&store).expect("first attach");
    assert!(bridge.is_attached());
    assert!(bridge.initialize(&store).is_none());

    handle.detach();
    assert!(!bridge.is_attached());
    assert!(bridge.initialize(&store).is_some());
}

#[tokio::test]
async fn shutdown_rejects_late_actions() {
    let shell = AppShell::new(
        MockIdentityProvider::new(),
        MockNavigator::new(),
        AuthConfig::default(),
    );
    shell.start();

    shell
        .shutdown(Duration::from_secs(1))
        .await
        .expect("shutdown");

    let result = shell.send(AuthAction::SignOut).await;
    assert!(matches!(result, Err(StoreError::ShutdownInProgress)));
}
