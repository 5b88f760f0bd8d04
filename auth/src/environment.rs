//! Authentication environment.
//!
//! This module defines the environment type for dependency injection
//! in auth reducers.

use crate::config::AuthConfig;
use crate::providers::{IdentityProvider, Navigator};
use crate::widget::WidgetAnchor;
use std::sync::Arc;

/// Authentication environment.
///
/// Contains all external dependencies needed by the auth reducers.
///
/// # Type Parameters
///
/// - `P`: Identity provider
/// - `N`: Navigator
#[derive(Clone)]
pub struct AuthEnvironment<P, N>
where
    P: IdentityProvider + Clone,
    N: Navigator + Clone,
{
    /// Identity provider.
    pub provider: P,

    /// Navigation sink.
    pub navigator: N,

    /// Anti-automation widget anchor (one instance per process).
    pub widget: Arc<WidgetAnchor>,

    /// Flow configuration.
    pub config: AuthConfig,
}

impl<P, N> AuthEnvironment<P, N>
where
    P: IdentityProvider + Clone,
    N: Navigator + Clone,
{
    /// Create a new authentication environment.
    #[must_use]
    pub fn new(provider: P, navigator: N, widget: Arc<WidgetAnchor>, config: AuthConfig) -> Self {
        Self {
            provider,
            navigator,
            widget,
            config,
        }
    }
}
