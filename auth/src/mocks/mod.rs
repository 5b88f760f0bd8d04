//! Mock provider implementations for testing.
//!
//! This module provides simple, in-memory implementations of the provider
//! traits for use in unit and integration tests.

pub mod identity;
pub mod navigator;

pub use identity::MockIdentityProvider;
pub use navigator::MockNavigator;

use crate::config::AuthConfig;
use crate::environment::AuthEnvironment;
use crate::widget::{WidgetAnchor, WidgetToken};
use std::sync::Arc;

/// Build a test environment with mock providers and default config.
#[must_use]
pub fn test_environment() -> AuthEnvironment<MockIdentityProvider, MockNavigator> {
    test_environment_with(AuthConfig::default())
}

/// Build a test environment with mock providers and the given config.
#[must_use]
pub fn test_environment_with(
    config: AuthConfig,
) -> AuthEnvironment<MockIdentityProvider, MockNavigator> {
    let widget = Arc::new(WidgetAnchor::new(|| {
        WidgetToken::new(uuid::Uuid::new_v4().to_string())
    }));
    AuthEnvironment::new(
        MockIdentityProvider::new(),
        MockNavigator::new(),
        widget,
        config,
    )
}
