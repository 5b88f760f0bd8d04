//! Mock navigator for testing.

use crate::guards::Route;
use crate::providers::Navigator;
use std::sync::{Arc, Mutex, PoisonError};

/// Mock navigator.
///
/// Records every navigation for assertions.
#[derive(Debug, Clone, Default)]
pub struct MockNavigator {
    routes: Arc<Mutex<Vec<Route>>>,
}

impl MockNavigator {
    /// Create a new mock navigator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes navigated to, in order.
    pub fn visited(&self) -> Vec<Route> {
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent navigation, if any.
    pub fn last(&self) -> Option<Route> {
        self.visited().last().copied()
    }
}

impl Navigator for MockNavigator {
    fn navigate(&self, route: Route) {
        tracing::debug!(?route, "Mock navigation");
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(route);
    }
}
