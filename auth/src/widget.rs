//! Anti-automation widget anchor.
//!
//! The identity provider requires an anti-automation token with every
//! challenge request. The token source (an invisible verification widget in
//! the original UI) may only exist once per process; attaching it twice
//! breaks the provider's verification. `WidgetAnchor` makes attachment
//! idempotent and observable.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// Opaque anti-automation token passed to challenge requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetToken(String);

impl WidgetToken {
    /// Wrap a provider-issued token value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw token value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

type TokenFactory = Box<dyn Fn() -> WidgetToken + Send + Sync>;

/// Process-level anchor for the anti-automation widget.
///
/// The first [`attach`](Self::attach) invokes the factory and caches the
/// token; every later call returns the cached token without creating a
/// second widget instance. [`teardown`](Self::teardown) discards the token
/// so a fresh one is created on the next attach.
pub struct WidgetAnchor {
    factory: TokenFactory,
    token: Mutex<Option<WidgetToken>>,
    instances: AtomicUsize,
}

impl WidgetAnchor {
    /// Create an anchor around a token factory.
    #[must_use]
    pub fn new(factory: impl Fn() -> WidgetToken + Send + Sync + 'static) -> Self {
        Self {
            factory: Box::new(factory),
            token: Mutex::new(None),
            instances: AtomicUsize::new(0),
        }
    }

    /// Attach the widget if needed and return its token.
    ///
    /// Idempotent: concurrent and repeated calls all observe the same
    /// single instance.
    pub fn attach(&self) -> WidgetToken {
        let mut slot = self.token.lock().unwrap_or_else(PoisonError::into_inner);
        slot.get_or_insert_with(|| {
            self.instances.fetch_add(1, Ordering::SeqCst);
            tracing::debug!("Attaching anti-automation widget");
            (self.factory)()
        })
        .clone()
    }

    /// Discard the current widget instance, if any.
    pub fn teardown(&self) {
        let mut slot = self.token.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.take().is_some() {
            tracing::debug!("Tearing down anti-automation widget");
        }
    }

    /// Whether a widget instance is currently attached.
    pub fn is_attached(&self) -> bool {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Total widget instances created over the anchor's lifetime.
    pub fn instance_count(&self) -> usize {
        self.instances.load(Ordering::SeqCst)
    }
}

impl fmt::Debug for WidgetAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetAnchor")
            .field("attached", &self.is_attached())
            .field("instances", &self.instance_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting_anchor() -> WidgetAnchor {
        let next = AtomicUsize::new(0);
        WidgetAnchor::new(move || {
            let n = next.fetch_add(1, Ordering::SeqCst);
            WidgetToken::new(format!("token-{n}"))
        })
    }

    #[test]
    fn test_attach_is_idempotent() {
        let anchor = counting_anchor();

        let first = anchor.attach();
        let second = anchor.attach();

        assert_eq!(first, second);
        assert_eq!(anchor.instance_count(), 1);
        assert!(anchor.is_attached());
    }

    #[test]
    fn test_teardown_allows_fresh_instance() {
        let anchor = counting_anchor();

        let first = anchor.attach();
        anchor.teardown();
        assert!(!anchor.is_attached());

        let second = anchor.attach();
        assert_ne!(first, second);
        assert_eq!(anchor.instance_count(), 2);
    }
}
