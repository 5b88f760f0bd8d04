//! Navigator trait.

use crate::guards::Route;

/// Navigation sink.
///
/// The flow decides *when* to navigate; the host application decides what
/// navigation means (history push, window change, test recording).
/// Navigation is fire-and-forget and cannot fail.
pub trait Navigator: Send + Sync {
    /// Navigate to a route.
    fn navigate(&self, route: Route);
}
