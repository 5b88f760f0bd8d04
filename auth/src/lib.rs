//! # Otpgate Authentication
//!
//! Phone-number OTP authentication flow control built on the otpgate
//! reducer architecture.
//!
//! ## Features
//!
//! - **Three-step machine**: phone entry → OTP entry → name entry, with
//!   invalid states unrepresentable
//! - **Observable session**: a process-wide session fed by provider
//!   notifications
//! - **Route guards**: pure render/redirect/placeholder decisions
//! - **Testable**: providers behind traits, flow logic runs at memory speed
//!
//! ## Architecture
//!
//! Authentication is implemented as reducers and effects:
//!
//! ```text
//! Action → Reducer → (State, Effects) → Effect Execution → More Actions
//! ```
//!
//! ## Example: OTP Login
//!
//! ```rust,ignore
//! use otpgate_auth::*;
//!
//! let shell = AppShell::new(provider, navigator, AuthConfig::default());
//! shell.start();
//!
//! // 1. Submit the phone number
//! shell.send(AuthAction::SubmitPhone { raw: "555-123-4567".into() }).await?;
//!
//! // 2. User types the code; the sixth digit auto-submits
//! for ch in "123456".chars() {
//!     shell.send(AuthAction::EnterDigit { ch }).await?;
//! }
//!
//! // 3. Session established
//! assert!(shell.session().await.identity.is_some());
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

// Public modules
pub mod actions;
pub mod config;
pub mod constants;
pub mod environment;
pub mod error;
pub mod guards;
pub mod phone;
pub mod providers;
pub mod reducers;
pub mod session;
pub mod shell;
pub mod state;
pub mod widget;

// Mock providers for tests and downstream test suites
#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

// Re-export main types for convenience
pub use actions::AuthAction;
pub use config::AuthConfig;
pub use environment::AuthEnvironment;
pub use error::{AuthError, Result};
pub use guards::{GateDecision, Route, auth_gate, guest_gate};
pub use providers::{IdentityProvider, Navigator};
pub use reducers::{AuthReducer, ChallengeFlowReducer, SessionReducer, auth_reducer};
pub use session::{SessionBridge, SessionHandle};
pub use shell::{AppShell, AuthStore};
pub use state::{
    AuthState, ChallengeHandle, ChallengeState, Identity, Message, MessageKind, OtpDigits,
    SessionState, Step, UserId,
};
pub use widget::{WidgetAnchor, WidgetToken};
