//! # Otpgate Testing
//!
//! Testing utilities and helpers for the otpgate architecture.
//!
//! This crate provides:
//! - A fluent Given-When-Then harness for reducers
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use otpgate_testing::ReducerTest;
//!
//! ReducerTest::new(ChallengeFlowReducer::new())
//!     .with_env(test_environment())
//!     .given_state(ChallengeState::default())
//!     .when_action(AuthAction::SubmitPhone {
//!         raw: "06 12 34 56 78".into(),
//!     })
//!     .then_state(|state| {
//!         assert!(matches!(state.step, Step::Phone { busy: true, .. }));
//!     })
//!     .run();
//! ```

pub mod reducer_test;

// Re-export commonly used items
pub use reducer_test::ReducerTest;
