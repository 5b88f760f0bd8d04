//! Authentication configuration.
//!
//! Configuration values should be provided by the application, not hardcoded.

use crate::constants::{
    DEFAULT_BOOTSTRAP_TIMEOUT, DEFAULT_COUNTRY_CODE, DEFAULT_MAX_VERIFY_ATTEMPTS,
};
use std::time::Duration;

/// Phone-OTP flow configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Country code prepended to national numbers (digits, no `+`).
    ///
    /// Default: "1"
    pub default_country_code: String,

    /// Failed verification attempts tolerated per challenge before the flow
    /// returns to phone entry.
    ///
    /// Default: 5
    pub max_verify_attempts: u32,

    /// Wait for the first session notification before the session stops
    /// reporting `loading`.
    ///
    /// Default: 10 seconds
    pub bootstrap_timeout: Duration,
}

impl AuthConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default country code.
    #[must_use]
    pub fn with_country_code(mut self, code: impl Into<String>) -> Self {
        self.default_country_code = code.into();
        self
    }

    /// Set the verification attempt cap.
    #[must_use]
    pub const fn with_max_verify_attempts(mut self, attempts: u32) -> Self {
        self.max_verify_attempts = attempts;
        self
    }

    /// Set the session bootstrap timeout.
    #[must_use]
    pub const fn with_bootstrap_timeout(mut self, timeout: Duration) -> Self {
        self.bootstrap_timeout = timeout;
        self
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            default_country_code: DEFAULT_COUNTRY_CODE.to_string(),
            max_verify_attempts: DEFAULT_MAX_VERIFY_ATTEMPTS,
            bootstrap_timeout: DEFAULT_BOOTSTRAP_TIMEOUT,
        }
    }
}
