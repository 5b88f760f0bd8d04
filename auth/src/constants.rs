//! Authentication constants.
//!
//! This module contains constant values used throughout the flow.

use std::time::Duration;

/// Number of digits in an OTP code.
pub const OTP_LEN: usize = 6;

/// Default country code prepended to national numbers.
pub const DEFAULT_COUNTRY_CODE: &str = "1";

/// Default cap on failed verification attempts per challenge.
pub const DEFAULT_MAX_VERIFY_ATTEMPTS: u32 = 5;

/// Default wait for the first session notification before the store stops
/// reporting `loading`.
pub const DEFAULT_BOOTSTRAP_TIMEOUT: Duration = Duration::from_secs(10);
