//! Time source for issuance and expiration checks.

use chrono::{DateTime, Utc};
use std::fmt;

/// Supplies the current time to a [`TokenService`](crate::TokenService).
///
/// Production code uses [`SystemClock`]. Tests substitute a fixed clock to
/// exercise expiration boundaries without sleeping.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
