//! Deterministic fixtures for testing
//!
//! Provides fixed secrets, a controllable clock, and prebuilt services so
//! that tokens and expiration checks are reproducible.

use crate::test_ids::TEST_ISSUER;
use chrono::{DateTime, TimeDelta, Utc};
use std::sync::Arc;
use thiserror::Error;
use token_service::secret::SecretString;
use token_service::{Clock, TokenError, TokenService};

// Test secrets (never use in production)
pub const TEST_SECRET: &str = "test-secret-do-not-use-in-production";
pub const TEST_OTHER_SECRET: &str = "another-test-secret-do-not-use";

/// Test fixture error type
#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("Token service construction failed: {0}")]
    Service(#[from] TokenError),

    #[error("Timestamp out of range: {0}")]
    Timestamp(i64),
}

/// A clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Clock frozen at the given Unix timestamp.
    pub fn at(timestamp: i64) -> Result<Self, FixtureError> {
        DateTime::from_timestamp(timestamp, 0)
            .map(Self)
            .ok_or(FixtureError::Timestamp(timestamp))
    }

    /// Clock frozen `hours` before the current wall-clock time.
    pub fn hours_ago(hours: i64) -> Self {
        Self(Utc::now() - TimeDelta::hours(hours))
    }

    pub fn shared(self) -> Arc<dyn Clock> {
        Arc::new(self)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Service signing with [`TEST_SECRET`] as [`TEST_ISSUER`], valid for one hour.
pub fn test_service() -> Result<TokenService, FixtureError> {
    test_service_with(TEST_SECRET, TEST_ISSUER, 1)
}

/// Service with explicit parameters.
pub fn test_service_with(
    secret: &str,
    issuer: &str,
    validity_hours: i64,
) -> Result<TokenService, FixtureError> {
    Ok(TokenService::new(
        &SecretString::from(secret),
        issuer,
        validity_hours,
    )?)
}
