//! Fixed test IDs for deterministic tests
//!
//! Using fixed values prevents flaky tests caused by random data.

use uuid::Uuid;

// Subject IDs (100-199)
pub const TEST_SUBJECT_ALICE: Uuid = Uuid::from_u128(100);
pub const TEST_SUBJECT_BOB: Uuid = Uuid::from_u128(101);

// String forms, as passed to TokenService::issue
pub const TEST_SUBJECT_ALICE_ID: &str = "00000000-0000-0000-0000-000000000064";
pub const TEST_SUBJECT_BOB_ID: &str = "00000000-0000-0000-0000-000000000065";

// Subject labels
pub const TEST_SUBJECT_ALICE_LABEL: &str = "alice@example.com";
pub const TEST_SUBJECT_BOB_LABEL: &str = "bob@example.com";

// Issuers
pub const TEST_ISSUER: &str = "AuthService";
pub const TEST_OTHER_ISSUER: &str = "BillingService";

// Fixed instant used by FixedClock-based tests (2023-11-14T22:13:20Z)
pub const TEST_EPOCH: i64 = 1_700_000_000;
