//! # Token Test Utilities
//!
//! Shared test utilities for the token service.
//!
//! This crate provides:
//! - Deterministic fixtures (fixed secrets, a fixed clock, prebuilt services)
//! - A builder for hand-crafted tokens (`ForgedTokenBuilder`) used to
//!   simulate tampering and algorithm-confusion attacks
//! - Fixed test IDs (UUIDs, labels, issuers)
//! - Custom assertions (`TokenAssertions` trait)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use token_test_utils::*;
//!
//! #[test]
//! fn test_example() {
//!     let service = test_service()?;
//!
//!     let forged = ForgedTokenBuilder::new()
//!         .with_algorithm("none")
//!         .unsigned()
//!         .build();
//!     assert!(service.validate(&forged).is_err());
//!
//!     service
//!         .issue(TEST_SUBJECT_ALICE_ID, TEST_SUBJECT_ALICE_LABEL)?
//!         .assert_well_formed()
//!         .assert_for_subject(TEST_SUBJECT_ALICE_ID);
//! }
//! ```

pub mod assertions;
pub mod fixtures;
pub mod test_ids;
pub mod token_builders;

// Re-export commonly used items
pub use assertions::*;
pub use fixtures::*;
pub use test_ids::*;
pub use token_builders::*;
