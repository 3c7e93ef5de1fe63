//! Issuance and verification of signed identity tokens.
//!
//! A [`TokenService`] holds a shared HS256 secret, an issuer and a validity
//! duration. It issues compact `header.claims.signature` tokens for a subject
//! and verifies presented tokens, rejecting anything whose structure,
//! algorithm, signature or expiration is not acceptable.
//!
//! The library performs no logging. Callers log outcomes with their own
//! subscriber, using [`TokenError::kind`] for the error field.
//!
//! # Modules
//!
//! - `claims` - Identity claims carried by a token
//! - `clock` - Time source used for issuance and expiration checks
//! - `config` - Environment-driven signing configuration
//! - `error` - Error taxonomy
//! - `jwt` - Wire format parsing and algorithm pinning
//! - `secret` - Redacting wrappers for the shared secret
//! - `service` - The token service itself

#![warn(clippy::pedantic)]

pub mod claims;
pub mod clock;
pub mod config;
pub mod error;
pub mod jwt;
pub mod secret;
pub mod service;

pub use claims::IdentityClaims;
pub use clock::{Clock, SystemClock};
pub use config::{IssuerPolicy, SigningConfig};
pub use error::{ConfigError, TokenError};
pub use service::TokenService;
