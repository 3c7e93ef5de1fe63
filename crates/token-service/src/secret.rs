//! Wrappers that keep the signing secret out of logs.
//!
//! The shared HS256 secret travels through configuration as a
//! [`SecretString`]. Its `Debug` output is redacted, so structs that derive
//! `Debug` while holding it stay safe to print or trace. Reading the value
//! requires an explicit [`ExposeSecret::expose_secret`] call, which only the
//! key derivation in [`TokenService`](crate::TokenService) performs.
//!
//! ```rust
//! use token_service::secret::{ExposeSecret, SecretString};
//!
//! let secret = SecretString::from("signing-secret");
//! assert!(!format!("{secret:?}").contains("signing-secret"));
//! assert_eq!(secret.expose_secret(), "signing-secret");
//! ```

pub use secrecy::{ExposeSecret, SecretString};

/// Returns true when the secret holds no bytes.
#[must_use]
pub fn is_blank(secret: &SecretString) -> bool {
    secret.expose_secret().is_empty()
}
