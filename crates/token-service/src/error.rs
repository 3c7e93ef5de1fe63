//! Error types for token issuance and verification.
//!
//! Messages never include the shared secret or the presented token text, so
//! every variant is safe to log as-is.

use thiserror::Error;

/// Errors raised while building a signing configuration or service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("secret key must be set")]
    EmptySecret,

    #[error("issuer must be set")]
    EmptyIssuer,

    #[error("validity hours must be greater than 0, got {0}")]
    NonPositiveValidity(i64),

    #[error("validity of {0} hours is out of range")]
    ValidityOutOfRange(i64),

    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid validity hours: {0}")]
    InvalidValidityHours(String),

    #[error("Invalid issuer policy: {0} (expected 'ignore' or 'enforce')")]
    InvalidIssuerPolicy(String),
}

/// Errors returned by [`TokenService`](crate::TokenService) operations.
///
/// Every verification error is terminal for the token that produced it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The service could not be constructed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Not three base64url segments, or header/claims are not JSON objects.
    #[error("token is malformed")]
    MalformedToken,

    /// Header declares an algorithm other than HS256, or none at all.
    #[error("token declares an unsupported signing algorithm")]
    UnsupportedAlgorithm,

    /// Signature does not match the header and claims under our secret.
    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token is expired")]
    Expired,

    /// `iat` or `nbf` lies beyond now plus the allowed clock skew.
    #[error("token is not valid yet")]
    NotYetValid,

    /// Signed payload is not shaped like identity claims.
    #[error("couldn't parse claims")]
    ClaimsParse,

    /// Issuance failed while serializing or signing.
    #[error("token signing failed: {0}")]
    Signing(String),

    /// Issuer differs from ours and the issuer policy is enforcing.
    #[error("token issuer does not match")]
    IssuerMismatch,
}

impl TokenError {
    /// Stable label for structured log fields and metrics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            TokenError::Config(_) => "config",
            TokenError::MalformedToken => "malformed_token",
            TokenError::UnsupportedAlgorithm => "unsupported_algorithm",
            TokenError::InvalidSignature => "invalid_signature",
            TokenError::Expired => "expired",
            TokenError::NotYetValid => "not_yet_valid",
            TokenError::ClaimsParse => "claims_parse",
            TokenError::Signing(_) => "signing",
            TokenError::IssuerMismatch => "issuer_mismatch",
        }
    }

    /// Whether the rejection suggests the token was tampered with or forged.
    ///
    /// Callers should log these at an elevated severity.
    #[must_use]
    pub fn is_suspicious(&self) -> bool {
        matches!(
            self,
            TokenError::InvalidSignature
                | TokenError::UnsupportedAlgorithm
                | TokenError::IssuerMismatch
        )
    }
}
