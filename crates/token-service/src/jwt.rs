//! Wire format for identity tokens.
//!
//! A token is `header.claims.signature`, each segment base64url encoded
//! without padding. This module covers the parts of verification that happen
//! before the secret is touched:
//!
//! - Size limit for DoS prevention
//! - Structural parse into decoded header and claims objects
//! - Algorithm pinning against the single supported scheme
//! - Issued-at and not-before checks with a clock-skew tolerance
//!
//! # Security
//!
//! - Tokens are size-checked BEFORE parsing
//! - Only HS256 is accepted, by explicit comparison of the declared `alg`
//! - Nothing here verifies the signature; callers must do that next

use crate::error::TokenError;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use jsonwebtoken::Algorithm;
use serde_json::{Map, Value};

// =============================================================================
// Constants
// =============================================================================

/// Maximum allowed token size in bytes (8KB).
///
/// Typical tokens are well under 500 bytes. Anything larger is rejected
/// before base64 decoding allocates.
pub const MAX_TOKEN_SIZE_BYTES: usize = 8192;

/// The one signing algorithm this service issues and accepts.
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// Header `alg` value for [`SIGNING_ALGORITHM`].
pub const SIGNING_ALGORITHM_NAME: &str = "HS256";

/// How far `iat` and `nbf` may lie in the future, in seconds (5 minutes).
pub const CLOCK_SKEW_SECONDS: i64 = 300;

// =============================================================================
// Types
// =============================================================================

/// A token split into its segments, with header and claims decoded.
///
/// Nothing in here has been authenticated yet.
#[derive(Debug)]
pub struct UnverifiedToken<'a> {
    /// `base64url(header) + "." + base64url(claims)`, the MAC input.
    pub signing_input: &'a str,
    /// Signature segment as it appeared on the wire.
    pub signature: &'a str,
    pub header: Map<String, Value>,
    pub claims: Map<String, Value>,
}

impl UnverifiedToken<'_> {
    /// The declared `alg`, if present and a string.
    #[must_use]
    pub fn algorithm(&self) -> Option<&str> {
        self.header.get("alg").and_then(Value::as_str)
    }
}

// =============================================================================
// Functions
// =============================================================================

/// Split a token into segments and decode its header and claims.
///
/// # Errors
///
/// Returns [`TokenError::MalformedToken`] when the token is oversized, does
/// not have exactly three segments, a segment is not base64url without
/// padding, or the header or claims are not JSON objects.
pub fn parse(token: &str) -> Result<UnverifiedToken<'_>, TokenError> {
    if token.len() > MAX_TOKEN_SIZE_BYTES {
        return Err(TokenError::MalformedToken);
    }

    let (signing_input, signature) = token
        .rsplit_once('.')
        .ok_or(TokenError::MalformedToken)?;
    let (header_part, claims_part) = signing_input
        .split_once('.')
        .ok_or(TokenError::MalformedToken)?;
    if claims_part.contains('.') {
        return Err(TokenError::MalformedToken);
    }

    let header = decode_object(header_part)?;
    let claims = decode_object(claims_part)?;
    URL_SAFE_NO_PAD
        .decode(signature)
        .map_err(|_| TokenError::MalformedToken)?;

    Ok(UnverifiedToken {
        signing_input,
        signature,
        header,
        claims,
    })
}

/// Reject any declared algorithm other than HS256.
///
/// Must run before the signature is checked so that a token declaring
/// `none`, another HMAC width, or an asymmetric scheme never reaches key use.
///
/// # Errors
///
/// Returns [`TokenError::UnsupportedAlgorithm`] when `alg` is missing, not a
/// string, or not exactly `HS256`.
pub fn pin_algorithm(token: &UnverifiedToken<'_>) -> Result<(), TokenError> {
    match token.algorithm() {
        Some(SIGNING_ALGORITHM_NAME) => Ok(()),
        _ => Err(TokenError::UnsupportedAlgorithm),
    }
}

/// Reject claims whose `iat` or `nbf` is later than `now` plus
/// [`CLOCK_SKEW_SECONDS`].
///
/// Both claims are optional. Only call this on authenticated claims.
///
/// # Errors
///
/// - [`TokenError::ClaimsParse`] when either claim is present but not an integer
/// - [`TokenError::NotYetValid`] when either claim is too far in the future
pub fn validate_not_before(claims: &Map<String, Value>, now: i64) -> Result<(), TokenError> {
    let latest_accepted = now.saturating_add(CLOCK_SKEW_SECONDS);

    for name in ["iat", "nbf"] {
        let Some(value) = claims.get(name) else {
            continue;
        };
        let timestamp = value.as_i64().ok_or(TokenError::ClaimsParse)?;
        if timestamp > latest_accepted {
            return Err(TokenError::NotYetValid);
        }
    }

    Ok(())
}

fn decode_object(segment: &str) -> Result<Map<String, Value>, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| TokenError::MalformedToken)?;

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(TokenError::MalformedToken),
    }
}

// =============================================================================
// Tests
// =============================================================================
