//! Identity claims carried inside a token.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity claims embedded in every token.
///
/// Field names on the wire are `ID`, `Email`, `iss`, `exp` and `iat`, which
/// keeps tokens interchangeable with peers that already speak this format.
///
/// # Security
///
/// `subject_id` and `subject_label` identify a person or service and are
/// redacted in Debug output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Opaque subject identifier, typically a UUID.
    #[serde(rename = "ID")]
    pub subject_id: String,

    /// Opaque subject label, typically an email address.
    #[serde(rename = "Email")]
    pub subject_label: String,

    /// Issuer that signed the token.
    #[serde(rename = "iss")]
    pub issuer: String,

    /// Expiration timestamp (Unix epoch seconds).
    #[serde(rename = "exp")]
    pub expires_at: i64,

    /// Issued-at timestamp (Unix epoch seconds). Optional for tokens minted
    /// by peers that omit it.
    #[serde(rename = "iat", default, skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<i64>,
}

impl fmt::Debug for IdentityClaims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityClaims")
            .field("subject_id", &"[REDACTED]")
            .field("subject_label", &"[REDACTED]")
            .field("issuer", &self.issuer)
            .field("expires_at", &self.expires_at)
            .field("issued_at", &self.issued_at)
            .finish()
    }
}

impl IdentityClaims {
    /// Whether the token has expired at `now` (Unix epoch seconds).
    ///
    /// A token is expired at the exact second of its expiration.
    #[must_use]
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at <= now
    }
}
