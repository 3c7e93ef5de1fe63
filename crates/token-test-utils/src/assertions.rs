//! Custom test assertions for expressive tests
//!
//! Provides trait-based assertions that inspect a token's header and claims
//! without verifying its signature.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::Deserialize;

/// Token header structure
#[derive(Debug, Deserialize)]
struct TokenHeader {
    pub alg: String,
    pub typ: String,
}

/// Token claims structure, using the wire names
#[derive(Debug, Deserialize)]
struct TokenClaims {
    #[serde(rename = "ID")]
    pub subject_id: String,
    #[serde(rename = "Email")]
    pub subject_label: String,
    pub iss: String,
    pub exp: i64,
}

/// Custom assertions for issued tokens
///
/// # Example
/// ```rust,ignore
/// token
///     .assert_well_formed()
///     .assert_for_subject(TEST_SUBJECT_ALICE_ID)
///     .assert_issued_by(TEST_ISSUER)
///     .assert_expires_in(3600);
/// ```
pub trait TokenAssertions {
    /// Assert three base64url segments with an HS256 header and identity claims
    fn assert_well_formed(&self) -> &Self;

    /// Assert that the token is for the specified subject id
    fn assert_for_subject(&self, subject_id: &str) -> &Self;

    /// Assert that the token carries the specified subject label
    fn assert_labelled(&self, subject_label: &str) -> &Self;

    /// Assert that the token names the specified issuer
    fn assert_issued_by(&self, issuer: &str) -> &Self;

    /// Assert that the token expires within the specified seconds
    fn assert_expires_in(&self, seconds: i64) -> &Self;
}

fn header_of(token: &str) -> TokenHeader {
    let part = token.split('.').next().expect("token has no header");
    let bytes = URL_SAFE_NO_PAD.decode(part).expect("Invalid token header");
    serde_json::from_slice(&bytes).expect("Failed to parse token header")
}

fn claims_of(token: &str) -> TokenClaims {
    let part = token.split('.').nth(1).expect("token has no claims");
    let bytes = URL_SAFE_NO_PAD.decode(part).expect("Invalid token claims");
    serde_json::from_slice(&bytes).expect("Failed to parse token claims")
}

impl TokenAssertions for String {
    fn assert_well_formed(&self) -> &Self {
        let parts: Vec<_> = self.split('.').collect();
        assert_eq!(
            parts.len(),
            3,
            "Token must have 3 parts (header.claims.signature), got {}",
            parts.len()
        );

        for (name, part) in ["header", "claims", "signature"].iter().zip(&parts) {
            let decoded = URL_SAFE_NO_PAD.decode(part);
            assert!(
                decoded.is_ok(),
                "Failed to base64url decode token {}: {:?}",
                name,
                decoded.err()
            );
        }

        let header = header_of(self);
        assert_eq!(header.alg, "HS256", "Expected HS256 algorithm");
        assert_eq!(header.typ, "JWT", "Expected JWT type");

        claims_of(self);

        self
    }

    fn assert_for_subject(&self, subject_id: &str) -> &Self {
        let claims = claims_of(self);
        assert_eq!(
            claims.subject_id, subject_id,
            "Expected subject id '{}', got '{}'",
            subject_id, claims.subject_id
        );
        self
    }

    fn assert_labelled(&self, subject_label: &str) -> &Self {
        let claims = claims_of(self);
        assert_eq!(
            claims.subject_label, subject_label,
            "Expected subject label '{}', got '{}'",
            subject_label, claims.subject_label
        );
        self
    }

    fn assert_issued_by(&self, issuer: &str) -> &Self {
        let claims = claims_of(self);
        assert_eq!(
            claims.iss, issuer,
            "Expected issuer '{}', got '{}'",
            issuer, claims.iss
        );
        self
    }

    fn assert_expires_in(&self, seconds: i64) -> &Self {
        let claims = claims_of(self);
        let now = chrono::Utc::now().timestamp();
        let expires_in = claims.exp - now;

        // Allow 5-second tolerance for slow test runs
        assert!(
            (expires_in - seconds).abs() <= 5,
            "Expected token to expire in {} seconds, but expires in {} seconds",
            seconds,
            expires_in
        );

        self
    }
}
