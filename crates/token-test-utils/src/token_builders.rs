//! Builder patterns for hand-crafted tokens
//!
//! `TokenService::issue` only ever produces well-formed HS256 tokens. Tests
//! that exercise rejection paths need tokens the service would never mint:
//! foreign algorithms, missing signatures, odd claim shapes, wrong secrets.

use crate::fixtures::TEST_SECRET;
use crate::test_ids::{TEST_ISSUER, TEST_SUBJECT_ALICE_ID, TEST_SUBJECT_ALICE_LABEL};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{Duration, Utc};
use jsonwebtoken::{crypto, Algorithm, EncodingKey};
use serde_json::{json, Map, Value};

enum Signature {
    /// HMAC-SHA256 over the signing input with this secret.
    Hs256(Vec<u8>),
    /// Verbatim signature segment.
    Raw(String),
}

/// Builder for creating test tokens with arbitrary headers and claims
///
/// Whatever the header declares, the signature (unless overridden) is always
/// HMAC-SHA256, which is exactly what an algorithm-confusion attacker would
/// send.
///
/// # Example
/// ```rust,ignore
/// let token = ForgedTokenBuilder::new()
///     .with_algorithm("HS512")
///     .for_subject("mallory", "mallory@example.com")
///     .build();
/// ```
pub struct ForgedTokenBuilder {
    header: Map<String, Value>,
    claims: Map<String, Value>,
    signature: Signature,
}

impl ForgedTokenBuilder {
    /// Create a new builder that, by default, produces a token the test
    /// service accepts.
    pub fn new() -> Self {
        let now = Utc::now();
        let header = json!({ "alg": "HS256", "typ": "JWT" });
        let claims = json!({
            "ID": TEST_SUBJECT_ALICE_ID,
            "Email": TEST_SUBJECT_ALICE_LABEL,
            "iss": TEST_ISSUER,
            "exp": (now + Duration::seconds(3600)).timestamp(),
            "iat": now.timestamp(),
        });

        Self {
            header: as_object(header),
            claims: as_object(claims),
            signature: Signature::Hs256(TEST_SECRET.as_bytes().to_vec()),
        }
    }

    /// Set the declared `alg` header.
    pub fn with_algorithm(mut self, alg: &str) -> Self {
        self.header.insert("alg".to_string(), json!(alg));
        self
    }

    /// Remove the `alg` header entirely.
    pub fn without_algorithm(mut self) -> Self {
        self.header.remove("alg");
        self
    }

    /// Set any header field to any JSON value.
    pub fn with_header_field(mut self, name: &str, value: Value) -> Self {
        self.header.insert(name.to_string(), value);
        self
    }

    /// Replace all claims.
    pub fn with_claims(mut self, claims: Value) -> Self {
        self.claims = as_object(claims);
        self
    }

    /// Set any claim to any JSON value.
    pub fn with_claim(mut self, name: &str, value: Value) -> Self {
        self.claims.insert(name.to_string(), value);
        self
    }

    pub fn without_claim(mut self, name: &str) -> Self {
        self.claims.remove(name);
        self
    }

    pub fn for_subject(self, subject_id: &str, subject_label: &str) -> Self {
        self.with_claim("ID", json!(subject_id))
            .with_claim("Email", json!(subject_label))
    }

    pub fn issued_by(self, issuer: &str) -> Self {
        self.with_claim("iss", json!(issuer))
    }

    /// Set expiration in seconds from now (negative for the past)
    pub fn expires_in(self, seconds: i64) -> Self {
        let exp = (Utc::now() + Duration::seconds(seconds)).timestamp();
        self.with_claim("exp", json!(exp))
    }

    /// Sign with a different HMAC secret.
    pub fn signed_with(mut self, secret: &str) -> Self {
        self.signature = Signature::Hs256(secret.as_bytes().to_vec());
        self
    }

    /// Leave the signature segment empty, as `alg: none` tokens do.
    pub fn unsigned(self) -> Self {
        self.with_raw_signature("")
    }

    pub fn with_raw_signature(mut self, signature: &str) -> Self {
        self.signature = Signature::Raw(signature.to_string());
        self
    }

    /// Build the token string
    pub fn build(self) -> String {
        let header = URL_SAFE_NO_PAD.encode(Value::Object(self.header).to_string());
        let claims = URL_SAFE_NO_PAD.encode(Value::Object(self.claims).to_string());
        let signing_input = format!("{header}.{claims}");

        let signature = match self.signature {
            Signature::Hs256(secret) => crypto::sign(
                signing_input.as_bytes(),
                &EncodingKey::from_secret(&secret),
                Algorithm::HS256,
            )
            .expect("HS256 signing should not fail"),
            Signature::Raw(raw) => raw,
        };

        format!("{signing_input}.{signature}")
    }
}

impl Default for ForgedTokenBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Flip one bit of the decoded signature and re-encode the token.
///
/// `bit` indexes the signature bytes from the most significant bit of the
/// first byte. Panics if the token has no decodable signature or `bit` is
/// out of range.
pub fn flip_signature_bit(token: &str, bit: usize) -> String {
    let (signing_input, signature) = token
        .rsplit_once('.')
        .expect("token must have a signature segment");
    let mut bytes = URL_SAFE_NO_PAD
        .decode(signature)
        .expect("signature must be base64url");

    bytes[bit / 8] ^= 0x80 >> (bit % 8);

    format!("{signing_input}.{}", URL_SAFE_NO_PAD.encode(bytes))
}

fn as_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}
