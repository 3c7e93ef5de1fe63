use crate::claims::IdentityClaims;
use crate::clock::{Clock, SystemClock};
use crate::config::{IssuerPolicy, SigningConfig};
use crate::error::{ConfigError, TokenError};
use crate::jwt::{self, SIGNING_ALGORITHM};
use crate::secret::{is_blank, ExposeSecret, SecretString};
use chrono::TimeDelta;
use jsonwebtoken::{encode, DecodingKey, EncodingKey, Header};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Issues and verifies HS256 identity tokens.
///
/// Immutable once built. Clone it or share it behind an `Arc`; every
/// operation only reads.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    validity: TimeDelta,
    issuer_policy: IssuerPolicy,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("keys", &"[REDACTED]")
            .field("issuer", &self.issuer)
            .field("validity_hours", &self.validity.num_hours())
            .field("issuer_policy", &self.issuer_policy)
            .field("clock", &self.clock)
            .finish()
    }
}

impl TokenService {
    /// Build a service from a secret, issuer and validity in hours.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Config`] for the first violation found, checked
    /// in this order:
    /// - [`ConfigError::EmptySecret`]
    /// - [`ConfigError::EmptyIssuer`]
    /// - [`ConfigError::NonPositiveValidity`] when `validity_hours <= 0`
    /// - [`ConfigError::ValidityOutOfRange`] when the duration overflows
    pub fn new(
        secret: &SecretString,
        issuer: impl Into<String>,
        validity_hours: i64,
    ) -> Result<Self, TokenError> {
        if is_blank(secret) {
            return Err(ConfigError::EmptySecret.into());
        }

        let issuer = issuer.into();
        if issuer.is_empty() {
            return Err(ConfigError::EmptyIssuer.into());
        }

        if validity_hours <= 0 {
            return Err(ConfigError::NonPositiveValidity(validity_hours).into());
        }
        let validity = TimeDelta::try_hours(validity_hours)
            .ok_or(ConfigError::ValidityOutOfRange(validity_hours))?;

        let key = secret.expose_secret().as_bytes();

        Ok(Self {
            encoding_key: EncodingKey::from_secret(key),
            decoding_key: DecodingKey::from_secret(key),
            issuer,
            validity,
            issuer_policy: IssuerPolicy::default(),
            clock: Arc::new(SystemClock),
        })
    }

    /// Build a service from loaded configuration.
    ///
    /// # Errors
    ///
    /// Same as [`TokenService::new`].
    pub fn from_config(config: &SigningConfig) -> Result<Self, TokenError> {
        Ok(Self::new(&config.secret, config.issuer.clone(), config.validity_hours)?
            .with_issuer_policy(config.issuer_policy))
    }

    #[must_use]
    pub fn with_issuer_policy(mut self, policy: IssuerPolicy) -> Self {
        self.issuer_policy = policy;
        self
    }

    /// Replace the time source used for issuance and expiration checks.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    #[must_use]
    pub fn validity(&self) -> TimeDelta {
        self.validity
    }

    #[must_use]
    pub fn issuer_policy(&self) -> IssuerPolicy {
        self.issuer_policy
    }

    /// Issue a token for a subject.
    ///
    /// Subject id and label are opaque to the service; empty strings are
    /// signed as given.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Signing`] if the expiration overflows the
    /// timestamp range or the claims cannot be serialized and signed.
    pub fn issue(&self, subject_id: &str, subject_label: &str) -> Result<String, TokenError> {
        let now = self.clock.now();
        let expires_at = now
            .checked_add_signed(self.validity)
            .ok_or_else(|| TokenError::Signing("expiration timestamp out of range".to_string()))?;

        let claims = IdentityClaims {
            subject_id: subject_id.to_string(),
            subject_label: subject_label.to_string(),
            issuer: self.issuer.clone(),
            expires_at: expires_at.timestamp(),
            issued_at: Some(now.timestamp()),
        };

        encode(&Header::new(SIGNING_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a presented token and return its claims.
    ///
    /// Checks run in a fixed order and stop at the first failure: structure,
    /// algorithm, signature, expiration, issued-at and not-before, claims
    /// shape, then issuer (only under [`IssuerPolicy::Enforce`]).
    ///
    /// # Errors
    ///
    /// - [`TokenError::MalformedToken`] - not three base64url segments with
    ///   JSON object header and claims
    /// - [`TokenError::UnsupportedAlgorithm`] - header `alg` is not `HS256`
    /// - [`TokenError::InvalidSignature`] - MAC mismatch
    /// - [`TokenError::Expired`] - `exp` at or before now
    /// - [`TokenError::NotYetValid`] - `iat` or `nbf` beyond now plus
    ///   [`CLOCK_SKEW_SECONDS`](jwt::CLOCK_SKEW_SECONDS)
    /// - [`TokenError::ClaimsParse`] - payload is not identity claims
    /// - [`TokenError::IssuerMismatch`] - foreign issuer under enforcement
    pub fn validate(&self, token: &str) -> Result<IdentityClaims, TokenError> {
        let unverified = jwt::parse(token)?;

        // Allow-list check before the key is used.
        jwt::pin_algorithm(&unverified)?;

        // Constant-time comparison of the recomputed MAC.
        let signature_matches = jsonwebtoken::crypto::verify(
            unverified.signature,
            unverified.signing_input.as_bytes(),
            &self.decoding_key,
            SIGNING_ALGORITHM,
        )
        .map_err(|_| TokenError::MalformedToken)?;
        if !signature_matches {
            return Err(TokenError::InvalidSignature);
        }

        let expires_at = unverified
            .claims
            .get("exp")
            .and_then(Value::as_i64)
            .ok_or(TokenError::ClaimsParse)?;
        let now = self.clock.now().timestamp();
        if expires_at <= now {
            return Err(TokenError::Expired);
        }
        jwt::validate_not_before(&unverified.claims, now)?;

        let claims: IdentityClaims = serde_json::from_value(Value::Object(unverified.claims))
            .map_err(|_| TokenError::ClaimsParse)?;

        if self.issuer_policy == IssuerPolicy::Enforce && claims.issuer != self.issuer {
            return Err(TokenError::IssuerMismatch);
        }

        Ok(claims)
    }
}
