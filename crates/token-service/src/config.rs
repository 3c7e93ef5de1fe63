use crate::error::ConfigError;
use crate::secret::SecretString;
use std::collections::HashMap;
use std::env;
use std::str::FromStr;

/// Validity applied when `TOKEN_VALIDITY_HOURS` is not set.
pub const DEFAULT_VALIDITY_HOURS: i64 = 24;

/// Whether verification compares the token's `iss` against our issuer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IssuerPolicy {
    /// Accept any issuer once the signature and expiration check out.
    #[default]
    Ignore,
    /// Reject tokens whose issuer differs from the configured one.
    Enforce,
}

impl FromStr for IssuerPolicy {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(IssuerPolicy::Ignore),
            "enforce" => Ok(IssuerPolicy::Enforce),
            _ => Err(ConfigError::InvalidIssuerPolicy(value.to_string())),
        }
    }
}

/// Signing configuration for a [`TokenService`](crate::TokenService).
///
/// Loading only parses; range checks on the values happen when the service
/// is built, so both paths report the same [`ConfigError`]s.
#[derive(Debug, Clone)]
pub struct SigningConfig {
    pub secret: SecretString,
    pub issuer: String,
    pub validity_hours: i64,
    pub issuer_policy: IssuerPolicy,
}

impl SigningConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a value
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a `HashMap` (for testing)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a value
    /// cannot be parsed.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let secret = vars
            .get("TOKEN_SECRET")
            .ok_or_else(|| ConfigError::MissingEnvVar("TOKEN_SECRET".to_string()))?
            .clone();

        let issuer = vars
            .get("TOKEN_ISSUER")
            .ok_or_else(|| ConfigError::MissingEnvVar("TOKEN_ISSUER".to_string()))?
            .clone();

        let validity_hours = match vars.get("TOKEN_VALIDITY_HOURS") {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(|e| ConfigError::InvalidValidityHours(format!("{raw:?}: {e}")))?,
            None => DEFAULT_VALIDITY_HOURS,
        };

        let issuer_policy = vars
            .get("TOKEN_ISSUER_POLICY")
            .map(|raw| raw.parse::<IssuerPolicy>())
            .transpose()?
            .unwrap_or_default();

        Ok(SigningConfig {
            secret: SecretString::from(secret),
            issuer,
            validity_hours,
            issuer_policy,
        })
    }
}
