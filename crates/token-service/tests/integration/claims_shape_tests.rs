//! Structure and claims-shape tests
//!
//! Covers tokens that fail before the signature is checked (malformed) and
//! tokens that are authentic but whose payload is not identity claims or whose
//! `iat`/`nbf` lie in the future.

use serde_json::json;
use token_service::jwt::CLOCK_SKEW_SECONDS;
use token_service::TokenError;
use token_test_utils::*;

/// Well-known sample token signed with a secret we do not hold.
const FOREIGN_SAMPLE_TOKEN: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.\
eyJzdWIiOiIxMjM0NTY3ODkwIiwibmFtZSI6IkpvaG4gRG9lIiwiaWF0IjoxNTE2MjM5MDIyfQ.\
SflKxwRJSMeKKF2QT4fwpMeJf36POk6yJV_adQssw5c";

fn future_exp() -> i64 {
    chrono::Utc::now().timestamp() + 3600
}

// -----------------------------------------------------------------------------
// Malformed Tokens
// -----------------------------------------------------------------------------

#[test]
fn test_not_a_token() -> Result<(), anyhow::Error> {
    let service = test_service()?;

    for input in ["not-a-token", "", ".", "..", "a.b", "a.b.c.d", "!!!.@@@.###"] {
        assert_eq!(
            service.validate(input),
            Err(TokenError::MalformedToken),
            "input {input:?} should be malformed"
        );
    }
    Ok(())
}

#[test]
fn test_surrounding_whitespace_is_malformed() -> Result<(), anyhow::Error> {
    let service = test_service()?;
    let token = service.issue(TEST_SUBJECT_ALICE_ID, TEST_SUBJECT_ALICE_LABEL)?;

    assert_eq!(service.validate(&format!(" {token}")), Err(TokenError::MalformedToken));
    assert_eq!(service.validate(&format!("{token}\n")), Err(TokenError::MalformedToken));
    Ok(())
}

#[test]
fn test_bearer_prefix_is_malformed() -> Result<(), anyhow::Error> {
    let service = test_service()?;
    let token = service.issue(TEST_SUBJECT_ALICE_ID, TEST_SUBJECT_ALICE_LABEL)?;

    assert_eq!(
        service.validate(&format!("Bearer {token}")),
        Err(TokenError::MalformedToken)
    );
    Ok(())
}

#[test]
fn test_oversized_token_is_malformed() -> Result<(), anyhow::Error> {
    let service = test_service()?;
    let token = ForgedTokenBuilder::new()
        .with_claim("padding", json!("x".repeat(10_000)))
        .build();

    assert_eq!(service.validate(&token), Err(TokenError::MalformedToken));
    Ok(())
}

#[test]
fn test_non_object_claims_are_malformed() -> Result<(), anyhow::Error> {
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

    let service = test_service()?;
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let claims = URL_SAFE_NO_PAD.encode(r#""just a string""#);

    assert_eq!(
        service.validate(&format!("{header}.{claims}.")),
        Err(TokenError::MalformedToken)
    );
    Ok(())
}

// -----------------------------------------------------------------------------
// Foreign Tokens
// -----------------------------------------------------------------------------

#[test]
fn test_foreign_sample_token_has_invalid_signature() -> Result<(), anyhow::Error> {
    let service = test_service()?;

    assert_eq!(
        service.validate(FOREIGN_SAMPLE_TOKEN),
        Err(TokenError::InvalidSignature)
    );
    Ok(())
}

// -----------------------------------------------------------------------------
// Claims Shape
// -----------------------------------------------------------------------------

#[test]
fn test_authentic_non_identity_claims() -> Result<(), anyhow::Error> {
    // Same shape as the foreign sample, but signed with our secret and
    // given a future expiration: passes every check except claims shape.
    let service = test_service()?;
    let token = ForgedTokenBuilder::new()
        .with_claims(json!({
            "sub": "1234567890",
            "name": "John Doe",
            "iat": 1_516_239_022,
            "exp": future_exp(),
        }))
        .build();

    assert_eq!(service.validate(&token), Err(TokenError::ClaimsParse));
    Ok(())
}

#[test]
fn test_missing_expiration() -> Result<(), anyhow::Error> {
    let service = test_service()?;
    let token = ForgedTokenBuilder::new().without_claim("exp").build();

    assert_eq!(service.validate(&token), Err(TokenError::ClaimsParse));
    Ok(())
}

#[test]
fn test_non_integer_expiration() -> Result<(), anyhow::Error> {
    let service = test_service()?;

    for exp in [json!("9999999999"), json!(1.0e12), json!(null), json!(true)] {
        let token = ForgedTokenBuilder::new().with_claim("exp", exp.clone()).build();
        assert_eq!(
            service.validate(&token),
            Err(TokenError::ClaimsParse),
            "exp {exp} should fail claims parsing"
        );
    }
    Ok(())
}

#[test]
fn test_missing_identity_fields() -> Result<(), anyhow::Error> {
    let service = test_service()?;

    for field in ["ID", "Email", "iss"] {
        let token = ForgedTokenBuilder::new().without_claim(field).build();
        assert_eq!(
            service.validate(&token),
            Err(TokenError::ClaimsParse),
            "missing {field} should fail claims parsing"
        );
    }
    Ok(())
}

#[test]
fn test_wrongly_typed_identity_fields() -> Result<(), anyhow::Error> {
    let service = test_service()?;

    for (field, value) in [("ID", json!(42)), ("Email", json!(["a@b"])), ("iss", json!({}))] {
        let token = ForgedTokenBuilder::new().with_claim(field, value).build();
        assert_eq!(
            service.validate(&token),
            Err(TokenError::ClaimsParse),
            "mistyped {field} should fail claims parsing"
        );
    }
    Ok(())
}

#[test]
fn test_missing_issued_at_is_accepted() -> Result<(), anyhow::Error> {
    let service = test_service()?;
    let token = ForgedTokenBuilder::new().without_claim("iat").build();

    let claims = service.validate(&token)?;
    assert_eq!(claims.issued_at, None);
    assert_eq!(claims.subject_id, TEST_SUBJECT_ALICE_ID);
    Ok(())
}

#[test]
fn test_unknown_claims_are_ignored() -> Result<(), anyhow::Error> {
    let service = test_service()?;
    let token = ForgedTokenBuilder::new()
        .with_claim("role", json!("admin"))
        .with_claim("nbf", json!(0))
        .build();

    let claims = service.validate(&token)?;
    assert_eq!(claims.subject_label, TEST_SUBJECT_ALICE_LABEL);
    Ok(())
}

// -----------------------------------------------------------------------------
// Issued-at and Not-before
// -----------------------------------------------------------------------------

const TEN_YEARS_SECS: i64 = 10 * 365 * 24 * 3600;

#[test]
fn test_future_issued_at_is_rejected() -> Result<(), anyhow::Error> {
    let service = test_service()?;
    let token = ForgedTokenBuilder::new()
        .with_claim("iat", json!(chrono::Utc::now().timestamp() + TEN_YEARS_SECS))
        .build();

    assert_eq!(service.validate(&token), Err(TokenError::NotYetValid));
    Ok(())
}

#[test]
fn test_future_not_before_is_rejected() -> Result<(), anyhow::Error> {
    let service = test_service()?;
    let token = ForgedTokenBuilder::new()
        .with_claim("nbf", json!(chrono::Utc::now().timestamp() + TEN_YEARS_SECS))
        .build();

    assert_eq!(service.validate(&token), Err(TokenError::NotYetValid));
    Ok(())
}

#[test]
fn test_time_bounds_tolerate_clock_skew() -> Result<(), anyhow::Error> {
    let service = test_service()?.with_clock(FixedClock::at(TEST_EPOCH)?.shared());
    let at_skew = TEST_EPOCH + CLOCK_SKEW_SECONDS;
    let beyond_skew = at_skew + 1;

    for name in ["iat", "nbf"] {
        let token = ForgedTokenBuilder::new()
            .with_claim("exp", json!(TEST_EPOCH + 3600))
            .without_claim("iat")
            .with_claim(name, json!(at_skew))
            .build();
        assert!(
            service.validate(&token).is_ok(),
            "{name} within the skew should be accepted"
        );

        let token = ForgedTokenBuilder::new()
            .with_claim("exp", json!(TEST_EPOCH + 3600))
            .without_claim("iat")
            .with_claim(name, json!(beyond_skew))
            .build();
        assert_eq!(
            service.validate(&token),
            Err(TokenError::NotYetValid),
            "{name} beyond the skew should be rejected"
        );
    }
    Ok(())
}

#[test]
fn test_non_integer_not_before() -> Result<(), anyhow::Error> {
    let service = test_service()?;
    let token = ForgedTokenBuilder::new().with_claim("nbf", json!("later")).build();

    assert_eq!(service.validate(&token), Err(TokenError::ClaimsParse));
    Ok(())
}

#[test]
fn test_expiration_checked_before_not_before() -> Result<(), anyhow::Error> {
    let service = test_service()?;
    let token = ForgedTokenBuilder::new()
        .expires_in(-60)
        .with_claim("nbf", json!(chrono::Utc::now().timestamp() + TEN_YEARS_SECS))
        .build();

    assert_eq!(service.validate(&token), Err(TokenError::Expired));
    Ok(())
}
