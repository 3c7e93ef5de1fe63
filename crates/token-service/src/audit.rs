//! Caller-side logging of token outcomes.
//!
//! Only non-sensitive fields are recorded: subject id, outcome and error
//! kind. Neither the secret nor the token text is ever passed to a log macro.

use token_service::{IdentityClaims, TokenError};
use tracing::{debug, info, warn};

pub fn record_issued(subject_id: &str) {
    info!(target: "token_tool", subject_id, outcome = "issued", "Token issued");
}

pub fn record_issue_failed(subject_id: &str, err: &TokenError) {
    warn!(
        target: "token_tool",
        subject_id,
        outcome = "failed",
        error_kind = err.kind(),
        "Token issuance failed"
    );
}

pub fn record_validation(result: &Result<IdentityClaims, TokenError>) {
    match result {
        Ok(claims) => info!(
            target: "token_tool",
            subject_id = %claims.subject_id,
            issuer = %claims.issuer,
            outcome = "accepted",
            "Token accepted"
        ),
        // Possible tampering or forgery.
        Err(err) if err.is_suspicious() => warn!(
            target: "token_tool",
            outcome = "rejected",
            error_kind = err.kind(),
            "Token rejected"
        ),
        Err(err @ (TokenError::Expired | TokenError::NotYetValid)) => info!(
            target: "token_tool",
            outcome = "rejected",
            error_kind = err.kind(),
            "Token rejected"
        ),
        Err(err) => debug!(
            target: "token_tool",
            outcome = "rejected",
            error_kind = err.kind(),
            "Token rejected"
        ),
    }
}
