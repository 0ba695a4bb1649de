//! Integration tests for token issuance and the authorization gate
//!
//! # Key Test Scenarios
//!
//! - Valid token + known subject → principal returned, handler invoked once
//! - Missing `authorization` header → `MissingToken`, handler never invoked
//! - Token signed with another secret → `InvalidToken`
//! - Valid token, subject absent from the store → `UnknownSubject`
//! - Token older than the configured TTL → `ExpiredToken`; no TTL, no check

use apiforge::security::{
    AuthError, Claims, InMemoryUserStore, Principal, SecurityRequest, TokenGate,
};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use std::collections::HashMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

fn headers_with(token: &str) -> HashMap<String, String> {
    let mut headers = HashMap::new();
    headers.insert("authorization".to_string(), token.to_string());
    headers
}

fn store_with(id: &str, username: &str) -> InMemoryUserStore {
    let mut store = InMemoryUserStore::new();
    store.insert(Principal {
        id: id.to_string(),
        username: username.to_string(),
    });
    store
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

/// Sign a token with an arbitrary issuance timestamp.
fn token_with_iat(secret: &str, sub: &str, iat: u64) -> String {
    let claims = Claims {
        sub: sub.to_string(),
        iat,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

#[test]
fn test_issue_then_authorize_succeeds() {
    let gate = TokenGate::new("secret");
    let token = gate.issue_token("42").unwrap();
    let headers = headers_with(&token);
    let store = store_with("42", "ada");

    // The gate decides pass/fail and yields the principal; the caller
    // threads it into the handler.
    let mut invocations = 0;
    let principal = gate
        .authorize(&SecurityRequest { headers: &headers }, &store)
        .unwrap();
    let reply = {
        invocations += 1;
        format!("hello {} ({})", principal.username, principal.id)
    };
    assert_eq!(invocations, 1);
    assert_eq!(reply, "hello ada (42)");
}

#[test]
fn test_bearer_prefix_accepted() {
    let gate = TokenGate::new("secret");
    let token = gate.issue_token("42").unwrap();
    let headers = headers_with(&format!("Bearer {token}"));
    let store = store_with("42", "ada");

    let principal = gate
        .authorize(&SecurityRequest { headers: &headers }, &store)
        .unwrap();
    assert_eq!(principal.id, "42");
}

#[test]
fn test_missing_header_fails_without_invoking_handler() {
    let gate = TokenGate::new("secret");
    let headers = HashMap::new();
    let store = store_with("42", "ada");

    let mut invocations = 0;
    let result = gate.authorize(&SecurityRequest { headers: &headers }, &store);
    if result.is_ok() {
        invocations += 1;
    }
    assert_eq!(invocations, 0);
    let err = result.unwrap_err();
    assert!(matches!(err, AuthError::MissingToken));
    assert_eq!(err.status(), 401);
    assert_eq!(err.to_string(), "Token is missing");
}

#[test]
fn test_token_signed_with_other_secret_rejected() {
    let issuer = TokenGate::new("other-secret");
    let token = issuer.issue_token("42").unwrap();
    let gate = TokenGate::new("secret");
    let headers = headers_with(&token);
    let store = store_with("42", "ada");

    let err = gate
        .authorize(&SecurityRequest { headers: &headers }, &store)
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidToken(_)));
    assert_eq!(err.status(), 401);
}

#[test]
fn test_malformed_token_rejected() {
    let gate = TokenGate::new("secret");
    let headers = headers_with("not-a-jwt");
    let store = store_with("42", "ada");

    let err = gate
        .authorize(&SecurityRequest { headers: &headers }, &store)
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidToken(_)));
}

#[test]
fn test_unknown_subject_rejected() {
    let gate = TokenGate::new("secret");
    let token = gate.issue_token("42").unwrap();
    let headers = headers_with(&token);
    let store = InMemoryUserStore::new();

    let err = gate
        .authorize(&SecurityRequest { headers: &headers }, &store)
        .unwrap_err();
    assert!(matches!(err, AuthError::UnknownSubject));
    assert_eq!(err.status(), 403);
}

#[test]
fn test_stale_token_rejected_when_ttl_configured() {
    let gate = TokenGate::new("secret").token_ttl(Duration::from_secs(3600));
    let token = token_with_iat("secret", "42", unix_now() - 7200);
    let headers = headers_with(&token);
    let store = store_with("42", "ada");

    let err = gate
        .authorize(&SecurityRequest { headers: &headers }, &store)
        .unwrap_err();
    assert!(matches!(err, AuthError::ExpiredToken));
    assert_eq!(err.status(), 401);
}

#[test]
fn test_stale_token_accepted_without_ttl() {
    let gate = TokenGate::new("secret");
    let token = token_with_iat("secret", "42", unix_now() - 7200);
    let headers = headers_with(&token);
    let store = store_with("42", "ada");

    let principal = gate
        .authorize(&SecurityRequest { headers: &headers }, &store)
        .unwrap();
    assert_eq!(principal.id, "42");
}

#[test]
fn test_fresh_token_accepted_with_ttl() {
    let gate = TokenGate::new("secret").token_ttl(Duration::from_secs(3600));
    let token = gate.issue_token("42").unwrap();
    let headers = headers_with(&token);
    let store = store_with("42", "ada");

    assert!(gate
        .authorize(&SecurityRequest { headers: &headers }, &store)
        .is_ok());
}

#[test]
fn test_error_body_shape() {
    let body = AuthError::MissingToken.to_body();
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json["message"], "Token is missing");
    assert_eq!(json["data"], serde_json::Value::Null);
    assert_eq!(json["success"], false);

    let body = AuthError::UnknownSubject.to_body();
    assert_eq!(body.message, "Unknown subject");
    assert!(!body.success);
}

#[test]
fn test_issued_claims_roundtrip() {
    let gate = TokenGate::new("secret");
    let before = unix_now();
    let token = gate.issue_token("7").unwrap();
    let after = unix_now();

    let mut validation = jsonwebtoken::Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.required_spec_claims.clear();
    let data = jsonwebtoken::decode::<Claims>(
        &token,
        &jsonwebtoken::DecodingKey::from_secret(b"secret"),
        &validation,
    )
    .unwrap();
    assert_eq!(data.claims.sub, "7");
    assert!(data.claims.iat >= before && data.claims.iat <= after);
}
