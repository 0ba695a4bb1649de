//! # Security Module
//!
//! Token issuance and the per-request authorization gate.
//!
//! ## Overview
//!
//! The gate is stateless: a request either carries a token that verifies
//! against the shared secret and resolves to a known subject, or it is
//! rejected with a typed [`AuthError`]. There are no intermediate states and
//! the decision is atomic per request.
//!
//! Validation follows this flow:
//!
//! 1. Extract the token from the `authorization` header (raw value or
//!    `Bearer <token>`)
//! 2. Decode and verify the HS256 signature against the shared secret
//! 3. Reject tokens whose `iat` is older than the configured TTL (if any)
//! 4. Resolve the `sub` claim to a [`Principal`] through a [`UserStore`]
//!
//! On success the resolved [`Principal`] is returned to the caller, which
//! threads it into the downstream handler explicitly. The gate never decides
//! more than pass/fail plus identity.
//!
//! ## Example
//!
//! ```rust
//! use apiforge::security::{InMemoryUserStore, Principal, SecurityRequest, TokenGate};
//! use std::collections::HashMap;
//!
//! # fn main() -> anyhow::Result<()> {
//! let gate = TokenGate::new("secret");
//! let token = gate.issue_token("42")?;
//!
//! let mut store = InMemoryUserStore::new();
//! store.insert(Principal { id: "42".to_string(), username: "ada".to_string() });
//!
//! let mut headers = HashMap::new();
//! headers.insert("authorization".to_string(), format!("Bearer {token}"));
//! let principal = gate.authorize(&SecurityRequest { headers: &headers }, &store)?;
//! assert_eq!(principal.id, "42");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error responses
//!
//! Every failure maps to a structured body `{message, data, success}` and a
//! status code: 401 for missing, invalid, or expired tokens, 403 for a token
//! whose subject has no matching user.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Claims embedded in an issued token.
///
/// No expiry claim is embedded; freshness is judged from `iat` at
/// verification time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject identifier
    pub sub: String,
    /// Issuance timestamp (unix seconds)
    pub iat: u64,
}

/// The authenticated user resolved from a token's subject claim.
///
/// Read-only for the duration of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Subject identifier, matches the token's `sub` claim
    pub id: String,
    /// Display name from the user store
    pub username: String,
}

/// Lookup of token subjects in the backing user store.
///
/// Implemented over whatever persistence layer owns the user table; the gate
/// performs exactly one lookup per request.
pub trait UserStore {
    /// Resolve a subject identifier to a principal, or `None` when no user
    /// matches.
    fn find_subject(&self, subject_id: &str) -> Option<Principal>;
}

/// Simple map-backed [`UserStore`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserStore {
    users: HashMap<String, Principal>,
}

impl InMemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a principal, keyed by its id.
    pub fn insert(&mut self, principal: Principal) {
        self.users.insert(principal.id.clone(), principal);
    }
}

impl UserStore for InMemoryUserStore {
    fn find_subject(&self, subject_id: &str) -> Option<Principal> {
        self.users.get(subject_id).cloned()
    }
}

/// Request context for authorization.
///
/// Header names are expected lowercased, as the HTTP layer normalizes them.
pub struct SecurityRequest<'a> {
    /// HTTP headers from the request
    pub headers: &'a HashMap<String, String>,
}

/// Typed authorization failures.
#[derive(Debug)]
pub enum AuthError {
    /// The request carries no `authorization` header
    MissingToken,
    /// Signature or structural verification failed
    InvalidToken(String),
    /// The token's `iat` is older than the configured TTL
    ExpiredToken,
    /// The token verified but its subject has no matching user
    UnknownSubject,
}

impl AuthError {
    /// HTTP status code for this failure.
    ///
    /// Missing, invalid, and expired tokens are 401 (the credential itself is
    /// unusable); an unknown subject is 403 (well-formed credential, no
    /// matching account).
    pub fn status(&self) -> u16 {
        match self {
            AuthError::MissingToken | AuthError::InvalidToken(_) | AuthError::ExpiredToken => 401,
            AuthError::UnknownSubject => 403,
        }
    }

    /// Structured response body for this failure.
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            message: self.to_string(),
            data: serde_json::Value::Null,
            success: false,
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::MissingToken => write!(f, "Token is missing"),
            AuthError::InvalidToken(reason) => write!(f, "Invalid token: {reason}"),
            AuthError::ExpiredToken => write!(f, "Expired token"),
            AuthError::UnknownSubject => write!(f, "Unknown subject"),
        }
    }
}

impl std::error::Error for AuthError {}

/// Structured error body returned for rejected requests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// Human-readable failure description
    pub message: String,
    /// Always null for authorization failures
    pub data: serde_json::Value,
    /// Always false for authorization failures
    pub success: bool,
}

/// Token issuance and verification against a shared secret.
pub struct TokenGate {
    secret: String,
    token_ttl: Option<Duration>,
}

impl TokenGate {
    /// Create a gate with the given shared secret and no token TTL.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            token_ttl: None,
        }
    }

    /// Configure the maximum accepted token age.
    pub fn token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = Some(ttl);
        self
    }

    /// Sign a token for an already-authenticated subject.
    ///
    /// Embeds `{sub, iat}` and nothing else; pure function of the inputs and
    /// the shared secret. Callers persist the token themselves if they want
    /// to reuse it across requests.
    pub fn issue_token(&self, subject_id: &str) -> anyhow::Result<String> {
        let claims = Claims {
            sub: subject_id.to_string(),
            iat: unix_now(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;
        Ok(token)
    }

    /// Authorize a request, resolving its token to a [`Principal`].
    ///
    /// Performs exactly one store lookup. The caller passes the returned
    /// principal to the wrapped operation; the gate itself injects nothing.
    pub fn authorize(
        &self,
        req: &SecurityRequest,
        store: &dyn UserStore,
    ) -> Result<Principal, AuthError> {
        let token = self.extract_token(req).ok_or(AuthError::MissingToken)?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| {
            debug!(error = %e, "token verification failed");
            AuthError::InvalidToken(e.to_string())
        })?;

        if let Some(ttl) = self.token_ttl {
            let age = unix_now().saturating_sub(data.claims.iat);
            if age > ttl.as_secs() {
                debug!(age, ttl = ttl.as_secs(), "token past ttl");
                return Err(AuthError::ExpiredToken);
            }
        }

        store
            .find_subject(&data.claims.sub)
            .ok_or(AuthError::UnknownSubject)
    }

    fn extract_token<'a>(&self, req: &'a SecurityRequest) -> Option<&'a str> {
        req.headers
            .get("authorization")
            .map(|h| h.strip_prefix("Bearer ").unwrap_or(h))
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
