//! Signed tokens for the two HTTP gates.
//!
//! Session tokens prove who the caller is. Anti-forgery tokens are issued to a
//! session and only verify against that same session's subject, so a token
//! lifted from one account cannot be replayed on another. The `purpose` claim
//! keeps the two kinds from standing in for each other.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::domain::AuthUser;
use super::errors::AuthError;

pub const SESSION_PURPOSE: &str = "session";
pub const ANTIFORGERY_PURPOSE: &str = "antiforgery";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub uid: String,
    pub purpose: String,
    pub jti: String,
    pub iat: usize,
    pub exp: usize,
}

#[derive(Clone)]
pub struct TokenIssuer {
    secret: String,
    session_ttl: Duration,
    antiforgery_ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: impl Into<String>, session_ttl: Duration, antiforgery_ttl: Duration) -> Self {
        Self { secret: secret.into(), session_ttl, antiforgery_ttl }
    }

    pub fn issue_session(&self, user: &AuthUser) -> Result<String, AuthError> {
        self.issue(&user.email, &user.id.to_string(), SESSION_PURPOSE, self.session_ttl)
    }

    pub fn verify_session(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = self.decode(token)?;
        if claims.purpose != SESSION_PURPOSE {
            return Err(AuthError::TokenError("not a session token".into()));
        }
        Ok(claims)
    }

    /// Anti-forgery token bound to the session's subject.
    pub fn issue_antiforgery(&self, session: &Claims) -> Result<String, AuthError> {
        self.issue(&session.sub, &session.uid, ANTIFORGERY_PURPOSE, self.antiforgery_ttl)
    }

    pub fn verify_antiforgery(&self, token: &str, session: &Claims) -> Result<(), AuthError> {
        let claims = self.decode(token)?;
        if claims.purpose != ANTIFORGERY_PURPOSE {
            return Err(AuthError::TokenError("not an anti-forgery token".into()));
        }
        if claims.uid != session.uid || claims.sub != session.sub {
            return Err(AuthError::TokenError("anti-forgery token issued to another caller".into()));
        }
        Ok(())
    }

    fn issue(&self, sub: &str, uid: &str, purpose: &str, ttl: Duration) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: sub.to_string(),
            uid: uid.to_string(),
            purpose: purpose.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp() as usize,
            exp: (now + ttl).timestamp() as usize,
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(self.secret.as_bytes()))
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }

    fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        let key = DecodingKey::from_secret(self.secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        decode::<Claims>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenError("token expired".into()),
                _ => AuthError::TokenError(e.to_string()),
            })
    }
}
