//! Bearer JWT authentication.
//!
//! Tokens are issued by the account service and signed with HS256; the
//! subject is the user's UUID.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::error::WebError;

const TOKEN_LIFETIME_SECS: u64 = 30 * 24 * 60 * 60;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User UUID
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
}

/// Authenticated user extracted from the token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
}

impl AuthUser {
    /// Rows owned by someone else are reported as missing.
    pub fn ensure_owns(&self, owner_id: Uuid) -> Result<(), WebError> {
        if self.user_id == owner_id {
            Ok(())
        } else {
            tracing::warn!(user_id = %self.user_id, "Access to another user's data refused");
            Err(WebError::NotFound)
        }
    }
}

#[derive(Clone)]
pub struct JwtAuth {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtAuth {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    pub fn verify(&self, token: &str) -> Result<AuthUser, WebError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected bearer token");
                WebError::Unauthorized
            })?;

        let user_id = Uuid::parse_str(&token_data.claims.sub).map_err(|_| WebError::Unauthorized)?;

        Ok(AuthUser { user_id })
    }
}

/// Middleware that requires a valid bearer token.
pub async fn require_auth(
    State(auth): State<JwtAuth>,
    mut request: Request,
    next: Next,
) -> Result<Response, WebError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(WebError::Unauthorized)?;

    let user = auth.verify(token.trim())?;
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Create a token the way the account service does.
pub fn create_jwt(user_id: Uuid, secret: &[u8]) -> anyhow::Result<String> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();

    let claims = Claims {
        sub: user_id.to_string(),
        iat: now as usize,
        exp: (now + TOKEN_LIFETIME_SECS) as usize,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret),
    )?)
}
