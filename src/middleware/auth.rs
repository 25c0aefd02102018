// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JWT session tokens: issuance at login and verification middleware.

use crate::config::Config;
use crate::error::AppError;
use crate::models::User;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user email)
    pub sub: String,
    /// Unique token ID
    pub jti: String,
    /// Display name ("First Last")
    pub name: String,
    pub iss: String,
    pub aud: String,
    /// Issued at (Unix timestamp)
    pub iat: usize,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
}

/// Authenticated user extracted from JWT.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub email: String,
    pub name: String,
    pub token_id: String,
}

/// Middleware that requires valid JWT authentication.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AppError::Unauthorized)?;

    let claims = decode_jwt(token, &state.config)?;

    request.extensions_mut().insert(AuthUser {
        email: claims.sub,
        name: claims.name,
        token_id: claims.jti,
    });

    Ok(next.run(request).await)
}

/// Verify signature, issuer, audience and expiry; return the claims.
pub fn decode_jwt(token: &str, config: &Config) -> Result<Claims, AppError> {
    let key = DecodingKey::from_secret(&config.jwt_signing_key);

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.jwt_issuer]);
    validation.set_audience(&[&config.jwt_audience]);
    validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);
    validation.leeway = 0;

    decode::<Claims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| {
            tracing::debug!(error = %e, "Rejected session token");
            AppError::InvalidToken
        })
}

/// Create a JWT for a user session, issued now.
pub fn create_jwt(user: &User, config: &Config) -> anyhow::Result<String> {
    create_jwt_at(user, config, Utc::now())
}

/// Create a JWT as if issued at `issued_at`.
pub fn create_jwt_at(
    user: &User,
    config: &Config,
    issued_at: DateTime<Utc>,
) -> anyhow::Result<String> {
    let expires_at = issued_at + Duration::minutes(config.jwt_expiry_minutes);

    let claims = Claims {
        sub: user.email.clone(),
        jti: uuid::Uuid::new_v4().to_string(),
        name: user.display_name(),
        iss: config.jwt_issuer.clone(),
        aud: config.jwt_audience.clone(),
        iat: usize::try_from(issued_at.timestamp())?,
        exp: usize::try_from(expires_at.timestamp())?,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(&config.jwt_signing_key),
    )?)
}
