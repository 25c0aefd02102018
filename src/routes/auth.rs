// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Email/password signup and login routes.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use super::{body_or_default, non_blank, MessageResponse};
use crate::error::{AppError, Result};
use crate::middleware::auth::create_jwt;
use crate::models::{now_rfc3339, User};
use crate::services::password::{dummy_hash, hash_password, verify_password};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
}

/// Signup body. Missing keys are treated as blank.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SignupRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LoginResponse {
    pub token: String,
}

/// Register a new user.
async fn signup(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<SignupRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let request = body_or_default(payload);

    let (Some(first_name), Some(last_name), Some(email), Some(_)) = (
        non_blank(&request.first_name),
        non_blank(&request.last_name),
        non_blank(&request.email),
        non_blank(&request.password),
    ) else {
        return Err(AppError::BadRequest("All fields are required.".to_string()));
    };

    // Check-then-insert is not atomic; concurrent signups can both pass.
    if state.db.find_user_by_email(email).await?.is_some() {
        tracing::info!("Signup rejected: email already registered");
        return Err(AppError::Conflict("Email already registered.".to_string()));
    }

    // The raw password is hashed as submitted; only the blank check trims it.
    let raw_password = request.password.clone().unwrap_or_default();
    let iterations = state.config.password_iterations;
    let password_hash =
        tokio::task::spawn_blocking(move || hash_password(&raw_password, iterations))
            .await
            .map_err(|e| AppError::Internal(e.into()))?
            .map_err(|e| AppError::Internal(e.into()))?;

    let user = state
        .db
        .create_user(User {
            id: String::new(),
            firstname: first_name.to_string(),
            lastname: last_name.to_string(),
            email: email.to_string(),
            password_hash,
            created_at: now_rfc3339(),
        })
        .await?;

    tracing::info!(user_id = %user.id, "User signed up");

    Ok(Json(MessageResponse::new(
        "Signup successful! Please log in.",
    )))
}

/// Exchange email and password for a session token.
async fn login(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>> {
    let request = body_or_default(payload);

    let (Some(email), Some(_)) = (non_blank(&request.email), non_blank(&request.password)) else {
        return Err(AppError::BadRequest(
            "Email and password are required.".to_string(),
        ));
    };

    // Unknown email and wrong password must be indistinguishable to the caller,
    // in body and in hashing cost.
    let user = state.db.find_user_by_email(email).await?;
    let stored_hash = user
        .as_ref()
        .map(|u| u.password_hash.clone())
        .unwrap_or_else(|| dummy_hash(state.config.password_iterations));

    let raw_password = request.password.clone().unwrap_or_default();
    let verified =
        tokio::task::spawn_blocking(move || verify_password(&raw_password, &stored_hash))
            .await
            .map_err(|e| AppError::Internal(e.into()))?;

    let Some(user) = user.filter(|_| verified) else {
        tracing::info!("Login rejected");
        return Err(AppError::InvalidCredentials);
    };

    let token = create_jwt(&user, &state.config)?;
    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(LoginResponse { token }))
}
