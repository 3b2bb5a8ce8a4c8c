//! Authentication Handlers
//!
//! Handles user registration and login.

use std::time::Duration;

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::models::UserCreate;
use crate::db::repository::UserRepository;
use crate::utils::{AppError, AppResult, validation};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Minimal identity info echoed back on login
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Register handler
///
/// Persists a new credential pair; the password is stored as an Argon2
/// hash and never echoed back.
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let errors = validation::validate_registration(&req.username, &req.password);
    if !errors.is_empty() {
        return Err(AppError::FieldValidation(errors));
    }

    let repo = UserRepository::new(state.get_db());
    let user = repo
        .create(UserCreate {
            username: req.username,
            password: req.password,
        })
        .await?;

    tracing::info!(username = %user.username, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
        }),
    ))
}

/// Login handler
///
/// Authenticates user credentials and returns a JWT token. Unknown
/// usernames and wrong passwords produce the same error so the two
/// cases cannot be told apart.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let repo = UserRepository::new(state.get_db());
    let user = repo.find_by_username(&req.username).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let user = match user {
        Some(u) => u,
        None => {
            tracing::warn!(username = %req.username, "Login failed - user not found");
            return Err(AppError::InvalidCredentials);
        }
    };

    let password_valid = user
        .verify_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

    if !password_valid {
        tracing::warn!(username = %req.username, "Login failed - invalid credentials");
        return Err(AppError::InvalidCredentials);
    }

    let user_id = user.id.as_ref().map(|t| t.to_string()).unwrap_or_default();

    let token = state
        .get_jwt_service()
        .generate_token(&user_id, &user.username)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(user_id = %user_id, username = %user.username, "User logged in");

    Ok(Json(LoginResponse {
        token,
        user: UserInfo {
            id: user_id,
            username: user.username,
        },
    }))
}
