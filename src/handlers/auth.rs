use crate::db::models::PublicUser;
use crate::error::TruckestError;
use crate::router::TruckestState;
use axum::{Json, extract::State};
use chrono::{Duration, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::info;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn validate_password(password: &str) -> Result<(), TruckestError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(TruckestError::BadRequest(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

async fn hash_password(password: String) -> Result<String, TruckestError> {
    // bcrypt is deliberately slow; keep it off the async workers
    let hash =
        tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt::DEFAULT_COST)).await??;
    Ok(hash)
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<TruckestState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<PublicUser>, TruckestError> {
    if req.name.trim().is_empty() {
        return Err(TruckestError::BadRequest("Name is required".to_string()));
    }
    if !req.email.contains('@') {
        return Err(TruckestError::BadRequest(
            "A valid email is required".to_string(),
        ));
    }
    validate_password(&req.password)?;

    let password_hash = hash_password(req.password).await?;
    // a duplicate email surfaces as a unique violation -> 409
    let user = state
        .db
        .users
        .create(req.name.trim(), req.email.trim(), &password_hash)
        .await?;
    info!(user_id = %user.id, "user registered");
    Ok(Json(user.into()))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<TruckestState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<PublicUser>, TruckestError> {
    // same rejection for unknown email and wrong password
    let Some(user) = state.db.users.find_by_email(req.email.trim()).await? else {
        return Err(TruckestError::InvalidCredentials);
    };
    let hash = user.password_hash.clone();
    let valid = tokio::task::spawn_blocking(move || bcrypt::verify(req.password, &hash)).await??;
    if !valid {
        return Err(TruckestError::InvalidCredentials);
    }
    Ok(Json(user.into()))
}

/// POST /api/auth/forgot-password
///
/// Always answers the same message so account existence cannot be probed.
pub async fn forgot_password(
    State(state): State<TruckestState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>, TruckestError> {
    if req.email.trim().is_empty() {
        return Err(TruckestError::BadRequest("Email is required".to_string()));
    }

    if let Some(user) = state.db.users.find_by_email(req.email.trim()).await? {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        let token = hex::encode(bytes);
        let expires_at = Utc::now() + Duration::minutes(state.cfg.reset_token_ttl_minutes);
        state
            .db
            .users
            .store_reset_token(&token, &user.id, expires_at)
            .await?;
        // no mailer is wired up; the token is recovered from the logs
        info!(email = %user.email, token, "password reset token issued");
    }

    Ok(Json(MessageResponse {
        message: "If an account with that email exists, a password reset link has been sent."
            .to_string(),
    }))
}

/// POST /api/auth/reset-password
pub async fn reset_password(
    State(state): State<TruckestState>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, TruckestError> {
    validate_password(&req.new_password)?;

    let token = state.db.users.find_reset_token(&req.token).await?;
    let token = match token {
        Some(t) if t.expires_at > Utc::now() => t,
        _ => {
            return Err(TruckestError::BadRequest(
                "Invalid or expired token".to_string(),
            ));
        }
    };

    let password_hash = hash_password(req.new_password).await?;
    state
        .db
        .users
        .apply_password_reset(&token.token, &token.user_id, &password_hash)
        .await?;

    Ok(Json(MessageResponse {
        message: "Password has been reset successfully".to_string(),
    }))
}
