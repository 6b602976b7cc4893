//! Credential endpoints
//!
//! Registration stores the email/password pair; login is a two-column
//! equality check against the users table. Nothing beyond that equality
//! match is implemented.

use axum::{extract::State, Json};

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{Credentials, MessageResponse};

/// POST /api/register - Register a new user
pub async fn register(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<MessageResponse>> {
    state
        .repository()
        .create_user(&credentials.email, &credentials.password)?;

    tracing::info!("Registered user {}", credentials.email);
    Ok(Json(MessageResponse {
        message: "User registered successfully".to_string(),
    }))
}

/// POST /api/login - Check credentials
pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<MessageResponse>> {
    let ok = state
        .repository()
        .verify_user(&credentials.email, &credentials.password)?;

    if ok {
        Ok(Json(MessageResponse {
            message: "Login successful".to_string(),
        }))
    } else {
        Err(Error::Unauthorized)
    }
}
