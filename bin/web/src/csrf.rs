//! CSRF protection for the board's submission form
//!
//! Provides Cross-Site Request Forgery protection using session-based tokens.
//! The token lives in the session record itself, so it expires and is
//! deleted together with the session.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::{debug, error};
use uuid::Uuid;

/// Session key holding the issued token
pub const CSRF_TOKEN_KEY: &str = "csrf_token";

/// Get or create a CSRF token for the current session
pub async fn get_csrf_token(session: &Session) -> Result<String, StatusCode> {
    let existing = session.get::<String>(CSRF_TOKEN_KEY).await.map_err(|e| {
        error!("Failed to read CSRF token from session: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    if let Some(token) = existing {
        return Ok(token);
    }

    let token = Uuid::new_v4().to_string();
    debug!("Issuing new CSRF token");
    session
        .insert(CSRF_TOKEN_KEY, &token)
        .await
        .map_err(|e| {
            error!("Failed to store CSRF token in session: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(token)
}

/// Checks a submitted token against the one issued to this session
pub async fn validate_csrf_token(session: &Session, token: &str) -> bool {
    if token.is_empty() {
        return false;
    }
    match session.get::<String>(CSRF_TOKEN_KEY).await {
        Ok(Some(stored)) => stored == token,
        Ok(None) => false,
        Err(e) => {
            error!("Failed to read CSRF token from session: {:?}", e);
            false
        }
    }
}

/// Form data wrapper that includes CSRF token validation
#[derive(Debug, Deserialize, Serialize)]
pub struct CsrfProtectedForm<T> {
    #[serde(default)]
    pub csrf_token: String,
    #[serde(flatten)]
    pub data: T,
}
