//! Admin authentication
//!
//! Extractor that reads the Bearer token, verifies it and hands the admin
//! display name to the handler. The registry re-verifies that name on every
//! admin operation.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::header, http::request::Parts};

use crate::{
    state::AppState,
    utils::errors::AppError,
    utils::jwt::{extract_token_from_header, verify_token},
};

/// Admin injected into protected handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedAdmin {
    pub name: String,
    pub username: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Authorization token required".to_string()))?;

        let token = extract_token_from_header(auth_header)?;
        let claims = verify_token(token, &state.jwt)?;

        tracing::debug!("🔐 Admin '{}' authenticated", claims.sub);
        Ok(Self {
            name: claims.sub,
            username: claims.username,
        })
    }
}
