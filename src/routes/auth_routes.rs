use axum::{extract::State, routing::post, Json, Router};
use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::generate_token;

pub fn create_auth_router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    request.validate()?;

    let config = &state.config;
    if request.username != config.admin_username || request.password != config.admin_password {
        tracing::debug!("🔒 Login failed for '{}'", request.username);
        return Err(AppError::Unauthorized(
            "Invalid username or password".to_string(),
        ));
    }

    let token = generate_token(&config.admin_display_name, &request.username, &state.jwt)?;
    tracing::info!("🔓 Admin logged in: {}", config.admin_display_name);

    Ok(Json(ApiResponse::success_with_message(
        LoginResponse {
            token,
            admin_name: config.admin_display_name.clone(),
            expires_in: state.jwt.expiration,
        },
        "Login successful".to_string(),
    )))
}
