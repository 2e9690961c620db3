use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::booking_dto::TripActionRequest;
use crate::services::registry::{DriverDashboard, TripTransition};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_driver_router() -> Router<AppState> {
    Router::new()
        .route("/drivers/:driver_name/dashboard", get(driver_dashboard))
        .route("/trips/start", post(start_trip))
        .route("/trips/stop", post(stop_trip))
}

async fn driver_dashboard(
    State(state): State<AppState>,
    Path(driver_name): Path<String>,
) -> Result<Json<ApiResponse<DriverDashboard>>, AppError> {
    let registry = state.registry.read().await;
    let dashboard = registry.driver_dashboard(&driver_name)?;
    Ok(Json(ApiResponse::success(dashboard)))
}

async fn start_trip(
    State(state): State<AppState>,
    Json(request): Json<TripActionRequest>,
) -> Result<Json<ApiResponse<TripTransition>>, AppError> {
    request.validate()?;
    let mut registry = state.registry.write().await;
    let transition = registry.start_trip(&request.driver_name, request.request_id)?;
    let message = transition.message.clone();
    Ok(Json(ApiResponse::success_with_message(transition, message)))
}

async fn stop_trip(
    State(state): State<AppState>,
    Json(request): Json<TripActionRequest>,
) -> Result<Json<ApiResponse<TripTransition>>, AppError> {
    request.validate()?;
    let mut registry = state.registry.write().await;
    let transition = registry.stop_trip(&request.driver_name, request.request_id)?;
    let message = transition.message.clone();
    Ok(Json(ApiResponse::success_with_message(transition, message)))
}
