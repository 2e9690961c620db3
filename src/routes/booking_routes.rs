use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use crate::dto::api_response::ApiResponse;
use crate::dto::booking_dto::SubmitRequestBody;
use crate::services::registry::{ClientDashboard, SubmissionReceipt};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_booking_router() -> Router<AppState> {
    Router::new()
        .route("/districts", get(list_districts))
        .route("/requests", post(submit_request))
        .route("/clients/:client_name/dashboard", get(client_dashboard))
}

async fn list_districts(
    State(state): State<AppState>,
) -> Json<ApiResponse<Vec<&'static str>>> {
    let registry = state.registry.read().await;
    Json(ApiResponse::success(registry.districts()))
}

async fn submit_request(
    State(state): State<AppState>,
    Json(body): Json<SubmitRequestBody>,
) -> Result<Json<ApiResponse<SubmissionReceipt>>, AppError> {
    let mut registry = state.registry.write().await;
    let receipt = registry.submit_request(
        &body.client_name,
        &body.client_contact,
        &body.client_email,
        &body.goods_description,
        &body.pickup_district,
        &body.dropoff_district,
    )?;
    let message = receipt.confirmation.clone();
    Ok(Json(ApiResponse::success_with_message(receipt, message)))
}

async fn client_dashboard(
    State(state): State<AppState>,
    Path(client_name): Path<String>,
) -> Result<Json<ApiResponse<ClientDashboard>>, AppError> {
    let registry = state.registry.read().await;
    let dashboard = registry.client_dashboard(&client_name)?;
    Ok(Json(ApiResponse::success(dashboard)))
}
