use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::booking_dto::ProcessRequestBody;
use crate::dto::fleet_dto::{
    AssignVehicleRequest, CreateAccountRequest, CreateVehicleRequest, SetFuelPriceRequest,
    UpdateVehicleRateRequest,
};
use crate::middleware::auth::AuthenticatedAdmin;
use crate::models::{AccountDetails, VehicleDetails};
use crate::services::registry::{
    AdminDashboard, AssignmentOutcome, FuelPriceUpdate, ProcessedRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/accounts", post(add_account))
        .route("/vehicles", post(add_vehicle))
        .route("/vehicles/assign", post(assign_vehicle))
        .route("/vehicles/:registration_number/rate", put(update_vehicle_rate))
        .route("/fuel-price", post(set_fuel_price))
        .route("/requests/:request_id/process", post(process_request))
}

async fn dashboard(
    State(state): State<AppState>,
    _admin: AuthenticatedAdmin,
) -> Result<Json<ApiResponse<AdminDashboard>>, AppError> {
    let registry = state.registry.read().await;
    Ok(Json(ApiResponse::success(registry.admin_dashboard())))
}

async fn add_account(
    State(state): State<AppState>,
    admin: AuthenticatedAdmin,
    Json(request): Json<CreateAccountRequest>,
) -> Result<Json<ApiResponse<AccountDetails>>, AppError> {
    let mut registry = state.registry.write().await;
    let details = registry.add_account(
        &admin.name,
        &request.account_type,
        &request.name,
        &request.contact,
        &request.email,
    )?;
    let message = format!(
        "{} account created for {}",
        details.role(),
        details.profile().name
    );
    Ok(Json(ApiResponse::success_with_message(details, message)))
}

async fn add_vehicle(
    State(state): State<AppState>,
    admin: AuthenticatedAdmin,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleDetails>>, AppError> {
    let mut registry = state.registry.write().await;
    let details = registry.add_vehicle(
        &admin.name,
        &request.registration_number,
        &request.vehicle_type,
        request.fuel_per_km,
    )?;
    let message = format!("Vehicle {} added", details.registration_number);
    Ok(Json(ApiResponse::success_with_message(details, message)))
}

async fn assign_vehicle(
    State(state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Json(request): Json<AssignVehicleRequest>,
) -> Result<Json<ApiResponse<AssignmentOutcome>>, AppError> {
    request.validate()?;
    let mut registry = state.registry.write().await;
    let outcome = registry.assign_vehicle(&request.driver_name, &request.registration_number)?;
    let message = outcome.message.clone();
    Ok(Json(ApiResponse::success_with_message(outcome, message)))
}

async fn update_vehicle_rate(
    State(state): State<AppState>,
    admin: AuthenticatedAdmin,
    Path(registration_number): Path<String>,
    Json(request): Json<UpdateVehicleRateRequest>,
) -> Result<Json<ApiResponse<VehicleDetails>>, AppError> {
    let mut registry = state.registry.write().await;
    let details =
        registry.update_vehicle_rate(&admin.name, &registration_number, request.fuel_per_km)?;
    Ok(Json(ApiResponse::success(details)))
}

async fn set_fuel_price(
    State(state): State<AppState>,
    admin: AuthenticatedAdmin,
    Json(request): Json<SetFuelPriceRequest>,
) -> Result<Json<ApiResponse<FuelPriceUpdate>>, AppError> {
    let mut registry = state.registry.write().await;
    let update = registry.set_fuel_price(&admin.name, request.fuel_price)?;
    let message = update.message.clone();
    Ok(Json(ApiResponse::success_with_message(update, message)))
}

async fn process_request(
    State(state): State<AppState>,
    admin: AuthenticatedAdmin,
    Path(request_id): Path<Uuid>,
    Json(request): Json<ProcessRequestBody>,
) -> Result<Json<ApiResponse<ProcessedRequest>>, AppError> {
    request.validate()?;
    let mut registry = state.registry.write().await;
    let processed = registry.process_request(
        &admin.name,
        request_id,
        &request.driver_name,
        request.spans_night,
    )?;
    let message = processed.confirmation.clone();
    Ok(Json(ApiResponse::success_with_message(processed, message)))
}
