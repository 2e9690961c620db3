use serde::Deserialize;
use validator::Validate;

// Request para crear una cuenta (admin, driver o client)
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub account_type: String,
    pub name: String,
    pub contact: String,
    pub email: String,
}

// Request para registrar un vehículo
#[derive(Debug, Deserialize)]
pub struct CreateVehicleRequest {
    pub registration_number: String,
    pub vehicle_type: String,
    pub fuel_per_km: f64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AssignVehicleRequest {
    #[validate(length(min = 1))]
    pub driver_name: String,

    #[validate(length(min = 1))]
    pub registration_number: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateVehicleRateRequest {
    pub fuel_per_km: f64,
}

#[derive(Debug, Deserialize)]
pub struct SetFuelPriceRequest {
    pub fuel_price: f64,
}
