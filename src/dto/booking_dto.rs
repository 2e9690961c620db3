use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

// Public transport request form
#[derive(Debug, Deserialize)]
pub struct SubmitRequestBody {
    pub client_name: String,
    pub client_contact: String,
    pub client_email: String,
    pub goods_description: String,
    pub pickup_district: String,
    pub dropoff_district: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ProcessRequestBody {
    #[validate(length(min = 1))]
    pub driver_name: String,

    #[serde(default)]
    pub spans_night: bool,
}

// Start/stop de un viaje por el conductor
#[derive(Debug, Deserialize, Validate)]
pub struct TripActionRequest {
    #[validate(length(min = 1))]
    pub driver_name: String,

    pub request_id: Uuid,
}
