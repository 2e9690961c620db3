use serde::{Deserialize, Serialize};
use validator::Validate;

// Login for the bootstrap admin
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 100))]
    pub username: String,

    #[validate(length(min = 1, max = 100))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub admin_name: String,
    pub expires_in: u64,
}
