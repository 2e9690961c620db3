pub mod api_response;
pub mod auth_dto;
pub mod booking_dto;
pub mod fleet_dto;
