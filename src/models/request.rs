//! Client request model
//!
//! A transport request between two districts. Status only ever moves
//! forward: Pending → Assigned → Completed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::models::district::{self, Coordinates};
use crate::utils::errors::{invalid_state_error, validation_error, AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RequestStatus {
    Pending,
    Assigned,
    Completed,
}

impl RequestStatus {
    /// The only status this one may advance to
    pub fn next(self) -> Option<RequestStatus> {
        match self {
            RequestStatus::Pending => Some(RequestStatus::Assigned),
            RequestStatus::Assigned => Some(RequestStatus::Completed),
            RequestStatus::Completed => None,
        }
    }
}

impl FromStr for RequestStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(RequestStatus::Pending),
            "Assigned" => Ok(RequestStatus::Assigned),
            "Completed" => Ok(RequestStatus::Completed),
            _ => Err(validation_error("status", "Invalid status")),
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Assigned => "Assigned",
            RequestStatus::Completed => "Completed",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone)]
pub struct ClientRequest {
    id: Uuid,
    client_id: Uuid,
    goods_description: String,
    pickup_district: String,
    dropoff_district: String,
    pickup_location: Coordinates,
    dropoff_location: Coordinates,
    status: RequestStatus,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestDetails {
    pub request_id: Uuid,
    pub client: String,
    pub goods_description: String,
    pub pickup_district: String,
    pub dropoff_district: String,
    pub pickup_location: Coordinates,
    pub dropoff_location: Coordinates,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

impl ClientRequest {
    /// Both districts must exist in the directory
    pub fn new(
        client_id: Uuid,
        goods_description: &str,
        pickup_district: &str,
        dropoff_district: &str,
    ) -> AppResult<Self> {
        let pickup_location = district::resolve("pickup_district", pickup_district)?;
        let dropoff_location = district::resolve("dropoff_district", dropoff_district)?;

        Ok(Self {
            id: Uuid::new_v4(),
            client_id,
            goods_description: goods_description.trim().to_string(),
            pickup_district: pickup_district.to_string(),
            dropoff_district: dropoff_district.to_string(),
            pickup_location,
            dropoff_location,
            status: RequestStatus::Pending,
            created_at: Utc::now(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn client_id(&self) -> Uuid {
        self.client_id
    }

    pub fn goods_description(&self) -> &str {
        &self.goods_description
    }

    pub fn pickup_district(&self) -> &str {
        &self.pickup_district
    }

    pub fn dropoff_district(&self) -> &str {
        &self.dropoff_district
    }

    pub fn pickup_location(&self) -> Coordinates {
        self.pickup_location
    }

    pub fn dropoff_location(&self) -> Coordinates {
        self.dropoff_location
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    /// Move to `target`, which must be the immediate successor
    pub fn advance_to(&mut self, target: RequestStatus) -> AppResult<()> {
        if self.status.next() != Some(target) {
            return Err(invalid_state_error(format!(
                "Request status cannot move from {} to {}",
                self.status, target
            )));
        }
        log::debug!("📦 Request {}: {} -> {}", self.id, self.status, target);
        self.status = target;
        Ok(())
    }

    /// Parse a raw status value, then advance
    pub fn set_status(&mut self, value: &str) -> AppResult<()> {
        let target = value.parse::<RequestStatus>()?;
        self.advance_to(target)
    }

    pub fn confirmation(&self, client_name: &str) -> String {
        format!(
            "Request {} received for {}. Goods: {}. Status: {}",
            self.id, client_name, self.goods_description, self.status
        )
    }

    pub fn details(&self, client_name: &str) -> RequestDetails {
        RequestDetails {
            request_id: self.id,
            client: client_name.to_string(),
            goods_description: self.goods_description.clone(),
            pickup_district: self.pickup_district.clone(),
            dropoff_district: self.dropoff_district.clone(),
            pickup_location: self.pickup_location,
            dropoff_location: self.dropoff_location,
            status: self.status,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::ErrorKind;

    fn request() -> ClientRequest {
        ClientRequest::new(Uuid::new_v4(), "Cement bags", "Kampala", "Jinja").unwrap()
    }

    #[test]
    fn test_new_resolves_coordinates() {
        let request = request();
        assert_eq!(request.status(), RequestStatus::Pending);
        assert_eq!(request.pickup_location(), Coordinates::new(0.3476, 32.5825));
        assert_eq!(request.dropoff_location(), Coordinates::new(0.4244, 33.2041));
    }

    #[test]
    fn test_unknown_district_rejected() {
        let err = ClientRequest::new(Uuid::new_v4(), "Sugar", "Kampala", "jinja").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.field(), Some("dropoff_district"));

        let err = ClientRequest::new(Uuid::new_v4(), "Sugar", "Nairobi", "Jinja").unwrap_err();
        assert_eq!(err.field(), Some("pickup_district"));
    }

    #[test]
    fn test_status_moves_forward_only() {
        let mut request = request();
        assert!(request.advance_to(RequestStatus::Completed).is_err());
        assert!(request.advance_to(RequestStatus::Pending).is_err());

        request.advance_to(RequestStatus::Assigned).unwrap();
        assert!(request.advance_to(RequestStatus::Pending).is_err());
        assert!(request.advance_to(RequestStatus::Assigned).is_err());

        request.advance_to(RequestStatus::Completed).unwrap();
        let err = request.advance_to(RequestStatus::Completed).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert_eq!(request.status(), RequestStatus::Completed);
    }

    #[test]
    fn test_set_status_rejects_unknown_values() {
        let mut request = request();
        let err = request.set_status("Shipped").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.message(), "Invalid status");
        assert_eq!(request.status(), RequestStatus::Pending);

        request.set_status("Assigned").unwrap();
        assert_eq!(request.status(), RequestStatus::Assigned);
    }

    #[test]
    fn test_confirmation_text() {
        let request = request();
        assert_eq!(
            request.confirmation("Alice"),
            format!(
                "Request {} received for Alice. Goods: Cement bags. Status: Pending",
                request.id()
            )
        );
    }
}
