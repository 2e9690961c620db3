//! Trip model
//!
//! A trip is the execution of one request by one driver. Distance is
//! computed once at construction, the fuel rate is locked from the driver's
//! vehicle at that moment, and the fuel price is locked once afterwards.
//!
//! Status: Assigned → Started → Completed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::models::account::{Account, Driver};
use crate::models::request::{ClientRequest, RequestStatus};
use crate::models::vehicle::Vehicle;
use crate::services::distance_service::DistanceCalculator;
use crate::utils::errors::{
    conflict_error, invalid_state_error, validation_error, AppError, AppResult,
};
use crate::utils::validation::validate_positive_f64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TripStatus {
    Assigned,
    Started,
    Completed,
}

impl FromStr for TripStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Assigned" => Ok(TripStatus::Assigned),
            "Started" => Ok(TripStatus::Started),
            "Completed" => Ok(TripStatus::Completed),
            _ => Err(validation_error("status", "Invalid trip status")),
        }
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TripStatus::Assigned => "Assigned",
            TripStatus::Started => "Started",
            TripStatus::Completed => "Completed",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone)]
pub struct Trip {
    id: Uuid,
    request_id: Uuid,
    driver_id: Uuid,
    spans_night: bool,
    distance: f64,
    distance_unavailable: bool,
    fuel_per_km: f64,
    fuel_price: Option<f64>,
    total_cost: Option<f64>,
    status: TripStatus,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripDetails {
    pub trip_id: Uuid,
    pub request_id: Uuid,
    pub driver: String,
    pub start_district: String,
    pub end_district: String,
    pub distance: f64,
    /// Set when the distance calculator failed and `distance` fell back to 0
    pub distance_unavailable: bool,
    pub fuel_price: Option<f64>,
    pub fuel_per_km: f64,
    pub total_cost: Option<f64>,
    pub spans_night: bool,
    pub status: TripStatus,
    pub created_at: DateTime<Utc>,
}

impl Trip {
    /// `vehicle` is the driver's vehicle at this moment; its rate is copied.
    pub fn new(
        request: &ClientRequest,
        driver: &Driver,
        vehicle: Option<&Vehicle>,
        spans_night: bool,
        calculator: &dyn DistanceCalculator,
    ) -> Self {
        let start_location = request.pickup_location();
        let end_location = request.dropoff_location();

        log::debug!(
            "📏 Calculating distance between {:?} and {:?}",
            start_location,
            end_location
        );
        let (distance, distance_unavailable) =
            match calculator.distance_km(start_location, end_location) {
                Ok(km) => {
                    log::debug!("📏 Distance calculated: {} km", km);
                    (km, false)
                }
                Err(e) => {
                    log::error!("❌ Distance calculation error: {}, falling back to 0", e);
                    (0.0, true)
                }
            };

        Self {
            id: Uuid::new_v4(),
            request_id: request.id(),
            driver_id: driver.id(),
            spans_night,
            distance,
            distance_unavailable,
            fuel_per_km: vehicle.map(Vehicle::fuel_per_km).unwrap_or(0.0),
            fuel_price: None,
            total_cost: None,
            status: TripStatus::Assigned,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn driver_id(&self) -> Uuid {
        self.driver_id
    }

    pub fn spans_night(&self) -> bool {
        self.spans_night
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn distance_unavailable(&self) -> bool {
        self.distance_unavailable
    }

    pub fn fuel_per_km(&self) -> f64 {
        self.fuel_per_km
    }

    pub fn fuel_price(&self) -> Option<f64> {
        self.fuel_price
    }

    pub fn total_cost(&self) -> Option<f64> {
        self.total_cost
    }

    pub fn status(&self) -> TripStatus {
        self.status
    }

    /// Lock the fuel price and derive the total cost. Allowed once.
    pub fn set_fuel_price(&mut self, fuel_price: f64) -> AppResult<f64> {
        validate_positive_f64("fuel_price", fuel_price)?;
        if self.fuel_price.is_some() {
            return Err(conflict_error(format!(
                "Fuel price already locked for trip {}",
                self.request_id
            )));
        }
        self.fuel_price = Some(fuel_price);
        let cost = self.calculate_cost();
        self.total_cost = Some(cost);
        Ok(cost)
    }

    /// distance × fuel_per_km × fuel_price, or 0 while price or rate is missing
    pub fn calculate_cost(&self) -> f64 {
        let fuel_price = self.fuel_price.unwrap_or(0.0);
        if fuel_price == 0.0 || self.fuel_per_km == 0.0 {
            log::warn!(
                "⚠️ Cannot calculate cost: fuel_price={:?}, fuel_per_km={}",
                self.fuel_price,
                self.fuel_per_km
            );
            return 0.0;
        }
        let cost = self.distance * self.fuel_per_km * fuel_price;
        log::debug!(
            "💰 Cost calculated: distance={} km, fuel_per_km={}, fuel_price={}, cost={} UGX",
            self.distance,
            self.fuel_per_km,
            fuel_price,
            cost
        );
        cost
    }

    pub fn start_trip(&mut self, driver_name: &str) -> AppResult<String> {
        if self.status != TripStatus::Assigned {
            return Err(invalid_state_error(
                "Trip can only be started from Assigned status",
            ));
        }
        self.status = TripStatus::Started;
        Ok(format!("Trip {} started by {}", self.request_id, driver_name))
    }

    /// Complete the trip and its request together
    pub fn stop_trip(&mut self, request: &mut ClientRequest, driver_name: &str) -> AppResult<String> {
        if self.status != TripStatus::Started {
            return Err(invalid_state_error(
                "Trip can only be stopped from Started status",
            ));
        }
        if request.id() != self.request_id {
            return Err(AppError::Internal(format!(
                "Request {} does not belong to trip {}",
                request.id(),
                self.id
            )));
        }
        request.advance_to(RequestStatus::Completed)?;
        self.status = TripStatus::Completed;
        Ok(format!("Trip {} completed by {}", self.request_id, driver_name))
    }

    pub fn details(&self, start_district: &str, end_district: &str, driver_name: &str) -> TripDetails {
        TripDetails {
            trip_id: self.id,
            request_id: self.request_id,
            driver: driver_name.to_string(),
            start_district: start_district.to_string(),
            end_district: end_district.to_string(),
            distance: self.distance,
            distance_unavailable: self.distance_unavailable,
            fuel_price: self.fuel_price,
            fuel_per_km: self.fuel_per_km,
            total_cost: self.total_cost,
            spans_night: self.spans_night,
            status: self.status,
            created_at: self.created_at,
        }
    }
}
