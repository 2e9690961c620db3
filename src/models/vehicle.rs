//! Vehicle model
//!
//! A vehicle carries a fuel consumption rate and a non-owning back-reference
//! (by id) to the one driver currently assigned. The link is only ever
//! written by [`assign_driver`] and [`Vehicle::release`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::account::{Account, Driver};
use crate::utils::errors::{conflict_error, AppResult};
use crate::utils::validation::{validate_not_empty, validate_positive_f64};

#[derive(Debug, Clone)]
pub struct Vehicle {
    id: Uuid,
    registration_number: String,
    vehicle_type: String,
    fuel_per_km: f64,
    assigned_driver: Option<Uuid>,
    created_at: DateTime<Utc>,
}

/// Snapshot of a vehicle for the API
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleDetails {
    pub vehicle_id: Uuid,
    pub registration_number: String,
    pub vehicle_type: String,
    pub fuel_per_km: f64,
    /// Name of the assigned driver
    pub assigned_driver: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    pub fn new(registration_number: &str, vehicle_type: &str, fuel_per_km: f64) -> AppResult<Self> {
        let registration_number = validate_not_empty("registration_number", registration_number)?;
        validate_positive_f64("fuel_per_km", fuel_per_km)?;

        Ok(Self {
            id: Uuid::new_v4(),
            registration_number,
            vehicle_type: vehicle_type.trim().to_string(),
            fuel_per_km,
            assigned_driver: None,
            created_at: Utc::now(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn registration_number(&self) -> &str {
        &self.registration_number
    }

    pub fn vehicle_type(&self) -> &str {
        &self.vehicle_type
    }

    pub fn fuel_per_km(&self) -> f64 {
        self.fuel_per_km
    }

    pub fn assigned_driver(&self) -> Option<Uuid> {
        self.assigned_driver
    }

    /// Change the consumption rate; trips already created keep theirs
    pub fn set_fuel_per_km(&mut self, fuel_per_km: f64) -> AppResult<()> {
        validate_positive_f64("fuel_per_km", fuel_per_km)?;
        self.fuel_per_km = fuel_per_km;
        Ok(())
    }

    /// Drop the driver back-reference
    pub(crate) fn release(&mut self) {
        self.assigned_driver = None;
    }

    pub fn details(&self, driver_name: Option<&str>) -> VehicleDetails {
        VehicleDetails {
            vehicle_id: self.id,
            registration_number: self.registration_number.clone(),
            vehicle_type: self.vehicle_type.clone(),
            fuel_per_km: self.fuel_per_km,
            assigned_driver: driver_name.map(str::to_string),
            created_at: self.created_at,
        }
    }
}

/// Outcome of a successful assignment
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub message: String,
    /// Vehicle the driver held before, now without a driver
    pub released_vehicle: Option<Uuid>,
}

/// Link a vehicle and a driver in both directions.
///
/// Re-assigning the same pair is a no-op success. Fails without touching
/// either side when the vehicle already belongs to someone else.
pub fn assign_driver(vehicle: &mut Vehicle, driver: &mut Driver) -> AppResult<Assignment> {
    if let Some(current) = vehicle.assigned_driver {
        if current != driver.id() {
            return Err(conflict_error(format!(
                "Vehicle {} is already assigned",
                vehicle.registration_number
            )));
        }
    }

    let released_vehicle = driver.vehicle_id().filter(|previous| *previous != vehicle.id);

    vehicle.assigned_driver = Some(driver.id());
    driver.set_vehicle_id(Some(vehicle.id));

    Ok(Assignment {
        message: format!(
            "Vehicle {} assigned to {}",
            vehicle.registration_number,
            driver.name()
        ),
        released_vehicle,
    })
}
