//! Account model
//!
//! Admins, drivers and clients share a validated [`AccountProfile`]; the
//! variant-specific state (vehicle link, trips, allowances, trip cost)
//! lives only in the variant that needs it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::models::trip::Trip;
use crate::utils::errors::{conflict_error, validation_error, AppError, AppResult};
use crate::utils::validation::{validate_contact, validate_email, validate_not_empty};

/// Fixed allowance paid per trip, in UGX
pub const DAY_ALLOWANCE: u64 = 10_000;
/// Extra allowance paid when a trip spans the night, in UGX
pub const NIGHT_ALLOWANCE: u64 = 15_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    Admin,
    Driver,
    Client,
}

impl FromStr for AccountRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(AccountRole::Admin),
            "driver" => Ok(AccountRole::Driver),
            "client" => Ok(AccountRole::Client),
            other => Err(validation_error(
                "account_type",
                format!("Unknown account type '{}'", other),
            )),
        }
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AccountRole::Admin => "Admin",
            AccountRole::Driver => "Driver",
            AccountRole::Client => "Client",
        };
        f.write_str(label)
    }
}

/// Identity fields common to every account. Setters re-validate on each write.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountProfile {
    id: Uuid,
    name: String,
    contact: String,
    email: String,
}

impl AccountProfile {
    pub fn new(name: &str, contact: &str, email: &str) -> AppResult<Self> {
        let name = validate_not_empty("name", name)?;
        validate_contact(contact)?;
        validate_email(email)?;

        Ok(Self {
            id: Uuid::new_v4(),
            name,
            contact: contact.to_string(),
            email: email.to_string(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contact(&self) -> &str {
        &self.contact
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn set_name(&mut self, value: &str) -> AppResult<()> {
        self.name = validate_not_empty("name", value)?;
        Ok(())
    }

    pub fn set_contact(&mut self, value: &str) -> AppResult<()> {
        validate_contact(value)?;
        self.contact = value.to_string();
        Ok(())
    }

    pub fn set_email(&mut self, value: &str) -> AppResult<()> {
        validate_email(value)?;
        self.email = value.to_string();
        Ok(())
    }

    fn details(&self) -> ProfileDetails {
        ProfileDetails {
            account_id: self.id,
            name: self.name.clone(),
            contact: self.contact.clone(),
            email: self.email.clone(),
        }
    }
}

/// Capability shared by all account variants
pub trait Account {
    fn profile(&self) -> &AccountProfile;
    fn profile_mut(&mut self) -> &mut AccountProfile;
    fn role(&self) -> AccountRole;

    fn id(&self) -> Uuid {
        self.profile().id()
    }

    fn name(&self) -> &str {
        self.profile().name()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileDetails {
    pub account_id: Uuid,
    pub name: String,
    pub contact: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminDetails {
    #[serde(flatten)]
    pub profile: ProfileDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverDetails {
    #[serde(flatten)]
    pub profile: ProfileDetails,
    /// Registration number of the assigned vehicle
    pub vehicle: Option<String>,
    pub trip_count: usize,
    pub day_allowance: u64,
    pub night_allowance: u64,
    pub total_allowance: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientDetails {
    #[serde(flatten)]
    pub profile: ProfileDetails,
    pub client_number: Uuid,
    pub trip_count: usize,
    pub total_trip_cost: f64,
}

/// Point-in-time snapshot of any account
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum AccountDetails {
    Admin(AdminDetails),
    Driver(DriverDetails),
    Client(ClientDetails),
}

impl AccountDetails {
    pub fn profile(&self) -> &ProfileDetails {
        match self {
            AccountDetails::Admin(d) => &d.profile,
            AccountDetails::Driver(d) => &d.profile,
            AccountDetails::Client(d) => &d.profile,
        }
    }

    pub fn role(&self) -> AccountRole {
        match self {
            AccountDetails::Admin(_) => AccountRole::Admin,
            AccountDetails::Driver(_) => AccountRole::Driver,
            AccountDetails::Client(_) => AccountRole::Client,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Admin {
    profile: AccountProfile,
}

impl Admin {
    pub fn new(name: &str, contact: &str, email: &str) -> AppResult<Self> {
        Ok(Self {
            profile: AccountProfile::new(name, contact, email)?,
        })
    }

    pub fn details(&self) -> AdminDetails {
        AdminDetails {
            profile: self.profile.details(),
        }
    }
}

impl Account for Admin {
    fn profile(&self) -> &AccountProfile {
        &self.profile
    }

    fn profile_mut(&mut self) -> &mut AccountProfile {
        &mut self.profile
    }

    fn role(&self) -> AccountRole {
        AccountRole::Admin
    }
}

/// A trip as seen from the driver's side: only what the allowance needs
#[derive(Debug, Clone, Copy, PartialEq)]
struct AssignedTrip {
    trip_id: Uuid,
    spans_night: bool,
}

#[derive(Debug, Clone)]
pub struct Driver {
    profile: AccountProfile,
    vehicle_id: Option<Uuid>,
    trips: Vec<AssignedTrip>,
}

impl Driver {
    pub fn new(name: &str, contact: &str, email: &str) -> AppResult<Self> {
        Ok(Self {
            profile: AccountProfile::new(name, contact, email)?,
            vehicle_id: None,
            trips: Vec::new(),
        })
    }

    pub fn vehicle_id(&self) -> Option<Uuid> {
        self.vehicle_id
    }

    /// Only the vehicle assignment path may touch this link
    pub(crate) fn set_vehicle_id(&mut self, vehicle_id: Option<Uuid>) {
        self.vehicle_id = vehicle_id;
    }

    pub fn trip_ids(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.trips.iter().map(|t| t.trip_id)
    }

    pub fn trip_count(&self) -> usize {
        self.trips.len()
    }

    pub fn day_allowance(&self) -> u64 {
        DAY_ALLOWANCE
    }

    pub fn night_allowance(&self) -> u64 {
        NIGHT_ALLOWANCE
    }

    /// Record a trip; the driver must hold a vehicle
    pub fn assign_trip(&mut self, trip: &Trip) -> AppResult<String> {
        if self.vehicle_id.is_none() {
            return Err(conflict_error(format!(
                "Driver {} has no assigned vehicle",
                self.profile.name()
            )));
        }
        self.trips.push(AssignedTrip {
            trip_id: trip.id(),
            spans_night: trip.spans_night(),
        });
        Ok(format!("Trip assigned to {}", self.profile.name()))
    }

    /// Sum of per-trip allowances, recomputed on every call
    pub fn total_allowance(&self) -> u64 {
        self.trips
            .iter()
            .map(|trip| {
                DAY_ALLOWANCE
                    + if trip.spans_night {
                        NIGHT_ALLOWANCE
                    } else {
                        0
                    }
            })
            .sum()
    }

    pub fn details(&self, vehicle_registration: Option<&str>) -> DriverDetails {
        DriverDetails {
            profile: self.profile.details(),
            vehicle: vehicle_registration.map(str::to_string),
            trip_count: self.trips.len(),
            day_allowance: DAY_ALLOWANCE,
            night_allowance: NIGHT_ALLOWANCE,
            total_allowance: self.total_allowance(),
        }
    }
}

impl Account for Driver {
    fn profile(&self) -> &AccountProfile {
        &self.profile
    }

    fn profile_mut(&mut self) -> &mut AccountProfile {
        &mut self.profile
    }

    fn role(&self) -> AccountRole {
        AccountRole::Driver
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    profile: AccountProfile,
    client_number: Uuid,
    trips: Vec<Uuid>,
    total_trip_cost: f64,
}

impl Client {
    pub fn new(name: &str, contact: &str, email: &str) -> AppResult<Self> {
        Ok(Self {
            profile: AccountProfile::new(name, contact, email)?,
            client_number: Uuid::new_v4(),
            trips: Vec::new(),
            total_trip_cost: 0.0,
        })
    }

    pub fn client_number(&self) -> Uuid {
        self.client_number
    }

    pub fn trip_ids(&self) -> &[Uuid] {
        &self.trips
    }

    pub fn total_trip_cost(&self) -> f64 {
        self.total_trip_cost
    }

    /// Name used when deduplicating clients on request submission
    pub fn normalized_name(&self) -> String {
        normalize_name(self.profile.name())
    }

    /// Record a trip and add its cost to the running total
    pub fn request_trip(&mut self, trip: &Trip) -> String {
        self.trips.push(trip.id());
        self.total_trip_cost += trip.calculate_cost();
        format!(
            "Trip requested by {}, cost: {} UGX",
            self.profile.name(),
            self.total_trip_cost
        )
    }

    pub fn details(&self) -> ClientDetails {
        ClientDetails {
            profile: self.profile.details(),
            client_number: self.client_number,
            trip_count: self.trips.len(),
            total_trip_cost: self.total_trip_cost,
        }
    }
}

impl Account for Client {
    fn profile(&self) -> &AccountProfile {
        &self.profile
    }

    fn profile_mut(&mut self) -> &mut AccountProfile {
        &mut self.profile
    }

    fn role(&self) -> AccountRole {
        AccountRole::Client
    }
}

/// Trim + lowercase
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
