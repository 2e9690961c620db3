//! Registry
//!
//! Single in-memory owner of every account, vehicle, request and trip.
//! Entities reference each other by id; every cross-entity rule (one driver
//! per vehicle, one trip per request, request/trip status cascade) is
//! enforced here. Each operation runs to completion with `&mut self`, so a
//! single lock around the registry serializes all mutation.

use serde::Serialize;
use uuid::Uuid;

use crate::config::environment::DEFAULT_FUEL_PRICE;
use crate::models::account::{normalize_name, Account, AccountDetails, AccountRole};
use crate::models::district;
use crate::models::vehicle::assign_driver;
use crate::models::{
    Admin, AdminDetails, Client, ClientDetails, ClientRequest, Driver, DriverDetails,
    RequestDetails, RequestStatus, Trip, TripDetails, Vehicle, VehicleDetails,
    BOOTSTRAP_ADMIN_NAME,
};
use crate::services::distance_service::{DistanceCalculator, GeodesicDistance};
use crate::utils::errors::{conflict_error, not_found_error, AppError, AppResult};
use crate::utils::validation::validate_positive_f64;

const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, Serialize)]
pub struct AssignmentOutcome {
    pub message: String,
    pub driver: DriverDetails,
    pub vehicle: VehicleDetails,
}

#[derive(Debug, Clone, Serialize)]
pub struct FuelPriceUpdate {
    pub message: String,
    pub fuel_price: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    pub confirmation: String,
    pub request: RequestDetails,
    pub client: ClientDetails,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessedRequest {
    pub confirmation: String,
    pub request: RequestDetails,
    pub trip: TripDetails,
}

#[derive(Debug, Clone, Serialize)]
pub struct TripTransition {
    pub message: String,
    pub trip: TripDetails,
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountsOverview {
    pub drivers: Vec<DriverDetails>,
    pub clients: Vec<ClientDetails>,
    pub admins: Vec<AdminDetails>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminDashboard {
    pub accounts: AccountsOverview,
    pub vehicles: Vec<VehicleDetails>,
    pub requests: Vec<RequestDetails>,
    pub trips: Vec<TripDetails>,
    pub fuel_price: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientDashboard {
    pub client: ClientDetails,
    pub requests: Vec<RequestDetails>,
    pub trips: Vec<TripDetails>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DriverDashboard {
    pub driver: DriverDetails,
    pub trips: Vec<TripDetails>,
}

pub struct Registry {
    drivers: Vec<Driver>,
    clients: Vec<Client>,
    admins: Vec<Admin>,
    vehicles: Vec<Vehicle>,
    requests: Vec<ClientRequest>,
    trips: Vec<Trip>,
    fuel_price: f64,
    distance: Box<dyn DistanceCalculator>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Registry with the geodesic calculator and the default fuel price
    pub fn new() -> Self {
        Self::build(DEFAULT_FUEL_PRICE, Box::new(GeodesicDistance))
    }

    pub fn with_settings(
        fuel_price: f64,
        distance: Box<dyn DistanceCalculator>,
    ) -> AppResult<Self> {
        validate_positive_f64("fuel_price", fuel_price)?;
        Ok(Self::build(fuel_price, distance))
    }

    fn build(fuel_price: f64, distance: Box<dyn DistanceCalculator>) -> Self {
        let mut admins = Vec::new();
        match Admin::new(
            BOOTSTRAP_ADMIN_NAME,
            "+256000000000",
            "default_admin@example.com",
        ) {
            Ok(admin) => admins.push(admin),
            // the seed values are constants, this only fires if validation rules change
            Err(e) => log::error!("❌ Could not seed bootstrap admin: {}", e),
        }

        Self {
            drivers: Vec::new(),
            clients: Vec::new(),
            admins,
            vehicles: Vec::new(),
            requests: Vec::new(),
            trips: Vec::new(),
            fuel_price,
            distance,
        }
    }

    fn verify_admin(&self, admin_name: &str) -> AppResult<()> {
        if admin_name == BOOTSTRAP_ADMIN_NAME {
            return Ok(());
        }
        if self.admins.iter().any(|a| a.name() == admin_name) {
            Ok(())
        } else {
            log::warn!("⚠️ Admin verification failed for '{}'", admin_name);
            Err(AppError::Forbidden("Admin not found".to_string()))
        }
    }

    fn driver_index(&self, driver_name: &str) -> AppResult<usize> {
        self.drivers
            .iter()
            .position(|d| d.name() == driver_name)
            .ok_or_else(|| not_found_error("Driver not found"))
    }

    fn vehicle_by_id(&self, id: Uuid) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id() == id)
    }

    fn driver_by_id(&self, id: Uuid) -> Option<&Driver> {
        self.drivers.iter().find(|d| d.id() == id)
    }

    fn client_by_id(&self, id: Uuid) -> Option<&Client> {
        self.clients.iter().find(|c| c.id() == id)
    }

    fn request_by_id(&self, id: Uuid) -> Option<&ClientRequest> {
        self.requests.iter().find(|r| r.id() == id)
    }

    fn trip_by_id(&self, id: Uuid) -> Option<&Trip> {
        self.trips.iter().find(|t| t.id() == id)
    }

    fn driver_details(&self, driver: &Driver) -> DriverDetails {
        let registration = driver
            .vehicle_id()
            .and_then(|id| self.vehicle_by_id(id))
            .map(Vehicle::registration_number);
        driver.details(registration)
    }

    fn vehicle_details(&self, vehicle: &Vehicle) -> VehicleDetails {
        let driver_name = vehicle
            .assigned_driver()
            .and_then(|id| self.driver_by_id(id))
            .map(|d| d.name());
        vehicle.details(driver_name)
    }

    fn request_details(&self, request: &ClientRequest) -> RequestDetails {
        request.details(self.client_name(request.client_id()))
    }

    fn client_name(&self, client_id: Uuid) -> &str {
        self.client_by_id(client_id).map(|c| c.name()).unwrap_or(UNKNOWN)
    }

    fn trip_details(&self, trip: &Trip) -> TripDetails {
        let driver_name = self
            .driver_by_id(trip.driver_id())
            .map(|d| d.name())
            .unwrap_or(UNKNOWN);
        let (start, end) = match self.request_by_id(trip.request_id()) {
            Some(request) => (request.pickup_district(), request.dropoff_district()),
            None => {
                log::error!("❌ Trip {} points at a missing request", trip.id());
                (UNKNOWN, UNKNOWN)
            }
        };
        trip.details(start, end, driver_name)
    }

    /// Create an admin, driver or client account
    pub fn add_account(
        &mut self,
        admin_name: &str,
        account_type: &str,
        name: &str,
        contact: &str,
        email: &str,
    ) -> AppResult<AccountDetails> {
        self.verify_admin(admin_name)?;
        let role: AccountRole = account_type.parse()?;

        let details = match role {
            AccountRole::Driver => {
                let driver = Driver::new(name, contact, email)?;
                let details = AccountDetails::Driver(self.driver_details(&driver));
                self.drivers.push(driver);
                details
            }
            AccountRole::Admin => {
                let admin = Admin::new(name, contact, email)?;
                let details = AccountDetails::Admin(admin.details());
                self.admins.push(admin);
                details
            }
            AccountRole::Client => {
                let client = Client::new(name, contact, email)?;
                let details = AccountDetails::Client(client.details());
                self.clients.push(client);
                details
            }
        };

        log::info!(
            "👤 {} account created for '{}' by '{}'",
            role,
            details.profile().name,
            admin_name
        );
        Ok(details)
    }

    pub fn add_vehicle(
        &mut self,
        admin_name: &str,
        registration_number: &str,
        vehicle_type: &str,
        fuel_per_km: f64,
    ) -> AppResult<VehicleDetails> {
        self.verify_admin(admin_name)?;
        validate_positive_f64("fuel_per_km", fuel_per_km)?;

        let vehicle = Vehicle::new(registration_number, vehicle_type, fuel_per_km)?;
        let details = vehicle.details(None);
        self.vehicles.push(vehicle);

        log::info!(
            "🚚 Vehicle {} added ({} l/km)",
            details.registration_number,
            fuel_per_km
        );
        Ok(details)
    }

    /// Change a vehicle's consumption rate; existing trips keep their locked rate
    pub fn update_vehicle_rate(
        &mut self,
        admin_name: &str,
        registration_number: &str,
        fuel_per_km: f64,
    ) -> AppResult<VehicleDetails> {
        self.verify_admin(admin_name)?;
        let index = self
            .vehicles
            .iter()
            .position(|v| v.registration_number() == registration_number)
            .ok_or_else(|| not_found_error("Vehicle not found"))?;

        self.vehicles[index].set_fuel_per_km(fuel_per_km)?;
        log::info!(
            "🚚 Vehicle {} rate set to {} l/km",
            registration_number,
            fuel_per_km
        );
        Ok(self.vehicle_details(&self.vehicles[index]))
    }

    /// Link a driver and a vehicle, both looked up by first match
    pub fn assign_vehicle(
        &mut self,
        driver_name: &str,
        registration_number: &str,
    ) -> AppResult<AssignmentOutcome> {
        let driver_index = self.drivers.iter().position(|d| d.name() == driver_name);
        let vehicle_index = self
            .vehicles
            .iter()
            .position(|v| v.registration_number() == registration_number);
        let (driver_index, vehicle_index) = match (driver_index, vehicle_index) {
            (Some(d), Some(v)) => (d, v),
            _ => return Err(not_found_error("Driver or Vehicle not found")),
        };

        let assignment = assign_driver(
            &mut self.vehicles[vehicle_index],
            &mut self.drivers[driver_index],
        )?;

        if let Some(released) = assignment.released_vehicle {
            if let Some(previous) = self.vehicles.iter_mut().find(|v| v.id() == released) {
                log::info!(
                    "🔓 Vehicle {} released by '{}'",
                    previous.registration_number(),
                    driver_name
                );
                previous.release();
            }
        }

        log::info!("🔗 {}", assignment.message);
        Ok(AssignmentOutcome {
            message: assignment.message,
            driver: self.driver_details(&self.drivers[driver_index]),
            vehicle: self.vehicle_details(&self.vehicles[vehicle_index]),
        })
    }

    /// Registry-wide price used for trips processed from now on
    pub fn set_fuel_price(&mut self, admin_name: &str, fuel_price: f64) -> AppResult<FuelPriceUpdate> {
        self.verify_admin(admin_name)?;
        validate_positive_f64("fuel_price", fuel_price)?;

        self.fuel_price = fuel_price;
        let message = format!("Fuel price set to {} UGX by {}", fuel_price, admin_name);
        log::info!("⛽ {}", message);
        Ok(FuelPriceUpdate {
            message,
            fuel_price,
        })
    }

    pub fn fuel_price(&self) -> f64 {
        self.fuel_price
    }

    /// Record a client's transport request, creating the client on first use.
    ///
    /// Clients are matched on trimmed, lowercased name.
    pub fn submit_request(
        &mut self,
        client_name: &str,
        client_contact: &str,
        client_email: &str,
        goods_description: &str,
        pickup_district: &str,
        dropoff_district: &str,
    ) -> AppResult<SubmissionReceipt> {
        // resolve districts before a client can be created
        district::resolve("pickup_district", pickup_district)?;
        district::resolve("dropoff_district", dropoff_district)?;

        let wanted = normalize_name(client_name);
        let client_index = match self
            .clients
            .iter()
            .position(|c| c.normalized_name() == wanted)
        {
            Some(index) => index,
            None => {
                let client = Client::new(client_name, client_contact, client_email)?;
                log::info!("👤 Client '{}' created on request submission", client.name());
                self.clients.push(client);
                self.clients.len() - 1
            }
        };

        let client = &self.clients[client_index];
        let request = ClientRequest::new(
            client.id(),
            goods_description,
            pickup_district,
            dropoff_district,
        )?;
        let receipt = SubmissionReceipt {
            confirmation: request.confirmation(client.name()),
            request: request.details(client.name()),
            client: client.details(),
        };

        log::info!(
            "📦 Request {} submitted: {} -> {}",
            request.id(),
            pickup_district,
            dropoff_district
        );
        self.requests.push(request);
        Ok(receipt)
    }

    /// Turn a pending request into a trip for `driver_name`
    pub fn process_request(
        &mut self,
        admin_name: &str,
        request_id: Uuid,
        driver_name: &str,
        spans_night: bool,
    ) -> AppResult<ProcessedRequest> {
        self.verify_admin(admin_name)?;

        let request_index = self
            .requests
            .iter()
            .position(|r| r.id() == request_id)
            .ok_or_else(|| not_found_error("Request not found"))?;
        if self.requests[request_index].status() != RequestStatus::Pending {
            return Err(conflict_error("Request already processed"));
        }

        let driver_index = self.driver_index(driver_name)?;
        let vehicle = self.drivers[driver_index]
            .vehicle_id()
            .and_then(|id| self.vehicle_by_id(id))
            .ok_or_else(|| {
                conflict_error(format!("Driver {} has no assigned vehicle", driver_name))
            })?;

        let client_id = self.requests[request_index].client_id();
        let client_index = self
            .clients
            .iter()
            .position(|c| c.id() == client_id)
            .ok_or_else(|| AppError::Internal(format!("Client {} missing", client_id)))?;

        let mut trip = Trip::new(
            &self.requests[request_index],
            &self.drivers[driver_index],
            Some(vehicle),
            spans_night,
            self.distance.as_ref(),
        );
        trip.set_fuel_price(self.fuel_price)?;

        // request is known Pending; it advances only after driver and client hold the trip
        self.drivers[driver_index].assign_trip(&trip)?;
        let cost_note = self.clients[client_index].request_trip(&trip);
        log::info!("🧾 {}", cost_note);
        self.requests[request_index].advance_to(RequestStatus::Assigned)?;

        let request = &self.requests[request_index];
        let client_name = self.clients[client_index].name();
        let outcome = ProcessedRequest {
            confirmation: request.confirmation(client_name),
            request: request.details(client_name),
            trip: trip.details(
                request.pickup_district(),
                request.dropoff_district(),
                driver_name,
            ),
        };
        log::info!(
            "🚀 Request {} assigned to '{}' ({:.2} km, {} UGX)",
            request_id,
            driver_name,
            trip.distance(),
            trip.total_cost().unwrap_or(0.0)
        );
        self.trips.push(trip);
        Ok(outcome)
    }

    fn trip_index(&self, driver_name: &str, request_id: Uuid) -> AppResult<usize> {
        let driver_id = self.drivers[self.driver_index(driver_name)?].id();
        self.trips
            .iter()
            .position(|t| t.request_id() == request_id && t.driver_id() == driver_id)
            .ok_or_else(|| not_found_error("Trip not found or not assigned to this driver"))
    }

    pub fn start_trip(&mut self, driver_name: &str, request_id: Uuid) -> AppResult<TripTransition> {
        let index = self.trip_index(driver_name, request_id)?;
        let message = self.trips[index].start_trip(driver_name)?;
        log::info!("▶️ {}", message);
        Ok(TripTransition {
            message,
            trip: self.trip_details(&self.trips[index]),
        })
    }

    /// Complete the trip; its request completes with it
    pub fn stop_trip(&mut self, driver_name: &str, request_id: Uuid) -> AppResult<TripTransition> {
        let index = self.trip_index(driver_name, request_id)?;
        let request_index = self
            .requests
            .iter()
            .position(|r| r.id() == request_id)
            .ok_or_else(|| AppError::Internal(format!("Request {} missing", request_id)))?;

        let message =
            self.trips[index].stop_trip(&mut self.requests[request_index], driver_name)?;
        log::info!("🏁 {}", message);
        Ok(TripTransition {
            message,
            trip: self.trip_details(&self.trips[index]),
        })
    }

    pub fn all_accounts(&self) -> AccountsOverview {
        AccountsOverview {
            drivers: self.drivers.iter().map(|d| self.driver_details(d)).collect(),
            clients: self.clients.iter().map(Client::details).collect(),
            admins: self.admins.iter().map(Admin::details).collect(),
        }
    }

    pub fn all_vehicles(&self) -> Vec<VehicleDetails> {
        self.vehicles.iter().map(|v| self.vehicle_details(v)).collect()
    }

    pub fn all_requests(&self) -> Vec<RequestDetails> {
        self.requests.iter().map(|r| self.request_details(r)).collect()
    }

    pub fn all_trips(&self) -> Vec<TripDetails> {
        self.trips.iter().map(|t| self.trip_details(t)).collect()
    }

    pub fn districts(&self) -> Vec<&'static str> {
        district::district_names()
    }

    pub fn admin_dashboard(&self) -> AdminDashboard {
        AdminDashboard {
            accounts: self.all_accounts(),
            vehicles: self.all_vehicles(),
            requests: self.all_requests(),
            trips: self.all_trips(),
            fuel_price: self.fuel_price,
        }
    }

    pub fn client_dashboard(&self, client_name: &str) -> AppResult<ClientDashboard> {
        let client = self
            .clients
            .iter()
            .find(|c| c.name() == client_name)
            .ok_or_else(|| not_found_error("Client not found"))?;

        let requests = self
            .requests
            .iter()
            .filter(|r| r.client_id() == client.id())
            .map(|r| r.details(client.name()))
            .collect();
        let trips = client
            .trip_ids()
            .iter()
            .filter_map(|id| self.trip_by_id(*id))
            .map(|t| self.trip_details(t))
            .collect();

        Ok(ClientDashboard {
            client: client.details(),
            requests,
            trips,
        })
    }

    pub fn driver_dashboard(&self, driver_name: &str) -> AppResult<DriverDashboard> {
        let driver = &self.drivers[self.driver_index(driver_name)?];
        let trips = driver
            .trip_ids()
            .filter_map(|id| self.trip_by_id(id))
            .map(|t| self.trip_details(t))
            .collect();

        Ok(DriverDashboard {
            driver: self.driver_details(driver),
            trips,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::district::Coordinates;
    use crate::models::TripStatus;
    use crate::services::distance_service::DistanceError;
    use crate::utils::errors::ErrorKind;

    struct FixedDistance(f64);

    impl DistanceCalculator for FixedDistance {
        fn distance_km(&self, _: Coordinates, _: Coordinates) -> Result<f64, DistanceError> {
            Ok(self.0)
        }
    }

    fn registry() -> Registry {
        Registry::with_settings(5000.0, Box::new(FixedDistance(100.0))).unwrap()
    }

    fn with_driver_and_vehicle() -> Registry {
        let mut registry = registry();
        registry
            .add_account(BOOTSTRAP_ADMIN_NAME, "driver", "Bob", "+256700000002", "bob@example.com")
            .unwrap();
        registry
            .add_vehicle(BOOTSTRAP_ADMIN_NAME, "UAX 123A", "Truck", 0.5)
            .unwrap();
        registry.assign_vehicle("Bob", "UAX 123A").unwrap();
        registry
    }

    fn submit(registry: &mut Registry) -> Uuid {
        registry
            .submit_request(
                "Alice",
                "+256700000001",
                "alice@example.com",
                "Coffee beans",
                "Kampala",
                "Jinja",
            )
            .unwrap()
            .request
            .request_id
    }

    #[test]
    fn test_seeded_with_bootstrap_admin() {
        let registry = Registry::new();
        let accounts = registry.all_accounts();
        assert_eq!(accounts.admins.len(), 1);
        assert_eq!(accounts.admins[0].profile.name, BOOTSTRAP_ADMIN_NAME);
        assert_eq!(registry.fuel_price(), 5000.0);
    }

    #[test]
    fn test_with_settings_rejects_bad_price() {
        assert!(Registry::with_settings(0.0, Box::new(FixedDistance(1.0))).is_err());
    }

    #[test]
    fn test_unknown_admin_rejected() {
        let mut registry = registry();
        let err = registry
            .add_account("Mallory", "client", "Eve", "+256700000003", "eve@example.com")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
        assert_eq!(err.message(), "Admin not found");
        assert!(registry.all_accounts().clients.is_empty());
    }

    #[test]
    fn test_added_admin_can_act() {
        let mut registry = registry();
        registry
            .add_account(BOOTSTRAP_ADMIN_NAME, "admin", "Grace", "+256700000004", "grace@example.com")
            .unwrap();
        assert!(registry.add_vehicle("Grace", "UAX 1", "Van", 0.2).is_ok());
    }

    #[test]
    fn test_add_account_reports_validation_error() {
        let mut registry = registry();
        let err = registry
            .add_account(BOOTSTRAP_ADMIN_NAME, "driver", "Bob", "0700", "bob@example.com")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.field(), Some("contact"));
        assert!(registry.all_accounts().drivers.is_empty());

        let err = registry
            .add_account(BOOTSTRAP_ADMIN_NAME, "pilot", "Bob", "0700000000", "bob@example.com")
            .unwrap_err();
        assert_eq!(err.field(), Some("account_type"));
    }

    #[test]
    fn test_add_vehicle_validates_rate() {
        let mut registry = registry();
        let err = registry
            .add_vehicle(BOOTSTRAP_ADMIN_NAME, "UAX 123A", "Truck", 0.0)
            .unwrap_err();
        assert_eq!(err.message(), "Fuel per km must be a positive number");
        assert!(registry.all_vehicles().is_empty());
    }

    #[test]
    fn test_assign_vehicle_not_found() {
        let mut registry = registry();
        let err = registry.assign_vehicle("Nobody", "NOPE").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.message(), "Driver or Vehicle not found");
    }

    #[test]
    fn test_vehicle_cannot_have_two_drivers() {
        let mut registry = with_driver_and_vehicle();
        registry
            .add_account(BOOTSTRAP_ADMIN_NAME, "driver", "Carol", "+256700000005", "carol@example.com")
            .unwrap();

        let err = registry.assign_vehicle("Carol", "UAX 123A").unwrap_err();
        assert_eq!(err.message(), "Vehicle UAX 123A is already assigned");
        // same driver again is fine
        let outcome = registry.assign_vehicle("Bob", "UAX 123A").unwrap();
        assert_eq!(outcome.message, "Vehicle UAX 123A assigned to Bob");
        assert_eq!(outcome.vehicle.assigned_driver.as_deref(), Some("Bob"));
        assert_eq!(outcome.driver.vehicle.as_deref(), Some("UAX 123A"));
    }

    #[test]
    fn test_swap_releases_previous_vehicle() {
        let mut registry = with_driver_and_vehicle();
        registry
            .add_vehicle(BOOTSTRAP_ADMIN_NAME, "UBB 456B", "Van", 0.3)
            .unwrap();
        registry.assign_vehicle("Bob", "UBB 456B").unwrap();

        let vehicles = registry.all_vehicles();
        assert_eq!(vehicles[0].assigned_driver, None);
        assert_eq!(vehicles[1].assigned_driver.as_deref(), Some("Bob"));

        registry
            .add_account(BOOTSTRAP_ADMIN_NAME, "driver", "Carol", "+256700000005", "carol@example.com")
            .unwrap();
        assert!(registry.assign_vehicle("Carol", "UAX 123A").is_ok());
    }

    #[test]
    fn test_set_fuel_price() {
        let mut registry = registry();
        let update = registry.set_fuel_price(BOOTSTRAP_ADMIN_NAME, 5200.0).unwrap();
        assert_eq!(update.message, "Fuel price set to 5200 UGX by Default Admin");
        assert_eq!(registry.fuel_price(), 5200.0);

        let err = registry.set_fuel_price(BOOTSTRAP_ADMIN_NAME, -1.0).unwrap_err();
        assert_eq!(err.message(), "Fuel price must be a positive number");
        assert_eq!(registry.fuel_price(), 5200.0);
    }

    #[test]
    fn test_submit_request_reuses_client_case_insensitively() {
        let mut registry = registry();
        submit(&mut registry);
        let receipt = registry
            .submit_request("  alice ", "+256799999999", "other@example.com", "Tea", "Gulu", "Lira")
            .unwrap();
        assert_eq!(receipt.client.profile.name, "Alice");
        assert_eq!(registry.all_accounts().clients.len(), 1);
        assert_eq!(registry.all_requests().len(), 2);
    }

    #[test]
    fn test_submit_request_unknown_district_creates_nothing() {
        let mut registry = registry();
        let err = registry
            .submit_request("Alice", "+256700000001", "alice@example.com", "Tea", "Kampala", "Mars")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(registry.all_accounts().clients.is_empty());
        assert!(registry.all_requests().is_empty());
    }

    #[test]
    fn test_submit_request_invalid_client() {
        let mut registry = registry();
        let err = registry
            .submit_request("Alice", "bad", "alice@example.com", "Tea", "Kampala", "Jinja")
            .unwrap_err();
        assert_eq!(err.field(), Some("contact"));
    }

    #[test]
    fn test_process_request_creates_single_trip() {
        let mut registry = with_driver_and_vehicle();
        let request_id = submit(&mut registry);

        let processed = registry
            .process_request(BOOTSTRAP_ADMIN_NAME, request_id, "Bob", true)
            .unwrap();
        assert_eq!(processed.request.status, RequestStatus::Assigned);
        assert_eq!(processed.trip.status, TripStatus::Assigned);
        assert_eq!(processed.trip.fuel_price, Some(5000.0));
        assert_eq!(processed.trip.total_cost, Some(100.0 * 0.5 * 5000.0));

        let err = registry
            .process_request(BOOTSTRAP_ADMIN_NAME, request_id, "Bob", false)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.message(), "Request already processed");
        assert_eq!(registry.all_trips().len(), 1);

        let accounts = registry.all_accounts();
        assert_eq!(accounts.clients[0].total_trip_cost, 250_000.0);
        assert_eq!(accounts.drivers[0].total_allowance, 25_000);
    }

    #[test]
    fn test_process_request_failures() {
        let mut registry = registry();
        let request_id = submit(&mut registry);

        let err = registry
            .process_request(BOOTSTRAP_ADMIN_NAME, Uuid::new_v4(), "Bob", false)
            .unwrap_err();
        assert_eq!(err.message(), "Request not found");

        let err = registry
            .process_request(BOOTSTRAP_ADMIN_NAME, request_id, "Bob", false)
            .unwrap_err();
        assert_eq!(err.message(), "Driver not found");

        registry
            .add_account(BOOTSTRAP_ADMIN_NAME, "driver", "Bob", "+256700000002", "bob@example.com")
            .unwrap();
        let err = registry
            .process_request(BOOTSTRAP_ADMIN_NAME, request_id, "Bob", false)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.message(), "Driver Bob has no assigned vehicle");

        let err = registry
            .process_request("Mallory", request_id, "Bob", false)
            .unwrap_err();
        assert_eq!(err.message(), "Admin not found");

        assert!(registry.all_trips().is_empty());
        assert_eq!(registry.all_requests()[0].status, RequestStatus::Pending);
    }

    #[test]
    fn test_fuel_price_change_does_not_touch_existing_trips() {
        let mut registry = with_driver_and_vehicle();
        let request_id = submit(&mut registry);
        registry
            .process_request(BOOTSTRAP_ADMIN_NAME, request_id, "Bob", false)
            .unwrap();
        registry.set_fuel_price(BOOTSTRAP_ADMIN_NAME, 9000.0).unwrap();
        registry
            .update_vehicle_rate(BOOTSTRAP_ADMIN_NAME, "UAX 123A", 2.0)
            .unwrap();

        let trips = registry.all_trips();
        let trip = &trips[0];
        assert_eq!(trip.fuel_price, Some(5000.0));
        assert_eq!(trip.fuel_per_km, 0.5);
    }

    #[test]
    fn test_vehicle_swap_keeps_locked_rate_and_completed_request_stays_processed() {
        let mut registry = with_driver_and_vehicle();
        let first = submit(&mut registry);
        let processed = registry
            .process_request(BOOTSTRAP_ADMIN_NAME, first, "Bob", false)
            .unwrap();
        let locked_cost = processed.trip.total_cost;

        registry
            .add_vehicle(BOOTSTRAP_ADMIN_NAME, "UBB 456B", "Van", 0.3)
            .unwrap();
        registry.assign_vehicle("Bob", "UBB 456B").unwrap();

        let trips = registry.all_trips();
        assert_eq!(trips[0].fuel_per_km, 0.5);
        assert_eq!(trips[0].total_cost, locked_cost);

        let second = submit(&mut registry);
        let processed = registry
            .process_request(BOOTSTRAP_ADMIN_NAME, second, "Bob", false)
            .unwrap();
        assert_eq!(processed.trip.fuel_per_km, 0.3);
        assert_eq!(processed.trip.total_cost, Some(100.0 * 0.3 * 5000.0));

        registry.start_trip("Bob", first).unwrap();
        registry.stop_trip("Bob", first).unwrap();
        let err = registry
            .process_request(BOOTSTRAP_ADMIN_NAME, first, "Bob", false)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.message(), "Request already processed");
        assert_eq!(registry.all_trips().len(), 2);
    }

    #[test]
    fn test_trip_transitions_through_registry() {
        let mut registry = with_driver_and_vehicle();
        let request_id = submit(&mut registry);
        registry
            .process_request(BOOTSTRAP_ADMIN_NAME, request_id, "Bob", false)
            .unwrap();

        let err = registry.stop_trip("Bob", request_id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);

        let started = registry.start_trip("Bob", request_id).unwrap();
        assert_eq!(started.message, format!("Trip {} started by Bob", request_id));
        assert_eq!(started.trip.status, TripStatus::Started);

        let stopped = registry.stop_trip("Bob", request_id).unwrap();
        assert_eq!(stopped.trip.status, TripStatus::Completed);
        assert_eq!(registry.all_requests()[0].status, RequestStatus::Completed);

        assert!(registry.start_trip("Bob", request_id).is_err());
    }

    #[test]
    fn test_trip_lookup_requires_matching_driver() {
        let mut registry = with_driver_and_vehicle();
        registry
            .add_account(BOOTSTRAP_ADMIN_NAME, "driver", "Carol", "+256700000005", "carol@example.com")
            .unwrap();
        let request_id = submit(&mut registry);
        registry
            .process_request(BOOTSTRAP_ADMIN_NAME, request_id, "Bob", false)
            .unwrap();

        let err = registry.start_trip("Carol", request_id).unwrap_err();
        assert_eq!(err.message(), "Trip not found or not assigned to this driver");
        let err = registry.start_trip("Nobody", request_id).unwrap_err();
        assert_eq!(err.message(), "Driver not found");
    }

    #[test]
    fn test_dashboards() {
        let mut registry = with_driver_and_vehicle();
        let request_id = submit(&mut registry);
        registry
            .submit_request("Zed", "+256700000006", "zed@example.com", "Tea", "Gulu", "Lira")
            .unwrap();
        registry
            .process_request(BOOTSTRAP_ADMIN_NAME, request_id, "Bob", false)
            .unwrap();

        let alice = registry.client_dashboard("Alice").unwrap();
        assert_eq!(alice.requests.len(), 1);
        assert_eq!(alice.trips.len(), 1);
        assert_eq!(alice.trips[0].request_id, request_id);

        let zed = registry.client_dashboard("Zed").unwrap();
        assert_eq!(zed.requests.len(), 1);
        assert!(zed.trips.is_empty());

        let bob = registry.driver_dashboard("Bob").unwrap();
        assert_eq!(bob.trips.len(), 1);
        assert_eq!(bob.driver.trip_count, 1);

        assert!(registry.client_dashboard("Nobody").is_err());
        assert!(registry.driver_dashboard("Nobody").is_err());

        let dashboard = registry.admin_dashboard();
        assert_eq!(dashboard.requests.len(), 2);
        assert_eq!(dashboard.trips.len(), 1);
        assert_eq!(dashboard.fuel_price, 5000.0);
    }

    #[test]
    fn test_districts_sorted() {
        let districts = registry().districts();
        assert_eq!(districts[0], "Arua");
        assert!(districts.contains(&"Fort Portal"));
    }
}
