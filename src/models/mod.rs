//! Domain models
//!
//! Accounts, vehicles, requests and trips, plus the static district
//! directory used to resolve request endpoints.

pub mod account;
pub mod district;
pub mod request;
pub mod trip;
pub mod vehicle;

pub use account::{
    Account, AccountDetails, AccountRole, Admin, AdminDetails, Client, ClientDetails, Driver,
    DriverDetails,
};
pub use district::Coordinates;
pub use request::{ClientRequest, RequestDetails, RequestStatus};
pub use trip::{Trip, TripDetails, TripStatus};
pub use vehicle::{Vehicle, VehicleDetails};

/// Name of the admin seeded into every registry; always passes admin checks
pub const BOOTSTRAP_ADMIN_NAME: &str = "Default Admin";
