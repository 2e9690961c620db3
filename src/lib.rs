//! DriveSync: logistics booking core
//!
//! Clients submit transport requests between districts, admins turn them
//! into trips for drivers with assigned vehicles, and the cost engine
//! prices each trip from distance, vehicle consumption and fuel price.

pub mod config;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
