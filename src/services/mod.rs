//! Services module
//!
//! Business logic: the registry that orchestrates every booking operation,
//! and the distance calculators it is built with.

pub mod distance_service;
pub mod registry;

pub use distance_service::*;
pub use registry::*;
