//! Project configuration
//!
//! Environment variables and their defaults.

pub mod environment;

pub use environment::*;
