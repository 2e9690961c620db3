//! Shared utilities
//!
//! Error handling, field validation and JWT helpers.

pub mod errors;
pub mod jwt;
pub mod validation;
