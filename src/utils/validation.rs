//! Validation helpers
//!
//! Field checks shared by the account, vehicle and fuel-price paths. Every
//! helper names the offending field in the returned error.

use lazy_static::lazy_static;
use num_traits::Zero;
use regex::Regex;
use std::fmt::Display;

use crate::utils::errors::{validation_error, AppResult};

lazy_static! {
    static ref CONTACT_RE: Regex = Regex::new(r"^\+?\d{9,12}$").unwrap();
}

/// Trim a value and reject it when nothing is left
pub fn validate_not_empty(field: &'static str, value: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        let label = capitalize(field);
        return Err(validation_error(
            field,
            format!("{} must be a non-empty string", label),
        ));
    }
    Ok(trimmed.to_string())
}

/// Phone number: optional leading `+` followed by 9 to 12 digits
pub fn validate_contact(value: &str) -> AppResult<()> {
    if !CONTACT_RE.is_match(value) {
        return Err(validation_error(
            "contact",
            "Contact must be a valid phone number (e.g., +256123456789)",
        ));
    }
    Ok(())
}

/// Syntactic email check, no deliverability lookup
pub fn validate_email(value: &str) -> AppResult<()> {
    if !validator::validate_email(value) {
        return Err(validation_error(
            "email",
            format!("Invalid email address: '{}' is not a valid email", value),
        ));
    }
    Ok(())
}

/// Value must be strictly greater than zero
pub fn validate_positive<T: PartialOrd + Display + Zero>(
    field: &'static str,
    value: T,
) -> AppResult<()> {
    if value <= T::zero() {
        return Err(positive_error(field));
    }
    Ok(())
}

/// Like [`validate_positive`] but also rejects NaN and infinities
pub fn validate_positive_f64(field: &'static str, value: f64) -> AppResult<()> {
    if !value.is_finite() {
        return Err(positive_error(field));
    }
    validate_positive(field, value)
}

/// Latitude in [-90, 90], longitude in [-180, 180]
pub fn validate_coordinates(lat: f64, lng: f64) -> AppResult<()> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(validation_error(
            "latitude",
            format!("Latitude {} out of range -90.0 to 90.0", lat),
        ));
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err(validation_error(
            "longitude",
            format!("Longitude {} out of range -180.0 to 180.0", lng),
        ));
    }
    Ok(())
}

fn positive_error(field: &'static str) -> crate::utils::errors::AppError {
    let label = capitalize(&field.replace('_', " "));
    validation_error(field, format!("{} must be a positive number", label))
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
