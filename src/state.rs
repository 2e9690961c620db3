//! Shared application state
//!
//! Passed through the axum router. The registry sits behind one coarse
//! `RwLock`: every mutating operation holds the write lock for its whole
//! duration, which is what keeps cross-entity rules safe.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::environment::EnvironmentConfig;
use crate::services::distance_service::GeodesicDistance;
use crate::services::registry::Registry;
use crate::utils::errors::AppResult;
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub jwt: JwtConfig,
    pub registry: Arc<RwLock<Registry>>,
}

impl AppState {
    /// Fresh registry seeded from the configured fuel price
    pub fn new(config: EnvironmentConfig) -> AppResult<Self> {
        let registry =
            Registry::with_settings(config.default_fuel_price, Box::new(GeodesicDistance))?;
        Ok(Self::with_registry(config, registry))
    }

    pub fn with_registry(config: EnvironmentConfig, registry: Registry) -> Self {
        let jwt = JwtConfig::from(&config);
        Self {
            config,
            jwt,
            registry: Arc::new(RwLock::new(registry)),
        }
    }
}
