//! Configuration management for the Cocoa Cooperative Platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with COOP_ prefix

use config::{ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{Cooperative, GeoPoint, RoutingParams, DEFAULT_FUEL_CONSUMPTION_PER_100KM};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Cooperative headquarters
    pub cooperative: CooperativeConfig,

    /// Collection vehicle parameters
    pub routing: RoutingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CooperativeConfig {
    /// Display name used on route reports
    pub name: String,

    /// HQ latitude in decimal degrees
    pub latitude: f64,

    /// HQ longitude in decimal degrees
    pub longitude: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RoutingConfig {
    /// Truck consumption in litres per 100 km
    pub fuel_consumption_per_100km: f64,

    /// Fuel price per litre (FCFA)
    pub fuel_price_per_liter: Option<Decimal>,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("COOP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("routing.fuel_consumption_per_100km", DEFAULT_FUEL_CONSUMPTION_PER_100KM)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (COOP_ prefix)
            .add_source(
                Environment::with_prefix("COOP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        shared::validate_coordinates(&self.cooperative.location())
            .map_err(|e| ConfigError::Message(format!("cooperative: {}", e)))?;
        shared::validate_fuel_rate(self.routing.fuel_consumption_per_100km)
            .map_err(|e| ConfigError::Message(format!("routing: {}", e)))?;
        Ok(())
    }
}

impl CooperativeConfig {
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    pub fn to_cooperative(&self) -> Cooperative {
        Cooperative {
            name: self.name.clone(),
            location: self.location(),
        }
    }
}

impl RoutingConfig {
    pub fn to_params(&self) -> RoutingParams {
        RoutingParams {
            fuel_consumption_per_100km: self.fuel_consumption_per_100km,
            fuel_price_per_liter: self.fuel_price_per_liter,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}
