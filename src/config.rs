//! Marketplace configuration.
//!
//! Every field has a default, so a TOML file only needs the keys it
//! wants to override:
//!
//! ```toml
//! default_radius_km = 25.0
//!
//! [fuel_prices]
//! petrol = 650.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Error, Result};
use crate::types::vehicle::FuelType;

/// Search radius used when a caller does not pass one.
pub const DEFAULT_RADIUS_KM: f64 = 50.0;

/// Retail energy prices in naira.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct FuelPrices {
    /// Per liter.
    pub petrol: f64,
    /// Per liter.
    pub diesel: f64,
    /// Per standard cubic meter, priced as a liter equivalent.
    pub cng: f64,
    /// Per kWh.
    pub electricity: f64,
}

impl Default for FuelPrices {
    fn default() -> Self {
        FuelPrices {
            petrol: 617.0,
            diesel: 1100.0,
            cng: 230.0,
            electricity: 68.0,
        }
    }
}

impl FuelPrices {
    /// Price of the fuel a vehicle currently burns.
    pub fn for_fuel(&self, fuel: FuelType) -> f64 {
        match fuel {
            FuelType::Petrol => self.petrol,
            FuelType::Diesel => self.diesel,
        }
    }

    fn validate(&self) -> Result<()> {
        let prices = [
            ("petrol", self.petrol),
            ("diesel", self.diesel),
            ("cng", self.cng),
            ("electricity", self.electricity),
        ];
        for (name, price) in prices {
            if !(price.is_finite() && price > 0.0) {
                return Err(Error::InvalidInput(format!(
                    "{name} price must be positive, got {price}"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    pub fuel_prices: FuelPrices,
    pub default_radius_km: f64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        MarketConfig {
            fuel_prices: FuelPrices::default(),
            default_radius_km: DEFAULT_RADIUS_KM,
        }
    }
}

impl MarketConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: MarketConfig = toml::from_str(content).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading marketplace configuration from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(ConfigError::from)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        self.fuel_prices.validate()?;
        if !(self.default_radius_km.is_finite() && self.default_radius_km > 0.0) {
            return Err(Error::InvalidInput(format!(
                "default radius must be positive, got {}",
                self.default_radius_km
            )));
        }
        Ok(())
    }
}
