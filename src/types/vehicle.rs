//! Vehicle descriptions and the compatibility reference records they
//! are checked against.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::located::ServiceKind;
use crate::error::Error;

/// Fuel a vehicle burns before conversion.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    Petrol,
    Diesel,
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FuelType::Petrol => write!(f, "petrol"),
            FuelType::Diesel => write!(f, "diesel"),
        }
    }
}

impl FromStr for FuelType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "petrol" => Ok(FuelType::Petrol),
            "diesel" => Ok(FuelType::Diesel),
            _ => Err(Error::UnknownFuelType(s.to_string())),
        }
    }
}

/// Target of a savings projection.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Serialize, Deserialize)]
pub enum ConversionType {
    #[serde(rename = "CNG")]
    Cng,
    #[serde(rename = "EV")]
    Ev,
}

impl From<ConversionType> for ServiceKind {
    fn from(value: ConversionType) -> Self {
        match value {
            ConversionType::Cng => ServiceKind::Cng,
            ConversionType::Ev => ServiceKind::Ev,
        }
    }
}

impl FromStr for ConversionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cng" => Ok(ConversionType::Cng),
            "ev" => Ok(ConversionType::Ev),
            _ => Err(Error::InvalidInput(format!("unsupported conversion type: {s}"))),
        }
    }
}

/// Driving habits of a vehicle, used to project fuel spend.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct VehicleProfile {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub current_fuel_type: FuelType,
    pub monthly_distance_km: f64,
    pub fuel_efficiency_km_per_liter: f64,
}

/// The identifying part of a vehicle, as typed into the checker.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct VehicleQuery {
    pub make: String,
    pub model: String,
    pub year: i32,
}

impl fmt::Display for VehicleQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.make, self.model, self.year)
    }
}

/// Vehicle details attached to a booking.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct VehicleInfo {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub engine_type: String,
}

/// Inclusive range of model years.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Typical workshop price of a conversion, in naira.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EstimatedCost {
    pub cng: Option<u64>,
    pub ev: Option<u64>,
}

/// One row of the compatibility reference table.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct CompatibilityRecord {
    pub make: String,
    pub model: String,
    pub year_range: YearRange,
    pub engine_types: Vec<FuelType>,
    pub conversion_types: Vec<ServiceKind>,
    pub estimated_cost: EstimatedCost,
    pub notes: Option<String>,
}

impl CompatibilityRecord {
    /// Whether this record describes `make` and `model`. Surrounding
    /// whitespace and ASCII case are ignored on both sides.
    pub fn describes(&self, make: &str, model: &str) -> bool {
        self.make.trim().eq_ignore_ascii_case(make.trim())
            && self.model.trim().eq_ignore_ascii_case(model.trim())
    }
}

#[cfg(test)]
mod vehicle_tests {
    use super::*;

    #[test]
    fn test_unknown_fuel_type() {
        assert_eq!("Petrol".parse::<FuelType>().unwrap(), FuelType::Petrol);
        let err = "kerosene".parse::<FuelType>().unwrap_err();
        assert!(matches!(err, Error::UnknownFuelType(name) if name == "kerosene"));
    }

    #[test]
    fn test_hybrid_is_not_a_savings_target() {
        assert_eq!("EV".parse::<ConversionType>().unwrap(), ConversionType::Ev);
        assert!(matches!(
            "Hybrid".parse::<ConversionType>(),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_year_range_is_inclusive() {
        let range = YearRange {
            start: 2010,
            end: 2024,
        };
        assert!(range.contains(2010));
        assert!(range.contains(2024));
        assert!(!range.contains(2009));
        assert!(!range.contains(2025));
        assert_eq!(range.to_string(), "2010-2024");
    }
}
