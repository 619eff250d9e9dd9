//! Conversion compatibility lookups and fuel-savings projections.
//!
//! Both operations are pure. Money is kept in unrounded naira until
//! [`SavingsEstimate::into_report`] so that derived figures (savings,
//! payback) are not skewed by rounding their inputs first.

use std::fmt;

use serde::Serialize;

use crate::config::FuelPrices;
use crate::error::{Error, Result};
use crate::located::ServiceKind;
use crate::vehicle::{
    CompatibilityRecord, ConversionType, EstimatedCost, VehicleProfile, VehicleQuery, YearRange,
};

/// CNG yields this much more distance per liter-equivalent than petrol.
pub const CNG_EFFICIENCY_GAIN: f64 = 1.25;
/// Typical distance a converted EV covers per kWh.
pub const EV_KM_PER_KWH: f64 = 6.0;
/// Average workshop price of a CNG kit, in naira.
pub const CNG_CONVERSION_COST: f64 = 800_000.0;
/// Average workshop price of an EV conversion, in naira.
pub const EV_CONVERSION_COST: f64 = 3_500_000.0;

//------------------------------------------------------------------
// Compatibility
//------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
#[serde(tag = "reason")]
pub enum IncompatibleReason {
    /// The reference table has nothing on this make and model.
    NoData,
    /// The model is known but this model year is not covered.
    YearOutOfRange { allowed_range: YearRange },
}

/// Verdict of [`check_compatibility`].
#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub enum Compatibility {
    Compatible {
        conversion_types: Vec<ServiceKind>,
        estimated_cost: EstimatedCost,
        notes: Option<String>,
    },
    Incompatible(IncompatibleReason),
}

impl Compatibility {
    pub fn is_compatible(&self) -> bool {
        matches!(self, Compatibility::Compatible { .. })
    }

    /// Sentence shown to the vehicle owner for this verdict.
    pub fn message(&self, vehicle: &VehicleQuery) -> String {
        match self {
            Compatibility::Compatible {
                conversion_types, ..
            } => {
                let kinds: Vec<String> = conversion_types.iter().map(ToString::to_string).collect();
                format!(
                    "Your {vehicle} is compatible with {} conversion.",
                    kinds.join(", ")
                )
            }
            Compatibility::Incompatible(IncompatibleReason::NoData) => {
                "Vehicle compatibility data not available. Please contact a certified provider for assessment.".to_string()
            }
            Compatibility::Incompatible(IncompatibleReason::YearOutOfRange { allowed_range }) => {
                format!("{vehicle} is outside the supported year range ({allowed_range}).")
            }
        }
    }
}

/// Looks `vehicle` up in the reference `table`.
///
/// Make and model are matched ignoring surrounding whitespace and ASCII
/// case. The first matching record wins.
pub fn check_compatibility(vehicle: &VehicleQuery, table: &[CompatibilityRecord]) -> Compatibility {
    let Some(record) = table
        .iter()
        .find(|record| record.describes(&vehicle.make, &vehicle.model))
    else {
        debug!("no compatibility data for {} {}", vehicle.make, vehicle.model);
        return Compatibility::Incompatible(IncompatibleReason::NoData);
    };

    if !record.year_range.contains(vehicle.year) {
        debug!(
            "{} outside supported range {}",
            vehicle, record.year_range
        );
        return Compatibility::Incompatible(IncompatibleReason::YearOutOfRange {
            allowed_range: record.year_range,
        });
    }

    Compatibility::Compatible {
        conversion_types: record.conversion_types.clone(),
        estimated_cost: record.estimated_cost,
        notes: record.notes.clone(),
    }
}

//------------------------------------------------------------------
// Savings
//------------------------------------------------------------------

/// Months until fuel savings cover the conversion.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Payback {
    Months(i64),
    /// Savings are zero or negative, so the conversion is never
    /// recovered.
    Never,
}

impl fmt::Display for Payback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payback::Months(1) => write!(f, "1 month"),
            Payback::Months(months) => write!(f, "{months} months"),
            Payback::Never => write!(f, "never pays back"),
        }
    }
}

/// Unrounded projection, in naira.
#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct SavingsEstimate {
    pub conversion_type: ConversionType,
    pub current_monthly_cost: f64,
    pub new_monthly_cost: f64,
    /// Negative when the new fuel costs more.
    pub monthly_savings: f64,
    pub annual_savings: f64,
    pub conversion_cost: f64,
    /// Infinite or NaN when `monthly_savings <= 0`; use [`Self::payback`].
    pub payback_period_months: f64,
    pub five_year_net_savings: f64,
}

impl SavingsEstimate {
    pub fn payback(&self) -> Payback {
        if self.monthly_savings > 0.0 && self.payback_period_months.is_finite() {
            Payback::Months(self.payback_period_months.round() as i64)
        } else {
            Payback::Never
        }
    }

    /// Rounds every figure to whole naira for display.
    pub fn into_report(self) -> SavingsReport {
        SavingsReport {
            conversion_type: self.conversion_type,
            current_monthly_cost: self.current_monthly_cost.round() as i64,
            new_monthly_cost: self.new_monthly_cost.round() as i64,
            monthly_savings: self.monthly_savings.round() as i64,
            annual_savings: self.annual_savings.round() as i64,
            conversion_cost: self.conversion_cost.round() as i64,
            payback: self.payback(),
            five_year_net_savings: self.five_year_net_savings.round() as i64,
        }
    }
}

/// Presentation form of a [`SavingsEstimate`], in whole naira.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub struct SavingsReport {
    pub conversion_type: ConversionType,
    pub current_monthly_cost: i64,
    pub new_monthly_cost: i64,
    pub monthly_savings: i64,
    pub annual_savings: i64,
    pub conversion_cost: i64,
    pub payback: Payback,
    pub five_year_net_savings: i64,
}

/// Projects running costs before and after converting to `conversion`.
///
/// # Arguments
/// * `profile` - Current fuel, monthly distance and efficiency. Distance
///   and efficiency must be positive.
/// * `conversion` - Target drive-train.
/// * `prices` - Energy price snapshot.
///
/// # Returns
/// The unrounded projection, or [`Error::InvalidInput`] for a
/// non-positive distance or efficiency.
pub fn estimate_savings(
    profile: &VehicleProfile,
    conversion: ConversionType,
    prices: &FuelPrices,
) -> Result<SavingsEstimate> {
    let distance = profile.monthly_distance_km;
    let efficiency = profile.fuel_efficiency_km_per_liter;
    ensure_positive("monthly distance", distance)?;
    ensure_positive("fuel efficiency", efficiency)?;

    let monthly_fuel_liters = distance / efficiency;
    let current_monthly_cost = monthly_fuel_liters * prices.for_fuel(profile.current_fuel_type);

    let (new_monthly_cost, conversion_cost) = match conversion {
        ConversionType::Cng => {
            let cng_efficiency = efficiency * CNG_EFFICIENCY_GAIN;
            (distance / cng_efficiency * prices.cng, CNG_CONVERSION_COST)
        }
        ConversionType::Ev => (distance / EV_KM_PER_KWH * prices.electricity, EV_CONVERSION_COST),
    };

    let monthly_savings = current_monthly_cost - new_monthly_cost;
    let annual_savings = monthly_savings * 12.0;
    let estimate = SavingsEstimate {
        conversion_type: conversion,
        current_monthly_cost,
        new_monthly_cost,
        monthly_savings,
        annual_savings,
        conversion_cost,
        payback_period_months: conversion_cost / monthly_savings,
        five_year_net_savings: annual_savings * 5.0 - conversion_cost,
    };
    debug!("savings estimate: {:?}", estimate);
    Ok(estimate)
}

fn ensure_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        warn!("Rejecting {} of {}", name, value);
        Err(Error::InvalidInput(format!("{name} must be positive, got {value}")))
    }
}

//------------------------------------------------------------------
// Unit Tests
//------------------------------------------------------------------
