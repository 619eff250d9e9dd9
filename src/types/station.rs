//! Struct definitions and implementations for fuel and charging
//! stations.
//!
//! A [`Station`] sells CNG, charges EVs, or both (see
//! [`ServiceKind::Both`]). Stations are owned by a user with the
//! station partner, provider or admin role.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::located::{Locatable, ServiceKind};
use super::location::{Address, Location};
use super::status::StationStatus;
use crate::error::{Error, Result};

/// Chargers installed on new EV stations until the owner reports real
/// numbers.
pub const DEFAULT_EV_CHARGERS: EvChargers = EvChargers {
    total: 4,
    available: 4,
    fast_chargers: 2,
};

/// Unit prices posted at the pump or charger, in naira.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StationPricing {
    /// Per standard cubic meter.
    pub cng_price: Option<u64>,
    /// Per kWh.
    pub ev_price: Option<u64>,
}

/// Opening hours as local wall-clock strings, e.g. "06:00".
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct OperatingHours {
    pub open: String,
    pub close: String,
    pub is_24_hours: bool,
}

impl OperatingHours {
    /// Open around the clock.
    pub fn always() -> Self {
        OperatingHours {
            open: "00:00".to_string(),
            close: "23:59".to_string(),
            is_24_hours: true,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub struct EvChargers {
    pub total: u32,
    pub available: u32,
    pub fast_chargers: u32,
}

/// Live availability reported by the station owner.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Availability {
    pub cng_available: Option<bool>,
    pub ev_chargers: Option<EvChargers>,
}

impl Availability {
    /// Availability a freshly listed station of `kind` starts with.
    pub fn defaults_for(kind: ServiceKind) -> Self {
        let sells_cng = matches!(kind, ServiceKind::Cng | ServiceKind::Both);
        let charges_ev = matches!(kind, ServiceKind::Ev | ServiceKind::Both);
        Availability {
            cng_available: sells_cng.then_some(true),
            ev_chargers: charges_ev.then_some(DEFAULT_EV_CHARGERS),
        }
    }

    /// Rejects charger counts that exceed the installed total.
    pub fn validate(&self) -> Result<()> {
        if let Some(chargers) = self.ev_chargers {
            if chargers.available > chargers.total || chargers.fast_chargers > chargers.total {
                return Err(Error::InvalidInput(format!(
                    "charger counts exceed total: {} available, {} fast, {} installed",
                    chargers.available, chargers.fast_chargers, chargers.total
                )));
            }
        }
        Ok(())
    }
}

/// A fuel or charging station.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Station {
    pub uid: Uuid,
    pub name: String,

    /// What the station dispenses. Stored as a one-element slice source
    /// for [`Locatable::categories`].
    pub kind: ServiceKind,
    pub address: Address,
    pub pricing: StationPricing,
    pub amenities: Vec<String>,
    pub operating_hours: OperatingHours,
    pub status: StationStatus,
    pub availability: Availability,

    /// The user who listed the station.
    pub owner: Uuid,

    /// Set by an administrator after inspection.
    pub verified: bool,
}

impl Locatable for Station {
    fn uid(&self) -> Uuid {
        self.uid
    }

    fn location(&self) -> Option<&Location> {
        Some(&self.address.location)
    }

    fn categories(&self) -> &[ServiceKind] {
        std::slice::from_ref(&self.kind)
    }
}

/// Input for listing a new station.
#[derive(Debug, Clone, Deserialize)]
pub struct NewStation {
    pub name: String,
    pub kind: ServiceKind,
    pub address: Address,
    pub pricing: StationPricing,
    pub amenities: Vec<String>,
    pub operating_hours: OperatingHours,
}

impl NewStation {
    /// Turns the request into an unverified, operational station owned
    /// by `owner`.
    pub fn into_station(self, owner: Uuid) -> Result<Station> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidInput("station name is empty".to_string()));
        }
        if self.kind == ServiceKind::Hybrid {
            return Err(Error::InvalidInput(
                "stations dispense CNG, EV charge, or both".to_string(),
            ));
        }
        self.address.location.validate()?;

        Ok(Station {
            uid: Uuid::new_v4(),
            name: self.name,
            kind: self.kind,
            address: self.address,
            pricing: self.pricing,
            amenities: self.amenities,
            operating_hours: self.operating_hours,
            status: StationStatus::Operational,
            availability: Availability::defaults_for(self.kind),
            owner,
            verified: false,
        })
    }
}

//------------------------------------------------------------------
// Unit Tests
//------------------------------------------------------------------
