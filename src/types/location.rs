//! Struct definitions and implementations for [`Location`] and
//! [`Address`].

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A [`Location`] is the geographic position of a provider workshop,
/// a station, or a customer searching for one. Typically, this type is
/// used in tandem with the [`Locatable`](`super::located::Locatable`)
/// trait.
///
/// Ordered floats are used so that a location can be hashed and
/// compared, which is handy as a map key when de-duplicating stations
/// that share a site.
#[derive(Debug, PartialEq, Hash, Eq, Copy, Clone, Serialize, Deserialize)]
pub struct Location {
    /// Degrees north of the equator, in [-90, 90].
    pub latitude: OrderedFloat<f64>,

    /// Degrees east of Greenwich, in [-180, 180].
    pub longitude: OrderedFloat<f64>,
}

impl Location {
    /// Creates a location from raw degrees. No validation happens here,
    /// see [`Location::validate`].
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Location {
            latitude: OrderedFloat(latitude),
            longitude: OrderedFloat(longitude),
        }
    }

    /// Returns true if both components are finite and within range.
    pub fn is_valid(&self) -> bool {
        let (lat, lon) = (self.latitude.into_inner(), self.longitude.into_inner());
        lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon)
    }

    /// Returns the location itself if valid, or an
    /// [`Error::InvalidCoordinate`] otherwise.
    pub fn validate(&self) -> Result<&Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(Error::InvalidCoordinate {
                latitude: self.latitude.into_inner(),
                longitude: self.longitude.into_inner(),
            })
        }
    }
}

impl From<(f64, f64)> for Location {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Location::new(latitude, longitude)
    }
}

/// A postal address pinned to a [`Location`].
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub location: Location,
}

//------------------------------------------------------------------
// Unit Tests
//------------------------------------------------------------------
