//! Definitions for objects that can be placed on a map and ranked by
//! proximity.
//!
//! The marketplace has two kinds of located records: conversion
//! providers (users with the provider role, see
//! [`User`](`super::user::User`)) and fuel or charging stations (see
//! [`Station`](`super::station::Station`)). The ranker does not care
//! which one it is handed, so both implement [`Locatable`] and the
//! ranking functions accept any `impl Locatable`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::location::Location;
use crate::error::Error;

/// A "Locatable-like" object has an identity, a position and a set of
/// service categories.
pub trait Locatable {
    /// Stable identity of the record.
    fn uid(&self) -> Uuid;

    /// Position of the record. A record without one is never ranked.
    fn location(&self) -> Option<&Location>;

    /// Service categories offered at the location.
    fn categories(&self) -> &[ServiceKind];
}

/// Fuel or drive-train service that a provider or station offers.
///
/// [`ServiceKind::Both`] is only used by stations that sell CNG and
/// charge EVs at the same site. A search filtered on either kind
/// matches it.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Serialize, Deserialize)]
pub enum ServiceKind {
    #[serde(rename = "CNG")]
    Cng,
    #[serde(rename = "EV")]
    Ev,
    Hybrid,
    Both,
}

impl ServiceKind {
    /// True if a record tagged `self` should be returned for a search
    /// on `filter`.
    pub fn satisfies(self, filter: ServiceKind) -> bool {
        self == filter || self == ServiceKind::Both
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceKind::Cng => write!(f, "CNG"),
            ServiceKind::Ev => write!(f, "EV"),
            ServiceKind::Hybrid => write!(f, "Hybrid"),
            ServiceKind::Both => write!(f, "Both"),
        }
    }
}

impl FromStr for ServiceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cng" => Ok(ServiceKind::Cng),
            "ev" => Ok(ServiceKind::Ev),
            "hybrid" => Ok(ServiceKind::Hybrid),
            "both" => Ok(ServiceKind::Both),
            other => Err(Error::InvalidInput(format!("unknown service kind: {other}"))),
        }
    }
}
