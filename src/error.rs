//! Error types for switchr

use thiserror::Error;
use uuid::Uuid;

use crate::types::booking::BookingStatus;
use crate::types::located::ServiceKind;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid coordinate: ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown fuel type: {0}")]
    UnknownFuelType(String),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("{kind} not found: {uid}")]
    NotFound { kind: &'static str, uid: Uuid },

    #[error("You have already reviewed this {0}")]
    AlreadyReviewed(&'static str),

    #[error("Cannot move booking from {from} to {to}")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    #[error("Provider does not offer {0} conversions")]
    ServiceNotOffered(ServiceKind),

    #[error("Email already registered: {0}")]
    EmailTaken(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
