//! Conversion Marketplace Library.
//! Ranks CNG/EV conversion providers and fuel stations by distance,
//! checks vehicle compatibility and projects fuel savings.

#[macro_use]
extern crate log;

pub mod config;
pub mod error;

pub mod types {
    pub mod article;
    pub mod booking;
    pub mod located;
    pub mod location;
    pub mod ranked;
    pub mod station;
    pub mod status;
    pub mod user;
    pub mod vehicle;
}

pub mod utils {
    pub mod generator;
    pub mod haversine;
}

pub mod algorithms {
    pub mod estimator;
    pub mod ranking;
}

pub mod market {
    pub mod seed;
    pub mod state;
}

pub use error::{Error, Result};
pub use market::state::Marketplace;
pub use types::{article, booking, located, location, ranked, station, status, user, vehicle};
pub use utils::{generator, haversine};
