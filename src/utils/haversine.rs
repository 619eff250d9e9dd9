//! Great-circle distance between two [`Location`]s.

use crate::location::Location;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Distance between two locations in kilometers, using the haversine
/// formula. Inputs are not validated.
pub fn distance(from: &Location, to: &Location) -> f64 {
    let lat1 = from.latitude.into_inner().to_radians();
    let lat2 = to.latitude.into_inner().to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (to.longitude.into_inner() - from.longitude.into_inner()).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair past 1 for antipodal points.
    let a = a.clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}
