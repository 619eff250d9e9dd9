//! Random station generators for demos and tests.
//!
//! Callers pass their own [`Rng`] so a seeded generator gives the same
//! stations on every run.

use rand::Rng;
use uuid::Uuid;

use crate::located::ServiceKind;
use crate::location::{Address, Location};
use crate::station::{Availability, OperatingHours, Station, StationPricing};
use crate::status::StationStatus;

/// Kilometers per degree of latitude on a sphere of radius 6371 km.
const KM_PER_DEGREE: f64 = 111.195;

/// Generates `capacity` valid locations scattered roughly uniformly over
/// a disc of `radius_km` around `center`.
///
/// The offset is computed on a flat approximation, so points near the
/// edge may land slightly inside or outside the true great-circle
/// radius.
pub fn generate_locations_near(
    rng: &mut impl Rng,
    center: &Location,
    radius_km: f64,
    capacity: usize,
) -> Vec<Location> {
    let lat0 = center.latitude.into_inner();
    let lon0 = center.longitude.into_inner();
    let km_per_lon_degree = (KM_PER_DEGREE * lat0.to_radians().cos()).max(1e-6);

    (0..capacity)
        .map(|_| {
            let distance_km = radius_km * rng.gen::<f64>().sqrt();
            let bearing = rng.gen_range(0.0..std::f64::consts::TAU);
            let latitude = lat0 + distance_km * bearing.cos() / KM_PER_DEGREE;
            let longitude = lon0 + distance_km * bearing.sin() / km_per_lon_degree;
            Location::new(latitude.clamp(-90.0, 90.0), longitude.clamp(-180.0, 180.0))
        })
        .collect()
}

/// Generates `capacity` unverified stations near `center`, each owned by
/// `owner` and dispensing CNG, EV charge, or both.
pub fn generate_stations_near(
    rng: &mut impl Rng,
    center: &Location,
    radius_km: f64,
    capacity: usize,
    owner: Uuid,
) -> Vec<Station> {
    const KINDS: [ServiceKind; 3] = [ServiceKind::Cng, ServiceKind::Ev, ServiceKind::Both];

    generate_locations_near(rng, center, radius_km, capacity)
        .into_iter()
        .enumerate()
        .map(|(i, location)| {
            let kind = KINDS[rng.gen_range(0..KINDS.len())];
            Station {
                uid: Uuid::new_v4(),
                name: format!("Generated Station {i}"),
                kind,
                address: Address {
                    street: format!("{i} Generated Road"),
                    city: "Generated".to_string(),
                    state: "Generated".to_string(),
                    location,
                },
                pricing: StationPricing {
                    cng_price: kind.satisfies(ServiceKind::Cng).then(|| rng.gen_range(220..=250)),
                    ev_price: kind.satisfies(ServiceKind::Ev).then(|| rng.gen_range(60..=80)),
                },
                amenities: vec![],
                operating_hours: OperatingHours::always(),
                status: StationStatus::Operational,
                availability: Availability::defaults_for(kind),
                owner,
                verified: false,
            }
        })
        .collect()
}

#[cfg(test)]
mod generator_tests {
    use super::*;
    use crate::haversine;
    use rand::{rngs::StdRng, SeedableRng};

    const IBADAN: Location = Location::new(7.3775, 3.947);

    #[test]
    fn test_capacity_and_validity() {
        let mut rng = StdRng::seed_from_u64(1);
        let locations = generate_locations_near(&mut rng, &IBADAN, 30.0, 200);
        assert_eq!(locations.len(), 200);
        assert!(locations.iter().all(Location::is_valid));
    }

    #[test]
    fn test_points_stay_near_radius() {
        let mut rng = StdRng::seed_from_u64(2);
        for location in generate_locations_near(&mut rng, &IBADAN, 30.0, 200) {
            // Flat approximation error is well under a percent at this scale.
            assert!(haversine::distance(&IBADAN, &location) <= 30.3);
        }
    }

    #[test]
    fn test_same_seed_same_stations() {
        let owner = Uuid::new_v4();
        let a = generate_stations_near(&mut StdRng::seed_from_u64(3), &IBADAN, 10.0, 5, owner);
        let b = generate_stations_near(&mut StdRng::seed_from_u64(3), &IBADAN, 10.0, 5, owner);
        let sites = |stations: &[Station]| {
            stations
                .iter()
                .map(|s| (s.address.location, s.kind))
                .collect::<Vec<_>>()
        };
        assert_eq!(sites(&a), sites(&b));
    }
}
