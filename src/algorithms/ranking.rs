//! Proximity ranking of providers and stations.
//!
//! Every candidate is measured against the reference point with the
//! haversine formula, filtered by service category and radius, then
//! sorted nearest first.

use ordered_float::OrderedFloat;

use crate::error::{Error, Result};
use crate::haversine;
use crate::located::{Locatable, ServiceKind};
use crate::location::Location;
use crate::ranked::Ranked;

/// Optional filters for [`find_nearest`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NearestQuery {
    /// Drop candidates farther than this many kilometers. Must be
    /// positive when set. `None` means no distance limit.
    pub radius_km: Option<f64>,

    /// Keep only candidates offering this service, or tagged
    /// [`ServiceKind::Both`].
    pub category: Option<ServiceKind>,

    /// Keep at most this many of the nearest candidates.
    pub limit: Option<usize>,
}

impl NearestQuery {
    pub fn within(radius_km: f64) -> Self {
        NearestQuery {
            radius_km: Some(radius_km),
            ..Default::default()
        }
    }

    pub fn offering(mut self, category: ServiceKind) -> Self {
        self.category = Some(category);
        self
    }

    pub fn take(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Ranks `entities` by distance from `reference`.
///
/// # Arguments
/// * `reference` - The search point. Must be a valid coordinate.
/// * `entities` - Candidates, in the order ties should be resolved.
/// * `query` - Optional radius and category filters.
///
/// # Returns
/// The matching candidates with their distance, sorted by non-decreasing
/// distance. Equal distances keep input order. With a limit, only the
/// first `limit` entries of that order are returned.
///
/// Candidates without a location are skipped. A candidate whose
/// location is out of range fails the whole call with
/// [`Error::InvalidCoordinate`], as does an invalid reference.
///
/// # Time Complexity
/// *O*(*n* log *n*) in the number of candidates.
pub fn find_nearest<'a, T, I>(
    reference: &Location,
    entities: I,
    query: NearestQuery,
) -> Result<Vec<Ranked<'a, T>>>
where
    T: Locatable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    reference.validate()?;
    if let Some(radius) = query.radius_km {
        if !(radius.is_finite() && radius > 0.0) {
            warn!("Rejecting search radius {}", radius);
            return Err(Error::InvalidInput(format!(
                "radius must be a positive number of kilometers, got {radius}"
            )));
        }
    }
    debug!("reference: {:?}, query: {:?}", reference, query);

    let mut ranked = Vec::new();
    for entity in entities {
        let Some(location) = entity.location() else {
            debug!("skipping {} without a location", entity.uid());
            continue;
        };
        location.validate()?;

        if let Some(filter) = query.category {
            if !matches_category(entity.categories(), filter) {
                continue;
            }
        }

        let distance_km = haversine::distance(reference, location);
        if query.radius_km.is_some_and(|radius| distance_km > radius) {
            continue;
        }
        ranked.push(Ranked {
            entity,
            distance_km: OrderedFloat(distance_km),
        });
    }

    // `sort_by_key` is stable, which keeps ties in input order.
    ranked.sort_by_key(|candidate| candidate.distance_km);
    if let Some(limit) = query.limit {
        ranked.truncate(limit);
    }
    debug!("ranked {} candidates", ranked.len());
    Ok(ranked)
}

//---------------------------------------------------------------
// Private functions
//---------------------------------------------------------------

fn matches_category(categories: &[ServiceKind], filter: ServiceKind) -> bool {
    categories.iter().any(|kind| kind.satisfies(filter))
}

//------------------------------------------------------------------
// Unit Tests
//------------------------------------------------------------------
