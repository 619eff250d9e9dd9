//! Definition of the `Ranked` type.
use ordered_float::OrderedFloat;
use serde::Serialize;

/// A located record paired with its distance from the search point.
/// Lives only as long as the borrowed record.
#[derive(Debug, PartialEq, Serialize)]
pub struct Ranked<'a, T> {
    /// The record that was ranked.
    pub entity: &'a T,

    /// Great-circle distance from the search point, in kilometers.
    pub distance_km: OrderedFloat<f64>,
}

// Derived impls would require `T: Clone`, but only the reference is copied.
impl<T> Clone for Ranked<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Ranked<'_, T> {}
