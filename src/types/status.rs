//! Definition for the [`StationStatus`] type, implemented by an enum.
use serde::{Deserialize, Serialize};

/// Represents the operating status of a
/// [`Station`](super::station::Station).
#[derive(Debug, PartialEq, Hash, Eq, Copy, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StationStatus {
    #[default]
    Operational,
    Maintenance,
    Offline,
}
