//! Conversion bookings and the reviews customers leave afterwards.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::located::ServiceKind;
use super::user::User;
use super::vehicle::VehicleInfo;

/// Lowest and highest accepted review scores.
pub const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// Progress of a conversion job at the workshop.
#[derive(Debug, PartialEq, Hash, Eq, Copy, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl BookingStatus {
    /// Whether a booking may move from `self` to `next`.
    ///
    /// A job advances pending → confirmed → in progress → completed and
    /// may be cancelled until work starts.
    pub fn can_become(self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, InProgress)
                | (Confirmed, Cancelled)
                | (InProgress, Completed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::InProgress => "in_progress",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub uid: Uuid,

    /// The vehicle owner who booked.
    pub user: Uuid,

    /// The provider user doing the conversion.
    pub provider: Uuid,
    pub vehicle: VehicleInfo,
    pub conversion_type: ServiceKind,
    pub scheduled_for: DateTime<Utc>,
    pub status: BookingStatus,

    /// Agreed price in naira.
    pub total_cost: u64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for booking a conversion slot.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBooking {
    pub provider: Uuid,
    pub vehicle: VehicleInfo,
    pub conversion_type: ServiceKind,
    pub scheduled_for: DateTime<Utc>,
    pub total_cost: u64,
    pub notes: Option<String>,
}

/// What a review is about.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "uid", rename_all = "lowercase")]
pub enum ReviewTarget {
    Provider(Uuid),
    Station(Uuid),
}

impl ReviewTarget {
    pub fn kind(&self) -> &'static str {
        match self {
            ReviewTarget::Provider(_) => "provider",
            ReviewTarget::Station(_) => "station",
        }
    }

    pub fn uid(&self) -> Uuid {
        match self {
            ReviewTarget::Provider(uid) | ReviewTarget::Station(uid) => *uid,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Review {
    pub uid: Uuid,
    pub user: Uuid,
    pub target: ReviewTarget,
    pub rating: u8,
    pub comment: String,

    /// Set once the visit or booking behind the review is confirmed.
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

/// A booking joined with the provider it was made with.
#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct BookingView<'a> {
    #[serde(flatten)]
    pub booking: &'a Booking,

    /// `None` if the provider account is gone.
    pub provider: Option<&'a User>,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub struct ReviewAuthor<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

/// A review joined with the name and email of whoever wrote it.
#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct ReviewView<'a> {
    #[serde(flatten)]
    pub review: &'a Review,
    pub author: Option<ReviewAuthor<'a>>,
}
