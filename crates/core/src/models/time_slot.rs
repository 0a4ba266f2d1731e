use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bookable interval of time at a location.
///
/// `vendor_id` is `None` while the slot is still open for booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: Uuid,
    pub vendor_id: Option<Uuid>,
    pub location_id: Uuid,
    pub start_at: DateTime<Utc>,
    pub finish_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl TimeSlot {
    pub fn is_available(&self) -> bool {
        self.vendor_id.is_none()
    }

    /// Whether `time` lies strictly inside the slot. Both boundaries are excluded.
    pub fn has_time(&self, time: DateTime<Utc>) -> bool {
        time > self.start_at && time < self.finish_at
    }

    /// Two slots conflict when a boundary of either one falls strictly inside
    /// the other. Slots that only touch at a boundary do not conflict.
    pub fn conflicts_with(&self, other: &TimeSlot) -> bool {
        self.has_time(other.start_at)
            || self.has_time(other.finish_at)
            || other.has_time(self.start_at)
            || other.has_time(self.finish_at)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Returns the first slot in `others` that conflicts with `slot`, skipping
/// any entry that shares the slot's own id.
pub fn find_conflict<'a>(slot: &TimeSlot, others: &'a [TimeSlot]) -> Option<&'a TimeSlot> {
    others
        .iter()
        .filter(|other| other.id != slot.id)
        .find(|other| slot.conflicts_with(other))
}

pub fn has_time_conflict(slot: &TimeSlot, others: &[TimeSlot]) -> bool {
    find_conflict(slot, others).is_some()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTimeSlotRequest {
    pub location_id: Uuid,
    pub vendor_id: Option<Uuid>,
    pub start_at: DateTime<Utc>,
    pub finish_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTimeSlotRequest {
    pub location_id: Option<Uuid>,
    pub start_at: Option<DateTime<Utc>>,
    pub finish_at: Option<DateTime<Utc>>,
}
