//! iCalendar export of booked time slots.

use chrono::{DateTime, Timelike, Utc};
use icalendar::{Calendar, Component, Event, EventLike};
use uuid::Uuid;

use crate::errors::{SlotError, SlotResult};
use crate::models::{location::Location, time_slot::TimeSlot, vendor::Vendor};

pub const CALENDAR_NAME: &str = "Vendor time slots";

/// The vendor booked on `slot`. A slot without a vendor cannot be exported
/// and yields [`SlotError::Unbooked`].
pub fn booked_vendor_id(slot: &TimeSlot) -> SlotResult<Uuid> {
    slot.vendor_id.ok_or(SlotError::Unbooked(slot.id))
}

/// Build a calendar event for a booked slot.
///
/// Start and end are truncated to whole minutes. `vendor` must be the vendor
/// booked on the slot.
pub fn to_ical_event(slot: &TimeSlot, vendor: &Vendor, location: &Location) -> SlotResult<Event> {
    if booked_vendor_id(slot)? != vendor.id {
        return Err(SlotError::Validation(format!(
            "vendor {} is not booked on time slot {}",
            vendor.id, slot.id
        )));
    }

    let event = Event::new()
        .uid(&event_uid(slot))
        .starts(ical_time(slot.start_at))
        .ends(ical_time(slot.finish_at))
        .summary(&format!("{} at {}", vendor.name, location.name))
        .description(&format!("{} - {}", vendor.name, vendor.cuisine))
        .done();

    Ok(event)
}

pub fn to_ical_calendar(events: Vec<Event>) -> Calendar {
    let mut calendar = Calendar::new();
    calendar.name(CALENDAR_NAME);
    for event in events {
        calendar.push(event);
    }
    calendar.done()
}

fn event_uid(slot: &TimeSlot) -> String {
    format!("{}@vendorslots", slot.id)
}

// Drops seconds and sub-second precision.
fn ical_time(time: DateTime<Utc>) -> DateTime<Utc> {
    time.with_nanosecond(0)
        .and_then(|t| t.with_second(0))
        .unwrap_or(time)
}
