//! # Time slot write path
//!
//! Every write (create, update, booking, unbooking) goes through
//! [`TimeSlotService::validate`] before the repository is touched. Validation
//! reads the other slots currently stored at the same location and rejects
//! the write when any of them conflicts. The check is not atomic with the
//! write that follows it: two concurrent writers can both pass validation.

use chrono::{DateTime, Utc};
use icalendar::{Calendar, Event};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    errors::{SlotError, SlotResult},
    ical,
    models::{
        location::Location,
        time_slot::{self, CreateTimeSlotRequest, TimeSlot, UpdateTimeSlotRequest},
        vendor::Vendor,
    },
    repository::SlotRepository,
    scope::{self, SlotFilter},
};

pub struct TimeSlotService<R> {
    repo: R,
}

impl<R: SlotRepository> TimeSlotService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn get(&self, id: Uuid) -> SlotResult<TimeSlot> {
        self.repo
            .find_slot(id)
            .await?
            .ok_or_else(|| SlotError::NotFound(format!("Time slot with ID {} not found", id)))
    }

    pub async fn by_scope(&self, name: Option<&str>) -> SlotResult<Vec<TimeSlot>> {
        self.by_scope_at(name, Utc::now()).await
    }

    pub async fn by_scope_at(
        &self,
        name: Option<&str>,
        now: DateTime<Utc>,
    ) -> SlotResult<Vec<TimeSlot>> {
        let filter = scope::by_scope(name);
        debug!("Listing time slots: requested={:?}, filter={:?}", name, filter);
        self.repo.list_slots(filter, now, None).await
    }

    pub async fn create(&self, request: CreateTimeSlotRequest) -> SlotResult<TimeSlot> {
        let slot = TimeSlot {
            id: Uuid::new_v4(),
            vendor_id: request.vendor_id,
            location_id: request.location_id,
            start_at: request.start_at,
            finish_at: request.finish_at,
            created_at: Utc::now(),
        };

        if let Some(vendor_id) = slot.vendor_id {
            self.require_vendor(vendor_id).await?;
        }
        self.require_location(slot.location_id).await?;
        self.validate(&slot).await?;

        let slot = self.repo.insert_slot(&slot).await?;
        info!("Created time slot {} at location {}", slot, slot.location_id);
        Ok(slot)
    }

    pub async fn update(&self, id: Uuid, request: UpdateTimeSlotRequest) -> SlotResult<TimeSlot> {
        let mut slot = self.get(id).await?;

        if let Some(location_id) = request.location_id {
            self.require_location(location_id).await?;
            slot.location_id = location_id;
        }
        if let Some(start_at) = request.start_at {
            slot.start_at = start_at;
        }
        if let Some(finish_at) = request.finish_at {
            slot.finish_at = finish_at;
        }

        self.save(slot).await
    }

    /// Assign `vendor_id` to the slot.
    pub async fn book(&self, id: Uuid, vendor_id: Uuid) -> SlotResult<TimeSlot> {
        let mut slot = self.get(id).await?;
        self.require_vendor(vendor_id).await?;
        slot.vendor_id = Some(vendor_id);
        self.save(slot).await
    }

    /// Clear the vendor so the slot becomes available again.
    pub async fn release(&self, id: Uuid) -> SlotResult<TimeSlot> {
        let mut slot = self.get(id).await?;
        slot.vendor_id = None;
        self.save(slot).await
    }

    pub async fn delete(&self, id: Uuid) -> SlotResult<()> {
        if !self.repo.delete_slot(id).await? {
            return Err(SlotError::NotFound(format!("Time slot with ID {} not found", id)));
        }
        info!("Deleted time slot {}", id);
        Ok(())
    }

    pub async fn has_time_conflict(&self, slot: &TimeSlot) -> SlotResult<bool> {
        Ok(self.conflicting_slot(slot).await?.is_some())
    }

    /// Checks run before a slot is persisted.
    pub async fn validate(&self, slot: &TimeSlot) -> SlotResult<()> {
        if slot.start_at >= slot.finish_at {
            return Err(SlotError::Validation(format!(
                "finish_at ({}) must be after start_at ({})",
                slot.finish_at, slot.start_at
            )));
        }

        if let Some(existing) = self.conflicting_slot(slot).await? {
            warn!(
                "Rejected time slot {}: conflicts with {} at location {}",
                slot, existing, slot.location_id
            );
            return Err(SlotError::Conflict {
                slot_id: slot.id,
                conflicting_id: existing.id,
            });
        }

        Ok(())
    }

    /// First stored slot at the same location that conflicts with `slot`.
    async fn conflicting_slot(&self, slot: &TimeSlot) -> SlotResult<Option<TimeSlot>> {
        let others = self
            .repo
            .slots_at_location_excluding(slot.location_id, slot.id)
            .await?;
        Ok(time_slot::find_conflict(slot, &others).cloned())
    }

    pub async fn to_ical_event(&self, id: Uuid) -> SlotResult<Event> {
        let slot = self.get(id).await?;
        self.event_for(&slot).await
    }

    /// Calendar of every booked slot in the named scope, optionally limited to one location.
    pub async fn calendar(
        &self,
        location_id: Option<Uuid>,
        scope_name: Option<&str>,
    ) -> SlotResult<Calendar> {
        self.calendar_at(location_id, scope_name, Utc::now()).await
    }

    pub async fn calendar_at(
        &self,
        location_id: Option<Uuid>,
        scope_name: Option<&str>,
        now: DateTime<Utc>,
    ) -> SlotResult<Calendar> {
        let filter: SlotFilter = scope::by_scope(scope_name);
        let slots = self.repo.list_slots(filter, now, location_id).await?;

        let mut events = Vec::with_capacity(slots.len());
        for slot in slots.iter().filter(|slot| !slot.is_available()) {
            events.push(self.event_for(slot).await?);
        }

        debug!("Exporting {} of {} time slots", events.len(), slots.len());
        Ok(ical::to_ical_calendar(events))
    }

    async fn event_for(&self, slot: &TimeSlot) -> SlotResult<Event> {
        let vendor = self.require_vendor(ical::booked_vendor_id(slot)?).await?;
        let location = self.require_location(slot.location_id).await?;
        ical::to_ical_event(slot, &vendor, &location)
    }

    async fn save(&self, slot: TimeSlot) -> SlotResult<TimeSlot> {
        self.validate(&slot).await?;
        let slot = self.repo.update_slot(&slot).await?;
        info!("Updated time slot {}", slot);
        Ok(slot)
    }

    async fn require_vendor(&self, id: Uuid) -> SlotResult<Vendor> {
        self.repo
            .find_vendor(id)
            .await?
            .ok_or_else(|| SlotError::NotFound(format!("Vendor with ID {} not found", id)))
    }

    async fn require_location(&self, id: Uuid) -> SlotResult<Location> {
        self.repo
            .find_location(id)
            .await?
            .ok_or_else(|| SlotError::NotFound(format!("Location with ID {} not found", id)))
    }
}
