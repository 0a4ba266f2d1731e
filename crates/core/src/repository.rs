use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::SlotResult;
use crate::models::{location::Location, time_slot::TimeSlot, vendor::Vendor};
use crate::scope::SlotFilter;

/// Storage operations the time slot service depends on.
#[async_trait]
pub trait SlotRepository: Send + Sync {
    async fn find_slot(&self, id: Uuid) -> SlotResult<Option<TimeSlot>>;

    /// All slots at `location_id` other than the one identified by `exclude_id`.
    async fn slots_at_location_excluding(
        &self,
        location_id: Uuid,
        exclude_id: Uuid,
    ) -> SlotResult<Vec<TimeSlot>>;

    async fn list_slots(
        &self,
        filter: SlotFilter,
        now: DateTime<Utc>,
        location_id: Option<Uuid>,
    ) -> SlotResult<Vec<TimeSlot>>;

    async fn insert_slot(&self, slot: &TimeSlot) -> SlotResult<TimeSlot>;

    async fn update_slot(&self, slot: &TimeSlot) -> SlotResult<TimeSlot>;

    /// Returns `false` when no slot with `id` existed.
    async fn delete_slot(&self, id: Uuid) -> SlotResult<bool>;

    async fn find_vendor(&self, id: Uuid) -> SlotResult<Option<Vendor>>;

    async fn find_location(&self, id: Uuid) -> SlotResult<Option<Location>>;
}
