//! PostgreSQL-backed [`SlotRepository`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use vendorslots_core::{
    errors::SlotResult,
    models::{location::Location, time_slot::TimeSlot, vendor::Vendor},
    repository::SlotRepository,
    scope::SlotFilter,
};

use crate::{
    DbPool,
    repositories::{location, time_slot, vendor},
};

#[derive(Clone)]
pub struct PgSlotRepository {
    pool: DbPool,
}

impl PgSlotRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SlotRepository for PgSlotRepository {
    async fn find_slot(&self, id: Uuid) -> SlotResult<Option<TimeSlot>> {
        let slot = time_slot::get_time_slot_by_id(&self.pool, id).await?;
        Ok(slot.map(TimeSlot::from))
    }

    async fn slots_at_location_excluding(
        &self,
        location_id: Uuid,
        exclude_id: Uuid,
    ) -> SlotResult<Vec<TimeSlot>> {
        let slots =
            time_slot::get_time_slots_by_location_excluding(&self.pool, location_id, exclude_id)
                .await?;
        Ok(slots.into_iter().map(TimeSlot::from).collect())
    }

    async fn list_slots(
        &self,
        filter: SlotFilter,
        now: DateTime<Utc>,
        location_id: Option<Uuid>,
    ) -> SlotResult<Vec<TimeSlot>> {
        let slots = time_slot::list_time_slots(&self.pool, filter, now, location_id).await?;
        Ok(slots.into_iter().map(TimeSlot::from).collect())
    }

    async fn insert_slot(&self, slot: &TimeSlot) -> SlotResult<TimeSlot> {
        Ok(time_slot::create_time_slot(&self.pool, slot).await?.into())
    }

    async fn update_slot(&self, slot: &TimeSlot) -> SlotResult<TimeSlot> {
        Ok(time_slot::update_time_slot(&self.pool, slot).await?.into())
    }

    async fn delete_slot(&self, id: Uuid) -> SlotResult<bool> {
        Ok(time_slot::delete_time_slot(&self.pool, id).await?)
    }

    async fn find_vendor(&self, id: Uuid) -> SlotResult<Option<Vendor>> {
        let vendor = vendor::get_vendor_by_id(&self.pool, id).await?;
        Ok(vendor.map(Vendor::from))
    }

    async fn find_location(&self, id: Uuid) -> SlotResult<Option<Location>> {
        let location = location::get_location_by_id(&self.pool, id).await?;
        Ok(location.map(Location::from))
    }
}
