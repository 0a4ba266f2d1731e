use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::mock;
use uuid::Uuid;
use vendorslots_core::{
    errors::SlotResult,
    models::{location::Location, time_slot::TimeSlot, vendor::Vendor},
    repository::SlotRepository,
    scope::SlotFilter,
};

// Mock repository for testing the service without a database
mock! {
    pub SlotRepo {}

    #[async_trait]
    impl SlotRepository for SlotRepo {
        async fn find_slot(&self, id: Uuid) -> SlotResult<Option<TimeSlot>>;

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

        async fn delete_slot(&self, id: Uuid) -> SlotResult<bool>;

        async fn find_vendor(&self, id: Uuid) -> SlotResult<Option<Vendor>>;

        async fn find_location(&self, id: Uuid) -> SlotResult<Option<Location>>;
    }
}
