use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use vendorslots_core::models::{location::Location, time_slot::TimeSlot, vendor::Vendor};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTimeSlot {
    pub id: Uuid,
    pub vendor_id: Option<Uuid>,
    pub location_id: Uuid,
    pub start_at: DateTime<Utc>,
    pub finish_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbVendor {
    pub id: Uuid,
    pub name: String,
    pub cuisine: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbLocation {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<DbTimeSlot> for TimeSlot {
    fn from(row: DbTimeSlot) -> Self {
        Self {
            id: row.id,
            vendor_id: row.vendor_id,
            location_id: row.location_id,
            start_at: row.start_at,
            finish_at: row.finish_at,
            created_at: row.created_at,
        }
    }
}

impl From<DbVendor> for Vendor {
    fn from(row: DbVendor) -> Self {
        Self {
            id: row.id,
            name: row.name,
            cuisine: row.cuisine,
            created_at: row.created_at,
        }
    }
}

impl From<DbLocation> for Location {
    fn from(row: DbLocation) -> Self {
        Self {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}
