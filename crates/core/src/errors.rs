use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum SlotError {
    /// A write was rejected because the slot overlaps another slot at the same location.
    #[error("Time slot conflicts with existing time slot")]
    Conflict { slot_id: Uuid, conflicting_id: Uuid },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Time slot {0} has no vendor booked")]
    Unbooked(Uuid),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),
}

impl SlotError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, SlotError::Conflict { .. })
    }
}

pub type SlotResult<T> = Result<T, SlotError>;
