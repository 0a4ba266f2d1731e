pub mod location;
pub mod time_slot;
pub mod vendor;
