//! # vendorslots core
//!
//! Domain types for vendor time slots: the overlap rules that keep slots at
//! one location from colliding, named time scopes, the validated write path
//! and iCalendar export. Storage is reached only through [`repository::SlotRepository`].

pub mod errors;
pub mod ical;
pub mod models;
pub mod repository;
pub mod scope;
pub mod service;
