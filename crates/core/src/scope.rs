//! Named filters that classify time slots relative to the current moment.
//!
//! Scopes are looked up by name through [`by_scope`]. A missing name selects
//! [`Scope::CurrentOrUpcoming`]; a name that matches no scope selects every
//! slot instead of failing, so unrecognized filter input is tolerated.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::time_slot::TimeSlot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// `start_at > now`
    Upcoming,
    /// `finish_at < now`
    Expired,
    /// `start_at < now AND finish_at > now`
    Current,
    /// `finish_at >= now`
    CurrentOrUpcoming,
}

/// Name to scope table consulted by [`by_scope`].
pub const SCOPES: [(&str, Scope); 4] = [
    ("upcoming", Scope::Upcoming),
    ("expired", Scope::Expired),
    ("current", Scope::Current),
    ("current_or_upcoming", Scope::CurrentOrUpcoming),
];

pub const DEFAULT_SCOPE: Scope = Scope::CurrentOrUpcoming;

impl Scope {
    pub fn name(self) -> &'static str {
        match self {
            Scope::Upcoming => "upcoming",
            Scope::Expired => "expired",
            Scope::Current => "current",
            Scope::CurrentOrUpcoming => "current_or_upcoming",
        }
    }

    pub fn from_name(name: &str) -> Option<Scope> {
        SCOPES
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, scope)| *scope)
    }

    pub fn matches(self, slot: &TimeSlot, now: DateTime<Utc>) -> bool {
        match self {
            Scope::Upcoming => slot.start_at > now,
            Scope::Expired => slot.finish_at < now,
            Scope::Current => slot.start_at < now && slot.finish_at > now,
            Scope::CurrentOrUpcoming => slot.finish_at >= now,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The resolved result of a scope lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotFilter {
    Scope(Scope),
    All,
}

impl SlotFilter {
    pub fn matches(self, slot: &TimeSlot, now: DateTime<Utc>) -> bool {
        match self {
            SlotFilter::Scope(scope) => scope.matches(slot, now),
            SlotFilter::All => true,
        }
    }

    pub fn apply(self, slots: Vec<TimeSlot>, now: DateTime<Utc>) -> Vec<TimeSlot> {
        slots
            .into_iter()
            .filter(|slot| self.matches(slot, now))
            .collect()
    }
}

pub fn by_scope(name: Option<&str>) -> SlotFilter {
    match name {
        None => SlotFilter::Scope(DEFAULT_SCOPE),
        Some(name) => Scope::from_name(name).map_or(SlotFilter::All, SlotFilter::Scope),
    }
}
