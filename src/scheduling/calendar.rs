//! Weekday opening hours resolution

use chrono::{Datelike, NaiveDate};

use super::time::time_to_minutes;
use crate::models::resource::{DayEntry, Resource};

/// How a weekday with no usable open/close times is interpreted.
///
/// Booking validation runs `Lenient` (no hours means no restriction) while
/// slot generation runs `Strict` (no hours means closed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoursPolicy {
    Strict,
    Lenient,
}

/// Open window of a day, in minutes since midnight; `close` is exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpeningWindow {
    pub open: u32,
    pub close: u32,
}

impl OpeningWindow {
    pub fn duration(&self) -> u32 {
        self.close - self.open
    }

    pub fn contains(&self, start: u32, end: u32) -> bool {
        start >= self.open && end <= self.close
    }
}

/// Resolved opening state of a resource for a given day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayHours {
    Open(OpeningWindow),
    Closed,
    /// Hours are unset and the policy places no restriction
    Unrestricted,
}

/// Resolve the opening hours of `resource` on `date`.
///
/// An entry marked `closed`, or whose close time is not after its open time,
/// is closed under both policies. Missing entries and unset or unparsable
/// times fall back to the policy.
pub fn opening_hours_for(resource: &Resource, date: NaiveDate, policy: HoursPolicy) -> DayHours {
    let unset = match policy {
        HoursPolicy::Strict => DayHours::Closed,
        HoursPolicy::Lenient => DayHours::Unrestricted,
    };

    let Some(entry) = resource.opening_hours.for_weekday(date.weekday()) else {
        return unset;
    };
    if entry.closed {
        return DayHours::Closed;
    }

    match parse_entry(entry) {
        Some(window) if window.close > window.open => DayHours::Open(window),
        Some(_) => DayHours::Closed,
        None => {
            tracing::debug!("Resource {} has no usable hours on {}", resource.id, date.weekday());
            unset
        }
    }
}

fn parse_entry(entry: &DayEntry) -> Option<OpeningWindow> {
    let open = time_to_minutes(entry.open.as_deref()?).ok()?;
    let close = time_to_minutes(entry.close.as_deref()?).ok()?;
    Some(OpeningWindow { open, close })
}
