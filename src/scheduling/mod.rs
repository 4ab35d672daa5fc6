//! Reservation scheduling engine
//!
//! Pure interval arithmetic over a resource's weekly calendar and its
//! reservations: conflict detection, slot generation, free window merging,
//! occupancy and pricing. Nothing in here touches storage; services fetch
//! the data and hand it over.

pub mod calendar;
pub mod conflict;
pub mod occupancy;
pub mod pricing;
pub mod slots;
pub mod time;
pub mod validation;

pub use calendar::{opening_hours_for, DayHours, HoursPolicy, OpeningWindow};
pub use conflict::{detect_conflicts, overlaps, MinuteRange};
pub use occupancy::occupancy_stats;
pub use pricing::price;
pub use slots::{generate_slots, merge_free_slots};
pub use time::{minutes_to_time, time_to_minutes};
