//! Derived availability types (time slots, occupancy)

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::scheduling::time::hhmm;

/// A discrete slice of a resource's open window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TimeSlot {
    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "09:00")]
    pub start: u32,
    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "10:00")]
    pub end: u32,
    pub duration_minutes: u32,
    pub available: bool,
}

impl TimeSlot {
    pub fn new(start: u32, end: u32, available: bool) -> Self {
        Self {
            start,
            end,
            duration_minutes: end - start,
            available,
        }
    }
}

/// Occupancy and revenue of a resource on one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OccupancyStats {
    pub resource_id: i32,
    #[schema(value_type = String, example = "2026-10-20")]
    pub date: NaiveDate,
    pub total_slots: u32,
    pub occupied_slots: u32,
    /// Percentage of occupied slots, 0 to 100
    pub occupancy_rate: f64,
    pub revenue: Decimal,
}

/// Query parameters for slot listing
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct SlotQuery {
    /// Day (YYYY-MM-DD)
    pub date: String,
    /// Slot length in minutes (default 60)
    pub granularity: Option<u32>,
}

/// Query parameters for free window listing
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct FreeWindowQuery {
    /// Day (YYYY-MM-DD)
    pub date: String,
    /// Minimum window length in minutes
    pub min_duration: u32,
}

/// Query parameters for occupancy stats
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct OccupancyQuery {
    /// Day (YYYY-MM-DD)
    pub date: String,
}
