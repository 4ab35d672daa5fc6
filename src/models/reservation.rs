//! Reservation model and lifecycle predicates

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::{DurationType, ReservationStatus};
use crate::error::{AppError, AppResult};
use crate::scheduling::time::{hhmm, MINUTES_PER_DAY};

/// A time-boxed claim on a resource for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Reservation {
    pub id: i32,
    pub resource_id: i32,
    /// Calendar day in the resource's local time
    pub date: NaiveDate,
    /// Start time (HH:MM)
    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "10:00")]
    pub start_time: u32,
    /// End time (HH:MM), exclusive
    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "12:00")]
    pub end_time: u32,
    pub duration_value: Decimal,
    pub duration_type: DurationType,
    pub guest_count: i32,
    pub total_price: Decimal,
    pub status: ReservationStatus,
    pub notes: Option<String>,
    pub crea_date: Option<DateTime<Utc>>,
    pub modif_date: Option<DateTime<Utc>>,
}

impl Reservation {
    /// Only pending and confirmed reservations block their time range
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Start instant, resolving the local date and time in `tz`.
    /// Returns None for local times skipped by a DST transition.
    pub fn starts_at(&self, tz: Tz) -> Option<DateTime<Utc>> {
        let time = NaiveTime::from_hms_opt(self.start_time / 60, self.start_time % 60, 0)?;
        tz.from_local_datetime(&self.date.and_time(time))
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Active and starting at least `lead` after `now`
    pub fn can_be_cancelled(&self, tz: Tz, now: DateTime<Utc>, lead: Duration) -> bool {
        self.is_active() && self.starts_at(tz).is_some_and(|start| start >= now + lead)
    }

    /// Still pending and starting at least `lead` after `now`
    pub fn can_be_modified(&self, tz: Tz, now: DateTime<Utc>, lead: Duration) -> bool {
        self.status == ReservationStatus::Pending
            && self.starts_at(tz).is_some_and(|start| start >= now + lead)
    }
}

/// Reservation row as stored in the database
#[derive(Debug, Clone, FromRow)]
pub struct ReservationRow {
    pub id: i32,
    pub resource_id: i32,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub duration_value: Decimal,
    pub duration_type: String,
    pub guest_count: i32,
    pub total_price: Decimal,
    pub status: String,
    pub notes: Option<String>,
    pub crea_date: Option<DateTime<Utc>>,
    pub modif_date: Option<DateTime<Utc>>,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = AppError;

    fn try_from(row: ReservationRow) -> AppResult<Self> {
        Ok(Self {
            id: row.id,
            resource_id: row.resource_id,
            date: row.date,
            start_time: row.start_time.hour() * 60 + row.start_time.minute(),
            end_time: row.end_time.hour() * 60 + row.end_time.minute(),
            duration_value: row.duration_value,
            duration_type: row.duration_type.parse()?,
            guest_count: row.guest_count,
            total_price: row.total_price,
            status: row.status.parse()?,
            notes: row.notes,
            crea_date: row.crea_date,
            modif_date: row.modif_date,
        })
    }
}

/// Convert a minute offset into a `NaiveTime` for binding
pub fn minutes_to_naive_time(minutes: u32) -> AppResult<NaiveTime> {
    if minutes >= MINUTES_PER_DAY {
        return Err(AppError::InvalidTimeFormat(format!("{} minutes is past midnight", minutes)));
    }
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
        .ok_or_else(|| AppError::InvalidTimeFormat(format!("{} minutes is not a time of day", minutes)))
}

/// Reservation about to be written by the store
#[derive(Debug, Clone, PartialEq)]
pub struct NewReservation {
    pub resource_id: i32,
    pub date: NaiveDate,
    pub start_time: u32,
    pub end_time: u32,
    pub duration_value: Decimal,
    pub duration_type: DurationType,
    pub guest_count: i32,
    pub total_price: Decimal,
    pub status: ReservationStatus,
    pub notes: Option<String>,
}

/// New date and time range applied to an existing reservation
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleChange {
    pub date: NaiveDate,
    pub start_time: u32,
    pub end_time: u32,
    pub duration_value: Decimal,
    pub duration_type: DurationType,
    pub guest_count: i32,
    pub total_price: Decimal,
}

/// Reschedule request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RescheduleReservation {
    /// Day (YYYY-MM-DD)
    #[schema(value_type = String, example = "2026-10-20")]
    pub date: NaiveDate,
    /// Start time (HH:MM)
    pub start_time: String,
    /// End time (HH:MM)
    pub end_time: String,
    pub duration_value: Decimal,
    pub duration_type: DurationType,
    #[validate(range(min = 1, message = "At least one guest is required"))]
    pub guest_count: i32,
}
