//! Booking validation request and result types

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::enums::DurationType;
use crate::scheduling::conflict::MinuteRange;
use crate::scheduling::time::hhmm;

/// A proposed booking to validate
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct BookingRequest {
    pub resource_id: i32,
    /// Day (YYYY-MM-DD) in the resource's local calendar
    #[schema(value_type = String, example = "2026-10-20")]
    pub date: NaiveDate,
    /// Start time (HH:MM)
    #[schema(example = "12:00")]
    pub start_time: String,
    /// End time (HH:MM)
    #[schema(example = "13:00")]
    pub end_time: String,
    #[validate(range(min = 1, message = "At least one guest is required"))]
    pub guest_count: i32,
    pub duration_value: Decimal,
    pub duration_type: DurationType,
    /// Reservation ignored by conflict detection (when editing it)
    #[serde(default)]
    pub exclude_reservation_id: Option<i32>,
}

/// Create reservation request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateReservation {
    #[serde(flatten)]
    #[validate(nested)]
    pub booking: BookingRequest,
    pub notes: Option<String>,
}

/// Why a booking was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum BookingErrorKind {
    InvalidTimeFormat,
    InvalidTimeRange,
    InvalidDuration,
    DurationMismatch,
    ResourceNotFound,
    ResourceInactive,
    CapacityExceeded,
    DateInPast,
    OutsideOpeningHours,
    ResourceClosedThatDay,
    SchedulingConflict,
}

/// One failed booking check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookingIssue {
    pub kind: BookingErrorKind,
    pub message: String,
}

impl BookingIssue {
    pub fn new(kind: BookingErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Overlap between a proposed interval and an existing active reservation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Conflict {
    pub reservation_id: i32,
    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "10:00")]
    pub start_time: u32,
    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "12:00")]
    pub end_time: u32,
    /// Minutes shared by both intervals
    pub overlap: MinuteRange,
}

/// Aggregated outcome of a validation pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<BookingIssue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conflicts: Vec<Conflict>,
    /// Price of the booking, present when valid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
}

impl ValidationResult {
    pub fn from_errors(errors: Vec<BookingIssue>, conflicts: Vec<Conflict>, price: Option<Decimal>) -> Self {
        let is_valid = errors.is_empty();
        Self {
            is_valid,
            errors,
            conflicts,
            price: if is_valid { price } else { None },
        }
    }

    pub fn has(&self, kind: BookingErrorKind) -> bool {
        self.errors.iter().any(|e| e.kind == kind)
    }
}
