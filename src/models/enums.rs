//! Shared domain enums

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

// ---------------------------------------------------------------------------
// DurationType
// ---------------------------------------------------------------------------

/// Billing unit of a reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DurationType {
    Hour,
    Day,
    Week,
    Month,
}

impl DurationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DurationType::Hour => "hour",
            DurationType::Day => "day",
            DurationType::Week => "week",
            DurationType::Month => "month",
        }
    }
}

impl FromStr for DurationType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hour" => Ok(DurationType::Hour),
            "day" => Ok(DurationType::Day),
            "week" => Ok(DurationType::Week),
            "month" => Ok(DurationType::Month),
            other => Err(AppError::Internal(format!("Unknown duration type '{}'", other))),
        }
    }
}

impl std::fmt::Display for DurationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ReservationStatus
// ---------------------------------------------------------------------------

/// Reservation lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    PaymentPending,
}

impl ReservationStatus {
    /// Statuses that block a time range
    pub const ACTIVE: [ReservationStatus; 2] = [ReservationStatus::Pending, ReservationStatus::Confirmed];

    /// Statuses whose price counts as recognized revenue
    pub const REVENUE: [ReservationStatus; 2] = [ReservationStatus::Confirmed, ReservationStatus::Completed];

    pub fn is_active(&self) -> bool {
        Self::ACTIVE.contains(self)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::Completed => "completed",
            ReservationStatus::PaymentPending => "payment_pending",
        }
    }
}

impl FromStr for ReservationStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReservationStatus::Pending),
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "cancelled" => Ok(ReservationStatus::Cancelled),
            "completed" => Ok(ReservationStatus::Completed),
            "payment_pending" => Ok(ReservationStatus::PaymentPending),
            other => Err(AppError::Internal(format!("Unknown reservation status '{}'", other))),
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_statuses() {
        assert!(ReservationStatus::Pending.is_active());
        assert!(ReservationStatus::Confirmed.is_active());
        assert!(!ReservationStatus::Cancelled.is_active());
        assert!(!ReservationStatus::Completed.is_active());
        assert!(!ReservationStatus::PaymentPending.is_active());
    }

    #[test]
    fn test_status_db_labels() {
        assert_eq!("payment_pending".parse::<ReservationStatus>().unwrap(), ReservationStatus::PaymentPending);
        assert_eq!(ReservationStatus::PaymentPending.as_str(), "payment_pending");
        assert!("paid".parse::<ReservationStatus>().is_err());
        assert_eq!("week".parse::<DurationType>().unwrap(), DurationType::Week);
    }
}
