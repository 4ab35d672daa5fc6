//! Half-open interval overlap detection

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::time::hhmm;
use crate::models::{booking::Conflict, reservation::Reservation};

/// Half-open minute range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MinuteRange {
    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "11:00")]
    pub start: u32,
    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "12:00")]
    pub end: u32,
}

/// `[a_start, a_end)` and `[b_start, b_end)` share at least one minute.
/// Touching intervals (`a_end == b_start`) do not overlap.
pub fn overlaps(a_start: u32, a_end: u32, b_start: u32, b_end: u32) -> bool {
    !(a_end <= b_start || a_start >= b_end)
}

/// Conflicts between `[start, end)` on `date` and the active reservations in
/// `reservations`, ordered by the existing reservation's start time.
pub fn detect_conflicts(
    reservations: &[Reservation],
    date: NaiveDate,
    start: u32,
    end: u32,
    exclude_reservation_id: Option<i32>,
) -> Vec<Conflict> {
    let mut conflicts: Vec<Conflict> = reservations
        .iter()
        .filter(|r| r.is_active() && r.date == date)
        .filter(|r| Some(r.id) != exclude_reservation_id)
        .filter(|r| overlaps(start, end, r.start_time, r.end_time))
        .map(|r| Conflict {
            reservation_id: r.id,
            start_time: r.start_time,
            end_time: r.end_time,
            overlap: MinuteRange {
                start: start.max(r.start_time),
                end: end.min(r.end_time),
            },
        })
        .collect();

    conflicts.sort_by_key(|c| (c.start_time, c.reservation_id));
    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::{DurationType, ReservationStatus};
    use rust_decimal::Decimal;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 20).unwrap()
    }

    fn booked(id: i32, start: u32, end: u32, status: ReservationStatus) -> Reservation {
        Reservation {
            id,
            resource_id: 1,
            date: day(),
            start_time: start,
            end_time: end,
            duration_value: Decimal::ONE,
            duration_type: DurationType::Hour,
            guest_count: 1,
            total_price: Decimal::ZERO,
            status,
            notes: None,
            crea_date: None,
            modif_date: None,
        }
    }

    #[test]
    fn test_touching_intervals_do_not_conflict() {
        let existing = [booked(1, 600, 660, ReservationStatus::Confirmed)];
        assert!(detect_conflicts(&existing, day(), 660, 720, None).is_empty());
        assert!(detect_conflicts(&existing, day(), 540, 600, None).is_empty());
    }

    #[test]
    fn test_overlap_reports_shared_range() {
        let existing = [booked(1, 600, 660, ReservationStatus::Confirmed)];
        let conflicts = detect_conflicts(&existing, day(), 630, 690, None);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].reservation_id, 1);
        assert_eq!(conflicts[0].overlap, MinuteRange { start: 630, end: 660 });
    }

    #[test]
    fn test_containment_conflicts_both_ways() {
        let existing = [booked(1, 600, 720, ReservationStatus::Pending)];
        assert_eq!(detect_conflicts(&existing, day(), 630, 660, None).len(), 1);
        assert_eq!(detect_conflicts(&existing, day(), 540, 780, None).len(), 1);
    }

    #[test]
    fn test_inactive_and_excluded_are_ignored() {
        let existing = [
            booked(1, 600, 660, ReservationStatus::Cancelled),
            booked(2, 600, 660, ReservationStatus::Completed),
            booked(3, 600, 660, ReservationStatus::PaymentPending),
            booked(4, 600, 660, ReservationStatus::Confirmed),
        ];
        assert_eq!(detect_conflicts(&existing, day(), 600, 660, None).len(), 1);
        assert!(detect_conflicts(&existing, day(), 600, 660, Some(4)).is_empty());
    }

    #[test]
    fn test_other_dates_are_ignored() {
        let mut other = booked(1, 600, 660, ReservationStatus::Confirmed);
        other.date = day().succ_opt().unwrap();
        assert!(detect_conflicts(&[other], day(), 600, 660, None).is_empty());
    }

    #[test]
    fn test_conflicts_sorted_by_existing_start() {
        let existing = [
            booked(7, 900, 960, ReservationStatus::Confirmed),
            booked(3, 600, 660, ReservationStatus::Confirmed),
            booked(5, 720, 780, ReservationStatus::Pending),
        ];
        let ids: Vec<i32> = detect_conflicts(&existing, day(), 480, 1200, None)
            .iter()
            .map(|c| c.reservation_id)
            .collect();
        assert_eq!(ids, vec![3, 5, 7]);
    }
}
