//! Per-day occupancy rate and revenue

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{
    enums::ReservationStatus,
    reservation::Reservation,
    slot::{OccupancyStats, TimeSlot},
};

/// Aggregate hourly `slots` and `reservations` of a resource on `date`.
///
/// Occupancy counts slots blocked by active reservations; revenue only sums
/// confirmed and completed reservations.
pub fn occupancy_stats(
    resource_id: i32,
    date: NaiveDate,
    slots: &[TimeSlot],
    reservations: &[Reservation],
) -> OccupancyStats {
    let total_slots = slots.len() as u32;
    let occupied_slots = slots.iter().filter(|s| !s.available).count() as u32;

    let occupancy_rate = if total_slots == 0 {
        0.0
    } else {
        let rate = f64::from(occupied_slots) / f64::from(total_slots) * 100.0;
        (rate * 100.0).round() / 100.0
    };

    let revenue: Decimal = reservations
        .iter()
        .filter(|r| r.resource_id == resource_id && r.date == date)
        .filter(|r| ReservationStatus::REVENUE.contains(&r.status))
        .map(|r| r.total_price)
        .sum();

    OccupancyStats {
        resource_id,
        date,
        total_slots,
        occupied_slots,
        occupancy_rate,
        revenue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::DurationType;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 20).unwrap()
    }

    fn priced(status: ReservationStatus, cents: i64) -> Reservation {
        Reservation {
            id: 1,
            resource_id: 1,
            date: day(),
            start_time: 600,
            end_time: 660,
            duration_value: Decimal::ONE,
            duration_type: DurationType::Hour,
            guest_count: 1,
            total_price: Decimal::new(cents, 2),
            status,
            notes: None,
            crea_date: None,
            modif_date: None,
        }
    }

    #[test]
    fn test_empty_day_has_zero_rate() {
        let stats = occupancy_stats(1, day(), &[], &[]);
        assert_eq!(stats.total_slots, 0);
        assert_eq!(stats.occupancy_rate, 0.0);
        assert_eq!(stats.revenue, Decimal::ZERO);
    }

    #[test]
    fn test_rate_is_percentage_of_taken_slots() {
        let slots = [
            TimeSlot::new(480, 540, false),
            TimeSlot::new(540, 600, true),
            TimeSlot::new(600, 660, true),
        ];
        let stats = occupancy_stats(1, day(), &slots, &[]);
        assert_eq!(stats.occupied_slots, 1);
        assert_eq!(stats.occupancy_rate, 33.33);

        let full = [TimeSlot::new(480, 540, false)];
        assert_eq!(occupancy_stats(1, day(), &full, &[]).occupancy_rate, 100.0);
    }

    #[test]
    fn test_revenue_counts_confirmed_and_completed_only() {
        let reservations = [
            priced(ReservationStatus::Confirmed, 4000),
            priced(ReservationStatus::Completed, 2550),
            priced(ReservationStatus::Pending, 9900),
            priced(ReservationStatus::Cancelled, 9900),
            priced(ReservationStatus::PaymentPending, 9900),
        ];
        let stats = occupancy_stats(1, day(), &[], &reservations);
        assert_eq!(stats.revenue, Decimal::new(6550, 2));
    }
}
