//! Slot generation and free window merging

use chrono::NaiveDate;

use super::calendar::OpeningWindow;
use super::conflict::overlaps;
use crate::models::{reservation::Reservation, slot::TimeSlot};

/// Split `window` on `date` into contiguous slots of `slot_minutes`, the
/// last one clamped to the closing time. A slot is unavailable when it
/// overlaps an active reservation on that date.
///
/// `slot_minutes` of 0 yields no slots.
pub fn generate_slots(
    window: OpeningWindow,
    date: NaiveDate,
    reservations: &[Reservation],
    slot_minutes: u32,
) -> Vec<TimeSlot> {
    if slot_minutes == 0 {
        return Vec::new();
    }

    let busy: Vec<(u32, u32)> = reservations
        .iter()
        .filter(|r| r.is_active() && r.date == date)
        .map(|r| (r.start_time, r.end_time))
        .collect();

    let mut slots = Vec::new();
    let mut cursor = window.open;
    while cursor < window.close {
        let end = (cursor + slot_minutes).min(window.close);
        let taken = busy.iter().any(|&(s, e)| overlaps(cursor, end, s, e));
        slots.push(TimeSlot::new(cursor, end, !taken));
        cursor = end;
    }
    slots
}

/// Merge runs of consecutive available slots into single windows, keeping
/// only those lasting at least `minimum_minutes`.
///
/// Slots must be ordered by start. A run is broken by an unavailable slot or
/// by a gap between two slots.
pub fn merge_free_slots(slots: &[TimeSlot], minimum_minutes: u32) -> Vec<TimeSlot> {
    let mut windows = Vec::new();
    let mut run: Option<(u32, u32)> = None;

    let close_run = |run: &mut Option<(u32, u32)>, windows: &mut Vec<TimeSlot>| {
        if let Some((start, end)) = run.take() {
            if end - start >= minimum_minutes {
                windows.push(TimeSlot::new(start, end, true));
            }
        }
    };

    for slot in slots {
        if !slot.available {
            close_run(&mut run, &mut windows);
            continue;
        }
        match run {
            Some((start, end)) if end == slot.start => run = Some((start, slot.end)),
            _ => {
                close_run(&mut run, &mut windows);
                run = Some((slot.start, slot.end));
            }
        }
    }
    close_run(&mut run, &mut windows);

    windows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::{DurationType, ReservationStatus};
    use rust_decimal::Decimal;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 20).unwrap()
    }

    fn booked(start: u32, end: u32, status: ReservationStatus) -> Reservation {
        Reservation {
            id: 1,
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

    const DAY: OpeningWindow = OpeningWindow { open: 480, close: 1200 };

    #[test]
    fn test_slots_tile_the_window() {
        for granularity in [15, 30, 45, 60, 90, 250, 720, 1000] {
            let slots = generate_slots(DAY, day(), &[], granularity);
            assert_eq!(slots.first().unwrap().start, DAY.open);
            assert_eq!(slots.last().unwrap().end, DAY.close);
            for pair in slots.windows(2) {
                assert_eq!(pair[0].end, pair[1].start);
            }
            let total: u32 = slots.iter().map(|s| s.duration_minutes).sum();
            assert_eq!(total, DAY.duration());
        }
    }

    #[test]
    fn test_last_slot_is_clamped() {
        let slots = generate_slots(OpeningWindow { open: 540, close: 630 }, day(), &[], 60);
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[1], TimeSlot::new(600, 630, true));
    }

    #[test]
    fn test_reserved_slots_are_unavailable() {
        let existing = [
            booked(600, 720, ReservationStatus::Confirmed),
            booked(900, 960, ReservationStatus::Cancelled),
        ];
        let slots = generate_slots(DAY, day(), &existing, 60);
        let taken: Vec<u32> = slots.iter().filter(|s| !s.available).map(|s| s.start).collect();
        assert_eq!(taken, vec![600, 660]);
    }

    #[test]
    fn test_partial_overlap_blocks_slot() {
        let existing = [booked(630, 650, ReservationStatus::Pending)];
        let slots = generate_slots(DAY, day(), &existing, 60);
        assert!(!slots.iter().find(|s| s.start == 600).unwrap().available);
        assert!(slots.iter().find(|s| s.start == 660).unwrap().available);
    }

    #[test]
    fn test_other_days_do_not_block() {
        let mut next_day = booked(600, 720, ReservationStatus::Confirmed);
        next_day.date = day().succ_opt().unwrap();
        let slots = generate_slots(DAY, day(), &[next_day], 60);
        assert!(slots.iter().all(|s| s.available));
    }

    #[test]
    fn test_zero_granularity_yields_nothing() {
        assert!(generate_slots(DAY, day(), &[], 0).is_empty());
    }

    #[test]
    fn test_merge_two_adjacent_slots() {
        let slots = [TimeSlot::new(600, 630, true), TimeSlot::new(630, 660, true)];
        assert_eq!(merge_free_slots(&slots, 60), vec![TimeSlot::new(600, 660, true)]);
    }

    #[test]
    fn test_merge_splits_on_taken_slot_and_filters_short_runs() {
        let existing = [booked(630, 690, ReservationStatus::Confirmed)];
        let slots = generate_slots(OpeningWindow { open: 540, close: 780 }, day(), &existing, 30);
        let windows = merge_free_slots(&slots, 60);
        assert_eq!(windows, vec![TimeSlot::new(540, 630, true), TimeSlot::new(690, 780, true)]);

        let windows = merge_free_slots(&slots, 91);
        assert!(windows.is_empty());
    }

    #[test]
    fn test_merge_never_returns_short_windows() {
        let existing = [
            booked(510, 540, ReservationStatus::Confirmed),
            booked(600, 690, ReservationStatus::Pending),
            booked(1140, 1170, ReservationStatus::Confirmed),
        ];
        let slots = generate_slots(DAY, day(), &existing, 30);
        for minimum in [0, 30, 60, 120, 240, 720] {
            for w in merge_free_slots(&slots, minimum) {
                assert!(w.duration_minutes >= minimum);
                assert!(w.available);
            }
        }
    }

    #[test]
    fn test_merge_breaks_on_gap() {
        let slots = [TimeSlot::new(600, 630, true), TimeSlot::new(660, 690, true)];
        assert_eq!(
            merge_free_slots(&slots, 30),
            vec![TimeSlot::new(600, 630, true), TimeSlot::new(660, 690, true)]
        );
    }

    #[test]
    fn test_merge_empty() {
        assert!(merge_free_slots(&[], 30).is_empty());
    }
}
