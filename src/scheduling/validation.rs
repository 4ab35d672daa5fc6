//! Booking rule checks that need no storage access

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::calendar::{opening_hours_for, DayHours, HoursPolicy};
use super::time::{minutes_to_time, time_to_minutes};
use crate::models::{
    booking::{BookingErrorKind, BookingIssue, BookingRequest, Conflict},
    enums::DurationType,
    resource::Resource,
};

/// Outcome of the storage independent checks
#[derive(Debug, Default)]
pub struct RuleCheck {
    pub issues: Vec<BookingIssue>,
    /// Parsed `[start, end)` when both times are valid and ordered
    pub interval: Option<(u32, u32)>,
}

/// Run every rule check against an existing resource, accumulating failures.
///
/// `today` is the current day in the resource's timezone. Opening hours are
/// checked with the lenient policy: a day without hours is not restricted.
pub fn check_booking_rules(resource: &Resource, request: &BookingRequest, today: NaiveDate) -> RuleCheck {
    let mut issues = Vec::new();

    if !resource.is_active {
        issues.push(BookingIssue::new(
            BookingErrorKind::ResourceInactive,
            format!("Resource '{}' is not available for booking", resource.name),
        ));
    }

    if request.guest_count > resource.capacity {
        issues.push(BookingIssue::new(
            BookingErrorKind::CapacityExceeded,
            format!(
                "{} guests exceed the capacity of {} for '{}'",
                request.guest_count, resource.capacity, resource.name
            ),
        ));
    }

    if request.date < today {
        issues.push(BookingIssue::new(
            BookingErrorKind::DateInPast,
            format!("Date {} is in the past", request.date),
        ));
    }

    let duration_valid = request.duration_value > Decimal::ZERO;
    if !duration_valid {
        issues.push(BookingIssue::new(
            BookingErrorKind::InvalidDuration,
            format!("Duration must be positive, got {} {}", request.duration_value, request.duration_type),
        ));
    }

    let interval = parse_interval(request, &mut issues);

    if let Some((start, end)) = interval {
        if duration_valid && request.duration_type == DurationType::Hour {
            match request.duration_value.checked_mul(Decimal::from(60)) {
                None => issues.push(overflow_issue(request)),
                Some(minutes) if minutes != Decimal::from(end - start) => issues.push(BookingIssue::new(
                    BookingErrorKind::DurationMismatch,
                    format!(
                        "{} hour(s) do not match {} to {}",
                        request.duration_value, request.start_time, request.end_time
                    ),
                )),
                Some(_) => {}
            }
        }

        match opening_hours_for(resource, request.date, HoursPolicy::Lenient) {
            DayHours::Closed => issues.push(BookingIssue::new(
                BookingErrorKind::ResourceClosedThatDay,
                format!("'{}' is closed on {}", resource.name, request.date.format("%A %Y-%m-%d")),
            )),
            DayHours::Open(window) if !window.contains(start, end) => issues.push(BookingIssue::new(
                BookingErrorKind::OutsideOpeningHours,
                format!(
                    "{} to {} is outside opening hours {} to {}",
                    request.start_time,
                    request.end_time,
                    minutes_to_time(window.open),
                    minutes_to_time(window.close)
                ),
            )),
            DayHours::Open(_) | DayHours::Unrestricted => {}
        }
    }

    RuleCheck { issues, interval }
}

fn parse_interval(request: &BookingRequest, issues: &mut Vec<BookingIssue>) -> Option<(u32, u32)> {
    let mut parse = |raw: &str| match time_to_minutes(raw) {
        Ok(m) => Some(m),
        Err(e) => {
            issues.push(BookingIssue::new(BookingErrorKind::InvalidTimeFormat, e.to_string()));
            None
        }
    };
    let start = parse(&request.start_time);
    let end = parse(&request.end_time);

    let (start, end) = (start?, end?);
    if end <= start {
        issues.push(BookingIssue::new(
            BookingErrorKind::InvalidTimeRange,
            format!("End time {} must be after start time {}", request.end_time, request.start_time),
        ));
        return None;
    }
    Some((start, end))
}

/// Issue reported when a duration is too large to compute with
pub fn overflow_issue(request: &BookingRequest) -> BookingIssue {
    BookingIssue::new(
        BookingErrorKind::InvalidDuration,
        format!("Duration {} {} is too large", request.duration_value, request.duration_type),
    )
}

/// Issue reported for a non-empty conflict list
pub fn conflict_issue(conflicts: &[Conflict]) -> BookingIssue {
    let ranges: Vec<String> = conflicts
        .iter()
        .map(|c| format!("{}-{}", minutes_to_time(c.start_time), minutes_to_time(c.end_time)))
        .collect();
    BookingIssue::new(
        BookingErrorKind::SchedulingConflict,
        format!("Time range overlaps existing reservation(s): {}", ranges.join(", ")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resource::{DayEntry, Pricing, WeeklyHours};
    use chrono::Weekday;

    fn resource() -> Resource {
        Resource {
            id: 1,
            name: "verriere".to_string(),
            capacity: 8,
            pricing: Pricing::default(),
            is_active: true,
            opening_hours: WeeklyHours::every_day(DayEntry::open("08:00", "20:00")),
            timezone: None,
            crea_date: None,
            modif_date: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
    }

    // Tuesday
    fn request(start: &str, end: &str, hours: i64, guests: i32) -> BookingRequest {
        BookingRequest {
            resource_id: 1,
            date: NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            guest_count: guests,
            duration_value: Decimal::from(hours),
            duration_type: DurationType::Hour,
            exclude_reservation_id: None,
        }
    }

    fn kinds(check: &RuleCheck) -> Vec<BookingErrorKind> {
        check.issues.iter().map(|i| i.kind).collect()
    }

    #[test]
    fn test_valid_request_passes() {
        let check = check_booking_rules(&resource(), &request("12:00", "13:00", 1, 4), today());
        assert!(check.issues.is_empty());
        assert_eq!(check.interval, Some((720, 780)));
    }

    #[test]
    fn test_failures_accumulate() {
        let mut r = resource();
        r.is_active = false;
        let mut req = request("19:00", "21:00", 2, 9);
        req.date = NaiveDate::from_ymd_opt(2026, 10, 13).unwrap();

        let check = check_booking_rules(&r, &req, today());
        assert_eq!(
            kinds(&check),
            vec![
                BookingErrorKind::ResourceInactive,
                BookingErrorKind::CapacityExceeded,
                BookingErrorKind::DateInPast,
                BookingErrorKind::OutsideOpeningHours,
            ]
        );
    }

    #[test]
    fn test_today_is_not_in_the_past() {
        let mut req = request("12:00", "13:00", 1, 1);
        req.date = today();
        assert!(check_booking_rules(&resource(), &req, today()).issues.is_empty());
    }

    #[test]
    fn test_bad_times_skip_hours_check() {
        let check = check_booking_rules(&resource(), &request("25:00", "7:00", 1, 1), today());
        assert_eq!(
            kinds(&check),
            vec![BookingErrorKind::InvalidTimeFormat, BookingErrorKind::InvalidTimeFormat]
        );
        assert_eq!(check.interval, None);

        let check = check_booking_rules(&resource(), &request("13:00", "12:00", 1, 1), today());
        assert_eq!(kinds(&check), vec![BookingErrorKind::InvalidTimeRange]);
    }

    #[test]
    fn test_hour_duration_must_match_interval() {
        let check = check_booking_rules(&resource(), &request("12:00", "14:00", 1, 1), today());
        assert_eq!(kinds(&check), vec![BookingErrorKind::DurationMismatch]);

        let mut req = request("12:00", "14:00", 1, 1);
        req.duration_type = DurationType::Day;
        assert!(check_booking_rules(&resource(), &req, today()).issues.is_empty());
    }

    #[test]
    fn test_duration_must_be_positive() {
        for value in [Decimal::ZERO, Decimal::from(-3)] {
            let mut req = request("15:00", "16:00", 1, 1);
            req.duration_type = DurationType::Day;
            req.duration_value = value;
            let check = check_booking_rules(&resource(), &req, today());
            assert_eq!(kinds(&check), vec![BookingErrorKind::InvalidDuration]);
        }

        // no mismatch reported on top of the invalid duration
        let check = check_booking_rules(&resource(), &request("15:00", "16:00", -1, 1), today());
        assert_eq!(kinds(&check), vec![BookingErrorKind::InvalidDuration]);
    }

    #[test]
    fn test_huge_hour_duration_is_reported() {
        let mut req = request("15:00", "16:00", 1, 1);
        req.duration_value = Decimal::MAX;
        let check = check_booking_rules(&resource(), &req, today());
        assert_eq!(kinds(&check), vec![BookingErrorKind::InvalidDuration]);
    }

    #[test]
    fn test_unset_hours_are_unrestricted() {
        let mut r = resource();
        r.opening_hours.set(Weekday::Tue, None);
        assert!(check_booking_rules(&r, &request("05:00", "06:00", 1, 1), today()).issues.is_empty());
    }

    #[test]
    fn test_closed_day() {
        let mut r = resource();
        r.opening_hours.set(Weekday::Tue, Some(DayEntry::closed()));
        let check = check_booking_rules(&r, &request("12:00", "13:00", 1, 1), today());
        assert_eq!(kinds(&check), vec![BookingErrorKind::ResourceClosedThatDay]);
    }
}
