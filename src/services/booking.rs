//! Booking service: validation, pricing and reservation lifecycle

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use super::availability::AvailabilityService;
use crate::{
    config::BookingConfig,
    error::{AppError, AppResult},
    models::{
        booking::{BookingErrorKind, BookingIssue, BookingRequest, CreateReservation, ValidationResult},
        enums::{DurationType, ReservationStatus},
        reservation::{NewReservation, RescheduleReservation, Reservation, ScheduleChange},
    },
    repository::ReservationStore,
    scheduling::{
        pricing::{price, round_currency},
        validation::{check_booking_rules, conflict_issue, overflow_issue},
    },
};

#[derive(Clone)]
pub struct BookingService {
    store: Arc<dyn ReservationStore>,
    availability: AvailabilityService,
    config: BookingConfig,
}

impl BookingService {
    pub fn new(store: Arc<dyn ReservationStore>, availability: AvailabilityService, config: BookingConfig) -> Self {
        Self {
            store,
            availability,
            config,
        }
    }

    /// Price of a duration on a resource, rounded to currency precision
    pub async fn compute_price(
        &self,
        resource_id: i32,
        duration_value: Decimal,
        duration_type: DurationType,
    ) -> AppResult<Decimal> {
        if duration_value <= Decimal::ZERO {
            return Err(AppError::Validation(format!(
                "Duration must be positive, got {} {}",
                duration_value, duration_type
            )));
        }
        let resource = self.availability.get_resource(resource_id).await?;
        price(&resource, duration_value, duration_type)
            .map(round_currency)
            .ok_or_else(|| AppError::Validation(format!("Duration {} {} is too large", duration_value, duration_type)))
    }

    /// Validate a booking against the current time
    pub async fn validate(&self, request: &BookingRequest) -> AppResult<ValidationResult> {
        self.validate_at(request, Utc::now()).await
    }

    /// Run every booking check as of `now`, accumulating all failures.
    ///
    /// Only a missing resource stops the pass early. Storage errors are
    /// returned as `Err`, never folded into the result.
    pub async fn validate_at(&self, request: &BookingRequest, now: DateTime<Utc>) -> AppResult<ValidationResult> {
        let Some(resource) = self.availability.find_resource(request.resource_id).await? else {
            return Ok(ValidationResult::from_errors(
                vec![BookingIssue::new(
                    BookingErrorKind::ResourceNotFound,
                    format!("Resource {} not found", request.resource_id),
                )],
                Vec::new(),
                None,
            ));
        };

        let tz = resource.timezone_or(self.availability.default_timezone());
        let today = now.with_timezone(&tz).date_naive();
        let mut check = check_booking_rules(&resource, request, today);

        let conflicts = match check.interval {
            Some((start, end)) => {
                self.availability
                    .find_conflicts(resource.id, request.date, start, end, request.exclude_reservation_id)
                    .await?
            }
            None => Vec::new(),
        };
        if !conflicts.is_empty() {
            check.issues.push(conflict_issue(&conflicts));
        }

        let amount = price(&resource, request.duration_value, request.duration_type).map(round_currency);
        if amount.is_none() && !check.issues.iter().any(|i| i.kind == BookingErrorKind::InvalidDuration) {
            check.issues.push(overflow_issue(request));
        }
        let result = ValidationResult::from_errors(check.issues, conflicts, amount);

        if result.is_valid {
            tracing::debug!(
                "Booking of resource {} on {} {}-{} is valid",
                resource.id,
                request.date,
                request.start_time,
                request.end_time
            );
        } else {
            tracing::debug!(
                "Booking of resource {} on {} rejected: {:?}",
                resource.id,
                request.date,
                result.errors.iter().map(|e| e.kind).collect::<Vec<_>>()
            );
        }
        Ok(result)
    }

    /// Validate and store a new pending reservation
    pub async fn create_reservation(&self, data: &CreateReservation) -> AppResult<Reservation> {
        self.create_reservation_at(data, Utc::now()).await
    }

    pub async fn create_reservation_at(&self, data: &CreateReservation, now: DateTime<Utc>) -> AppResult<Reservation> {
        let mut request = data.booking.clone();
        request.exclude_reservation_id = None;

        let (start, end, total_price) = self.accepted_interval(&request, now).await?;

        let reservation = self
            .store
            .insert_reservation(&NewReservation {
                resource_id: request.resource_id,
                date: request.date,
                start_time: start,
                end_time: end,
                duration_value: request.duration_value,
                duration_type: request.duration_type,
                guest_count: request.guest_count,
                total_price,
                status: ReservationStatus::Pending,
                notes: data.notes.clone(),
            })
            .await
            .inspect_err(|e| {
                if matches!(e, AppError::SchedulingConflict(_)) {
                    tracing::warn!(
                        "Concurrent booking won the race for resource {} on {}",
                        request.resource_id,
                        request.date
                    );
                }
            })?;

        tracing::info!(
            "Created reservation {} for resource {} on {} {}-{}",
            reservation.id,
            reservation.resource_id,
            reservation.date,
            request.start_time,
            request.end_time
        );
        Ok(reservation)
    }

    /// Move a pending reservation to a new time range
    pub async fn reschedule(&self, id: i32, data: &RescheduleReservation) -> AppResult<Reservation> {
        self.reschedule_at(id, data, Utc::now()).await
    }

    pub async fn reschedule_at(
        &self,
        id: i32,
        data: &RescheduleReservation,
        now: DateTime<Utc>,
    ) -> AppResult<Reservation> {
        let existing = self.get_reservation(id).await?;
        let tz = self.timezone_for(existing.resource_id).await?;

        let lead = Duration::hours(self.config.modification_lead_hours);
        if !existing.can_be_modified(tz, now, lead) {
            return Err(AppError::NotModifiable(format!(
                "Reservation {} must be pending and start at least {}h from now",
                id, self.config.modification_lead_hours
            )));
        }

        let request = BookingRequest {
            resource_id: existing.resource_id,
            date: data.date,
            start_time: data.start_time.clone(),
            end_time: data.end_time.clone(),
            guest_count: data.guest_count,
            duration_value: data.duration_value,
            duration_type: data.duration_type,
            exclude_reservation_id: Some(id),
        };
        let (start, end, total_price) = self.accepted_interval(&request, now).await?;

        let updated = self
            .store
            .update_schedule(
                id,
                &ScheduleChange {
                    date: request.date,
                    start_time: start,
                    end_time: end,
                    duration_value: request.duration_value,
                    duration_type: request.duration_type,
                    guest_count: request.guest_count,
                    total_price,
                },
            )
            .await?;

        tracing::info!("Rescheduled reservation {} to {} {}-{}", id, updated.date, data.start_time, data.end_time);
        Ok(updated)
    }

    /// Cancel an active reservation far enough ahead of its start
    pub async fn cancel(&self, id: i32) -> AppResult<Reservation> {
        self.cancel_at(id, Utc::now()).await
    }

    pub async fn cancel_at(&self, id: i32, now: DateTime<Utc>) -> AppResult<Reservation> {
        let existing = self.get_reservation(id).await?;
        let tz = self.timezone_for(existing.resource_id).await?;

        let lead = Duration::hours(self.config.cancellation_lead_hours);
        if !existing.can_be_cancelled(tz, now, lead) {
            return Err(AppError::NotCancellable(format!(
                "Reservation {} must be active and start at least {}h from now",
                id, self.config.cancellation_lead_hours
            )));
        }

        let cancelled = self.store.set_status(id, ReservationStatus::Cancelled).await?;
        tracing::info!("Cancelled reservation {}", id);
        Ok(cancelled)
    }

    /// Mark a pending or payment-pending reservation as confirmed
    pub async fn confirm(&self, id: i32) -> AppResult<Reservation> {
        let existing = self.get_reservation(id).await?;
        if !matches!(existing.status, ReservationStatus::Pending | ReservationStatus::PaymentPending) {
            return Err(AppError::NotModifiable(format!(
                "Reservation {} is {} and cannot be confirmed",
                id, existing.status
            )));
        }

        let confirmed = self.store.set_status(id, ReservationStatus::Confirmed).await?;
        tracing::info!("Confirmed reservation {}", id);
        Ok(confirmed)
    }

    pub async fn get_reservation(&self, id: i32) -> AppResult<Reservation> {
        self.store
            .get_reservation(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reservation {} not found", id)))
    }

    /// Validate `request` and return its interval and price, or the rejection
    async fn accepted_interval(&self, request: &BookingRequest, now: DateTime<Utc>) -> AppResult<(u32, u32, Decimal)> {
        let result = self.validate_at(request, now).await?;
        if !result.is_valid {
            tracing::warn!(
                "Rejected booking of resource {} on {}: {} issue(s)",
                request.resource_id,
                request.date,
                result.errors.len()
            );
            return Err(AppError::BookingRejected(result.errors));
        }

        // Both times parsed during validation
        let start = crate::scheduling::time_to_minutes(&request.start_time)?;
        let end = crate::scheduling::time_to_minutes(&request.end_time)?;
        Ok((start, end, result.price.unwrap_or_default()))
    }

    async fn timezone_for(&self, resource_id: i32) -> AppResult<chrono_tz::Tz> {
        let default = self.availability.default_timezone();
        Ok(self
            .availability
            .find_resource(resource_id)
            .await?
            .map(|r| r.timezone_or(default))
            .unwrap_or(default))
    }
}
