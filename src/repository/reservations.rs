//! Reservation queries on Repository

use chrono::Utc;

use super::{DateRange, Repository};
use crate::{
    error::{AppError, AppResult},
    models::{
        enums::ReservationStatus,
        reservation::{minutes_to_naive_time, NewReservation, Reservation, ReservationRow, ScheduleChange},
    },
};

/// SQLSTATE raised by the `reservations_no_overlap` exclusion constraint
const EXCLUSION_VIOLATION: &str = "23P01";

/// Turn an exclusion constraint violation into a scheduling conflict
fn map_write_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref db) = e {
        if db.code().as_deref() == Some(EXCLUSION_VIOLATION) {
            return AppError::SchedulingConflict(
                "Time range overlaps an existing active reservation".to_string(),
            );
        }
    }
    AppError::Database(e)
}

impl Repository {
    /// List reservations of a resource within a date range and status set
    pub async fn reservations_find(
        &self,
        resource_id: i32,
        range: DateRange,
        statuses: &[ReservationStatus],
    ) -> AppResult<Vec<Reservation>> {
        let statuses: Vec<String> = statuses.iter().map(|s| s.as_str().to_string()).collect();

        let rows = sqlx::query_as::<_, ReservationRow>(
            r#"
            SELECT * FROM reservations
            WHERE resource_id = $1 AND date >= $2 AND date <= $3 AND status = ANY($4)
            ORDER BY date, start_time
            "#,
        )
        .bind(resource_id)
        .bind(range.start)
        .bind(range.end)
        .bind(statuses)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Reservation::try_from).collect()
    }

    /// Get a reservation by ID
    pub async fn reservations_get_by_id(&self, id: i32) -> AppResult<Option<Reservation>> {
        let row = sqlx::query_as::<_, ReservationRow>("SELECT * FROM reservations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Reservation::try_from).transpose()
    }

    /// Insert a reservation; overlapping active reservations are rejected by the database
    pub async fn reservations_create(&self, data: &NewReservation) -> AppResult<Reservation> {
        let row = sqlx::query_as::<_, ReservationRow>(
            r#"
            INSERT INTO reservations
                (resource_id, date, start_time, end_time, duration_value, duration_type,
                 guest_count, total_price, status, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(data.resource_id)
        .bind(data.date)
        .bind(minutes_to_naive_time(data.start_time)?)
        .bind(minutes_to_naive_time(data.end_time)?)
        .bind(data.duration_value)
        .bind(data.duration_type.as_str())
        .bind(data.guest_count)
        .bind(data.total_price)
        .bind(data.status.as_str())
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Reservation::try_from(row)
    }

    /// Move a reservation to a new date and time range
    pub async fn reservations_update_schedule(&self, id: i32, change: &ScheduleChange) -> AppResult<Reservation> {
        let row = sqlx::query_as::<_, ReservationRow>(
            r#"
            UPDATE reservations
            SET date = $2, start_time = $3, end_time = $4, duration_value = $5,
                duration_type = $6, guest_count = $7, total_price = $8, modif_date = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(change.date)
        .bind(minutes_to_naive_time(change.start_time)?)
        .bind(minutes_to_naive_time(change.end_time)?)
        .bind(change.duration_value)
        .bind(change.duration_type.as_str())
        .bind(change.guest_count)
        .bind(change.total_price)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?
        .ok_or_else(|| AppError::NotFound(format!("Reservation {} not found", id)))?;

        Reservation::try_from(row)
    }

    /// Change the status of a reservation
    pub async fn reservations_set_status(&self, id: i32, status: ReservationStatus) -> AppResult<Reservation> {
        let row = sqlx::query_as::<_, ReservationRow>(
            "UPDATE reservations SET status = $2, modif_date = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status.as_str())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?
        .ok_or_else(|| AppError::NotFound(format!("Reservation {} not found", id)))?;

        Reservation::try_from(row)
    }
}
