//! Reservation endpoints (create, reschedule, cancel, confirm)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::CreateReservation,
        reservation::{RescheduleReservation, Reservation},
    },
};

/// Create a pending reservation
#[utoipa::path(
    post,
    path = "/reservations",
    tag = "reservations",
    request_body = CreateReservation,
    responses(
        (status = 201, description = "Reservation created", body = Reservation),
        (status = 409, description = "Overlaps a reservation committed concurrently", body = crate::error::ErrorResponse),
        (status = 422, description = "Booking rejected", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_reservation(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateReservation>,
) -> AppResult<(StatusCode, Json<Reservation>)> {
    data.validate().map_err(|e| AppError::Validation(e.to_string()))?;
    let reservation = state.services.bookings.create_reservation(&data).await?;
    Ok((StatusCode::CREATED, Json(reservation)))
}

/// Get a reservation
#[utoipa::path(
    get,
    path = "/reservations/{id}",
    tag = "reservations",
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation details", body = Reservation),
        (status = 404, description = "Reservation not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_reservation(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Reservation>> {
    let reservation = state.services.bookings.get_reservation(id).await?;
    Ok(Json(reservation))
}

/// Move a pending reservation to a new time range
#[utoipa::path(
    put,
    path = "/reservations/{id}",
    tag = "reservations",
    params(("id" = i32, Path, description = "Reservation ID")),
    request_body = RescheduleReservation,
    responses(
        (status = 200, description = "Reservation rescheduled", body = Reservation),
        (status = 422, description = "Not modifiable or booking rejected", body = crate::error::ErrorResponse)
    )
)]
pub async fn reschedule_reservation(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<RescheduleReservation>,
) -> AppResult<Json<Reservation>> {
    data.validate().map_err(|e| AppError::Validation(e.to_string()))?;
    let reservation = state.services.bookings.reschedule(id, &data).await?;
    Ok(Json(reservation))
}

/// Cancel a reservation
#[utoipa::path(
    post,
    path = "/reservations/{id}/cancel",
    tag = "reservations",
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation cancelled", body = Reservation),
        (status = 422, description = "Reservation cannot be cancelled", body = crate::error::ErrorResponse)
    )
)]
pub async fn cancel_reservation(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Reservation>> {
    let reservation = state.services.bookings.cancel(id).await?;
    Ok(Json(reservation))
}

/// Confirm a pending reservation
#[utoipa::path(
    post,
    path = "/reservations/{id}/confirm",
    tag = "reservations",
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation confirmed", body = Reservation),
        (status = 409, description = "Overlaps an active reservation", body = crate::error::ErrorResponse),
        (status = 422, description = "Reservation cannot be confirmed", body = crate::error::ErrorResponse)
    )
)]
pub async fn confirm_reservation(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Reservation>> {
    let reservation = state.services.bookings.confirm(id).await?;
    Ok(Json(reservation))
}
