//! Booking validation endpoint

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::booking::{BookingRequest, ValidationResult},
};

/// Validate a proposed booking without storing it
#[utoipa::path(
    post,
    path = "/bookings/validate",
    tag = "bookings",
    request_body = BookingRequest,
    responses(
        (status = 200, description = "Validation outcome with every failed check", body = ValidationResult),
        (status = 400, description = "Malformed request", body = crate::error::ErrorResponse)
    )
)]
pub async fn validate_booking(
    State(state): State<crate::AppState>,
    Json(data): Json<BookingRequest>,
) -> AppResult<Json<ValidationResult>> {
    data.validate().map_err(|e| AppError::Validation(e.to_string()))?;
    let result = state.services.bookings.validate(&data).await?;
    Ok(Json(result))
}
