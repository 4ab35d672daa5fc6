//! API handlers for the booking REST endpoints

pub mod availability;
pub mod bookings;
pub mod health;
pub mod openapi;
pub mod reservations;

use axum::{
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    error::{AppError, AppResult},
    AppState,
};

/// Parse a YYYY-MM-DD query parameter
pub(crate) fn parse_date(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid date '{}' (use YYYY-MM-DD)", raw)))
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Availability
        .route("/resources/:id/slots", get(availability::get_available_slots))
        .route("/resources/:id/free-windows", get(availability::get_free_windows))
        .route("/resources/:id/occupancy", get(availability::get_occupancy))
        .route("/resources/:id/price", post(availability::compute_price))
        // Bookings
        .route("/bookings/validate", post(bookings::validate_booking))
        // Reservations
        .route("/reservations", post(reservations::create_reservation))
        .route(
            "/reservations/:id",
            get(reservations::get_reservation).put(reservations::reschedule_reservation),
        )
        .route("/reservations/:id/cancel", post(reservations::cancel_reservation))
        .route("/reservations/:id/confirm", post(reservations::confirm_reservation))
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
