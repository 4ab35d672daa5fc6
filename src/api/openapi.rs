//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{availability, bookings, health, reservations};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cowork Booking API",
        version = "1.0.0",
        description = "Coworking reservation conflict and availability REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Availability
        availability::get_available_slots,
        availability::get_free_windows,
        availability::get_occupancy,
        availability::compute_price,
        // Bookings
        bookings::validate_booking,
        // Reservations
        reservations::create_reservation,
        reservations::get_reservation,
        reservations::reschedule_reservation,
        reservations::cancel_reservation,
        reservations::confirm_reservation,
    ),
    components(
        schemas(
            // Availability
            crate::models::slot::TimeSlot,
            crate::models::slot::OccupancyStats,
            crate::models::slot::SlotQuery,
            crate::models::slot::FreeWindowQuery,
            crate::models::slot::OccupancyQuery,
            availability::PriceRequest,
            availability::PriceResponse,
            // Bookings
            crate::models::booking::BookingRequest,
            crate::models::booking::BookingErrorKind,
            crate::models::booking::BookingIssue,
            crate::models::booking::Conflict,
            crate::models::booking::ValidationResult,
            crate::scheduling::MinuteRange,
            // Reservations
            crate::models::booking::CreateReservation,
            crate::models::reservation::Reservation,
            crate::models::reservation::RescheduleReservation,
            crate::models::enums::DurationType,
            crate::models::enums::ReservationStatus,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "availability", description = "Slots, free windows, occupancy and pricing"),
        (name = "bookings", description = "Booking validation"),
        (name = "reservations", description = "Reservation lifecycle")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
