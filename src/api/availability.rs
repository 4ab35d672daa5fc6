//! Availability endpoints (slots, free windows, occupancy, pricing)

use axum::{
    extract::{Path, Query, State},
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::parse_date;
use crate::{
    error::AppResult,
    models::{
        enums::DurationType,
        slot::{FreeWindowQuery, OccupancyQuery, OccupancyStats, SlotQuery, TimeSlot},
    },
};

/// Price computation request
#[derive(Debug, Deserialize, ToSchema)]
pub struct PriceRequest {
    pub duration_value: Decimal,
    pub duration_type: DurationType,
}

/// Computed price
#[derive(Debug, Serialize, ToSchema)]
pub struct PriceResponse {
    pub resource_id: i32,
    pub duration_value: Decimal,
    pub duration_type: DurationType,
    pub amount: Decimal,
}

/// List slots of a resource for a day
#[utoipa::path(
    get,
    path = "/resources/{id}/slots",
    tag = "availability",
    params(("id" = i32, Path, description = "Resource ID"), SlotQuery),
    responses(
        (status = 200, description = "Slots ordered by start, empty when closed", body = Vec<TimeSlot>),
        (status = 404, description = "Resource not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_available_slots(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Query(query): Query<SlotQuery>,
) -> AppResult<Json<Vec<TimeSlot>>> {
    let date = parse_date(&query.date)?;
    let slots = state
        .services
        .availability
        .available_slots(id, date, query.granularity)
        .await?;
    Ok(Json(slots))
}

/// List maximal free windows of a resource for a day
#[utoipa::path(
    get,
    path = "/resources/{id}/free-windows",
    tag = "availability",
    params(("id" = i32, Path, description = "Resource ID"), FreeWindowQuery),
    responses(
        (status = 200, description = "Free windows at least min_duration long", body = Vec<TimeSlot>),
        (status = 404, description = "Resource not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_free_windows(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Query(query): Query<FreeWindowQuery>,
) -> AppResult<Json<Vec<TimeSlot>>> {
    let date = parse_date(&query.date)?;
    let windows = state
        .services
        .availability
        .consecutive_free_slots(id, date, query.min_duration)
        .await?;
    Ok(Json(windows))
}

/// Occupancy and revenue of a resource for a day
#[utoipa::path(
    get,
    path = "/resources/{id}/occupancy",
    tag = "availability",
    params(("id" = i32, Path, description = "Resource ID"), OccupancyQuery),
    responses(
        (status = 200, description = "Occupancy stats", body = OccupancyStats),
        (status = 404, description = "Resource not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_occupancy(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Query(query): Query<OccupancyQuery>,
) -> AppResult<Json<OccupancyStats>> {
    let date = parse_date(&query.date)?;
    let stats = state.services.availability.occupancy_stats(id, date).await?;
    Ok(Json(stats))
}

/// Price of a duration on a resource
#[utoipa::path(
    post,
    path = "/resources/{id}/price",
    tag = "availability",
    params(("id" = i32, Path, description = "Resource ID")),
    request_body = PriceRequest,
    responses(
        (status = 200, description = "Computed price", body = PriceResponse),
        (status = 404, description = "Resource not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn compute_price(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<PriceRequest>,
) -> AppResult<Json<PriceResponse>> {
    let amount = state
        .services
        .bookings
        .compute_price(id, data.duration_value, data.duration_type)
        .await?;
    Ok(Json(PriceResponse {
        resource_id: id,
        duration_value: data.duration_value,
        duration_type: data.duration_type,
        amount,
    }))
}
