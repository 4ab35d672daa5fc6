//! Repository layer for reservation storage

pub mod memory;
pub mod reservations;
pub mod resources;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{
        enums::ReservationStatus,
        reservation::{NewReservation, Reservation, ScheduleChange},
        resource::Resource,
    },
};

pub use memory::MemoryStore;

/// Inclusive range of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// From the start to the end of a single day
    pub fn day(date: NaiveDate) -> Self {
        Self { start: date, end: date }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Persistence collaborator of the booking engine.
///
/// Writes must enforce that no two active reservations of the same resource
/// overlap on the same day, returning `AppError::SchedulingConflict` when an
/// insert or update would break it. Read-side conflict checks are only a
/// pre-validation against concurrent writers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationStore: Send + Sync {
    async fn find_resource(&self, id: i32) -> AppResult<Option<Resource>>;

    /// Reservations of a resource within `range` having one of `statuses`,
    /// ordered by date then start time
    async fn find_reservations(
        &self,
        resource_id: i32,
        range: DateRange,
        statuses: &[ReservationStatus],
    ) -> AppResult<Vec<Reservation>>;

    async fn find_active_reservations(&self, resource_id: i32, range: DateRange) -> AppResult<Vec<Reservation>> {
        self.find_reservations(resource_id, range, &ReservationStatus::ACTIVE).await
    }

    async fn get_reservation(&self, id: i32) -> AppResult<Option<Reservation>>;

    async fn insert_reservation(&self, data: &NewReservation) -> AppResult<Reservation>;

    async fn update_schedule(&self, id: i32, change: &ScheduleChange) -> AppResult<Reservation>;

    async fn set_status(&self, id: i32, status: ReservationStatus) -> AppResult<Reservation>;

    /// Check the store is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Postgres backed repository
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationStore for Repository {
    async fn find_resource(&self, id: i32) -> AppResult<Option<Resource>> {
        self.resources_find_by_id(id).await
    }

    async fn find_reservations(
        &self,
        resource_id: i32,
        range: DateRange,
        statuses: &[ReservationStatus],
    ) -> AppResult<Vec<Reservation>> {
        self.reservations_find(resource_id, range, statuses).await
    }

    async fn get_reservation(&self, id: i32) -> AppResult<Option<Reservation>> {
        self.reservations_get_by_id(id).await
    }

    async fn insert_reservation(&self, data: &NewReservation) -> AppResult<Reservation> {
        self.reservations_create(data).await
    }

    async fn update_schedule(&self, id: i32, change: &ScheduleChange) -> AppResult<Reservation> {
        self.reservations_update_schedule(id, change).await
    }

    async fn set_status(&self, id: i32, status: ReservationStatus) -> AppResult<Reservation> {
        self.reservations_set_status(id, status).await
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
