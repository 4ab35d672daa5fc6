//! Availability service (conflicts, slots, free windows, occupancy)

use std::sync::Arc;

use chrono::NaiveDate;
use chrono_tz::Tz;

use super::cache::ResourceCache;
use crate::{
    config::BookingConfig,
    error::{AppError, AppResult},
    models::{
        booking::Conflict,
        enums::ReservationStatus,
        resource::Resource,
        slot::{OccupancyStats, TimeSlot},
    },
    repository::{DateRange, ReservationStore},
    scheduling::{
        calendar::{opening_hours_for, DayHours, HoursPolicy},
        conflict::detect_conflicts,
        occupancy::occupancy_stats,
        slots::{generate_slots, merge_free_slots},
    },
};

#[derive(Clone)]
pub struct AvailabilityService {
    store: Arc<dyn ReservationStore>,
    resources: ResourceCache,
    config: BookingConfig,
    default_tz: Tz,
}

impl AvailabilityService {
    pub fn new(store: Arc<dyn ReservationStore>, resources: ResourceCache, config: BookingConfig) -> Self {
        let default_tz = config.default_timezone.parse::<Tz>().unwrap_or_else(|_| {
            tracing::warn!("Unknown default timezone '{}', using UTC", config.default_timezone);
            Tz::UTC
        });
        Self {
            store,
            resources,
            config,
            default_tz,
        }
    }

    /// Timezone applied to resources without their own
    pub fn default_timezone(&self) -> Tz {
        self.default_tz
    }

    /// Resource by ID, if it exists
    pub async fn find_resource(&self, id: i32) -> AppResult<Option<Resource>> {
        self.resources.get_or_load(self.store.as_ref(), id).await
    }

    /// Resource by ID, or NotFound
    pub async fn get_resource(&self, id: i32) -> AppResult<Resource> {
        self.find_resource(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Resource {} not found", id)))
    }

    /// Active reservations of `resource_id` overlapping `[start, end)` on `date`
    pub async fn find_conflicts(
        &self,
        resource_id: i32,
        date: NaiveDate,
        start: u32,
        end: u32,
        exclude_reservation_id: Option<i32>,
    ) -> AppResult<Vec<Conflict>> {
        let reservations = self
            .store
            .find_active_reservations(resource_id, DateRange::day(date))
            .await?;
        let conflicts = detect_conflicts(&reservations, date, start, end, exclude_reservation_id);
        tracing::debug!(
            "Resource {} on {}: {} conflict(s) among {} active reservation(s)",
            resource_id,
            date,
            conflicts.len(),
            reservations.len()
        );
        Ok(conflicts)
    }

    /// Slots of `granularity` minutes (default from config) over the open window
    pub async fn available_slots(
        &self,
        resource_id: i32,
        date: NaiveDate,
        granularity: Option<u32>,
    ) -> AppResult<Vec<TimeSlot>> {
        let granularity = granularity.unwrap_or(self.config.default_slot_minutes);
        if granularity == 0 || granularity > self.config.max_slot_minutes {
            return Err(AppError::Validation(format!(
                "Slot granularity must be between 1 and {} minutes",
                self.config.max_slot_minutes
            )));
        }
        let resource = self.get_resource(resource_id).await?;
        self.slots_for(&resource, date, granularity).await
    }

    /// Maximal free windows lasting at least `minimum_minutes`
    pub async fn consecutive_free_slots(
        &self,
        resource_id: i32,
        date: NaiveDate,
        minimum_minutes: u32,
    ) -> AppResult<Vec<TimeSlot>> {
        let resource = self.get_resource(resource_id).await?;
        let slots = self.slots_for(&resource, date, self.config.merge_slot_minutes).await?;
        Ok(merge_free_slots(&slots, minimum_minutes))
    }

    /// Occupancy of the default-size slots and recognized revenue for a day
    pub async fn occupancy_stats(&self, resource_id: i32, date: NaiveDate) -> AppResult<OccupancyStats> {
        let resource = self.get_resource(resource_id).await?;
        let slots = self.slots_for(&resource, date, self.config.default_slot_minutes).await?;
        let revenue_reservations = self
            .store
            .find_reservations(resource_id, DateRange::day(date), &ReservationStatus::REVENUE)
            .await?;
        Ok(occupancy_stats(resource_id, date, &slots, &revenue_reservations))
    }

    /// Closed days, including days without hours, have no slots
    async fn slots_for(&self, resource: &Resource, date: NaiveDate, granularity: u32) -> AppResult<Vec<TimeSlot>> {
        let window = match opening_hours_for(resource, date, HoursPolicy::Strict) {
            DayHours::Open(window) => window,
            DayHours::Closed | DayHours::Unrestricted => return Ok(Vec::new()),
        };
        let reservations = self
            .store
            .find_active_reservations(resource.id, DateRange::day(date))
            .await?;
        Ok(generate_slots(window, date, &reservations, granularity))
    }
}
