//! In-memory reservation store
//!
//! Applies the same no-overlap rule as the database exclusion constraint,
//! checked and written under a single write lock.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{DateRange, ReservationStore};
use crate::{
    error::{AppError, AppResult},
    models::{
        enums::ReservationStatus,
        reservation::{NewReservation, Reservation, ScheduleChange},
        resource::Resource,
    },
    scheduling::conflict::overlaps,
};

#[derive(Default)]
struct MemoryData {
    resources: HashMap<i32, Resource>,
    reservations: BTreeMap<i32, Reservation>,
    next_id: i32,
}

impl MemoryData {
    /// Reject `candidate` if it would overlap another active reservation
    fn check_overlap(&self, candidate: &Reservation) -> AppResult<()> {
        if !candidate.is_active() {
            return Ok(());
        }
        let clash = self.reservations.values().find(|r| {
            r.id != candidate.id
                && r.is_active()
                && r.resource_id == candidate.resource_id
                && r.date == candidate.date
                && overlaps(candidate.start_time, candidate.end_time, r.start_time, r.end_time)
        });
        match clash {
            Some(existing) => Err(AppError::SchedulingConflict(format!(
                "Time range overlaps active reservation {}",
                existing.id
            ))),
            None => Ok(()),
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<MemoryData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a resource
    pub async fn put_resource(&self, resource: Resource) {
        self.data.write().await.resources.insert(resource.id, resource);
    }

    /// Number of stored reservations, whatever their status
    pub async fn reservation_count(&self) -> usize {
        self.data.read().await.reservations.len()
    }
}

#[async_trait]
impl ReservationStore for MemoryStore {
    async fn find_resource(&self, id: i32) -> AppResult<Option<Resource>> {
        Ok(self.data.read().await.resources.get(&id).cloned())
    }

    async fn find_reservations(
        &self,
        resource_id: i32,
        range: DateRange,
        statuses: &[ReservationStatus],
    ) -> AppResult<Vec<Reservation>> {
        let data = self.data.read().await;
        let mut found: Vec<Reservation> = data
            .reservations
            .values()
            .filter(|r| r.resource_id == resource_id && range.contains(r.date) && statuses.contains(&r.status))
            .cloned()
            .collect();
        found.sort_by_key(|r| (r.date, r.start_time, r.id));
        Ok(found)
    }

    async fn get_reservation(&self, id: i32) -> AppResult<Option<Reservation>> {
        Ok(self.data.read().await.reservations.get(&id).cloned())
    }

    async fn insert_reservation(&self, data: &NewReservation) -> AppResult<Reservation> {
        let mut store = self.data.write().await;
        if !store.resources.contains_key(&data.resource_id) {
            return Err(AppError::NotFound(format!("Resource {} not found", data.resource_id)));
        }

        let reservation = Reservation {
            id: store.next_id + 1,
            resource_id: data.resource_id,
            date: data.date,
            start_time: data.start_time,
            end_time: data.end_time,
            duration_value: data.duration_value,
            duration_type: data.duration_type,
            guest_count: data.guest_count,
            total_price: data.total_price,
            status: data.status,
            notes: data.notes.clone(),
            crea_date: Some(Utc::now()),
            modif_date: None,
        };
        store.check_overlap(&reservation)?;

        store.next_id = reservation.id;
        store.reservations.insert(reservation.id, reservation.clone());
        Ok(reservation)
    }

    async fn update_schedule(&self, id: i32, change: &ScheduleChange) -> AppResult<Reservation> {
        let mut store = self.data.write().await;
        let mut updated = store
            .reservations
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Reservation {} not found", id)))?;

        updated.date = change.date;
        updated.start_time = change.start_time;
        updated.end_time = change.end_time;
        updated.duration_value = change.duration_value;
        updated.duration_type = change.duration_type;
        updated.guest_count = change.guest_count;
        updated.total_price = change.total_price;
        updated.modif_date = Some(Utc::now());
        store.check_overlap(&updated)?;

        store.reservations.insert(id, updated.clone());
        Ok(updated)
    }

    async fn set_status(&self, id: i32, status: ReservationStatus) -> AppResult<Reservation> {
        let mut store = self.data.write().await;
        let mut updated = store
            .reservations
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Reservation {} not found", id)))?;

        updated.status = status;
        updated.modif_date = Some(Utc::now());
        store.check_overlap(&updated)?;

        store.reservations.insert(id, updated.clone());
        Ok(updated)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
