//! Business logic services

pub mod availability;
pub mod booking;
pub mod cache;

use std::sync::Arc;

use crate::{config::AppConfig, repository::ReservationStore};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub store: Arc<dyn ReservationStore>,
    pub availability: availability::AvailabilityService,
    pub bookings: booking::BookingService,
}

impl Services {
    /// Create all services over the given store
    pub fn new(store: Arc<dyn ReservationStore>, config: &AppConfig) -> Self {
        let resources = cache::ResourceCache::new(&config.cache);
        let availability =
            availability::AvailabilityService::new(store.clone(), resources, config.booking.clone());
        Self {
            bookings: booking::BookingService::new(store.clone(), availability.clone(), config.booking.clone()),
            availability,
            store,
        }
    }
}
