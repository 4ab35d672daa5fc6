//! Data models for the booking server

pub mod booking;
pub mod enums;
pub mod reservation;
pub mod resource;
pub mod slot;

// Re-export commonly used types
pub use booking::{BookingErrorKind, BookingIssue, BookingRequest, Conflict, ValidationResult};
pub use enums::{DurationType, ReservationStatus};
pub use reservation::{NewReservation, Reservation, ScheduleChange};
pub use resource::{DayEntry, Pricing, Resource, WeeklyHours};
pub use slot::{OccupancyStats, TimeSlot};
