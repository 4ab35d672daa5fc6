//! Bookable resource model (capacity, pricing, weekly opening hours)

use chrono::{DateTime, Utc, Weekday};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use utoipa::ToSchema;

use super::enums::DurationType;

/// A bookable space (desk, meeting room, private office...)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Resource {
    pub id: i32,
    pub name: String,
    /// Maximum number of guests per reservation
    pub capacity: i32,
    pub pricing: Pricing,
    /// Inactive resources cannot be booked
    pub is_active: bool,
    pub opening_hours: WeeklyHours,
    /// IANA timezone (e.g. "Europe/Paris"); server default when absent
    pub timezone: Option<String>,
    pub crea_date: Option<DateTime<Utc>>,
    pub modif_date: Option<DateTime<Utc>>,
}

impl Resource {
    /// Resolve the resource timezone, falling back to `default` when unset or unknown
    pub fn timezone_or(&self, default: Tz) -> Tz {
        match self.timezone.as_deref() {
            None => default,
            Some(name) => name.parse::<Tz>().unwrap_or_else(|_| {
                tracing::warn!("Resource {} has unknown timezone '{}', using {}", self.id, name, default);
                default
            }),
        }
    }
}

/// Price per unit of duration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Pricing {
    pub per_hour: Decimal,
    pub per_day: Decimal,
    pub per_week: Decimal,
    pub per_month: Decimal,
}

impl Pricing {
    /// Rate for one unit of the given duration type
    pub fn rate(&self, duration_type: DurationType) -> Decimal {
        match duration_type {
            DurationType::Hour => self.per_hour,
            DurationType::Day => self.per_day,
            DurationType::Week => self.per_week,
            DurationType::Month => self.per_month,
        }
    }
}

/// Calendar entry for one weekday; every field may be missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DayEntry {
    /// Opening time (HH:MM)
    pub open: Option<String>,
    /// Closing time (HH:MM)
    pub close: Option<String>,
    #[serde(default)]
    pub closed: bool,
}

impl DayEntry {
    pub fn open(open: &str, close: &str) -> Self {
        Self {
            open: Some(open.to_string()),
            close: Some(close.to_string()),
            closed: false,
        }
    }

    pub fn closed() -> Self {
        Self {
            open: None,
            close: None,
            closed: true,
        }
    }
}

/// Weekly opening hours, one optional entry per weekday
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WeeklyHours {
    pub monday: Option<DayEntry>,
    pub tuesday: Option<DayEntry>,
    pub wednesday: Option<DayEntry>,
    pub thursday: Option<DayEntry>,
    pub friday: Option<DayEntry>,
    pub saturday: Option<DayEntry>,
    pub sunday: Option<DayEntry>,
}

impl WeeklyHours {
    /// Same hours on every day of the week
    pub fn every_day(entry: DayEntry) -> Self {
        Self {
            monday: Some(entry.clone()),
            tuesday: Some(entry.clone()),
            wednesday: Some(entry.clone()),
            thursday: Some(entry.clone()),
            friday: Some(entry.clone()),
            saturday: Some(entry.clone()),
            sunday: Some(entry),
        }
    }

    pub fn for_weekday(&self, weekday: Weekday) -> Option<&DayEntry> {
        match weekday {
            Weekday::Mon => self.monday.as_ref(),
            Weekday::Tue => self.tuesday.as_ref(),
            Weekday::Wed => self.wednesday.as_ref(),
            Weekday::Thu => self.thursday.as_ref(),
            Weekday::Fri => self.friday.as_ref(),
            Weekday::Sat => self.saturday.as_ref(),
            Weekday::Sun => self.sunday.as_ref(),
        }
    }

    pub fn set(&mut self, weekday: Weekday, entry: Option<DayEntry>) {
        let slot = match weekday {
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
            Weekday::Sun => &mut self.sunday,
        };
        *slot = entry;
    }
}

/// Resource row as stored in the database
#[derive(Debug, Clone, FromRow)]
pub struct ResourceRow {
    pub id: i32,
    pub name: String,
    pub capacity: i32,
    pub price_per_hour: Decimal,
    pub price_per_day: Decimal,
    pub price_per_week: Decimal,
    pub price_per_month: Decimal,
    pub is_active: bool,
    pub opening_hours: Json<WeeklyHours>,
    pub timezone: Option<String>,
    pub crea_date: Option<DateTime<Utc>>,
    pub modif_date: Option<DateTime<Utc>>,
}

impl From<ResourceRow> for Resource {
    fn from(row: ResourceRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            capacity: row.capacity,
            pricing: Pricing {
                per_hour: row.price_per_hour,
                per_day: row.price_per_day,
                per_week: row.price_per_week,
                per_month: row.price_per_month,
            },
            is_active: row.is_active,
            opening_hours: row.opening_hours.0,
            timezone: row.timezone,
            crea_date: row.crea_date,
            modif_date: row.modif_date,
        }
    }
}
