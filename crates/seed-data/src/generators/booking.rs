//! Bookings of properties by guest users.

use rand::Rng;
use rust_decimal::Decimal;
use time::{Date, Duration, OffsetDateTime};
use uuid::Uuid;

use super::{GeneratedProperty, sampling};
use crate::error::SeedError;
use crate::roster::Roster;
use stays::{BookingStatus, Role};

/// Generated booking data ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedBooking {
    pub id: Uuid,
    pub property_id: Uuid,
    pub user_id: Uuid,
    pub start_date: Date,
    pub end_date: Date,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub created_at: OffsetDateTime,
}

impl GeneratedBooking {
    pub fn nights(&self) -> i64 {
        (self.end_date - self.start_date).whole_days()
    }
}

/// Configuration for booking generation.
#[derive(Debug, Clone)]
pub struct BookingGenConfig {
    /// Latest check-in, in days from today.
    pub max_lead_days: i64,
    /// Stay length bounds in nights, inclusive.
    pub nights: (i64, i64),
    /// Total price bounds in cents, inclusive.
    pub total_cents: (i64, i64),
    /// How far back `created_at` may reach.
    pub history_days: i64,
}

impl Default for BookingGenConfig {
    fn default() -> Self {
        Self {
            max_lead_days: 30,
            nights: (1, 14),
            total_cents: (10_000, 200_000),
            history_days: 365,
        }
    }
}

/// Generates bookings of random properties by random guests.
pub struct BookingGenerator {
    config: BookingGenConfig,
}

impl BookingGenerator {
    pub fn new() -> Self {
        Self {
            config: BookingGenConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    ///
    /// Stays are at least one night long, so `end_date` always follows `start_date`.
    pub fn with_config(config: BookingGenConfig) -> Result<Self, SeedError> {
        if config.max_lead_days < 0 {
            return Err(SeedError::InvalidConfig(format!(
                "max_lead_days must not be negative, got {}",
                config.max_lead_days
            )));
        }
        sampling::check_range("nights", config.nights, 1)?;
        sampling::check_range("total_cents", config.total_cents, 1)?;
        sampling::check_history_days("history_days", config.history_days)?;
        Ok(Self { config })
    }

    /// Generates a single booking of `property_id` by `user_id`.
    pub fn generate(
        &self,
        property_id: Uuid,
        user_id: Uuid,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> GeneratedBooking {
        let start_date = sampling::date_within_days_ahead(now.date(), self.config.max_lead_days, rng);
        let (min_nights, max_nights) = self.config.nights;
        let end_date = start_date + Duration::days(rng.gen_range(min_nights..=max_nights));
        let (min_cents, max_cents) = self.config.total_cents;

        GeneratedBooking {
            id: Uuid::new_v4(),
            property_id,
            user_id,
            start_date,
            end_date,
            total_price: sampling::price_between(min_cents, max_cents, rng),
            status: BookingStatus::ALL[rng.gen_range(0..BookingStatus::ALL.len())],
            created_at: sampling::datetime_within_days(now, self.config.history_days, rng),
        }
    }

    /// Generates `count` bookings.
    ///
    /// Fails when `count > 0` and there is no property or no guest to reference.
    pub fn generate_batch(
        &self,
        count: usize,
        properties: &[GeneratedProperty],
        roster: &Roster,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Result<Vec<GeneratedBooking>, SeedError> {
        if count == 0 {
            return Ok(Vec::new());
        }
        if properties.is_empty() {
            return Err(SeedError::NoProperties { stage: "bookings" });
        }
        let guests = roster.ids_with_role(Role::Guest);
        if guests.is_empty() {
            return Err(SeedError::MissingRole {
                role: Role::Guest,
                stage: "bookings",
            });
        }

        Ok((0..count)
            .map(|_| {
                let property_id = properties[rng.gen_range(0..properties.len())].id;
                let user_id = guests[rng.gen_range(0..guests.len())];
                self.generate(property_id, user_id, now, rng)
            })
            .collect())
    }
}

impl Default for BookingGenerator {
    fn default() -> Self {
        Self::new()
    }
}
