//! Property listings owned by host users.

use fake::{
    Fake,
    faker::{
        address::en::{CityName, CountryName},
        company::en::CatchPhrase,
    },
};
use rand::Rng;
use rust_decimal::Decimal;
use time::OffsetDateTime;
use uuid::Uuid;

use super::sampling;
use crate::error::SeedError;
use crate::roster::Roster;
use stays::Role;

/// Generated property data ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedProperty {
    pub id: Uuid,
    pub host_id: Uuid,
    pub name: String,
    pub description: String,
    pub location: String,
    pub price_per_night: Decimal,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Configuration for property generation.
#[derive(Debug, Clone)]
pub struct PropertyGenConfig {
    /// Nightly price bounds in cents, inclusive.
    pub price_cents: (i64, i64),
    pub description_max_chars: usize,
    /// How far back `created_at` may reach.
    pub history_days: i64,
}

impl Default for PropertyGenConfig {
    fn default() -> Self {
        Self {
            price_cents: (5_000, 50_000),
            description_max_chars: 200,
            history_days: 730,
        }
    }
}

/// Generates properties for randomly chosen hosts.
pub struct PropertyGenerator {
    config: PropertyGenConfig,
}

impl PropertyGenerator {
    pub fn new() -> Self {
        Self {
            config: PropertyGenConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: PropertyGenConfig) -> Result<Self, SeedError> {
        sampling::check_range("price_cents", config.price_cents, 1)?;
        if config.description_max_chars == 0 {
            return Err(SeedError::InvalidConfig(
                "description_max_chars must be at least 1".into(),
            ));
        }
        sampling::check_history_days("history_days", config.history_days)?;
        Ok(Self { config })
    }

    /// Generates a single property owned by `host_id`.
    pub fn generate(
        &self,
        host_id: Uuid,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> GeneratedProperty {
        let name: String = CatchPhrase().fake_with_rng(rng);
        let description = sampling::text(self.config.description_max_chars, rng);
        let city: String = CityName().fake_with_rng(rng);
        let country: String = CountryName().fake_with_rng(rng);
        let (min_cents, max_cents) = self.config.price_cents;
        let price_per_night = sampling::price_between(min_cents, max_cents, rng);

        let created_at = sampling::datetime_within_days(now, self.config.history_days, rng);
        let updated_at = sampling::datetime_between(created_at, now, rng);

        GeneratedProperty {
            id: Uuid::new_v4(),
            host_id,
            name,
            description,
            location: format!("{city}, {country}"),
            price_per_night,
            created_at,
            updated_at,
        }
    }

    /// Generates `count` properties, each owned by a uniformly drawn host.
    ///
    /// Fails when `count > 0` and the roster holds no host.
    pub fn generate_batch(
        &self,
        count: usize,
        roster: &Roster,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Result<Vec<GeneratedProperty>, SeedError> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let hosts = roster.ids_with_role(Role::Host);
        if hosts.is_empty() {
            return Err(SeedError::MissingRole {
                role: Role::Host,
                stage: "properties",
            });
        }

        Ok((0..count)
            .map(|_| {
                let host_id = hosts[rng.gen_range(0..hosts.len())];
                self.generate(host_id, now, rng)
            })
            .collect())
    }
}

impl Default for PropertyGenerator {
    fn default() -> Self {
        Self::new()
    }
}
