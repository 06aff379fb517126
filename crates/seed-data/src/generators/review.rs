//! Property reviews written by guest users.
//!
//! Reviews are drawn independently of bookings, so a guest may review a
//! property they never booked.

use fake::{Fake, faker::lorem::en::Sentence};
use rand::Rng;
use time::OffsetDateTime;
use uuid::Uuid;

use super::{GeneratedProperty, sampling};
use crate::error::SeedError;
use crate::roster::Roster;
use stays::Role;

/// Generated review data ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedReview {
    pub id: Uuid,
    pub property_id: Uuid,
    pub user_id: Uuid,
    pub rating: u8,
    pub comment: String,
    pub created_at: OffsetDateTime,
}

/// Configuration for review generation.
#[derive(Debug, Clone)]
pub struct ReviewGenConfig {
    /// Comment length bounds in words, inclusive.
    pub comment_words: (usize, usize),
    /// How far back `created_at` may reach.
    pub history_days: i64,
}

impl Default for ReviewGenConfig {
    fn default() -> Self {
        Self {
            comment_words: (12, 18),
            history_days: 365,
        }
    }
}

pub struct ReviewGenerator {
    config: ReviewGenConfig,
}

impl ReviewGenerator {
    pub fn new() -> Self {
        Self {
            config: ReviewGenConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: ReviewGenConfig) -> Result<Self, SeedError> {
        sampling::check_range("comment_words", config.comment_words, 1)?;
        sampling::check_history_days("history_days", config.history_days)?;
        Ok(Self { config })
    }

    pub fn generate(
        &self,
        property_id: Uuid,
        user_id: Uuid,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> GeneratedReview {
        let (min_words, max_words) = self.config.comment_words;
        let comment: String = Sentence(min_words..max_words + 1).fake_with_rng(rng);

        GeneratedReview {
            id: Uuid::new_v4(),
            property_id,
            user_id,
            rating: rng.gen_range(1..=5),
            comment,
            created_at: sampling::datetime_within_days(now, self.config.history_days, rng),
        }
    }

    /// Generates `count` reviews of random properties by random guests.
    pub fn generate_batch(
        &self,
        count: usize,
        properties: &[GeneratedProperty],
        roster: &Roster,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Result<Vec<GeneratedReview>, SeedError> {
        if count == 0 {
            return Ok(Vec::new());
        }
        if properties.is_empty() {
            return Err(SeedError::NoProperties { stage: "reviews" });
        }
        let guests = roster.ids_with_role(Role::Guest);
        if guests.is_empty() {
            return Err(SeedError::MissingRole {
                role: Role::Guest,
                stage: "reviews",
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

impl Default for ReviewGenerator {
    fn default() -> Self {
        Self::new()
    }
}
