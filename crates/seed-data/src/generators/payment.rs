//! Payments for committed bookings.

use rand::Rng;
use rand::seq::index;
use rust_decimal::Decimal;
use time::OffsetDateTime;
use uuid::Uuid;

use super::{GeneratedBooking, sampling};
use crate::config::PaymentCoverage;
use crate::error::SeedError;
use stays::PaymentMethod;

/// Generated payment data ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedPayment {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub amount: Decimal,
    pub payment_date: OffsetDateTime,
    pub method: PaymentMethod,
}

/// Configuration for payment generation.
#[derive(Debug, Clone)]
pub struct PaymentGenConfig {
    /// Which bookings get paid.
    pub coverage: PaymentCoverage,
    /// Amount bounds in cents, inclusive.
    pub amount_cents: (i64, i64),
    /// How far back `payment_date` may reach.
    pub history_days: i64,
}

impl Default for PaymentGenConfig {
    fn default() -> Self {
        Self {
            coverage: PaymentCoverage::default(),
            amount_cents: (10_000, 200_000),
            history_days: 365,
        }
    }
}

/// Generates at most one payment per booking.
pub struct PaymentGenerator {
    config: PaymentGenConfig,
}

impl PaymentGenerator {
    pub fn new() -> Self {
        Self {
            config: PaymentGenConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: PaymentGenConfig) -> Result<Self, SeedError> {
        config.coverage.validate()?;
        sampling::check_range("amount_cents", config.amount_cents, 1)?;
        sampling::check_history_days("history_days", config.history_days)?;
        Ok(Self { config })
    }

    /// Generates a payment for `booking_id`.
    pub fn generate(
        &self,
        booking_id: Uuid,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> GeneratedPayment {
        let (min_cents, max_cents) = self.config.amount_cents;

        GeneratedPayment {
            id: Uuid::new_v4(),
            booking_id,
            amount: sampling::price_between(min_cents, max_cents, rng),
            payment_date: sampling::datetime_within_days(now, self.config.history_days, rng),
            method: PaymentMethod::ALL[rng.gen_range(0..PaymentMethod::ALL.len())],
        }
    }

    /// Generates payments for the bookings selected by the coverage policy,
    /// in booking order.
    pub fn generate_for_bookings(
        &self,
        bookings: &[GeneratedBooking],
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Vec<GeneratedPayment> {
        let selected: Vec<&GeneratedBooking> = match self.config.coverage {
            PaymentCoverage::Full => bookings.iter().collect(),
            PaymentCoverage::Sparse { fraction } => bookings
                .iter()
                .filter(|_| rng.r#gen::<f64>() < fraction)
                .collect(),
            PaymentCoverage::Exact { count } => {
                let mut picked = index::sample(rng, bookings.len(), count.min(bookings.len()))
                    .into_vec();
                picked.sort_unstable();
                picked.into_iter().map(|i| &bookings[i]).collect()
            }
        };

        selected
            .into_iter()
            .map(|booking| self.generate(booking.id, now, rng))
            .collect()
    }
}

impl Default for PaymentGenerator {
    fn default() -> Self {
        Self::new()
    }
}
