//! Fluent builder for running the six seeding stages in dependency order.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::config::{PaymentCoverage, SeedConfig};
use crate::db::Seeder;
use crate::error::SeedError;
use crate::generators::{
    BookingGenerator, GeneratedBooking, GeneratedMessage, GeneratedPayment, GeneratedProperty,
    GeneratedReview, GeneratedUser, MessageGenerator, PaymentGenConfig, PaymentGenerator,
    PropertyGenerator, ReviewGenerator, UserGenConfig, UserGenerator,
};
use crate::roster::Roster;

/// Rows produced by a run, in insertion order.
#[derive(Debug, Default)]
pub struct SeedResult {
    pub users: Vec<GeneratedUser>,
    pub properties: Vec<GeneratedProperty>,
    pub bookings: Vec<GeneratedBooking>,
    pub payments: Vec<GeneratedPayment>,
    pub reviews: Vec<GeneratedReview>,
    pub messages: Vec<GeneratedMessage>,
    /// Timing metrics (populated if metrics tracking enabled).
    pub metrics: Option<SeedMetrics>,
}

impl SeedResult {
    pub fn summary(&self) -> SeedSummary {
        SeedSummary {
            users: self.users.len(),
            properties: self.properties.len(),
            bookings: self.bookings.len(),
            payments: self.payments.len(),
            reviews: self.reviews.len(),
            messages: self.messages.len(),
        }
    }

    pub fn roster(&self) -> Roster {
        Roster::from_users(&self.users)
    }
}

/// Row count per table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub users: usize,
    pub properties: usize,
    pub bookings: usize,
    pub payments: usize,
    pub reviews: usize,
    pub messages: usize,
}

/// Wall-clock timings of a run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeedMetrics {
    /// Time spent generating rows (milliseconds).
    pub generation_time_ms: u64,
    /// Time spent inserting rows (milliseconds, 0 if build_data used).
    pub seeding_time_ms: u64,
}

/// Builder for a complete seeding run.
///
/// # Example
///
/// ```rust,ignore
/// let result = SeedPipeline::new()
///     .with_users(50)
///     .with_bookings(40)
///     .with_payment_coverage(PaymentCoverage::Full)
///     .build(&mut seeder, OffsetDateTime::now_utc(), &mut rng)
///     .await?;
/// ```
pub struct SeedPipeline {
    config: SeedConfig,
    user_config: UserGenConfig,
    track_metrics: bool,
}

impl Default for SeedPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl SeedPipeline {
    /// Creates a pipeline with the default counts (10/5/8/5/10).
    pub fn new() -> Self {
        Self::from_config(SeedConfig::default())
    }

    pub fn from_config(config: SeedConfig) -> Self {
        Self {
            config,
            user_config: UserGenConfig::default(),
            track_metrics: false,
        }
    }

    pub fn with_users(mut self, count: usize) -> Self {
        self.config.user_count = count;
        self
    }

    pub fn with_properties(mut self, count: usize) -> Self {
        self.config.property_count = count;
        self
    }

    pub fn with_bookings(mut self, count: usize) -> Self {
        self.config.booking_count = count;
        self
    }

    pub fn with_reviews(mut self, count: usize) -> Self {
        self.config.review_count = count;
        self
    }

    pub fn with_messages(mut self, count: usize) -> Self {
        self.config.message_count = count;
        self
    }

    /// Fixes the content RNG, overriding the one passed to `build`/`build_data`.
    ///
    /// Ids and email tags stay fresh per run.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Sets which bookings receive a payment.
    pub fn with_payment_coverage(mut self, coverage: PaymentCoverage) -> Self {
        self.config.payment_coverage = coverage;
        self
    }

    /// Sets the user generation configuration.
    pub fn with_user_config(mut self, config: UserGenConfig) -> Self {
        self.user_config = config;
        self
    }

    /// Enables timing metrics on the result.
    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.track_metrics = enabled;
        self
    }

    pub fn config(&self) -> &SeedConfig {
        &self.config
    }

    /// Generates every stage in memory without touching the database.
    ///
    /// When the config carries a seed, `rng` is ignored.
    pub fn build_data(
        &self,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Result<SeedResult, SeedError> {
        match self.config.seed {
            Some(seed) => self.generate_all(now, &mut StdRng::seed_from_u64(seed)),
            None => self.generate_all(now, rng),
        }
    }

    fn generate_all(
        &self,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Result<SeedResult, SeedError> {
        self.config.validate()?;
        let start = self.track_metrics.then(Instant::now);
        let stages = Stages::new(self)?;

        let users = stages.users(&self.config, now, rng)?;
        let roster = Roster::from_users(&users);
        let properties = stages.properties(&self.config, &roster, now, rng)?;
        let bookings = stages.bookings(&self.config, &properties, &roster, now, rng)?;
        let payments = stages.payments(&bookings, now, rng);
        let reviews = stages.reviews(&self.config, &properties, &roster, now, rng)?;
        let messages = stages.messages(&self.config, &roster, now, rng)?;

        Ok(SeedResult {
            users,
            properties,
            bookings,
            payments,
            reviews,
            messages,
            metrics: start.map(|s| SeedMetrics {
                generation_time_ms: s.elapsed().as_millis() as u64,
                seeding_time_ms: 0,
            }),
        })
    }

    /// Generates and inserts stage by stage.
    ///
    /// Each stage commits before the next one is generated, so a failing
    /// stage leaves every earlier stage in the database and none of its own
    /// rows. When the config carries a seed, `rng` is ignored.
    pub async fn build(
        &self,
        seeder: &mut Seeder,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Result<SeedResult, SeedError> {
        match self.config.seed {
            Some(seed) => {
                self.run_stages(seeder, now, &mut StdRng::seed_from_u64(seed))
                    .await
            }
            None => self.run_stages(seeder, now, rng).await,
        }
    }

    async fn run_stages(
        &self,
        seeder: &mut Seeder,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Result<SeedResult, SeedError> {
        self.config.validate()?;
        let stages = Stages::new(self)?;
        let mut generation = std::time::Duration::ZERO;
        let mut seeding = std::time::Duration::ZERO;

        macro_rules! timed {
            ($total:ident, $e:expr) => {{
                let started = Instant::now();
                let out = $e;
                $total += started.elapsed();
                out
            }};
        }

        let users = timed!(generation, stages.users(&self.config, now, rng))?;
        timed!(seeding, seeder.seed_users(&users).await)?;
        let roster = Roster::from_users(&users);

        let properties = timed!(generation, stages.properties(&self.config, &roster, now, rng))?;
        timed!(seeding, seeder.seed_properties(&properties).await)?;

        let bookings = timed!(
            generation,
            stages.bookings(&self.config, &properties, &roster, now, rng)
        )?;
        timed!(seeding, seeder.seed_bookings(&bookings).await)?;

        let payments = timed!(generation, stages.payments(&bookings, now, rng));
        timed!(seeding, seeder.seed_payments(&payments).await)?;

        let reviews = timed!(
            generation,
            stages.reviews(&self.config, &properties, &roster, now, rng)
        )?;
        timed!(seeding, seeder.seed_reviews(&reviews).await)?;

        let messages = timed!(generation, stages.messages(&self.config, &roster, now, rng))?;
        timed!(seeding, seeder.seed_messages(&messages).await)?;

        let result = SeedResult {
            users,
            properties,
            bookings,
            payments,
            reviews,
            messages,
            metrics: self.track_metrics.then(|| SeedMetrics {
                generation_time_ms: generation.as_millis() as u64,
                seeding_time_ms: seeding.as_millis() as u64,
            }),
        };

        let summary = result.summary();
        info!(
            users = summary.users,
            properties = summary.properties,
            bookings = summary.bookings,
            payments = summary.payments,
            reviews = summary.reviews,
            messages = summary.messages,
            "Seed run complete"
        );
        Ok(result)
    }
}

/// The six generators of a run.
struct Stages {
    users: UserGenerator,
    properties: PropertyGenerator,
    bookings: BookingGenerator,
    payments: PaymentGenerator,
    reviews: ReviewGenerator,
    messages: MessageGenerator,
}

impl Stages {
    fn new(pipeline: &SeedPipeline) -> Result<Self, SeedError> {
        Ok(Self {
            users: UserGenerator::with_config(pipeline.user_config.clone())?,
            properties: PropertyGenerator::new(),
            bookings: BookingGenerator::new(),
            payments: PaymentGenerator::with_config(PaymentGenConfig {
                coverage: pipeline.config.payment_coverage,
                ..Default::default()
            })?,
            reviews: ReviewGenerator::new(),
            messages: MessageGenerator::new(),
        })
    }

    fn users(
        &self,
        config: &SeedConfig,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Result<Vec<GeneratedUser>, SeedError> {
        let users = self.users.generate_batch(config.user_count, now, rng)?;
        debug!(count = users.len(), "generated users");
        Ok(users)
    }

    fn properties(
        &self,
        config: &SeedConfig,
        roster: &Roster,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Result<Vec<GeneratedProperty>, SeedError> {
        let properties = self
            .properties
            .generate_batch(config.property_count, roster, now, rng)?;
        debug!(count = properties.len(), "generated properties");
        Ok(properties)
    }

    fn bookings(
        &self,
        config: &SeedConfig,
        properties: &[GeneratedProperty],
        roster: &Roster,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Result<Vec<GeneratedBooking>, SeedError> {
        let bookings =
            self.bookings
                .generate_batch(config.booking_count, properties, roster, now, rng)?;
        debug!(count = bookings.len(), "generated bookings");
        Ok(bookings)
    }

    fn payments(
        &self,
        bookings: &[GeneratedBooking],
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Vec<GeneratedPayment> {
        let payments = self.payments.generate_for_bookings(bookings, now, rng);
        debug!(
            count = payments.len(),
            bookings = bookings.len(),
            "generated payments"
        );
        payments
    }

    fn reviews(
        &self,
        config: &SeedConfig,
        properties: &[GeneratedProperty],
        roster: &Roster,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Result<Vec<GeneratedReview>, SeedError> {
        let reviews =
            self.reviews
                .generate_batch(config.review_count, properties, roster, now, rng)?;
        debug!(count = reviews.len(), "generated reviews");
        Ok(reviews)
    }

    fn messages(
        &self,
        config: &SeedConfig,
        roster: &Roster,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Result<Vec<GeneratedMessage>, SeedError> {
        let messages = self
            .messages
            .generate_batch(config.message_count, roster, now, rng)?;
        debug!(count = messages.len(), "generated messages");
        Ok(messages)
    }
}

/// Preset pipelines for common needs.
impl SeedPipeline {
    /// Every booking paid, so payment flows can be exercised end to end.
    pub fn fully_paid() -> Self {
        Self::new().with_payment_coverage(PaymentCoverage::Full)
    }

    /// Only guests and hosts, with enough of both that every stage has
    /// something to reference.
    pub fn marketplace() -> Self {
        Self::new()
            .with_users(40)
            .with_properties(15)
            .with_bookings(60)
            .with_reviews(30)
            .with_messages(50)
            .with_user_config(UserGenConfig {
                roles: vec![stays::Role::Guest, stays::Role::Host],
                ..Default::default()
            })
    }
}
