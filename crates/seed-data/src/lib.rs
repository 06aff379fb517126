//! Sample data generation for the stays booking platform.
//!
//! This crate fills the `User`, `Property`, `Booking`, `Payment`, `Review` and
//! `Message` tables with synthetic rows whose foreign keys always point at rows
//! committed by an earlier stage.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use seed_data::prelude::*;
//!
//! let mut seeder = Seeder::connect(&ConnectionConfig::default()).await?;
//! let result = SeedPipeline::new()
//!     .with_users(10)
//!     .with_properties(5)
//!     .with_payment_coverage(PaymentCoverage::Full)
//!     .build(&mut seeder, OffsetDateTime::now_utc(), &mut rng)
//!     .await?;
//! seeder.close().await?;
//! ```

pub mod builders;
pub mod config;
pub mod db;
pub mod error;
pub mod generators;
pub mod roster;

pub use stays::{BookingStatus, PaymentMethod, Role};

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::builders::{SeedMetrics, SeedPipeline, SeedResult, SeedSummary};
    pub use crate::config::{ConnectionConfig, PaymentCoverage, SeedConfig};
    pub use crate::db::Seeder;
    pub use crate::error::SeedError;
    pub use crate::generators::{
        BookingGenerator, MessageGenerator, PaymentGenerator, PropertyGenerator, ReviewGenerator,
        UserGenConfig, UserGenerator,
    };
    pub use crate::roster::{Roster, RosterEntry};
    pub use crate::{BookingStatus, PaymentMethod, Role};
    pub use time::OffsetDateTime;
}
