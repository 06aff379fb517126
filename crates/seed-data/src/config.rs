//! Configuration types for sample data generation.

use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::mysql::MySqlConnectOptions;

use crate::error::SeedError;

/// Where to connect. All fields are required except the port.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl ConnectionConfig {
    pub const DEFAULT_PORT: u16 = 3306;

    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            user: user.into(),
            password: password.into(),
            database: database.into(),
        }
    }

    /// Sets a non-default port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn validate(&self) -> Result<(), SeedError> {
        if self.host.trim().is_empty() {
            return Err(SeedError::InvalidConfig("host must not be empty".into()));
        }
        if self.user.trim().is_empty() {
            return Err(SeedError::InvalidConfig("user must not be empty".into()));
        }
        if self.database.trim().is_empty() {
            return Err(SeedError::InvalidConfig(
                "database must not be empty".into(),
            ));
        }
        if self.port == 0 {
            return Err(SeedError::InvalidConfig("port must not be 0".into()));
        }
        Ok(())
    }

    /// Builds sqlx connect options from the validated fields.
    pub fn connect_options(&self) -> Result<MySqlConnectOptions, SeedError> {
        self.validate()?;
        Ok(MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database))
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self::new("localhost", "root", "", "airbnb_clone")
    }
}

// Keeps the password out of logs.
impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .finish()
    }
}

/// Controls which bookings receive a payment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PaymentCoverage {
    /// Every booking gets exactly one payment.
    Full,
    /// Each booking independently gets a payment with this probability.
    Sparse {
        /// Probability (0.0-1.0) that a booking is paid.
        fraction: f64,
    },
    /// Exactly `count` distinct bookings are paid (capped at the booking count).
    Exact { count: usize },
}

impl Default for PaymentCoverage {
    fn default() -> Self {
        Self::Sparse { fraction: 0.5 }
    }
}

impl PaymentCoverage {
    pub fn validate(&self) -> Result<(), SeedError> {
        match *self {
            PaymentCoverage::Sparse { fraction } if !(0.0..=1.0).contains(&fraction) => {
                Err(SeedError::InvalidConfig(format!(
                    "payment fraction must be within 0.0..=1.0, got {fraction}"
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Row counts and sampling policy for a seeding run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedConfig {
    pub user_count: usize,
    pub property_count: usize,
    pub booking_count: usize,
    pub review_count: usize,
    pub message_count: usize,
    pub payment_coverage: PaymentCoverage,
    /// Seed for the content RNG. Ids are always fresh.
    pub seed: Option<u64>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            user_count: 10,
            property_count: 5,
            booking_count: 8,
            review_count: 5,
            message_count: 10,
            payment_coverage: PaymentCoverage::default(),
            seed: None,
        }
    }
}

impl SeedConfig {
    pub fn validate(&self) -> Result<(), SeedError> {
        self.payment_coverage.validate()
    }
}
