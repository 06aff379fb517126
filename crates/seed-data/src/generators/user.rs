//! User generation with roles.

use std::collections::HashSet;

use fake::{
    Fake,
    faker::{
        internet::en::SafeEmail,
        name::en::{FirstName, LastName},
        phone_number::en::PhoneNumber,
    },
};
use rand::Rng;
use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use super::sampling;
use crate::error::SeedError;
use stays::Role;

/// Generated user data ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedUser {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub phone_number: Option<String>,
    pub role: Role,
    pub created_at: OffsetDateTime,
}

/// Configuration for user generation.
#[derive(Debug, Clone)]
pub struct UserGenConfig {
    /// Roles drawn from uniformly.
    pub roles: Vec<Role>,
    /// Probability that a phone number is filled in.
    pub phone_fill_rate: f64,
    /// Attempts at drawing an unused email before giving up.
    pub max_email_attempts: usize,
    /// Plain-text password every generated account signs in with.
    pub password: String,
    /// How far back `created_at` may reach.
    pub history_days: i64,
    /// Sub-address appended to every email's local part (`name+tag@domain`).
    /// `None` draws a fresh tag per generator, so separate runs never share
    /// an email even when the content RNG is seeded.
    pub email_tag: Option<String>,
}

impl Default for UserGenConfig {
    fn default() -> Self {
        Self {
            roles: Role::ALL.to_vec(),
            phone_fill_rate: 0.5,
            max_email_attempts: 100,
            password: "stays.dev".to_string(),
            history_days: 730,
            email_tag: None,
        }
    }
}

const MAX_PHONE_LEN: usize = 15;
const EMAIL_TAG_LEN: usize = 8;

/// Generates users with unique emails and uniformly drawn roles.
pub struct UserGenerator {
    config: UserGenConfig,
    password_hash: String,
    email_tag: String,
}

impl UserGenerator {
    /// Creates a new user generator with default configuration.
    pub fn new() -> Result<Self, SeedError> {
        Self::with_config(UserGenConfig::default())
    }

    /// Creates a generator with custom configuration.
    ///
    /// The password is hashed once here; every generated user shares it.
    pub fn with_config(config: UserGenConfig) -> Result<Self, SeedError> {
        if config.roles.is_empty() {
            return Err(SeedError::InvalidConfig(
                "at least one role is required".into(),
            ));
        }
        if !(0.0..=1.0).contains(&config.phone_fill_rate) {
            return Err(SeedError::InvalidConfig(format!(
                "phone fill rate must be within 0.0..=1.0, got {}",
                config.phone_fill_rate
            )));
        }
        if config.max_email_attempts == 0 {
            return Err(SeedError::InvalidConfig(
                "max_email_attempts must be at least 1".into(),
            ));
        }

        sampling::check_history_days("history_days", config.history_days)?;

        let email_tag = match &config.email_tag {
            Some(tag) if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric()) => {
                return Err(SeedError::InvalidConfig(format!(
                    "email_tag must be non-empty ASCII alphanumerics, got {tag:?}"
                )));
            }
            Some(tag) => tag.to_lowercase(),
            None => {
                let mut tag = Uuid::new_v4().simple().to_string();
                tag.truncate(EMAIL_TAG_LEN);
                tag
            }
        };

        let password_hash = stays::auth::hash_password(&config.password)?;
        Ok(Self {
            config,
            password_hash,
            email_tag,
        })
    }

    /// Tag carried by every email this generator produces.
    pub fn email_tag(&self) -> &str {
        &self.email_tag
    }

    /// Generates a single user whose email is not in `taken`, then records it there.
    pub fn generate(
        &self,
        taken: &mut HashSet<String>,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Result<GeneratedUser, SeedError> {
        let email = self.unique_email(taken, rng)?;
        let first_name: String = FirstName().fake_with_rng(rng);
        let last_name: String = LastName().fake_with_rng(rng);

        let phone_number = if rng.r#gen::<f64>() < self.config.phone_fill_rate {
            let phone: String = PhoneNumber().fake_with_rng(rng);
            Some(phone.chars().take(MAX_PHONE_LEN).collect())
        } else {
            None
        };

        let role = self.config.roles[rng.gen_range(0..self.config.roles.len())];
        let created_at = sampling::datetime_within_days(now, self.config.history_days, rng);

        Ok(GeneratedUser {
            id: Uuid::new_v4(),
            first_name,
            last_name,
            email,
            password_hash: self.password_hash.clone(),
            phone_number,
            role,
            created_at,
        })
    }

    /// Generates multiple users with pairwise distinct emails.
    pub fn generate_batch(
        &self,
        count: usize,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Result<Vec<GeneratedUser>, SeedError> {
        let mut taken = HashSet::with_capacity(count);
        (0..count)
            .map(|_| self.generate(&mut taken, now, rng))
            .collect()
    }

    fn unique_email(
        &self,
        taken: &mut HashSet<String>,
        rng: &mut impl Rng,
    ) -> Result<String, SeedError> {
        for attempt in 1..=self.config.max_email_attempts {
            let email: String = SafeEmail().fake_with_rng(rng);
            let email = tagged(&email.to_lowercase(), &self.email_tag);
            if taken.insert(email.clone()) {
                return Ok(email);
            }
            debug!(attempt, %email, "email already generated, drawing another");
        }

        Err(SeedError::EmailExhausted {
            attempts: self.config.max_email_attempts,
        })
    }
}

/// Inserts `+tag` before the `@` of `email`.
fn tagged(email: &str, tag: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => format!("{local}+{tag}@{domain}"),
        None => format!("{email}+{tag}"),
    }
}
