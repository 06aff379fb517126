//! Failure kinds of a seeding run.

use sqlx::error::ErrorKind;
use thiserror::Error;

use stays::Role;
use stays::auth::AuthError;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Database connection error: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("Constraint violation on {table}: {source}")]
    Constraint {
        table: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("Database error on {table}: {source}")]
    Database {
        table: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("No {role} users available for {stage}")]
    MissingRole { role: Role, stage: &'static str },

    #[error("No properties available for {stage}")]
    NoProperties { stage: &'static str },

    #[error("Messages need at least two users, found {found}")]
    NotEnoughUsers { found: usize },

    #[error("Could not generate a unique email after {attempts} attempts")]
    EmailExhausted { attempts: usize },

    #[error(transparent)]
    PasswordHash(#[from] AuthError),
}

impl SeedError {
    /// Classifies a failed statement against `table`.
    pub(crate) fn from_insert(table: &'static str, err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) => match db_err.kind() {
                ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => SeedError::Constraint { table, source: err },
                _ => SeedError::Database { table, source: err },
            },
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => SeedError::Connection(err),
            _ => SeedError::Database { table, source: err },
        }
    }

    /// True when the database could not be reached or the session was lost.
    pub fn is_connection(&self) -> bool {
        matches!(self, SeedError::Connection(_))
    }

    /// True when a stage could not run because an earlier stage produced no
    /// usable rows to reference.
    pub fn is_missing_prerequisite(&self) -> bool {
        matches!(
            self,
            SeedError::MissingRole { .. }
                | SeedError::NoProperties { .. }
                | SeedError::NotEnoughUsers { .. }
        )
    }
}
