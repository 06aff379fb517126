//! Database integration for seeding sample data.
//!
//! The [`Seeder`] owns the single connection of a run and inserts each
//! stage's rows in a transaction of its own.

mod seeder;

pub use seeder::Seeder;
