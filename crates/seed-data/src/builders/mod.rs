//! Builders for composing seeding runs.

mod pipeline;

pub use pipeline::{SeedMetrics, SeedPipeline, SeedResult, SeedSummary};
