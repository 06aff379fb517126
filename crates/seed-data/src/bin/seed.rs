//! Default seed script - fills the booking schema with sample data
//!
//! Run with:
//! ```
//! cargo run -p seed-data --bin seed -- --host localhost --user root --database airbnb_clone
//! ```

use anyhow::Context;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use seed_data::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "seed")]
#[command(about = "Insert sample users, properties, bookings, payments, reviews and messages")]
struct Cli {
    /// Database host
    #[arg(long, env = "SEED_DB_HOST", default_value = "localhost")]
    host: String,

    /// Database port
    #[arg(long, env = "SEED_DB_PORT", default_value_t = ConnectionConfig::DEFAULT_PORT)]
    port: u16,

    /// Database user
    #[arg(long, env = "SEED_DB_USER", default_value = "root")]
    user: String,

    /// Database password
    #[arg(long, env = "SEED_DB_PASSWORD", default_value = "", hide_env_values = true)]
    password: String,

    /// Target database name
    #[arg(long, env = "SEED_DB_NAME", default_value = "airbnb_clone")]
    database: String,

    /// Number of users to generate
    #[arg(long, default_value_t = 10)]
    users: usize,

    /// Number of properties to generate
    #[arg(long, default_value_t = 5)]
    properties: usize,

    /// Number of bookings to generate
    #[arg(long, default_value_t = 8)]
    bookings: usize,

    /// Number of reviews to generate
    #[arg(long, default_value_t = 5)]
    reviews: usize,

    /// Number of messages to generate
    #[arg(long, default_value_t = 10)]
    messages: usize,

    /// Probability that a booking gets a payment
    #[arg(long, default_value_t = 0.5)]
    payment_fraction: f64,

    /// Roles to draw users from (comma separated)
    #[arg(long, value_delimiter = ',', default_value = "guest,host,admin")]
    roles: Vec<Role>,

    /// Seed for generated content (ids and email tags are always fresh)
    #[arg(long)]
    seed: Option<u64>,

    /// Generate rows without connecting to the database
    #[arg(long)]
    dry_run: bool,

    /// Print the row counts as JSON instead of the success message
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn connection(&self) -> ConnectionConfig {
        ConnectionConfig::new(&self.host, &self.user, &self.password, &self.database)
            .with_port(self.port)
    }

    fn seed_config(&self) -> SeedConfig {
        SeedConfig {
            user_count: self.users,
            property_count: self.properties,
            booking_count: self.bookings,
            review_count: self.reviews,
            message_count: self.messages,
            payment_coverage: PaymentCoverage::Sparse {
                fraction: self.payment_fraction,
            },
            seed: self.seed,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.seed_config();
    config.validate()?;

    // Only used without --seed; a seeded config drives its own RNG
    let mut rng = StdRng::from_entropy();

    let pipeline = SeedPipeline::from_config(config)
        .with_user_config(UserGenConfig {
            roles: cli.roles.clone(),
            ..Default::default()
        })
        .with_metrics(true);
    let now = OffsetDateTime::now_utc();

    let result = if cli.dry_run {
        tracing::info!("Dry run: generating without a database connection");
        pipeline.build_data(now, &mut rng)?
    } else {
        let connection = cli.connection();
        let mut seeder = Seeder::connect(&connection)
            .await
            .with_context(|| format!("connecting to {}:{}", connection.host, connection.port))?;

        let result = match pipeline.build(&mut seeder, now, &mut rng).await {
            Ok(result) => result,
            Err(e) => {
                if e.is_missing_prerequisite() {
                    tracing::error!("Earlier stages stay committed; adjust counts or --roles");
                }
                return Err(e.into());
            }
        };
        seeder.close().await?;
        result
    };

    let summary = result.summary();
    tracing::info!("Seed completed!");
    tracing::info!("  Users: {}", summary.users);
    tracing::info!("  Properties: {}", summary.properties);
    tracing::info!("  Bookings: {}", summary.bookings);
    tracing::info!("  Payments: {}", summary.payments);
    tracing::info!("  Reviews: {}", summary.reviews);
    tracing::info!("  Messages: {}", summary.messages);
    if let Some(metrics) = &result.metrics {
        tracing::info!(
            generation_ms = metrics.generation_time_ms,
            seeding_ms = metrics.seeding_time_ms,
            "Timings"
        );
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else if cli.dry_run {
        println!("Sample data generated (dry run, nothing inserted).");
    } else {
        println!("Sample data inserted successfully.");
    }

    Ok(())
}
