//! Integration tests for seeding a MySQL database.
//!
//! These tests verify end-to-end functionality including:
//! - Exact row counts for a full run
//! - Role constraints on every foreign key
//! - Stage-level commit behavior when a stage cannot run
//! - Seeded re-runs inserting a disjoint dataset
//!
//! To run these tests, you need:
//! 1. A MySQL database the user may create tables in
//! 2. DATABASE_URL environment variable set
//!
//! Run with: `DATABASE_URL=mysql://root:pw@localhost/airbnb_clone cargo test -p seed-data --test seed_integration`
//!
//! Note: These tests only count and delete rows whose ids they generated,
//! so they can safely run against a development database.

use std::env;

use rand::SeedableRng;
use rand::rngs::StdRng;
use seed_data::prelude::*;
use sqlx::{Connection, MySqlConnection};
use uuid::Uuid;

const SCHEMA: &str = include_str!("fixtures/schema.sql");

/// Get a seeder with the schema applied, skipping tests if DATABASE_URL is not set.
async fn get_test_seeder() -> Option<Seeder> {
    let database_url = match env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("Skipping test: DATABASE_URL not set");
            return None;
        }
    };

    let mut conn = match MySqlConnection::connect(&database_url).await {
        Ok(conn) => conn,
        Err(e) => {
            eprintln!("Skipping test: Failed to connect to database: {e}");
            return None;
        }
    };

    sqlx::raw_sql(SCHEMA)
        .execute(&mut conn)
        .await
        .expect("Failed to apply fixture schema");

    Some(Seeder::new(conn))
}

fn guests_and_hosts() -> UserGenConfig {
    UserGenConfig {
        roles: vec![Role::Guest, Role::Host],
        ..Default::default()
    }
}

/// A tag no earlier run has used, so a test can find exactly its own users.
fn unique_tag() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Ids of the users whose emails carry `tag`.
async fn user_ids_tagged(conn: &mut MySqlConnection, tag: &str) -> Vec<Uuid> {
    sqlx::query_scalar::<_, String>("SELECT user_id FROM `User` WHERE email LIKE ?")
        .bind(format!("%+{tag}@%"))
        .fetch_all(conn)
        .await
        .expect("user lookup failed")
        .iter()
        .map(|id| Uuid::parse_str(id).expect("stored id is a uuid"))
        .collect()
}

/// Counts rows of `table` whose `column` is one of `ids`, with an optional extra condition.
async fn count_in(
    conn: &mut MySqlConnection,
    table: &str,
    column: &str,
    ids: &[Uuid],
    extra: &str,
) -> i64 {
    if ids.is_empty() {
        return 0;
    }

    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!("SELECT COUNT(*) FROM `{table}` WHERE {column} IN ({placeholders}) {extra}");
    let mut query = sqlx::query_scalar::<_, i64>(&sql);
    for id in ids {
        query = query.bind(id.hyphenated());
    }
    query.fetch_one(conn).await.expect("count query failed")
}

/// Cleanup helper to remove rows created by a run.
async fn cleanup(conn: &mut MySqlConnection, user_ids: &[Uuid]) {
    if user_ids.is_empty() {
        return;
    }
    let placeholders = vec!["?"; user_ids.len()].join(", ");

    // Delete in order due to foreign key constraints
    let statements = [
        format!(
            "DELETE FROM `Payment` WHERE booking_id IN (SELECT booking_id FROM `Booking` WHERE user_id IN ({placeholders}))"
        ),
        format!("DELETE FROM `Review` WHERE user_id IN ({placeholders})"),
        format!("DELETE FROM `Booking` WHERE user_id IN ({placeholders})"),
        format!("DELETE FROM `Message` WHERE sender_id IN ({placeholders})"),
        format!(
            "DELETE FROM `Review` WHERE property_id IN (SELECT property_id FROM `Property` WHERE host_id IN ({placeholders}))"
        ),
        format!(
            "DELETE FROM `Payment` WHERE booking_id IN (SELECT b.booking_id FROM `Booking` b JOIN `Property` p ON b.property_id = p.property_id WHERE p.host_id IN ({placeholders}))"
        ),
        format!(
            "DELETE FROM `Booking` WHERE property_id IN (SELECT property_id FROM `Property` WHERE host_id IN ({placeholders}))"
        ),
        format!("DELETE FROM `Property` WHERE host_id IN ({placeholders})"),
        format!("DELETE FROM `Message` WHERE recipient_id IN ({placeholders})"),
        format!("DELETE FROM `User` WHERE user_id IN ({placeholders})"),
    ];

    for sql in &statements {
        let mut query = sqlx::query(sql);
        for id in user_ids {
            query = query.bind(id.hyphenated());
        }
        query.execute(&mut *conn).await.expect("cleanup failed");
    }
}

#[tokio::test]
async fn test_full_run_row_counts() {
    let Some(mut seeder) = get_test_seeder().await else {
        return;
    };
    let mut rng = StdRng::seed_from_u64(1001);

    let result = SeedPipeline::new()
        .with_users(10)
        .with_properties(5)
        .with_bookings(8)
        .with_reviews(5)
        .with_messages(10)
        .with_user_config(guests_and_hosts())
        .build(&mut seeder, OffsetDateTime::now_utc(), &mut rng)
        .await
        .expect("seed run failed");

    let user_ids: Vec<Uuid> = result.users.iter().map(|u| u.id).collect();
    let property_ids: Vec<Uuid> = result.properties.iter().map(|p| p.id).collect();
    let booking_ids: Vec<Uuid> = result.bookings.iter().map(|b| b.id).collect();
    let payment_ids: Vec<Uuid> = result.payments.iter().map(|p| p.id).collect();
    let review_ids: Vec<Uuid> = result.reviews.iter().map(|r| r.id).collect();
    let message_ids: Vec<Uuid> = result.messages.iter().map(|m| m.id).collect();

    let conn = seeder.connection();
    assert_eq!(count_in(conn, "User", "user_id", &user_ids, "").await, 10);
    assert_eq!(count_in(conn, "Property", "property_id", &property_ids, "").await, 5);
    assert_eq!(count_in(conn, "Booking", "booking_id", &booking_ids, "").await, 8);
    assert_eq!(count_in(conn, "Review", "review_id", &review_ids, "").await, 5);
    assert_eq!(count_in(conn, "Message", "message_id", &message_ids, "").await, 10);

    let payments = count_in(conn, "Payment", "payment_id", &payment_ids, "").await;
    assert_eq!(payments, result.payments.len() as i64);
    assert!(payments <= 8);
    let paid_bookings = count_in(
        conn,
        "Booking",
        "booking_id",
        &result.payments.iter().map(|p| p.booking_id).collect::<Vec<_>>(),
        "",
    )
    .await;
    assert_eq!(paid_bookings, payments, "payments must reference distinct bookings");

    // Role constraints, checked against what the database holds
    let hosted = count_in(
        conn,
        "Property",
        "property_id",
        &property_ids,
        "AND host_id IN (SELECT user_id FROM `User` WHERE role = 'host')",
    )
    .await;
    assert_eq!(hosted, 5);

    let guest_bookings = count_in(
        conn,
        "Booking",
        "booking_id",
        &booking_ids,
        "AND user_id IN (SELECT user_id FROM `User` WHERE role = 'guest') \
         AND DATEDIFF(end_date, start_date) BETWEEN 1 AND 14",
    )
    .await;
    assert_eq!(guest_bookings, 8);

    let guest_reviews = count_in(
        conn,
        "Review",
        "review_id",
        &review_ids,
        "AND user_id IN (SELECT user_id FROM `User` WHERE role = 'guest')",
    )
    .await;
    assert_eq!(guest_reviews, 5);

    let distinct_parties = count_in(
        conn,
        "Message",
        "message_id",
        &message_ids,
        "AND sender_id <> recipient_id",
    )
    .await;
    assert_eq!(distinct_parties, 10);

    let ordered_updates = count_in(
        conn,
        "Property",
        "property_id",
        &property_ids,
        "AND updated_at >= created_at",
    )
    .await;
    assert_eq!(ordered_updates, 5);

    cleanup(conn, &user_ids).await;
    seeder.close().await.expect("close failed");
}

#[tokio::test]
async fn test_seeded_rerun_inserts_disjoint_rows() {
    let Some(mut seeder) = get_test_seeder().await else {
        return;
    };
    let pipeline = SeedPipeline::marketplace()
        .with_properties(2)
        .with_bookings(2)
        .with_reviews(2)
        .with_messages(2)
        .with_seed(42);
    let mut rng = StdRng::from_entropy();

    let first = pipeline
        .build(&mut seeder, OffsetDateTime::now_utc(), &mut rng)
        .await
        .expect("first seeded run failed");
    let second = pipeline
        .build(&mut seeder, OffsetDateTime::now_utc(), &mut rng)
        .await
        .expect("second seeded run must not clash with the first");

    let mut user_ids: Vec<Uuid> = first.users.iter().map(|u| u.id).collect();
    user_ids.extend(second.users.iter().map(|u| u.id));

    let conn = seeder.connection();
    assert_eq!(count_in(conn, "User", "user_id", &user_ids, "").await, 80);

    cleanup(conn, &user_ids).await;
}

#[tokio::test]
async fn test_no_hosts_stops_before_properties() {
    let Some(mut seeder) = get_test_seeder().await else {
        return;
    };
    let mut rng = StdRng::seed_from_u64(1002);

    let tag = unique_tag();
    let pipeline = SeedPipeline::new().with_user_config(UserGenConfig {
        roles: vec![Role::Guest, Role::Admin],
        email_tag: Some(tag.clone()),
        ..Default::default()
    });

    let err = pipeline
        .build(&mut seeder, OffsetDateTime::now_utc(), &mut rng)
        .await
        .expect_err("run without hosts must fail");
    assert!(matches!(
        err,
        SeedError::MissingRole {
            role: Role::Host,
            stage: "properties"
        }
    ));

    let conn = seeder.connection();
    let user_ids = user_ids_tagged(conn, &tag).await;

    // The user stage committed, the property stage inserted nothing
    assert_eq!(user_ids.len(), 10);
    assert_eq!(count_in(conn, "Property", "host_id", &user_ids, "").await, 0);

    cleanup(conn, &user_ids).await;
}

#[tokio::test]
async fn test_single_user_fails_at_messages() {
    let Some(mut seeder) = get_test_seeder().await else {
        return;
    };
    let mut rng = StdRng::seed_from_u64(1003);
    let tag = unique_tag();

    let err = SeedPipeline::new()
        .with_user_config(UserGenConfig {
            email_tag: Some(tag.clone()),
            ..Default::default()
        })
        .with_users(1)
        .with_properties(0)
        .with_bookings(0)
        .with_reviews(0)
        .with_messages(10)
        .build(&mut seeder, OffsetDateTime::now_utc(), &mut rng)
        .await
        .expect_err("a lone user cannot message anyone");
    assert!(matches!(err, SeedError::NotEnoughUsers { found: 1 }));

    let conn = seeder.connection();
    let user_ids = user_ids_tagged(conn, &tag).await;
    assert_eq!(user_ids.len(), 1, "the user stage should have committed");
    let user_id = user_ids[0];

    assert_eq!(count_in(conn, "Message", "sender_id", &[user_id], "").await, 0);

    cleanup(conn, &[user_id]).await;
}

#[tokio::test]
async fn test_unreachable_database_is_a_connection_error() {
    let config = ConnectionConfig::new("127.0.0.1", "root", "", "airbnb_clone").with_port(1);

    match Seeder::connect(&config).await {
        Err(err) => assert!(err.is_connection(), "unexpected error: {err}"),
        Ok(_) => panic!("port 1 should refuse connections"),
    }
}

#[tokio::test]
async fn test_invalid_config_never_connects() {
    let config = ConnectionConfig::new("", "root", "", "airbnb_clone");

    match Seeder::connect(&config).await {
        Err(SeedError::InvalidConfig(_)) => {}
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("blank host must be rejected"),
    }
}
