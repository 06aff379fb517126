//! Database seeding utilities.

use sqlx::{Connection, MySqlConnection};
use tracing::info;

use crate::config::ConnectionConfig;
use crate::error::SeedError;
use crate::generators::{
    GeneratedBooking, GeneratedMessage, GeneratedPayment, GeneratedProperty, GeneratedReview,
    GeneratedUser,
};

/// Inserts generated rows over a single connection.
///
/// Every `seed_*` call runs in its own transaction and commits before
/// returning. A failed call leaves earlier calls committed and rolls back its
/// own partial inserts.
pub struct Seeder {
    conn: MySqlConnection,
}

impl Seeder {
    /// Wraps an already open connection.
    pub fn new(conn: MySqlConnection) -> Self {
        Self { conn }
    }

    /// Opens the connection described by `config`.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self, SeedError> {
        let options = config.connect_options()?;
        let conn = MySqlConnection::connect_with(&options)
            .await
            .map_err(SeedError::Connection)?;

        info!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            "Connected to database"
        );
        Ok(Self::new(conn))
    }

    /// Seeds users into the database.
    pub async fn seed_users(&mut self, users: &[GeneratedUser]) -> Result<(), SeedError> {
        info!("Seeding {} users...", users.len());

        let mut tx = self.conn.begin().await.map_err(SeedError::Connection)?;
        for user in users {
            sqlx::query(
                r#"
                INSERT INTO `User` (user_id, first_name, last_name, email, password_hash, phone_number, role, created_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(user.id.hyphenated())
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.phone_number)
            .bind(user.role.as_str())
            .bind(user.created_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| SeedError::from_insert("User", e))?;
        }
        tx.commit().await.map_err(SeedError::Connection)?;

        info!("Seeded {} users", users.len());
        Ok(())
    }

    /// Seeds properties into the database.
    pub async fn seed_properties(
        &mut self,
        properties: &[GeneratedProperty],
    ) -> Result<(), SeedError> {
        info!("Seeding {} properties...", properties.len());

        let mut tx = self.conn.begin().await.map_err(SeedError::Connection)?;
        for property in properties {
            sqlx::query(
                r#"
                INSERT INTO `Property` (property_id, host_id, name, description, location, pricepernight, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(property.id.hyphenated())
            .bind(property.host_id.hyphenated())
            .bind(&property.name)
            .bind(&property.description)
            .bind(&property.location)
            .bind(property.price_per_night)
            .bind(property.created_at)
            .bind(property.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| SeedError::from_insert("Property", e))?;
        }
        tx.commit().await.map_err(SeedError::Connection)?;

        info!("Seeded {} properties", properties.len());
        Ok(())
    }

    /// Seeds bookings into the database.
    pub async fn seed_bookings(&mut self, bookings: &[GeneratedBooking]) -> Result<(), SeedError> {
        info!("Seeding {} bookings...", bookings.len());

        let mut tx = self.conn.begin().await.map_err(SeedError::Connection)?;
        for booking in bookings {
            sqlx::query(
                r#"
                INSERT INTO `Booking` (booking_id, property_id, user_id, start_date, end_date, total_price, status, created_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(booking.id.hyphenated())
            .bind(booking.property_id.hyphenated())
            .bind(booking.user_id.hyphenated())
            .bind(booking.start_date)
            .bind(booking.end_date)
            .bind(booking.total_price)
            .bind(booking.status.as_str())
            .bind(booking.created_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| SeedError::from_insert("Booking", e))?;
        }
        tx.commit().await.map_err(SeedError::Connection)?;

        info!("Seeded {} bookings", bookings.len());
        Ok(())
    }

    /// Seeds payments into the database.
    pub async fn seed_payments(&mut self, payments: &[GeneratedPayment]) -> Result<(), SeedError> {
        info!("Seeding {} payments...", payments.len());

        let mut tx = self.conn.begin().await.map_err(SeedError::Connection)?;
        for payment in payments {
            sqlx::query(
                r#"
                INSERT INTO `Payment` (payment_id, booking_id, amount, payment_date, payment_method)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(payment.id.hyphenated())
            .bind(payment.booking_id.hyphenated())
            .bind(payment.amount)
            .bind(payment.payment_date)
            .bind(payment.method.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| SeedError::from_insert("Payment", e))?;
        }
        tx.commit().await.map_err(SeedError::Connection)?;

        info!("Seeded {} payments", payments.len());
        Ok(())
    }

    /// Seeds reviews into the database.
    pub async fn seed_reviews(&mut self, reviews: &[GeneratedReview]) -> Result<(), SeedError> {
        info!("Seeding {} reviews...", reviews.len());

        let mut tx = self.conn.begin().await.map_err(SeedError::Connection)?;
        for review in reviews {
            sqlx::query(
                r#"
                INSERT INTO `Review` (review_id, property_id, user_id, rating, comment, created_at)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(review.id.hyphenated())
            .bind(review.property_id.hyphenated())
            .bind(review.user_id.hyphenated())
            .bind(review.rating)
            .bind(&review.comment)
            .bind(review.created_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| SeedError::from_insert("Review", e))?;
        }
        tx.commit().await.map_err(SeedError::Connection)?;

        info!("Seeded {} reviews", reviews.len());
        Ok(())
    }

    /// Seeds messages into the database.
    pub async fn seed_messages(&mut self, messages: &[GeneratedMessage]) -> Result<(), SeedError> {
        info!("Seeding {} messages...", messages.len());

        let mut tx = self.conn.begin().await.map_err(SeedError::Connection)?;
        for message in messages {
            sqlx::query(
                r#"
                INSERT INTO `Message` (message_id, sender_id, recipient_id, message_body, sent_at)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(message.id.hyphenated())
            .bind(message.sender_id.hyphenated())
            .bind(message.recipient_id.hyphenated())
            .bind(&message.body)
            .bind(message.sent_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| SeedError::from_insert("Message", e))?;
        }
        tx.commit().await.map_err(SeedError::Connection)?;

        info!("Seeded {} messages", messages.len());
        Ok(())
    }

    /// Returns the connection for verification queries.
    pub fn connection(&mut self) -> &mut MySqlConnection {
        &mut self.conn
    }

    /// Closes the connection, waiting for the server to acknowledge.
    pub async fn close(self) -> Result<(), SeedError> {
        self.conn.close().await.map_err(SeedError::Connection)
    }
}
