//! Entity generators for sample data.
//!
//! Each generator takes the rows of the stages it depends on and returns its
//! own rows:
//! - [`UserGenerator`]: users with roles and unique emails
//! - [`PropertyGenerator`]: listings owned by hosts
//! - [`BookingGenerator`]: stays booked by guests
//! - [`PaymentGenerator`]: at most one payment per booking
//! - [`ReviewGenerator`]: property reviews by guests
//! - [`MessageGenerator`]: messages between distinct users

pub mod booking;
pub mod message;
pub mod payment;
pub mod property;
pub mod review;
pub mod sampling;
pub mod user;

pub use booking::{BookingGenConfig, BookingGenerator, GeneratedBooking};
pub use message::{GeneratedMessage, MessageGenConfig, MessageGenerator};
pub use payment::{GeneratedPayment, PaymentGenConfig, PaymentGenerator};
pub use property::{GeneratedProperty, PropertyGenConfig, PropertyGenerator};
pub use review::{GeneratedReview, ReviewGenConfig, ReviewGenerator};
pub use user::{GeneratedUser, UserGenConfig, UserGenerator};
