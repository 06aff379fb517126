//! Domain vocabulary shared by the stays booking platform and its tooling.

pub mod auth;
pub mod models;

pub use models::{BookingStatus, ParseEnumError, PaymentMethod, Role};
