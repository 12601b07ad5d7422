//! Fare aggregate
//!
//! Hourly rates per parking type and the recurring-user discount.

pub mod model;

pub use model::FareRates;
