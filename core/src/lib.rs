//! Core library for the weigh weight tracker.
//!
//! Owns the record store (one SQLite row per calendar day), conversion
//! between the canonical kilogram storage unit and display units, and the
//! metrics derived at read time (BMI classification, trend delta).
//! Front-ends talk to [`service::WeighService`] and own all presentation
//! concerns.

pub mod db;
pub mod error;
pub mod metrics;
pub mod models;
pub mod service;
pub mod units;

pub use error::{CoreError, Result};
