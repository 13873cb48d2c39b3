//! Usage rating engine.
//!
//! Converts a billing period's aggregated metered usage into a monetary fee
//! amount according to a charge's pricing model: standard, percentage,
//! package, graduated, graduated-percentage, volume, prorated-graduated,
//! time-based, dynamic, custom, and the stateful package-group family that
//! shares one package counter across sibling charges.
//!
//! Event ingestion, per-metric aggregation, invoice assembly, taxes and
//! payments are external collaborators; this crate consumes an
//! [`models::AggregationResult`] and a [`models::ChargeConfiguration`] and
//! produces a [`models::RatingResult`] for the invoice assembler.

pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::RatingConfig;
pub use error::RatingError;
pub use services::{InMemoryPackageGroupStore, PackageGroupStore, RatingService};
