//! Error types for the rating engine.
//!
//! Configuration errors are fatal and surfaced to the caller; arithmetic
//! edge cases (zero or negative denominators, zero units) are handled
//! in-line by each pricing model and never raise.

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RatingError {
    #[error("Unknown pricing model: {0}")]
    UnknownPricingModel(String),

    #[error("Missing charge property: {0}")]
    MissingProperties(&'static str),

    #[error("No tier matches {units} units")]
    NoMatchingTier { units: Decimal },

    #[error("Invalid charge configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Event unit sequences differ in length: {full} full vs {prorated} prorated")]
    MismatchedEventSequences { full: usize, prorated: usize },

    #[error("Package group state was modified concurrently")]
    StateVersionConflict,

    #[error("Package group state contention persisted after {attempts} attempts")]
    StateContention { attempts: u32 },

    #[error("Package group store error: {0}")]
    Store(#[from] anyhow::Error),
}
