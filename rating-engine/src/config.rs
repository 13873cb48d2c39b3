//! Rating engine configuration.

use rust_decimal::Decimal;

/// Engine-level configuration, loaded from the environment with defaults.
#[derive(Debug, Clone)]
pub struct RatingConfig {
    /// Attempts for the package-group optimistic read-modify-write loop
    /// before giving up with a contention error.
    pub max_state_retries: u32,
    /// Decimal exponent of the currency subunit (2 for cent-based
    /// currencies). Used by the dynamic model to re-express precomputed
    /// minor-unit amounts in major units.
    pub currency_exponent: u32,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            max_state_retries: 5,
            currency_exponent: 2,
        }
    }
}

impl RatingConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for unset or unparsable values.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_state_retries: std::env::var("RATING_MAX_STATE_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_state_retries),
            currency_exponent: std::env::var("RATING_CURRENCY_EXPONENT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.currency_exponent),
        }
    }

    /// Minor units per major currency unit, e.g. 100 for USD.
    pub fn currency_subunit_factor(&self) -> Decimal {
        Decimal::from(10u64.pow(self.currency_exponent))
    }
}
