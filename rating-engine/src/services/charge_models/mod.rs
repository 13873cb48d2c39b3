//! Pricing model strategies.
//!
//! One pure strategy per pricing model, all behind the [`ChargeModel`]
//! trait. Strategies never mutate their inputs and hold no state; given
//! identical inputs they return identical results. The stateful
//! package-group family lives in `services::package_group` instead.

mod custom;
mod dynamic;
mod graduated;
mod graduated_percentage;
mod package;
mod percentage;
mod prorated_graduated;
pub mod ranges;
mod standard;
mod time_based;
mod volume;

pub use custom::CustomChargeModel;
pub use dynamic::DynamicChargeModel;
pub use graduated::GraduatedChargeModel;
pub use graduated_percentage::GraduatedPercentageChargeModel;
pub use package::PackageChargeModel;
pub use percentage::PercentageChargeModel;
pub use prorated_graduated::ProratedGraduatedChargeModel;
pub use standard::StandardChargeModel;
pub use time_based::TimeBasedChargeModel;
pub use volume::VolumeChargeModel;

use rust_decimal::Decimal;

use crate::error::RatingError;
use crate::models::{AggregationResult, ChargeConfiguration, ChargeProperties, RatingResult};

/// Common rating contract. Copies the quantity fields straight from the
/// aggregation input into the result, then fills `amount` and `unit_amount`
/// with model-specific logic.
pub trait ChargeModel {
    fn apply(
        &self,
        charge: &ChargeConfiguration,
        aggregation: &AggregationResult,
        properties: &ChargeProperties,
    ) -> Result<RatingResult, RatingError>;
}

/// `amount / denominator`, or zero when the denominator is zero or negative.
pub(crate) fn per_unit(amount: Decimal, denominator: Decimal) -> Decimal {
    if denominator <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        amount / denominator
    }
}
