//! Time-based pricing model.

use rust_decimal::Decimal;

use super::{per_unit, ChargeModel};
use crate::error::RatingError;
use crate::models::{AggregationResult, ChargeConfiguration, ChargeProperties, RatingResult};

/// Bills whole time blocks: units are duration units, and every started
/// block of `block_duration` units is billed at `amount_per_block`.
pub struct TimeBasedChargeModel;

impl ChargeModel for TimeBasedChargeModel {
    fn apply(
        &self,
        _charge: &ChargeConfiguration,
        aggregation: &AggregationResult,
        properties: &ChargeProperties,
    ) -> Result<RatingResult, RatingError> {
        let block_duration = properties
            .block_duration
            .ok_or(RatingError::MissingProperties("block_duration"))?;
        let amount_per_block = properties
            .amount_per_block
            .ok_or(RatingError::MissingProperties("amount_per_block"))?;

        let units = aggregation.units;
        let mut result = RatingResult::from_aggregation(aggregation);

        if units <= Decimal::ZERO || block_duration <= Decimal::ZERO {
            return Ok(result);
        }

        let blocks = (units / block_duration).ceil();
        let amount = blocks * amount_per_block;

        result.amount = amount;
        result.unit_amount = per_unit(amount, units);
        Ok(result)
    }
}
