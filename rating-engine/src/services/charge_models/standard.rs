//! Standard (flat per-unit) pricing model.

use rust_decimal::Decimal;

use super::{per_unit, ChargeModel};
use crate::error::RatingError;
use crate::models::{AggregationResult, ChargeConfiguration, ChargeProperties, RatingResult};

/// `amount = trunc(units * amount_per_unit)`. Truncation toward zero is the
/// historical behavior of this model; the other models keep full decimal
/// precision.
pub struct StandardChargeModel;

impl ChargeModel for StandardChargeModel {
    fn apply(
        &self,
        _charge: &ChargeConfiguration,
        aggregation: &AggregationResult,
        properties: &ChargeProperties,
    ) -> Result<RatingResult, RatingError> {
        let amount_per_unit = properties
            .amount_per_unit
            .ok_or(RatingError::MissingProperties("amount_per_unit"))?;

        let amount = (aggregation.units * amount_per_unit).trunc().max(Decimal::ZERO);

        let mut result = RatingResult::from_aggregation(aggregation);
        result.amount = amount;
        result.unit_amount = per_unit(amount, aggregation.units);
        Ok(result)
    }
}
