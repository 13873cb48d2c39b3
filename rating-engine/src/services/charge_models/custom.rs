//! Custom pricing model.

use rust_decimal::Decimal;

use super::{per_unit, ChargeModel};
use crate::error::RatingError;
use crate::models::{AggregationResult, ChargeConfiguration, ChargeProperties, RatingResult};

/// Fully externally computed: the amount comes from the aggregation's
/// custom result, or zero when absent.
pub struct CustomChargeModel;

impl ChargeModel for CustomChargeModel {
    fn apply(
        &self,
        _charge: &ChargeConfiguration,
        aggregation: &AggregationResult,
        _properties: &ChargeProperties,
    ) -> Result<RatingResult, RatingError> {
        let amount = aggregation
            .custom_aggregation
            .as_ref()
            .map(|custom| custom.amount)
            .unwrap_or(Decimal::ZERO);

        let mut result = RatingResult::from_aggregation(aggregation);
        result.amount = amount;
        result.unit_amount = per_unit(amount, aggregation.units);
        Ok(result)
    }
}
