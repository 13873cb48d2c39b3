//! Dynamic pricing model.

use rust_decimal::Decimal;

use super::{per_unit, ChargeModel};
use crate::error::RatingError;
use crate::models::{AggregationResult, ChargeConfiguration, ChargeProperties, RatingResult};

/// Pass-through for amounts precomputed by the aggregation step in minor
/// currency units; this model only re-expresses them in major units.
pub struct DynamicChargeModel {
    subunit_factor: Decimal,
}

impl DynamicChargeModel {
    pub fn new(subunit_factor: Decimal) -> Self {
        Self { subunit_factor }
    }
}

impl ChargeModel for DynamicChargeModel {
    fn apply(
        &self,
        _charge: &ChargeConfiguration,
        aggregation: &AggregationResult,
        _properties: &ChargeProperties,
    ) -> Result<RatingResult, RatingError> {
        let cents = aggregation
            .precise_total_amount_cents
            .unwrap_or(Decimal::ZERO);

        let amount = if self.subunit_factor <= Decimal::ZERO {
            Decimal::ZERO
        } else {
            cents / self.subunit_factor
        };

        let mut result = RatingResult::from_aggregation(aggregation);
        result.amount = amount;
        result.unit_amount = per_unit(amount, aggregation.units);
        Ok(result)
    }
}
