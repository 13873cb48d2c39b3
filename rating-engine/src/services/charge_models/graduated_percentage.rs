//! Graduated-percentage pricing model.

use rust_decimal::Decimal;

use super::{per_unit, ranges, ChargeModel};
use crate::error::RatingError;
use crate::models::{AggregationResult, ChargeConfiguration, ChargeProperties, RatingResult};

/// Same tier walk as the graduated model, but each tier contributes its
/// percentage rate applied to the tier's unit share plus the tier flat
/// amount. The amount breakdown for this model is not yet defined.
pub struct GraduatedPercentageChargeModel;

impl ChargeModel for GraduatedPercentageChargeModel {
    fn apply(
        &self,
        _charge: &ChargeConfiguration,
        aggregation: &AggregationResult,
        properties: &ChargeProperties,
    ) -> Result<RatingResult, RatingError> {
        let total = aggregation.units;
        let mut amount = Decimal::ZERO;

        for tier in &properties.tiers {
            amount += ranges::percentage_contribution(tier, total);
            match tier.to_value {
                Some(to) if total > to => {}
                _ => break,
            }
        }

        let denominator = aggregation.full_units_number.unwrap_or(aggregation.units);
        let mut result = RatingResult::from_aggregation(aggregation);
        result.amount = amount;
        result.unit_amount = per_unit(amount, denominator);
        Ok(result)
    }
}
