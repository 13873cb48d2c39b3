//! Graduated (tiered) pricing model.

use rust_decimal::Decimal;

use super::{per_unit, ranges, ChargeModel};
use crate::error::RatingError;
use crate::models::{
    AggregationResult, AmountDetails, ChargeConfiguration, ChargeProperties, GraduatedRangeDetail,
    RatingResult,
};

/// Walks tiers in ascending order, accumulating each tier's flat-plus-
/// per-unit contribution for the portion of total units that falls in it,
/// and stops at the tier containing the total.
pub struct GraduatedChargeModel;

impl ChargeModel for GraduatedChargeModel {
    fn apply(
        &self,
        _charge: &ChargeConfiguration,
        aggregation: &AggregationResult,
        properties: &ChargeProperties,
    ) -> Result<RatingResult, RatingError> {
        let total = aggregation.units;
        let mut amount = Decimal::ZERO;
        let mut graduated_ranges = Vec::new();

        for tier in &properties.tiers {
            let units = ranges::units_in_tier(tier, total);
            if units > Decimal::ZERO {
                let contribution = tier.flat_amount + units * tier.per_unit_amount;
                amount += contribution;
                graduated_ranges.push(GraduatedRangeDetail {
                    from_value: tier.from_value,
                    to_value: tier.to_value,
                    units,
                    flat_unit_amount: tier.flat_amount,
                    per_unit_amount: tier.per_unit_amount,
                    total_with_flat_amount: contribution,
                });
            }
            match tier.to_value {
                Some(to) if total > to => {}
                _ => break,
            }
        }

        let denominator = aggregation.full_units_number.unwrap_or(aggregation.units);
        let mut result = RatingResult::from_aggregation(aggregation);
        result.amount = amount;
        result.unit_amount = per_unit(amount, denominator);
        result.amount_details = AmountDetails::Graduated { graduated_ranges };
        Ok(result)
    }
}
