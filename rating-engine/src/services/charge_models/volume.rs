//! Volume pricing model.

use rust_decimal::Decimal;

use super::{per_unit, ChargeModel};
use crate::error::RatingError;
use crate::models::{
    AggregationResult, AmountDetails, ChargeConfiguration, ChargeProperties, RatingResult, Tier,
};

/// Prices the whole unit count with the single tier containing it. The
/// first tier matches `from <= n <= to`; every later tier matches
/// `(from - 1) < n <= to`. The asymmetric lower bound keeps fractional
/// counts just above a boundary in the higher tier.
pub struct VolumeChargeModel;

impl VolumeChargeModel {
    fn matching_tier(tiers: &[Tier], n: Decimal) -> Option<&Tier> {
        tiers.iter().enumerate().find_map(|(index, tier)| {
            let lower_ok = if index == 0 {
                tier.from_value <= n
            } else {
                tier.from_value - Decimal::ONE < n
            };
            let upper_ok = match tier.to_value {
                Some(to) => n <= to,
                None => true,
            };
            (lower_ok && upper_ok).then_some(tier)
        })
    }
}

impl ChargeModel for VolumeChargeModel {
    fn apply(
        &self,
        charge: &ChargeConfiguration,
        aggregation: &AggregationResult,
        properties: &ChargeProperties,
    ) -> Result<RatingResult, RatingError> {
        // Prorated charges are tiered on the non-prorated total.
        let n = if charge.prorated {
            aggregation.full_units_number.unwrap_or(aggregation.units)
        } else {
            aggregation.units
        };

        let mut result = RatingResult::from_aggregation(aggregation);
        if n.is_zero() {
            return Ok(result);
        }

        let tier = Self::matching_tier(&properties.tiers, n)
            .ok_or(RatingError::NoMatchingTier { units: n })?;

        let per_unit_total_amount = n * tier.per_unit_amount;
        let amount = per_unit_total_amount + tier.flat_amount;

        result.amount = amount;
        result.unit_amount = per_unit(amount, n);
        result.amount_details = AmountDetails::Volume {
            flat_unit_amount: tier.flat_amount,
            per_unit_amount: tier.per_unit_amount,
            per_unit_total_amount,
        };
        Ok(result)
    }
}
