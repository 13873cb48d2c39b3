//! Percentage pricing model.

use rust_decimal::Decimal;

use super::{per_unit, ChargeModel};
use crate::error::RatingError;
use crate::models::{
    AggregationResult, AmountDetails, ChargeConfiguration, ChargeProperties, RatingResult,
};

/// `amount = units * rate / 100 + fixed_portion`.
///
/// The fixed portion multiplies the configured fixed amount by the unit
/// value, not by the event count. That is the observed historical behavior
/// and is kept as-is pending product confirmation.
pub struct PercentageChargeModel;

impl ChargeModel for PercentageChargeModel {
    fn apply(
        &self,
        _charge: &ChargeConfiguration,
        aggregation: &AggregationResult,
        properties: &ChargeProperties,
    ) -> Result<RatingResult, RatingError> {
        let rate = properties
            .rate
            .ok_or(RatingError::MissingProperties("rate"))?;

        let units = aggregation.units;
        let fixed_portion = match properties.fixed_amount {
            Some(fixed) if !units.is_zero() => units * fixed,
            _ => Decimal::ZERO,
        };
        let amount = units * rate / Decimal::ONE_HUNDRED + fixed_portion;

        let mut result = RatingResult::from_aggregation(aggregation);
        result.amount = amount;
        result.unit_amount = per_unit(amount, units);
        result.amount_details = AmountDetails::Percentage {
            rate,
            fixed_fee_total_amount: fixed_portion,
            units,
        };
        Ok(result)
    }
}
