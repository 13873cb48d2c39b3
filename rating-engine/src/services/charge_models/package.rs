//! Package pricing model.

use rust_decimal::Decimal;

use super::{per_unit, ChargeModel};
use crate::error::RatingError;
use crate::models::{
    AggregationResult, AmountDetails, ChargeConfiguration, ChargeProperties, RatingResult,
};

/// Bills whole packages: `ceil(paid_units / package_size)` packages at the
/// configured per-package amount. Units covered by the free allotment cost
/// nothing; a partially consumed package is billed in full.
pub struct PackageChargeModel;

impl ChargeModel for PackageChargeModel {
    fn apply(
        &self,
        _charge: &ChargeConfiguration,
        aggregation: &AggregationResult,
        properties: &ChargeProperties,
    ) -> Result<RatingResult, RatingError> {
        let package_size = properties
            .package_size
            .ok_or(RatingError::MissingProperties("package_size"))?;
        let per_package_unit_amount = properties
            .per_package_unit_amount
            .ok_or(RatingError::MissingProperties("per_package_unit_amount"))?;
        let free_units = properties.free_units.unwrap_or(Decimal::ZERO);

        let paid_units = aggregation.units - free_units;
        let mut result = RatingResult::from_aggregation(aggregation);
        result.amount_details = AmountDetails::Package {
            free_units,
            paid_units: paid_units.max(Decimal::ZERO),
            per_package_size: package_size,
            per_package_unit_amount,
        };

        if paid_units <= Decimal::ZERO || package_size <= Decimal::ZERO {
            return Ok(result);
        }

        let package_count = (paid_units / package_size).ceil();
        let amount = package_count * per_package_unit_amount;

        result.amount = amount;
        result.unit_amount = per_unit(amount, paid_units);
        Ok(result)
    }
}
