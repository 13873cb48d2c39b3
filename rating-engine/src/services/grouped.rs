//! Grouped adapter.
//!
//! Fan-out wrapper that re-applies a base pricing model independently per
//! usage sub-group. Groups share no state; this is distinct from the
//! package-group coordinator, which is keyed by charge group rather than
//! by usage-group key.

use rust_decimal::Decimal;

use crate::error::RatingError;
use crate::models::{AggregationResult, ChargeConfiguration, GroupedRatingResult, RatingResult};
use crate::services::charge_models::{per_unit, ChargeModel};

/// Apply `model` to each sub-aggregation, tagging every output with its
/// group key. The parent result sums the group amounts so the caller can
/// consume either granularity.
pub fn apply_grouped(
    model: &dyn ChargeModel,
    charge: &ChargeConfiguration,
    aggregation: &AggregationResult,
) -> Result<RatingResult, RatingError> {
    let mut grouped_results = Vec::with_capacity(aggregation.grouped_aggregations.len());
    let mut total_amount = Decimal::ZERO;

    for group in &aggregation.grouped_aggregations {
        let result = model.apply(charge, &group.aggregation, &charge.properties)?;
        total_amount += result.amount;
        grouped_results.push(GroupedRatingResult {
            group_key: group.group_key.clone(),
            result,
        });
    }

    let mut parent = RatingResult::from_aggregation(aggregation);
    parent.amount = total_amount;
    parent.unit_amount = per_unit(total_amount, aggregation.units);
    parent.grouped_results = grouped_results;
    Ok(parent)
}
