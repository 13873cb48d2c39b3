//! Rating result model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AggregationResult;

/// Per-tier slice of a graduated amount breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraduatedRangeDetail {
    pub from_value: Decimal,
    pub to_value: Option<Decimal>,
    pub units: Decimal,
    pub flat_unit_amount: Decimal,
    pub per_unit_amount: Decimal,
    pub total_with_flat_amount: Decimal,
}

/// Explanatory breakdown of how an amount was computed. `Empty` is used
/// where the pricing model defines no breakdown (or where it is not yet
/// defined for that model).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AmountDetails {
    #[default]
    Empty,
    Package {
        free_units: Decimal,
        paid_units: Decimal,
        per_package_size: Decimal,
        per_package_unit_amount: Decimal,
    },
    Percentage {
        rate: Decimal,
        fixed_fee_total_amount: Decimal,
        units: Decimal,
    },
    Graduated {
        graduated_ranges: Vec<GraduatedRangeDetail>,
    },
    Volume {
        flat_unit_amount: Decimal,
        per_unit_amount: Decimal,
        per_unit_total_amount: Decimal,
    },
}

/// Usage event synthesized by the package-group timebased coordinator to
/// drive the group's time-based sibling charge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedUsageEvent {
    pub billable_metric_id: Uuid,
    pub units: Decimal,
    pub timestamp: DateTime<Utc>,
}

/// Rating result for one grouped sub-aggregation, tagged with its group key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedRatingResult {
    pub group_key: String,
    pub result: RatingResult,
}

/// Output of rating one charge for one billing period. Quantity fields are
/// carried through unchanged from the aggregation input; `amount` is in
/// major currency units.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingResult {
    pub units: Decimal,
    pub current_usage_units: Decimal,
    pub full_units_number: Option<Decimal>,
    pub count: i64,
    pub total_aggregated_units: Decimal,
    pub amount: Decimal,
    pub unit_amount: Decimal,
    #[serde(default)]
    pub amount_details: AmountDetails,
    #[serde(default)]
    pub grouped_results: Vec<GroupedRatingResult>,
    #[serde(default)]
    pub derived_events: Vec<DerivedUsageEvent>,
}

impl RatingResult {
    /// Zero-amount result carrying the aggregation passthrough fields.
    pub fn from_aggregation(aggregation: &AggregationResult) -> Self {
        Self {
            units: aggregation.units,
            current_usage_units: aggregation.current_usage_units,
            full_units_number: aggregation.full_units_number,
            count: aggregation.count,
            total_aggregated_units: aggregation.total_aggregated_units,
            ..Self::default()
        }
    }
}
