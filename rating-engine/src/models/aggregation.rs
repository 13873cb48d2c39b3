//! Aggregation result model.
//!
//! Produced by the upstream aggregation component once per charge and
//! billing period; the rating engine treats it as read-only input and never
//! queries raw usage events itself.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Externally precomputed amount for the custom pricing model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomAggregation {
    pub amount: Decimal,
    pub metadata: Option<serde_json::Value>,
}

/// Per-group-key slice of an aggregation, for grouped charges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedAggregation {
    pub group_key: String,
    pub aggregation: AggregationResult,
}

/// Aggregated metered usage for one charge over one billing period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregationResult {
    pub subscription_id: Uuid,
    /// Reference to the originating usage event, when the aggregation was
    /// triggered by a single event (pay-in-advance recalculation).
    pub event_id: Option<String>,
    /// Proration-adjusted metered quantity.
    pub units: Decimal,
    /// Non-prorated total, absent for non-prorated charges.
    pub full_units_number: Option<Decimal>,
    pub current_usage_units: Decimal,
    /// Number of usage events behind this aggregation.
    pub count: i64,
    pub total_aggregated_units: Decimal,
    pub custom_aggregation: Option<CustomAggregation>,
    /// Externally precomputed monetary amount in minor currency units,
    /// consumed by the dynamic pricing model.
    pub precise_total_amount_cents: Option<Decimal>,
    /// Per-event non-prorated contributions, chronologically ordered.
    /// Parallel to `event_prorated_units`; used by prorated-graduated rating.
    #[serde(default)]
    pub event_full_units: Vec<Decimal>,
    /// Per-event proration-adjusted contributions, parallel to
    /// `event_full_units`.
    #[serde(default)]
    pub event_prorated_units: Vec<Decimal>,
    /// One sub-aggregation per group key, for grouped charges.
    #[serde(default)]
    pub grouped_aggregations: Vec<GroupedAggregation>,
}
