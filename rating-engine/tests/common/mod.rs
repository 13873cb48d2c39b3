//! Test helper module for rating-engine integration tests.
//!
//! Provides builders for charge configurations and aggregation results.

#![allow(dead_code)]

use rating_engine::config::RatingConfig;
use rating_engine::models::{
    AggregationResult, ChargeConfiguration, ChargeProperties, PricingModel, Tier,
};
use rating_engine::services::{InMemoryPackageGroupStore, RatingService};
use rust_decimal::Decimal;
use std::sync::Once;
use uuid::Uuid;

static TRACING: Once = Once::new();

/// Initialize test logging once; `RUST_LOG` controls verbosity.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Rating service backed by a fresh in-memory package-group store.
pub fn service() -> RatingService<InMemoryPackageGroupStore> {
    init_tracing();
    RatingService::new(InMemoryPackageGroupStore::new(), RatingConfig::default())
}

/// Charge configuration with the given model and properties.
pub fn charge(pricing_model: PricingModel, properties: ChargeProperties) -> ChargeConfiguration {
    ChargeConfiguration {
        charge_id: Uuid::new_v4(),
        pricing_model,
        billable_metric_id: Uuid::new_v4(),
        charge_group_id: None,
        currency: "USD".to_string(),
        prorated: false,
        properties,
        group_siblings: Vec::new(),
    }
}

/// Aggregation result for `units`, with the passthrough fields populated.
pub fn aggregation(units: Decimal) -> AggregationResult {
    AggregationResult {
        subscription_id: Uuid::new_v4(),
        units,
        current_usage_units: units,
        total_aggregated_units: units,
        count: 1,
        ..AggregationResult::default()
    }
}

/// Aggregation pinned to a subscription, for package-group sequences.
pub fn aggregation_for(subscription_id: Uuid, units: Decimal) -> AggregationResult {
    AggregationResult {
        subscription_id,
        ..aggregation(units)
    }
}

/// Tier priced per unit.
pub fn tier(
    from: Decimal,
    to: Option<Decimal>,
    flat_amount: Decimal,
    per_unit_amount: Decimal,
) -> Tier {
    Tier {
        from_value: from,
        to_value: to,
        flat_amount,
        per_unit_amount,
        rate: Decimal::ZERO,
    }
}

/// Tier priced by percentage rate, for the graduated-percentage model.
pub fn percentage_tier(
    from: Decimal,
    to: Option<Decimal>,
    flat_amount: Decimal,
    rate: Decimal,
) -> Tier {
    Tier {
        from_value: from,
        to_value: to,
        flat_amount,
        per_unit_amount: Decimal::ZERO,
        rate,
    }
}
