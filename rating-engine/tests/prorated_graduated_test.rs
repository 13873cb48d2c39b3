//! Prorated-graduated model tests: tier assignment of prorated event
//! values and conservation of the billed total.

mod common;

use common::{charge, service, tier};
use rating_engine::models::{
    AggregationResult, AmountDetails, ChargeProperties, PricingModel, RatingResult,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

fn event_aggregation(full: Vec<Decimal>, prorated: Vec<Decimal>) -> AggregationResult {
    let units: Decimal = prorated.iter().copied().sum();
    let full_total: Decimal = full.iter().copied().sum();
    AggregationResult {
        subscription_id: Uuid::new_v4(),
        units,
        current_usage_units: units,
        total_aggregated_units: units,
        full_units_number: Some(full_total),
        count: full.len() as i64,
        event_full_units: full,
        event_prorated_units: prorated,
        ..AggregationResult::default()
    }
}

fn assigned_units(result: &RatingResult) -> Vec<Decimal> {
    match &result.amount_details {
        AmountDetails::Graduated { graduated_ranges } => {
            graduated_ranges.iter().map(|r| r.units).collect()
        }
        other => panic!("expected graduated details, got {:?}", other),
    }
}

#[tokio::test]
async fn assigns_events_to_tiers_by_full_units() {
    let cfg = charge(
        PricingModel::ProratedGraduated,
        ChargeProperties {
            tiers: vec![
                tier(dec!(0), Some(dec!(5)), dec!(0), dec!(1)),
                tier(dec!(6), Some(dec!(12)), dec!(0), dec!(2)),
                tier(dec!(13), None, dec!(0), dec!(3)),
            ],
            ..ChargeProperties::default()
        },
    );
    let agg = event_aggregation(
        vec![dec!(3), dec!(4), dec!(5), dec!(8)],
        vec![dec!(1.5), dec!(4), dec!(2.5), dec!(2)],
    );

    let result = service().rate(&cfg, &agg).await.unwrap();

    // The second event straddles the first boundary with coefficient 1 and
    // its 2-unit overflow moves to tier 2.
    assert_eq!(
        assigned_units(&result),
        vec![dec!(3.5), dec!(4.5), dec!(2)]
    );
    assert_eq!(result.amount, dec!(3.5) + dec!(4.5) * dec!(2) + dec!(2) * dec!(3));
}

#[tokio::test]
async fn conserves_total_prorated_units() {
    let cfg = charge(
        PricingModel::ProratedGraduated,
        ChargeProperties {
            tiers: vec![
                tier(dec!(0), Some(dec!(7)), dec!(1), dec!(0.25)),
                tier(dec!(8), Some(dec!(19)), dec!(2), dec!(0.5)),
                tier(dec!(20), None, dec!(0), dec!(1)),
            ],
            ..ChargeProperties::default()
        },
    );
    let prorated = vec![dec!(0.5), dec!(3.25), dec!(2), dec!(6), dec!(1.75)];
    let total: Decimal = prorated.iter().copied().sum();
    let agg = event_aggregation(
        vec![dec!(2), dec!(6.5), dec!(4), dec!(12), dec!(3.5)],
        prorated,
    );

    let result = service().rate(&cfg, &agg).await.unwrap();

    let assigned: Decimal = assigned_units(&result).iter().copied().sum();
    assert_eq!(assigned, total);
}

#[tokio::test]
async fn flat_amounts_apply_to_reached_tiers_only() {
    let cfg = charge(
        PricingModel::ProratedGraduated,
        ChargeProperties {
            tiers: vec![
                tier(dec!(0), Some(dec!(10)), dec!(10), dec!(1)),
                tier(dec!(11), None, dec!(20), dec!(2)),
            ],
            ..ChargeProperties::default()
        },
    );
    let agg = event_aggregation(vec![dec!(4)], vec![dec!(2)]);

    // Only the first tier is reached, so only its flat amount applies.
    let result = service().rate(&cfg, &agg).await.unwrap();
    assert_eq!(result.amount, dec!(12));
}

#[tokio::test]
async fn no_events_bill_nothing() {
    let cfg = charge(
        PricingModel::ProratedGraduated,
        ChargeProperties {
            tiers: vec![tier(dec!(0), None, dec!(5), dec!(1))],
            ..ChargeProperties::default()
        },
    );
    let agg = event_aggregation(Vec::new(), Vec::new());

    let result = service().rate(&cfg, &agg).await.unwrap();
    assert_eq!(result.amount, Decimal::ZERO);
    assert_eq!(result.unit_amount, Decimal::ZERO);
}
