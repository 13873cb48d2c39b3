//! Package-group coordinator tests: cross-charge allocation, replay
//! idempotency and optimistic state versioning.

mod common;

use common::aggregation_for;
use rating_engine::config::RatingConfig;
use rating_engine::models::{
    ChargeConfiguration, ChargeProperties, GroupSibling, PackageGroupKey, PackageGroupState,
    PricingModel,
};
use rating_engine::services::{InMemoryPackageGroupStore, PackageGroupStore, RatingService};
use rating_engine::RatingError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

fn group_charge(
    pricing_model: PricingModel,
    charge_group_id: Uuid,
    billable_metric_id: Uuid,
    package_size: Decimal,
    per_package: Decimal,
) -> ChargeConfiguration {
    ChargeConfiguration {
        charge_id: Uuid::new_v4(),
        pricing_model,
        billable_metric_id,
        charge_group_id: Some(charge_group_id),
        currency: "USD".to_string(),
        prorated: false,
        properties: ChargeProperties {
            package_size: Some(package_size),
            per_package_unit_amount: Some(per_package),
            free_units: Some(dec!(0)),
            ..ChargeProperties::default()
        },
        group_siblings: Vec::new(),
    }
}

#[tokio::test]
async fn replaying_a_run_never_double_bills() {
    let svc = common::service();
    let group_id = Uuid::new_v4();
    let metric_id = Uuid::new_v4();
    let subscription_id = Uuid::new_v4();
    let cfg = group_charge(
        PricingModel::PackageGroup,
        group_id,
        metric_id,
        dec!(10),
        dec!(5),
    );

    // First run: 25 units consume 3 packages.
    let first = svc
        .rate(&cfg, &aggregation_for(subscription_id, dec!(25)))
        .await
        .unwrap();
    assert_eq!(first.amount, dec!(15));
    assert_eq!(first.unit_amount, dec!(5));

    // Replay with unchanged usage: already-granted capacity covers it.
    let replay = svc
        .rate(&cfg, &aggregation_for(subscription_id, dec!(25)))
        .await
        .unwrap();
    assert_eq!(replay.amount, Decimal::ZERO);
    assert_eq!(replay.unit_amount, Decimal::ZERO);

    // Ten more units cross exactly one package boundary.
    let third = svc
        .rate(&cfg, &aggregation_for(subscription_id, dec!(35)))
        .await
        .unwrap();
    assert_eq!(third.amount, dec!(5));
    assert_eq!(third.unit_amount, dec!(5));
}

#[tokio::test]
async fn multi_package_jump_bills_the_full_shortfall() {
    let svc = common::service();
    let group_id = Uuid::new_v4();
    let metric_id = Uuid::new_v4();
    let subscription_id = Uuid::new_v4();
    let cfg = group_charge(
        PricingModel::PackageGroup,
        group_id,
        metric_id,
        dec!(10),
        dec!(5),
    );

    svc.rate(&cfg, &aggregation_for(subscription_id, dec!(25)))
        .await
        .unwrap();

    // 25 -> 55 units needs 3 more packages on top of the granted 3.
    let result = svc
        .rate(&cfg, &aggregation_for(subscription_id, dec!(55)))
        .await
        .unwrap();
    assert_eq!(result.amount, dec!(15));
}

#[tokio::test]
async fn free_units_above_usage_bill_nothing() {
    let svc = common::service();
    let subscription_id = Uuid::new_v4();
    let mut cfg = group_charge(
        PricingModel::PackageGroup,
        Uuid::new_v4(),
        Uuid::new_v4(),
        dec!(10),
        dec!(5),
    );
    cfg.properties.free_units = Some(dec!(30));

    let result = svc
        .rate(&cfg, &aggregation_for(subscription_id, dec!(25)))
        .await
        .unwrap();
    assert_eq!(result.amount, Decimal::ZERO);
    assert_eq!(result.unit_amount, Decimal::ZERO);
}

#[tokio::test]
async fn sibling_charges_share_the_package_counter() {
    let svc = common::service();
    let group_id = Uuid::new_v4();
    let metric_a = Uuid::new_v4();
    let metric_b = Uuid::new_v4();
    let subscription_id = Uuid::new_v4();

    let mut charge_a = group_charge(
        PricingModel::PackageGroup,
        group_id,
        metric_a,
        dec!(10),
        dec!(5),
    );
    charge_a.group_siblings = vec![GroupSibling {
        billable_metric_id: metric_b,
        package_size: dec!(5),
        time_based: false,
    }];
    let charge_b = group_charge(
        PricingModel::PackageGroup,
        group_id,
        metric_b,
        dec!(5),
        dec!(2),
    );

    // Activating the group through charge A grants 3 shared packages.
    let first = svc
        .rate(&charge_a, &aggregation_for(subscription_id, dec!(25)))
        .await
        .unwrap();
    assert_eq!(first.amount, dec!(15));

    // 12 units of metric B fit inside 3 packages of 5: nothing new to bill.
    let covered = svc
        .rate(&charge_b, &aggregation_for(subscription_id, dec!(12)))
        .await
        .unwrap();
    assert_eq!(covered.amount, Decimal::ZERO);

    // 17 units exceed the granted 15 and open one more shared package.
    let extra = svc
        .rate(&charge_b, &aggregation_for(subscription_id, dec!(17)))
        .await
        .unwrap();
    assert_eq!(extra.amount, dec!(2));
}

#[tokio::test]
async fn timebased_variant_emits_derived_events() {
    let svc = common::service();
    let group_id = Uuid::new_v4();
    let metric_id = Uuid::new_v4();
    let timebased_metric = Uuid::new_v4();
    let subscription_id = Uuid::new_v4();

    let mut cfg = group_charge(
        PricingModel::PackageGroupTimebased,
        group_id,
        metric_id,
        dec!(10),
        dec!(5),
    );
    cfg.group_siblings = vec![GroupSibling {
        billable_metric_id: timebased_metric,
        package_size: dec!(1),
        time_based: true,
    }];

    let first = svc
        .rate(&cfg, &aggregation_for(subscription_id, dec!(25)))
        .await
        .unwrap();
    assert_eq!(first.derived_events.len(), 1);
    assert_eq!(first.derived_events[0].billable_metric_id, timebased_metric);
    assert_eq!(first.derived_events[0].units, dec!(3));

    // No new packages, no derived event.
    let replay = svc
        .rate(&cfg, &aggregation_for(subscription_id, dec!(25)))
        .await
        .unwrap();
    assert!(replay.derived_events.is_empty());
}

#[tokio::test]
async fn store_rejects_stale_versions() {
    let store = InMemoryPackageGroupStore::new();
    let key = PackageGroupKey {
        subscription_id: Uuid::new_v4(),
        charge_group_id: Uuid::new_v4(),
    };

    // Creating against a missing record works once.
    store
        .save(&key, PackageGroupState::default(), None)
        .await
        .unwrap();
    let err = store
        .save(&key, PackageGroupState::default(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, RatingError::StateVersionConflict));

    // Updates must present the current version.
    let (_, version) = store.load(&key).await.unwrap().unwrap();
    let err = store
        .save(&key, PackageGroupState::default(), Some(version + 1))
        .await
        .unwrap_err();
    assert!(matches!(err, RatingError::StateVersionConflict));
    store
        .save(&key, PackageGroupState::default(), Some(version))
        .await
        .unwrap();
}

#[tokio::test]
async fn concurrent_runs_bill_each_boundary_once() {
    let svc = std::sync::Arc::new(RatingService::new(
        InMemoryPackageGroupStore::new(),
        RatingConfig::default(),
    ));
    let group_id = Uuid::new_v4();
    let metric_id = Uuid::new_v4();
    let subscription_id = Uuid::new_v4();
    let cfg = group_charge(
        PricingModel::PackageGroup,
        group_id,
        metric_id,
        dec!(10),
        dec!(5),
    );

    svc.rate(&cfg, &aggregation_for(subscription_id, dec!(25)))
        .await
        .unwrap();

    // Two concurrent recalculations of the same 35-unit usage: exactly one
    // may bill the extra package, the other must see it already granted.
    let mut handles = Vec::new();
    for _ in 0..2 {
        let svc = svc.clone();
        let cfg = cfg.clone();
        let agg = aggregation_for(subscription_id, dec!(35));
        handles.push(tokio::spawn(async move {
            svc.rate(&cfg, &agg).await.unwrap().amount
        }));
    }

    let mut total = Decimal::ZERO;
    for handle in handles {
        total += handle.await.unwrap();
    }
    assert_eq!(total, dec!(5));
}
