//! Rating dispatcher.
//!
//! Maps a charge's pricing model to exactly one strategy through a closed,
//! exhaustive match. The package-group family routes through the stateful
//! coordinator; everything else is a pure strategy, fanned out per usage
//! group by the grouped adapter when the aggregation carries sub-groups.

use chrono::Utc;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::instrument;

use crate::config::RatingConfig;
use crate::error::RatingError;
use crate::models::{
    AggregationResult, ChargeConfiguration, DerivedUsageEvent, PricingModel, RatingResult,
};
use crate::services::charge_models::{
    ChargeModel, CustomChargeModel, DynamicChargeModel, GraduatedChargeModel,
    GraduatedPercentageChargeModel, PackageChargeModel, PercentageChargeModel,
    ProratedGraduatedChargeModel, StandardChargeModel, TimeBasedChargeModel, VolumeChargeModel,
};
use crate::services::grouped::apply_grouped;
use crate::services::metrics::{record_rated_amount, record_rating, RATING_DURATION};
use crate::services::package_group::{PackageGroupCoordinator, PackageGroupStore};

/// Entry point of the rating engine. Rates one charge against one
/// aggregation result, once per charge per subscription billing period.
pub struct RatingService<S> {
    coordinator: PackageGroupCoordinator<S>,
    config: RatingConfig,
}

impl<S: PackageGroupStore> RatingService<S> {
    pub fn new(store: S, config: RatingConfig) -> Self {
        let coordinator = PackageGroupCoordinator::new(store, config.max_state_retries);
        Self {
            coordinator,
            config,
        }
    }

    /// Rate a charge. Pure models are safe to evaluate concurrently; the
    /// package-group family serializes per `(subscription, charge group)`
    /// key through the store's version check.
    #[instrument(
        skip(self, charge, aggregation),
        fields(
            charge_id = %charge.charge_id,
            pricing_model = charge.pricing_model.as_str(),
        )
    )]
    pub async fn rate(
        &self,
        charge: &ChargeConfiguration,
        aggregation: &AggregationResult,
    ) -> Result<RatingResult, RatingError> {
        let timer = RATING_DURATION
            .with_label_values(&[charge.pricing_model.as_str()])
            .start_timer();

        let rated = match charge.pricing_model {
            PricingModel::Standard => self.apply_pure(&StandardChargeModel, charge, aggregation),
            PricingModel::Percentage => {
                self.apply_pure(&PercentageChargeModel, charge, aggregation)
            }
            PricingModel::Package => self.apply_pure(&PackageChargeModel, charge, aggregation),
            PricingModel::Graduated => self.apply_pure(&GraduatedChargeModel, charge, aggregation),
            PricingModel::GraduatedPercentage => {
                self.apply_pure(&GraduatedPercentageChargeModel, charge, aggregation)
            }
            PricingModel::Volume => self.apply_pure(&VolumeChargeModel, charge, aggregation),
            PricingModel::ProratedGraduated => {
                self.apply_pure(&ProratedGraduatedChargeModel, charge, aggregation)
            }
            PricingModel::TimeBased => self.apply_pure(&TimeBasedChargeModel, charge, aggregation),
            PricingModel::Dynamic => {
                let model = DynamicChargeModel::new(self.config.currency_subunit_factor());
                self.apply_pure(&model, charge, aggregation)
            }
            PricingModel::Custom => self.apply_pure(&CustomChargeModel, charge, aggregation),
            PricingModel::PackageGroup => self.rate_package_group(charge, aggregation, false).await,
            PricingModel::PackageGroupTimebased => {
                self.rate_package_group(charge, aggregation, true).await
            }
        };

        timer.observe_duration();
        match &rated {
            Ok(result) => {
                record_rating(charge.pricing_model.as_str(), "ok");
                if let Some(amount) = result.amount.to_f64() {
                    record_rated_amount(&charge.currency, charge.pricing_model.as_str(), amount);
                }
            }
            Err(_) => record_rating(charge.pricing_model.as_str(), "error"),
        }
        rated
    }

    fn apply_pure(
        &self,
        model: &dyn ChargeModel,
        charge: &ChargeConfiguration,
        aggregation: &AggregationResult,
    ) -> Result<RatingResult, RatingError> {
        if aggregation.grouped_aggregations.is_empty() {
            model.apply(charge, aggregation, &charge.properties)
        } else {
            apply_grouped(model, charge, aggregation)
        }
    }

    async fn rate_package_group(
        &self,
        charge: &ChargeConfiguration,
        aggregation: &AggregationResult,
        time_based: bool,
    ) -> Result<RatingResult, RatingError> {
        let outcome = self
            .coordinator
            .allocate(charge, aggregation.subscription_id, aggregation.units)
            .await?;

        let mut result = RatingResult::from_aggregation(aggregation);
        result.amount = outcome.amount;
        result.unit_amount = if outcome.added_packages > Decimal::ZERO {
            outcome.amount / outcome.added_packages
        } else {
            Decimal::ZERO
        };

        if time_based && outcome.added_packages > Decimal::ZERO {
            let timestamp = Utc::now();
            result.derived_events = charge
                .group_siblings
                .iter()
                .filter(|sibling| sibling.time_based)
                .map(|sibling| DerivedUsageEvent {
                    billable_metric_id: sibling.billable_metric_id,
                    units: outcome.added_packages,
                    timestamp,
                })
                .collect();
        }

        Ok(result)
    }
}
