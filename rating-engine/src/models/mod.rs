//! Domain models for the rating engine.

mod aggregation;
mod charge;
mod package_group;
mod result;

pub use aggregation::{AggregationResult, CustomAggregation, GroupedAggregation};
pub use charge::{ChargeConfiguration, ChargeProperties, GroupSibling, PricingModel, Tier};
pub use package_group::{PackageGroupKey, PackageGroupState};
pub use result::{
    AmountDetails, DerivedUsageEvent, GraduatedRangeDetail, GroupedRatingResult, RatingResult,
};
