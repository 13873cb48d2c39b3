//! Services module for the rating engine.

pub mod charge_models;
pub mod dispatcher;
pub mod grouped;
pub mod metrics;
pub mod package_group;

pub use dispatcher::RatingService;
pub use metrics::{get_metrics, init_metrics, record_rated_amount, record_rating};
pub use package_group::{
    InMemoryPackageGroupStore, PackageGroupCoordinator, PackageGroupOutcome, PackageGroupStore,
};
