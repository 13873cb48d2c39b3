//! Package-group allocation state.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Key of a package-group state record. One record is shared by all sibling
/// charges of a charge group within a subscription.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageGroupKey {
    pub subscription_id: Uuid,
    pub charge_group_id: Uuid,
}

/// Persisted allocation state of a charge group. Created lazily on first
/// billing of the group, mutated by every subsequent billing run of any
/// sibling charge, never deleted while the group is active.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageGroupState {
    /// Packages billed so far. Monotonically non-decreasing.
    pub current_package_count: Decimal,
    /// Billable-metric id to remaining unit capacity of the currently open
    /// package for that metric.
    pub available_group_usage: HashMap<Uuid, Decimal>,
}
