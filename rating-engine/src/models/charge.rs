//! Charge configuration model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pricing model for a charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingModel {
    Standard,
    Percentage,
    Package,
    Graduated,
    GraduatedPercentage,
    Volume,
    ProratedGraduated,
    TimeBased,
    Dynamic,
    Custom,
    PackageGroup,
    PackageGroupTimebased,
}

impl PricingModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingModel::Standard => "standard",
            PricingModel::Percentage => "percentage",
            PricingModel::Package => "package",
            PricingModel::Graduated => "graduated",
            PricingModel::GraduatedPercentage => "graduated_percentage",
            PricingModel::Volume => "volume",
            PricingModel::ProratedGraduated => "prorated_graduated",
            PricingModel::TimeBased => "time_based",
            PricingModel::Dynamic => "dynamic",
            PricingModel::Custom => "custom",
            PricingModel::PackageGroup => "package_group",
            PricingModel::PackageGroupTimebased => "package_group_timebased",
        }
    }

    /// Parse an externally stored identifier. Unknown identifiers are a
    /// configuration error, so there is no fallback variant.
    pub fn from_string(s: &str) -> Option<Self> {
        match s {
            "standard" => Some(PricingModel::Standard),
            "percentage" => Some(PricingModel::Percentage),
            "package" => Some(PricingModel::Package),
            "graduated" => Some(PricingModel::Graduated),
            "graduated_percentage" => Some(PricingModel::GraduatedPercentage),
            "volume" => Some(PricingModel::Volume),
            "prorated_graduated" => Some(PricingModel::ProratedGraduated),
            "time_based" => Some(PricingModel::TimeBased),
            "dynamic" => Some(PricingModel::Dynamic),
            "custom" => Some(PricingModel::Custom),
            "package_group" => Some(PricingModel::PackageGroup),
            "package_group_timebased" => Some(PricingModel::PackageGroupTimebased),
            _ => None,
        }
    }
}

/// One pricing tier for the graduated, graduated-percentage and volume
/// models. Tiers are assumed contiguous and ascending by `from_value`;
/// well-formedness is validated by the configuration editor, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    pub from_value: Decimal,
    /// Inclusive upper bound; `None` marks the open-ended last tier.
    pub to_value: Option<Decimal>,
    #[serde(default)]
    pub flat_amount: Decimal,
    #[serde(default)]
    pub per_unit_amount: Decimal,
    /// Percentage rate, used only by the graduated-percentage model.
    #[serde(default)]
    pub rate: Decimal,
}

/// Model-specific pricing parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChargeProperties {
    pub amount_per_unit: Option<Decimal>,
    pub rate: Option<Decimal>,
    pub fixed_amount: Option<Decimal>,
    pub free_units: Option<Decimal>,
    pub package_size: Option<Decimal>,
    pub per_package_unit_amount: Option<Decimal>,
    pub block_duration: Option<Decimal>,
    pub amount_per_block: Option<Decimal>,
    #[serde(default)]
    pub tiers: Vec<Tier>,
}

/// A sibling charge inside the same charge group. Used by the package-group
/// coordinator to seed per-metric capacity on first activation and to route
/// derived usage events to the group's time-based charge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSibling {
    pub billable_metric_id: Uuid,
    pub package_size: Decimal,
    #[serde(default)]
    pub time_based: bool,
}

/// Charge configuration. Immutable for the duration of a billing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeConfiguration {
    pub charge_id: Uuid,
    pub pricing_model: PricingModel,
    pub billable_metric_id: Uuid,
    pub charge_group_id: Option<Uuid>,
    pub currency: String,
    /// Whether the charge is prorated over the billing period. The volume
    /// model rates against the non-prorated total when set.
    #[serde(default)]
    pub prorated: bool,
    #[serde(default)]
    pub properties: ChargeProperties,
    #[serde(default)]
    pub group_siblings: Vec<GroupSibling>,
}
