//! Package-group coordinator.
//!
//! Sibling charges inside one charge group share a single package counter,
//! persisted per `(subscription_id, charge_group_id)`. The read-then-write
//! sequence is not safe under concurrent billing runs for the same key, so
//! every update goes through an optimistic version check: the coordinator
//! reloads and recomputes when the persisted state changed underneath it,
//! up to a bounded number of attempts.

use async_trait::async_trait;
use dashmap::DashMap;
use rust_decimal::Decimal;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::error::RatingError;
use crate::models::{ChargeConfiguration, PackageGroupKey, PackageGroupState};
use crate::services::metrics::record_state_conflict;

/// Access contract for persisted package-group state. The backing store is
/// an external responsibility; implementations must reject a save whose
/// expected version no longer matches with
/// [`RatingError::StateVersionConflict`].
#[async_trait]
pub trait PackageGroupStore: Send + Sync {
    /// Current state and its version, or `None` before first activation.
    async fn load(
        &self,
        key: &PackageGroupKey,
    ) -> Result<Option<(PackageGroupState, u64)>, RatingError>;

    /// Persist `state`. `expected_version` is `None` to create the record
    /// (the key must still be absent) or the version returned by `load`
    /// for an update.
    async fn save(
        &self,
        key: &PackageGroupKey,
        state: PackageGroupState,
        expected_version: Option<u64>,
    ) -> Result<(), RatingError>;
}

/// In-memory store for embedding and tests.
#[derive(Default)]
pub struct InMemoryPackageGroupStore {
    entries: DashMap<PackageGroupKey, (u64, PackageGroupState)>,
}

impl InMemoryPackageGroupStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PackageGroupStore for InMemoryPackageGroupStore {
    async fn load(
        &self,
        key: &PackageGroupKey,
    ) -> Result<Option<(PackageGroupState, u64)>, RatingError> {
        Ok(self
            .entries
            .get(key)
            .map(|entry| (entry.value().1.clone(), entry.value().0)))
    }

    async fn save(
        &self,
        key: &PackageGroupKey,
        state: PackageGroupState,
        expected_version: Option<u64>,
    ) -> Result<(), RatingError> {
        use dashmap::mapref::entry::Entry;

        match self.entries.entry(key.clone()) {
            Entry::Occupied(mut occupied) => match expected_version {
                Some(version) if occupied.get().0 == version => {
                    occupied.insert((version + 1, state));
                    Ok(())
                }
                _ => Err(RatingError::StateVersionConflict),
            },
            Entry::Vacant(vacant) => match expected_version {
                None => {
                    vacant.insert((1, state));
                    Ok(())
                }
                Some(_) => Err(RatingError::StateVersionConflict),
            },
        }
    }
}

/// Outcome of one allocation run for one charge of the group.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageGroupOutcome {
    /// Amount billed this run, in major currency units.
    pub amount: Decimal,
    /// New whole packages consumed since the last run. Zero when the usage
    /// still fits inside previously granted capacity.
    pub added_packages: Decimal,
    pub paid_units: Decimal,
}

impl PackageGroupOutcome {
    fn zero(paid_units: Decimal) -> Self {
        Self {
            amount: Decimal::ZERO,
            added_packages: Decimal::ZERO,
            paid_units,
        }
    }
}

/// Stateful allocator shared by the sibling charges of a charge group.
pub struct PackageGroupCoordinator<S> {
    store: S,
    max_retries: u32,
}

impl<S: PackageGroupStore> PackageGroupCoordinator<S> {
    pub fn new(store: S, max_retries: u32) -> Self {
        Self { store, max_retries }
    }

    /// Bill the packages newly consumed by `units` of the charge's metric,
    /// updating the shared group state. Capacity already granted to the
    /// group is never billed again.
    #[instrument(
        skip(self, charge),
        fields(
            charge_id = %charge.charge_id,
            subscription_id = %subscription_id,
            billable_metric_id = %charge.billable_metric_id,
        )
    )]
    pub async fn allocate(
        &self,
        charge: &ChargeConfiguration,
        subscription_id: Uuid,
        units: Decimal,
    ) -> Result<PackageGroupOutcome, RatingError> {
        let charge_group_id = charge
            .charge_group_id
            .ok_or(RatingError::MissingProperties("charge_group_id"))?;
        let package_size = charge
            .properties
            .package_size
            .ok_or(RatingError::MissingProperties("package_size"))?;
        let per_package_unit_amount = charge
            .properties
            .per_package_unit_amount
            .ok_or(RatingError::MissingProperties("per_package_unit_amount"))?;
        let free_units = charge.properties.free_units.unwrap_or(Decimal::ZERO);

        let paid_units = units - free_units;
        if paid_units < Decimal::ZERO || package_size <= Decimal::ZERO {
            return Ok(PackageGroupOutcome::zero(paid_units));
        }

        let key = PackageGroupKey {
            subscription_id,
            charge_group_id,
        };

        let mut attempts = 0;
        loop {
            attempts += 1;

            let loaded = self.store.load(&key).await?;
            let (mut state, version) = match loaded {
                Some((state, version)) => (state, Some(version)),
                None => (PackageGroupState::default(), None),
            };

            let first_activation = version.is_none()
                || !state
                    .available_group_usage
                    .contains_key(&charge.billable_metric_id);

            let added_packages = if first_activation {
                // Open the allocation for the whole group: each sibling
                // metric starts with one full package of capacity.
                for sibling in &charge.group_siblings {
                    state
                        .available_group_usage
                        .entry(sibling.billable_metric_id)
                        .or_insert(sibling.package_size);
                }
                let initial = (paid_units / package_size).ceil();
                state.current_package_count = state.current_package_count.max(initial);
                initial
            } else {
                // Packages are shared bundle-wide: the count granted so far
                // covers `count * package_size` units of this metric.
                let granted = state.current_package_count * package_size;
                if paid_units > granted {
                    let added = ((paid_units - granted) / package_size).ceil();
                    state.current_package_count += added;
                    added
                } else {
                    Decimal::ZERO
                }
            };

            // Carry forward the unused remainder of the open package.
            let remainder = package_size - (paid_units % package_size);
            state
                .available_group_usage
                .insert(charge.billable_metric_id, remainder);

            match self.store.save(&key, state, version).await {
                Ok(()) => {
                    debug!(
                        added_packages = %added_packages,
                        paid_units = %paid_units,
                        "Package group allocation persisted"
                    );
                    return Ok(PackageGroupOutcome {
                        amount: added_packages * per_package_unit_amount,
                        added_packages,
                        paid_units,
                    });
                }
                Err(RatingError::StateVersionConflict) if attempts <= self.max_retries => {
                    record_state_conflict();
                    warn!(attempt = attempts, "Package group state conflict, retrying");
                    continue;
                }
                Err(RatingError::StateVersionConflict) => {
                    return Err(RatingError::StateContention { attempts });
                }
                Err(e) => return Err(e),
            }
        }
    }
}
