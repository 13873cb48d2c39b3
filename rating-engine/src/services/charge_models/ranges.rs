//! Range evaluator for tiered pricing models.
//!
//! Given an ascending, contiguous tier list and a total unit count,
//! computes each tier's share of the units and its flat-plus-per-unit (or
//! percentage-aware) contribution. Tiers index whole unit positions: the
//! first tier spans `(0, to]`, every later tier `(from - 1, to]`.

use rust_decimal::Decimal;

use crate::models::Tier;

/// Units of `total` that fall inside `tier`. Zero when the tier is not
/// reached.
pub fn units_in_tier(tier: &Tier, total: Decimal) -> Decimal {
    let lower_exclusive = if tier.from_value.is_zero() {
        Decimal::ZERO
    } else {
        tier.from_value - Decimal::ONE
    };
    let upper = match tier.to_value {
        Some(to) => total.min(to),
        None => total,
    };
    (upper - lower_exclusive).max(Decimal::ZERO)
}

/// Flat + per-unit contribution of one tier for `total` units. The flat
/// amount is billed once, only when the tier is reached.
pub fn flat_per_unit_contribution(tier: &Tier, total: Decimal) -> Decimal {
    let units = units_in_tier(tier, total);
    if units <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    tier.flat_amount + units * tier.per_unit_amount
}

/// Percentage-aware contribution: the tier's rate applied to its unit
/// share, plus the tier flat amount when reached.
pub fn percentage_contribution(tier: &Tier, total: Decimal) -> Decimal {
    let units = units_in_tier(tier, total);
    if units <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    tier.flat_amount + units * tier.rate / Decimal::ONE_HUNDRED
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn tier(from: Decimal, to: Option<Decimal>, flat: Decimal, per_unit: Decimal) -> Tier {
        Tier {
            from_value: from,
            to_value: to,
            flat_amount: flat,
            per_unit_amount: per_unit,
            rate: Decimal::ZERO,
        }
    }

    #[test]
    fn first_tier_counts_from_zero() {
        let t = tier(dec!(0), Some(dec!(10)), dec!(0), dec!(1));
        assert_eq!(units_in_tier(&t, dec!(7)), dec!(7));
        assert_eq!(units_in_tier(&t, dec!(15)), dec!(10));
    }

    #[test]
    fn later_tier_counts_inclusive_bounds() {
        let t = tier(dec!(11), Some(dec!(20)), dec!(0), dec!(1));
        assert_eq!(units_in_tier(&t, dec!(10)), dec!(0));
        assert_eq!(units_in_tier(&t, dec!(15)), dec!(5));
        assert_eq!(units_in_tier(&t, dec!(25)), dec!(10));
    }

    #[test]
    fn open_ended_tier_absorbs_remainder() {
        let t = tier(dec!(21), None, dec!(0), dec!(1));
        assert_eq!(units_in_tier(&t, dec!(33)), dec!(13));
    }

    #[test]
    fn flat_amount_only_when_reached() {
        let t = tier(dec!(11), Some(dec!(20)), dec!(5), dec!(2));
        assert_eq!(flat_per_unit_contribution(&t, dec!(8)), dec!(0));
        assert_eq!(flat_per_unit_contribution(&t, dec!(13)), dec!(11));
    }

    #[test]
    fn fractional_units_are_supported() {
        let t = tier(dec!(0), Some(dec!(10)), dec!(0), dec!(2));
        assert_eq!(units_in_tier(&t, dec!(2.5)), dec!(2.5));
        assert_eq!(flat_per_unit_contribution(&t, dec!(2.5)), dec!(5.0));
    }
}
