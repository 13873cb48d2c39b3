//! Prorated-graduated pricing model.
//!
//! Each usage event carries two values: its full (non-prorated)
//! contribution, which decides which tier the event's units land in, and
//! its prorated contribution, which is what actually gets billed. Events
//! are consumed tier by tier in chronological order; an event straddling a
//! tier boundary is split between the tiers in proportion to its proration
//! coefficient (prorated value / full value). The prorated value assigned
//! across all tiers always sums to the total prorated aggregation.

use rust_decimal::Decimal;

use super::{per_unit, ChargeModel};
use crate::error::RatingError;
use crate::models::{
    AggregationResult, AmountDetails, ChargeConfiguration, ChargeProperties, GraduatedRangeDetail,
    RatingResult,
};

pub struct ProratedGraduatedChargeModel;

impl ChargeModel for ProratedGraduatedChargeModel {
    fn apply(
        &self,
        _charge: &ChargeConfiguration,
        aggregation: &AggregationResult,
        properties: &ChargeProperties,
    ) -> Result<RatingResult, RatingError> {
        let full = &aggregation.event_full_units;
        let prorated = &aggregation.event_prorated_units;
        if full.len() != prorated.len() {
            return Err(RatingError::MismatchedEventSequences {
                full: full.len(),
                prorated: prorated.len(),
            });
        }

        let total_units = aggregation.units;
        let mut amount = Decimal::ZERO;
        let mut graduated_ranges = Vec::new();

        let mut idx = 0;
        let mut running_full = Decimal::ZERO;
        // Portion of a straddling event that belongs to later tiers, in full
        // units, together with that event's proration coefficient.
        let mut carry_full = Decimal::ZERO;
        let mut carry_coefficient = Decimal::ZERO;
        let mut previous_boundary = Decimal::ZERO;

        for tier in &properties.tiers {
            let reached = carry_full > Decimal::ZERO || idx < full.len();
            if !reached {
                break;
            }

            // Flat amount is billed once per reached tier.
            if !total_units.is_zero() {
                amount += tier.flat_amount;
            }

            let mut tier_prorated = Decimal::ZERO;

            // Absorb overflow carried from the previous tier first. The
            // carry can itself span several tiers when one event is larger
            // than a whole tier.
            if carry_full > Decimal::ZERO {
                let absorbed = match tier.to_value {
                    Some(to) => carry_full.min(to - previous_boundary),
                    None => carry_full,
                };
                tier_prorated += absorbed * carry_coefficient;
                carry_full -= absorbed;
            }

            if carry_full.is_zero() {
                while idx < full.len() {
                    let event_full = full[idx];
                    let event_prorated = prorated[idx];
                    running_full += event_full;
                    tier_prorated += event_prorated;
                    idx += 1;

                    if let Some(to) = tier.to_value {
                        if running_full > to {
                            // Straddling event: split between this tier and
                            // the next by the proration coefficient.
                            let overflow = running_full - to;
                            let coefficient = if event_full.is_zero() {
                                Decimal::ZERO
                            } else {
                                event_prorated / event_full
                            };
                            let overflow_prorated = overflow * coefficient;
                            tier_prorated -= overflow_prorated;
                            carry_full = overflow;
                            carry_coefficient = coefficient;
                            break;
                        }
                        if running_full == to {
                            break;
                        }
                    }
                }
            }

            amount += tier_prorated * tier.per_unit_amount;
            graduated_ranges.push(GraduatedRangeDetail {
                from_value: tier.from_value,
                to_value: tier.to_value,
                units: tier_prorated,
                flat_unit_amount: tier.flat_amount,
                per_unit_amount: tier.per_unit_amount,
                total_with_flat_amount: tier.flat_amount + tier_prorated * tier.per_unit_amount,
            });

            previous_boundary = match tier.to_value {
                Some(to) => to,
                None => running_full,
            };
        }

        let denominator = aggregation.full_units_number.unwrap_or(aggregation.units);
        let mut result = RatingResult::from_aggregation(aggregation);
        result.amount = amount;
        result.unit_amount = per_unit(amount, denominator);
        result.amount_details = AmountDetails::Graduated { graduated_ranges };
        Ok(result)
    }
}
