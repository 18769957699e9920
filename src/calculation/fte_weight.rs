//! Partner FTE weighting.
//!
//! A partner's weight is the share of a full working year they actually
//! worked as a partner, after weeks off. The distributable pool is split in
//! proportion to these weights.

use rust_decimal::Decimal;

use crate::models::{AuditStep, OrZero, Physician, non_negative, safe_divisor};

use super::PracticeModel;
use super::portion_of_year::partner_portion_of_year;

/// Standard working weeks in a partner year.
pub const DEFAULT_WEEKS_PER_YEAR: Decimal = Decimal::from_parts(52, 0, 0, false, 0);

/// Computes a partner's normalized working-time weight.
///
/// `max(0, partnerPortion × weeksPerYear − weeksOff) / weeksPerYear`
///
/// # Examples
///
/// ```
/// use physician_comp_engine::calculation::{partner_fte_weight, DEFAULT_WEEKS_PER_YEAR};
/// use physician_comp_engine::models::{Physician, PhysicianRole};
/// use rust_decimal::Decimal;
///
/// let partner = Physician::new("phys_001", "Dr. Adams", PhysicianRole::Partner)
///     .with_weeks_off(Decimal::from(13));
///
/// let weight = partner_fte_weight(&partner, DEFAULT_WEEKS_PER_YEAR);
/// assert_eq!(weight, Decimal::new(75, 2));
/// ```
pub fn partner_fte_weight(physician: &Physician, weeks_per_year: Decimal) -> Decimal {
    let portion = partner_portion_of_year(physician);
    if portion.is_zero() || weeks_per_year <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let partner_weeks = portion * weeks_per_year;
    non_negative(partner_weeks - physician.weeks_off.or_zero()) / weeks_per_year
}

/// The FTE weights of every partner-like physician.
#[derive(Debug, Clone)]
pub struct FteWeightResult {
    /// Weights in partner order.
    pub weights: Vec<Decimal>,
    /// Sum of the weights.
    pub total_weight: Decimal,
    /// Divisor for share calculation; one when the total is zero.
    pub divisor: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Weighs every partner-like physician and totals the weights.
pub fn calculate_fte_weights(
    partners: &[&Physician],
    model: &dyn PracticeModel,
    step_number: u32,
) -> FteWeightResult {
    let weights: Vec<Decimal> = partners
        .iter()
        .map(|p| model.partner_fte_weight(p))
        .collect();
    let total_weight: Decimal = weights.iter().copied().sum();
    let divisor = safe_divisor(total_weight);

    let per_partner: Vec<serde_json::Value> = partners
        .iter()
        .zip(&weights)
        .map(|(p, w)| {
            serde_json::json!({
                "id": p.id,
                "weight": w.normalize().to_string()
            })
        })
        .collect();

    let reasoning = if total_weight.is_zero() {
        "Total partner weight is zero; dividing by 1 so every FTE share is zero".to_string()
    } else {
        format!(
            "{} partner weights sum to {}",
            weights.len(),
            total_weight.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "fte_weighting".to_string(),
        rule_name: "Partner FTE Weighting".to_string(),
        input: serde_json::json!({
            "partner_count": partners.len()
        }),
        output: serde_json::json!({
            "weights": per_partner,
            "total_weight": total_weight.normalize().to_string(),
            "divisor": divisor.normalize().to_string()
        }),
        reasoning,
    };

    FteWeightResult {
        weights,
        total_weight,
        divisor,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::StandardPracticeModel;
    use crate::models::PhysicianRole;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_full_year_partner_without_weeks_off_weighs_one() {
        let partner = Physician::new("a", "A", PhysicianRole::Partner);
        assert_eq!(
            partner_fte_weight(&partner, DEFAULT_WEEKS_PER_YEAR),
            Decimal::ONE
        );
    }

    #[test]
    fn test_weeks_off_reduce_weight() {
        let partner = Physician::new("a", "A", PhysicianRole::Partner).with_weeks_off(dec("26"));
        assert_eq!(
            partner_fte_weight(&partner, DEFAULT_WEEKS_PER_YEAR),
            dec("0.5")
        );
    }

    #[test]
    fn test_weeks_off_beyond_partner_weeks_floor_at_zero() {
        let retiree = Physician::new(
            "r",
            "R",
            PhysicianRole::PartnerToRetire {
                partner_portion_of_year: Some(dec("0.25")),
                buyout_cost: None,
                trailing_shared_md_amount: None,
            },
        )
        .with_weeks_off(dec("20"));
        assert_eq!(
            partner_fte_weight(&retiree, DEFAULT_WEEKS_PER_YEAR),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_prior_year_retiree_weighs_zero() {
        let retiree = Physician::new(
            "r",
            "R",
            PhysicianRole::PartnerToRetire {
                partner_portion_of_year: Some(Decimal::ZERO),
                buyout_cost: None,
                trailing_shared_md_amount: None,
            },
        );
        assert_eq!(
            partner_fte_weight(&retiree, DEFAULT_WEEKS_PER_YEAR),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_employee_to_partner_weighs_partner_portion() {
        let p = Physician::new(
            "t",
            "T",
            PhysicianRole::EmployeeToPartner {
                employee_portion_of_year: Some(dec("0.5")),
            },
        );
        assert_eq!(partner_fte_weight(&p, DEFAULT_WEEKS_PER_YEAR), dec("0.5"));
    }

    #[test]
    fn test_zero_weeks_per_year_yields_zero() {
        let partner = Physician::new("a", "A", PhysicianRole::Partner);
        assert_eq!(partner_fte_weight(&partner, Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_calculate_weights_totals_and_divisor() {
        let model = StandardPracticeModel::default();
        let a = Physician::new("a", "A", PhysicianRole::Partner);
        let b = Physician::new("b", "B", PhysicianRole::Partner).with_weeks_off(dec("13"));
        let partners = vec![&a, &b];

        let result = calculate_fte_weights(&partners, &model, 11);

        assert_eq!(result.weights, vec![Decimal::ONE, dec("0.75")]);
        assert_eq!(result.total_weight, dec("1.75"));
        assert_eq!(result.divisor, dec("1.75"));
        assert_eq!(result.audit_step.step_number, 11);
        assert_eq!(result.audit_step.rule_id, "fte_weighting");
    }

    #[test]
    fn test_calculate_weights_with_no_partners_uses_unit_divisor() {
        let model = StandardPracticeModel::default();
        let result = calculate_fte_weights(&[], &model, 1);

        assert_eq!(result.total_weight, Decimal::ZERO);
        assert_eq!(result.divisor, Decimal::ONE);
        assert!(result.audit_step.reasoning.contains("zero"));
    }
}
