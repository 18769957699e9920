//! Retirement buyout costs.

use rust_decimal::Decimal;

use crate::models::{AuditStep, Physician, PhysicianRole};

/// The result of totalling retirement buyouts.
#[derive(Debug, Clone)]
pub struct BuyoutResult {
    /// Sum of buyouts owed this year.
    pub total_buyout_cost: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Sums `buyoutCost` over every `partnerToRetire` physician.
///
/// Buyouts are owed whether or not the physician worked any part of the
/// year, so prior-year retirees are included.
pub fn calculate_total_buyout_cost(physicians: &[Physician], step_number: u32) -> BuyoutResult {
    let retirees: Vec<&Physician> = physicians
        .iter()
        .filter(|p| matches!(p.role, PhysicianRole::PartnerToRetire { .. }))
        .collect();

    let total_buyout_cost: Decimal = retirees.iter().map(|p| p.buyout_cost()).sum();

    let per_retiree: Vec<serde_json::Value> = retirees
        .iter()
        .map(|p| {
            serde_json::json!({
                "id": p.id,
                "buyout_cost": p.buyout_cost().normalize().to_string(),
                "prior_year_retiree": p.is_prior_year_retiree()
            })
        })
        .collect();

    let audit_step = AuditStep {
        step_number,
        rule_id: "buyout_cost".to_string(),
        rule_name: "Total Buyout Cost".to_string(),
        input: serde_json::json!({
            "retiree_count": retirees.len()
        }),
        output: serde_json::json!({
            "retirees": per_retiree,
            "total_buyout_cost": total_buyout_cost.normalize().to_string()
        }),
        reasoning: format!(
            "Buyouts for {} retiring partners total ${}",
            retirees.len(),
            total_buyout_cost.normalize()
        ),
    };

    BuyoutResult {
        total_buyout_cost,
        audit_step,
    }
}
