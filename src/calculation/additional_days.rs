//! Additional-days allocation.
//!
//! `additionalDaysWorked` already holds a dollar figure, so the allocation
//! is a straight pass-through per partner.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::models::{AuditStep, OrZero, Physician};

/// The result of collecting additional-days allocations.
#[derive(Debug, Clone)]
pub struct AdditionalDaysResult {
    /// Allocation per partner id, for partners with a nonzero amount.
    pub allocations: HashMap<String, Decimal>,
    /// Sum of all allocations.
    pub total_additional_days: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Collects each partner's additional-days dollar amount.
pub fn allocate_additional_days(partners: &[&Physician], step_number: u32) -> AdditionalDaysResult {
    let mut allocations: HashMap<String, Decimal> = HashMap::new();
    for partner in partners {
        let amount = partner.additional_days_worked.or_zero();
        if !amount.is_zero() {
            *allocations.entry(partner.id.clone()).or_default() += amount;
        }
    }

    let total_additional_days: Decimal = allocations.values().copied().sum();

    let audit_step = AuditStep {
        step_number,
        rule_id: "additional_days_allocation".to_string(),
        rule_name: "Additional Days Allocation".to_string(),
        input: serde_json::json!({
            "partner_count": partners.len()
        }),
        output: serde_json::json!({
            "partners_with_additional_days": allocations.len(),
            "total_additional_days": total_additional_days.normalize().to_string()
        }),
        reasoning: format!(
            "{} partners worked additional days totalling ${}",
            allocations.len(),
            total_additional_days.normalize()
        ),
    };

    AdditionalDaysResult {
        allocations,
        total_additional_days,
        audit_step,
    }
}
