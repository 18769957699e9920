//! Delayed W2 payments for physicians transitioning from employee to partner.
//!
//! Payroll runs in arrears, so the last pay period of the prior year's
//! employee work posts in the current year. That payment and its employer
//! taxes are a current-year cost.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PayrollTaxTable;
use crate::models::{AuditStep, OrZero, Physician, PhysicianRole};

use super::PracticeModel;

/// A delayed W2 payment and the employer taxes on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayedW2Payment {
    /// Wages earned in the prior year and paid this year.
    pub amount: Decimal,
    /// Employer payroll taxes on `amount`.
    pub taxes: Decimal,
}

impl DelayedW2Payment {
    /// Amount plus taxes.
    pub fn total(&self) -> Decimal {
        self.amount + self.taxes
    }
}

/// Returns the number of calendar days in `year`.
///
/// Years outside chrono's supported range are treated as 365 days.
pub fn days_in_year(year: i32) -> i64 {
    match (
        NaiveDate::from_ymd_opt(year, 1, 1),
        year.checked_add(1).and_then(|next| NaiveDate::from_ymd_opt(next, 1, 1)),
    ) {
        (Some(start), Some(end)) => (end - start).num_days(),
        _ => 365,
    }
}

/// Computes the delayed W2 payment owed in `year`.
///
/// The amount is `payroll_lag_days` of the prior year's salary. Taxes are
/// employer social security and Medicare on that amount; wage bases reset
/// each year so the cap never applies to this payment.
///
/// # Examples
///
/// ```
/// use physician_comp_engine::calculation::delayed_w2_payment;
/// use physician_comp_engine::models::{Physician, PhysicianRole};
/// use rust_decimal::Decimal;
///
/// let physician = Physician::new(
///     "phys_003",
///     "Dr. Ortiz",
///     PhysicianRole::EmployeeToPartner { employee_portion_of_year: None },
/// )
/// .with_salary(Decimal::from(365_000));
///
/// // The prior year, 2025, has 365 days.
/// let payment = delayed_w2_payment(&physician, 2026, 14, None);
/// assert_eq!(payment.amount, Decimal::from(14_000));
/// assert_eq!(payment.taxes, Decimal::ZERO);
/// ```
pub fn delayed_w2_payment(
    physician: &Physician,
    year: i32,
    payroll_lag_days: u32,
    tax_table: Option<&PayrollTaxTable>,
) -> DelayedW2Payment {
    let days = days_in_year(year.saturating_sub(1));
    let amount =
        physician.salary.or_zero() * Decimal::from(payroll_lag_days) / Decimal::from(days);
    let taxes = tax_table
        .map(|t| t.fica_on(amount))
        .unwrap_or(Decimal::ZERO);

    DelayedW2Payment { amount, taxes }
}

/// Delayed W2 payments across the roster.
#[derive(Debug, Clone)]
pub struct DelayedW2Result {
    /// Sum of amount plus taxes across transitioning physicians.
    pub total_delayed_w2_cost: Decimal,
    /// Payment per physician id.
    pub payments: HashMap<String, DelayedW2Payment>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes the delayed W2 payment of every `employeeToPartner` physician.
pub fn calculate_delayed_w2(
    physicians: &[Physician],
    year: i32,
    model: &dyn PracticeModel,
    step_number: u32,
) -> DelayedW2Result {
    let mut payments = HashMap::new();
    let mut total_delayed_w2_cost = Decimal::ZERO;
    let mut per_physician = Vec::new();

    for physician in physicians {
        if !matches!(physician.role, PhysicianRole::EmployeeToPartner { .. }) {
            continue;
        }

        let payment = model.delayed_w2(physician, year);
        total_delayed_w2_cost += payment.total();
        per_physician.push(serde_json::json!({
            "id": physician.id,
            "amount": payment.amount.normalize().to_string(),
            "taxes": payment.taxes.normalize().to_string()
        }));
        payments.insert(physician.id.clone(), payment);
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "delayed_w2".to_string(),
        rule_name: "Delayed W2 Payments".to_string(),
        input: serde_json::json!({
            "year": year,
            "transitioning_count": per_physician.len()
        }),
        output: serde_json::json!({
            "payments": per_physician,
            "total_delayed_w2_cost": total_delayed_w2_cost.normalize().to_string()
        }),
        reasoning: format!(
            "Prior-year W2 pay posting in {} for {} transitioning physicians totals ${}",
            year,
            payments.len(),
            total_delayed_w2_cost.normalize()
        ),
    };

    DelayedW2Result {
        total_delayed_w2_cost,
        payments,
        audit_step,
    }
}
