//! Practice income, costs and the partner pools derived from them.
//!
//! Both pools are floored at zero independently: a shortfall is clamped,
//! never passed on as negative compensation.

use rust_decimal::Decimal;

use crate::models::{AuditStep, FiscalYearFinancials, OrZero, non_negative};

/// The result of totalling practice income.
#[derive(Debug, Clone)]
pub struct IncomeResult {
    /// Total practice income.
    pub total_income: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Totals therapy, medical-director and consulting income.
///
/// `prcs_md_pool` must already be zero when no PRCS director is designated.
pub fn calculate_total_income(
    financials: &FiscalYearFinancials,
    shared_md_pool: Decimal,
    prcs_md_pool: Decimal,
    step_number: u32,
) -> IncomeResult {
    let therapy_income = financials.therapy_income.or_zero();
    let consulting_income = financials.consulting_services_income.or_zero();
    let total_income = therapy_income + shared_md_pool + prcs_md_pool + consulting_income;

    let audit_step = AuditStep {
        step_number,
        rule_id: "total_income".to_string(),
        rule_name: "Total Income".to_string(),
        input: serde_json::json!({
            "therapy_income": therapy_income.normalize().to_string(),
            "shared_md_pool": shared_md_pool.normalize().to_string(),
            "prcs_md_pool": prcs_md_pool.normalize().to_string(),
            "consulting_income": consulting_income.normalize().to_string()
        }),
        output: serde_json::json!({
            "total_income": total_income.normalize().to_string()
        }),
        reasoning: format!(
            "${} + ${} + ${} + ${} = ${}",
            therapy_income.normalize(),
            shared_md_pool.normalize(),
            prcs_md_pool.normalize(),
            consulting_income.normalize(),
            total_income.normalize()
        ),
    };

    IncomeResult {
        total_income,
        audit_step,
    }
}

/// The result of totalling practice costs.
#[derive(Debug, Clone)]
pub struct CostResult {
    /// Total practice costs.
    pub total_costs: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Totals the fiscal year's costs with the computed employee, buyout and delayed W2 costs.
pub fn calculate_total_costs(
    financials: &FiscalYearFinancials,
    total_employee_cost: Decimal,
    total_buyout_cost: Decimal,
    total_delayed_w2_cost: Decimal,
    step_number: u32,
) -> CostResult {
    let non_employment = financials.non_employment_costs.or_zero();
    let non_md_employment = financials.non_md_employment_costs.or_zero();
    let misc_employment = financials.misc_employment_costs.or_zero();
    let locums = financials.locum_costs.or_zero();

    let total_costs = non_employment
        + non_md_employment
        + misc_employment
        + locums
        + total_employee_cost
        + total_buyout_cost
        + total_delayed_w2_cost;

    let audit_step = AuditStep {
        step_number,
        rule_id: "total_costs".to_string(),
        rule_name: "Total Costs".to_string(),
        input: serde_json::json!({
            "non_employment_costs": non_employment.normalize().to_string(),
            "non_md_employment_costs": non_md_employment.normalize().to_string(),
            "misc_employment_costs": misc_employment.normalize().to_string(),
            "locum_costs": locums.normalize().to_string(),
            "total_employee_cost": total_employee_cost.normalize().to_string(),
            "total_buyout_cost": total_buyout_cost.normalize().to_string(),
            "total_delayed_w2_cost": total_delayed_w2_cost.normalize().to_string()
        }),
        output: serde_json::json!({
            "total_costs": total_costs.normalize().to_string()
        }),
        reasoning: format!("Practice costs total ${}", total_costs.normalize()),
    };

    CostResult {
        total_costs,
        audit_step,
    }
}

/// The result of deriving a pool.
#[derive(Debug, Clone)]
pub struct PoolResult {
    /// The pool, never negative.
    pub pool: Decimal,
    /// Whether a negative value was clamped to zero.
    pub clamped: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Base pool: `max(0, total income − total costs)`.
///
/// # Examples
///
/// ```
/// use physician_comp_engine::calculation::calculate_base_pool;
/// use rust_decimal::Decimal;
///
/// let result = calculate_base_pool(Decimal::from(100), Decimal::from(140), 9);
/// assert_eq!(result.pool, Decimal::ZERO);
/// assert!(result.clamped);
/// ```
pub fn calculate_base_pool(total_income: Decimal, total_costs: Decimal, step_number: u32) -> PoolResult {
    let raw = total_income - total_costs;
    let pool = non_negative(raw);
    let clamped = raw < Decimal::ZERO;

    let reasoning = if clamped {
        format!(
            "${} - ${} = ${} is negative; base pool clamped to $0",
            total_income.normalize(),
            total_costs.normalize(),
            raw.normalize()
        )
    } else {
        format!(
            "${} - ${} = ${}",
            total_income.normalize(),
            total_costs.normalize(),
            pool.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "base_pool".to_string(),
        rule_name: "Base Pool".to_string(),
        input: serde_json::json!({
            "total_income": total_income.normalize().to_string(),
            "total_costs": total_costs.normalize().to_string()
        }),
        output: serde_json::json!({
            "base_pool": pool.normalize().to_string(),
            "clamped": clamped
        }),
        reasoning,
    };

    PoolResult {
        pool,
        clamped,
        audit_step,
    }
}

/// Distributable pool: `max(0, base pool − MD allocations − additional days)`.
pub fn calculate_distributable_pool(
    base_pool: Decimal,
    total_md_allocations: Decimal,
    total_additional_days: Decimal,
    step_number: u32,
) -> PoolResult {
    let raw = base_pool - total_md_allocations - total_additional_days;
    let pool = non_negative(raw);
    let clamped = raw < Decimal::ZERO;

    let reasoning = if clamped {
        format!(
            "Direct allocations of ${} exceed the base pool of ${}; distributable pool clamped to $0",
            (total_md_allocations + total_additional_days).normalize(),
            base_pool.normalize()
        )
    } else {
        format!(
            "${} - ${} - ${} = ${}",
            base_pool.normalize(),
            total_md_allocations.normalize(),
            total_additional_days.normalize(),
            pool.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "distributable_pool".to_string(),
        rule_name: "Distributable Pool".to_string(),
        input: serde_json::json!({
            "base_pool": base_pool.normalize().to_string(),
            "total_md_allocations": total_md_allocations.normalize().to_string(),
            "total_additional_days": total_additional_days.normalize().to_string()
        }),
        output: serde_json::json!({
            "distributable_pool": pool.normalize().to_string(),
            "clamped": clamped
        }),
        reasoning,
    };

    PoolResult {
        pool,
        clamped,
        audit_step,
    }
}
