//! Employer cost of employee-status physicians.
//!
//! Each employee-like physician's salary is pro-rated by the fraction of the
//! year spent in employee status before it reaches the cost calculator, so
//! benefits and payroll taxes follow the pro-rated wages.

use rust_decimal::Decimal;

use crate::config::{BenefitsConfig, PayrollTaxTable};
use crate::models::{AuditStep, OrZero, Physician, PhysicianRole};

use super::PracticeModel;

/// An employee-like physician with salary already pro-rated to employee time.
#[derive(Debug, Clone, Copy)]
pub struct ProRatedEmployee<'a> {
    /// The physician being costed.
    pub physician: &'a Physician,
    /// Salary scaled by `portion_of_year`.
    pub salary: Decimal,
    /// Fraction of the year in employee status.
    pub portion_of_year: Decimal,
}

impl<'a> ProRatedEmployee<'a> {
    /// Pro-rates a physician's salary by the given fraction of the year.
    pub fn new(physician: &'a Physician, portion_of_year: Decimal) -> Self {
        Self {
            physician,
            salary: physician.salary.or_zero() * portion_of_year,
            portion_of_year,
        }
    }
}

/// Largest amount [`grow_by_rate`] returns; runaway growth saturates here.
pub const MAX_GROWN_AMOUNT: Decimal = Decimal::from_parts(2_808_348_672, 232_830_643, 0, false, 0);

/// Grows a base-year amount by `rate` compounded over `years`.
///
/// Negative `years` discount the amount back instead. The factor is raised
/// by repeated squaring, so the work is logarithmic in `years`. Results
/// that would exceed [`MAX_GROWN_AMOUNT`] in magnitude saturate to it.
pub fn grow_by_rate(amount: Decimal, rate: Decimal, years: i32) -> Decimal {
    let factor = Decimal::ONE + rate;
    if factor <= Decimal::ZERO || factor == Decimal::ONE || amount.is_zero() {
        return amount;
    }

    let grown = match checked_pow(factor, years.unsigned_abs()) {
        Some(power) if years >= 0 => amount.checked_mul(power),
        Some(power) => amount.checked_div(power),
        // The power itself overflowed: growth runs away, discounting reaches zero.
        None if years >= 0 => None,
        None => Some(Decimal::ZERO),
    };

    match grown {
        Some(value) if value.abs() <= MAX_GROWN_AMOUNT => value,
        _ if amount.is_sign_negative() => -MAX_GROWN_AMOUNT,
        _ => MAX_GROWN_AMOUNT,
    }
}

fn checked_pow(base: Decimal, exponent: u32) -> Option<Decimal> {
    let mut result = Decimal::ONE;
    let mut base = base;
    let mut exponent = exponent;
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = result.checked_mul(base)?;
        }
        exponent >>= 1;
        if exponent > 0 {
            base = base.checked_mul(base)?;
        }
    }
    Some(result)
}

/// Total employer cost of one pro-rated employee.
///
/// Wages are the pro-rated salary plus, when the physician receives bonuses,
/// the bonus pro-rated by the same portion of the year. Benefits, when
/// received, are the base-year benefit cost grown to `year` and scaled by the
/// portion of the year. Payroll taxes use `tax_table`; without a table they
/// are zero.
///
/// # Examples
///
/// ```
/// use physician_comp_engine::calculation::{employer_cost, ProRatedEmployee};
/// use physician_comp_engine::config::BenefitsConfig;
/// use physician_comp_engine::models::{Physician, PhysicianRole};
/// use rust_decimal::Decimal;
///
/// let employee = Physician::new("phys_002", "Dr. Park", PhysicianRole::Employee)
///     .with_salary(Decimal::from(200_000));
/// let pro_rated = ProRatedEmployee::new(&employee, Decimal::ONE);
///
/// // No benefits, no tax table: cost is the salary alone.
/// let cost = employer_cost(&pro_rated, 2025, Decimal::ZERO, &BenefitsConfig::default(), None);
/// assert_eq!(cost, Decimal::from(200_000));
/// ```
pub fn employer_cost(
    employee: &ProRatedEmployee<'_>,
    year: i32,
    benefit_growth_rate: Decimal,
    benefits: &BenefitsConfig,
    tax_table: Option<&PayrollTaxTable>,
) -> Decimal {
    let physician = employee.physician;

    let bonus = if physician.receives_bonuses {
        physician.bonus_amount.or_zero() * employee.portion_of_year
    } else {
        Decimal::ZERO
    };
    let wages = employee.salary + bonus;

    let benefit_cost = if physician.receives_benefits {
        grow_by_rate(
            benefits.annual_benefit_cost,
            benefit_growth_rate,
            year.saturating_sub(benefits.base_year),
        ) * employee.portion_of_year
    } else {
        Decimal::ZERO
    };

    let taxes = tax_table
        .map(|t| t.employer_taxes(wages))
        .unwrap_or(Decimal::ZERO);

    wages + benefit_cost + taxes
}

/// The result of costing every employee-like physician.
#[derive(Debug, Clone)]
pub struct EmployeeCostResult {
    /// Sum of employer cost across employee-like physicians.
    pub total_employee_cost: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Sums the employer cost of all employee-status time.
///
/// A plain `employee` counts for the whole year; other employee-like types
/// use the model's employee portion. A portion of zero or less contributes
/// nothing.
pub fn calculate_total_employee_cost(
    employees: &[&Physician],
    year: i32,
    benefit_growth_rate: Decimal,
    model: &dyn PracticeModel,
    step_number: u32,
) -> EmployeeCostResult {
    let mut total_employee_cost = Decimal::ZERO;
    let mut per_employee = Vec::with_capacity(employees.len());

    for physician in employees {
        let portion = match physician.role {
            PhysicianRole::Employee => Decimal::ONE,
            _ => model.employee_portion_of_year(physician),
        };

        let cost = if portion <= Decimal::ZERO {
            Decimal::ZERO
        } else {
            let pro_rated = ProRatedEmployee::new(physician, portion);
            model.employee_cost(&pro_rated, year, benefit_growth_rate)
        };
        total_employee_cost += cost;

        per_employee.push(serde_json::json!({
            "id": physician.id,
            "type": physician.kind().as_str(),
            "portion_of_year": portion.normalize().to_string(),
            "cost": cost.normalize().to_string()
        }));
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "employee_cost".to_string(),
        rule_name: "Total Employee Cost".to_string(),
        input: serde_json::json!({
            "year": year,
            "benefit_growth_rate": benefit_growth_rate.normalize().to_string(),
            "employee_count": employees.len()
        }),
        output: serde_json::json!({
            "employees": per_employee,
            "total_employee_cost": total_employee_cost.normalize().to_string()
        }),
        reasoning: format!(
            "Employer cost of {} employee-status physicians totals ${}",
            employees.len(),
            total_employee_cost.normalize()
        ),
    };

    EmployeeCostResult {
        total_employee_cost,
        audit_step,
    }
}
