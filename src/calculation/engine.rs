//! The compensation engine.
//!
//! Runs the allocation steps in order: employee, buyout and delayed W2
//! costs; medical-director and additional-days allocations; income, costs
//! and the two pools; partner FTE weighting; then result assembly. Every
//! step records an [`AuditStep`]. The engine is total: it never fails and
//! never panics on well-typed input.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::models::{
    AllocationSummary, AuditStep, AuditTrace, AuditWarning, CompensationBreakdown,
    CompensationOptions, CompensationResult, FiscalYearFinancials, OrZero, Physician,
    PhysicianKind, PhysicianRole, nonzero,
};

use super::additional_days::allocate_additional_days;
use super::buyout::calculate_total_buyout_cost;
use super::delayed_w2::calculate_delayed_w2;
use super::employee_cost::calculate_total_employee_cost;
use super::fte_weight::calculate_fte_weights;
use super::medical_director::{allocate_medical_director_income, trailing_md_amount};
use super::pool::{
    calculate_base_pool, calculate_distributable_pool, calculate_total_costs,
    calculate_total_income,
};
use super::PracticeModel;

/// Receives the run-level summary of every computation.
///
/// Observers see the totals after the pools are final. They cannot alter
/// results.
pub trait AllocationObserver {
    /// Called once per run with the allocation summary.
    fn on_allocation(&self, summary: &AllocationSummary);
}

impl<F> AllocationObserver for F
where
    F: Fn(&AllocationSummary),
{
    fn on_allocation(&self, summary: &AllocationSummary) {
        self(summary)
    }
}

/// Computes physician compensation against a practice model.
///
/// # Example
///
/// ```
/// use physician_comp_engine::calculation::{CompensationEngine, StandardPracticeModel};
/// use physician_comp_engine::models::{
///     CompensationOptions, FiscalYearFinancials, Physician, PhysicianRole,
/// };
/// use rust_decimal::Decimal;
///
/// let model = StandardPracticeModel::default();
/// let engine = CompensationEngine::new(&model);
///
/// let roster = vec![Physician::new("phys_001", "Dr. Adams", PhysicianRole::Partner)];
/// let financials = FiscalYearFinancials {
///     therapy_income: Some(Decimal::from(500_000)),
///     medical_director_hours: Some(Decimal::ZERO),
///     ..Default::default()
/// };
///
/// let results = engine.compute(
///     &roster,
///     2025,
///     &financials,
///     Decimal::ZERO,
///     CompensationOptions::default(),
/// );
/// assert_eq!(results[0].comp, Decimal::from(500_000));
/// ```
#[derive(Clone, Copy)]
pub struct CompensationEngine<'a> {
    model: &'a dyn PracticeModel,
    observer: Option<&'a dyn AllocationObserver>,
}

impl<'a> CompensationEngine<'a> {
    /// Creates an engine without an observer.
    pub fn new(model: &'a dyn PracticeModel) -> Self {
        Self {
            model,
            observer: None,
        }
    }

    /// Attaches an observer that receives each run's summary.
    pub fn with_observer(self, observer: &'a dyn AllocationObserver) -> Self {
        Self {
            observer: Some(observer),
            ..self
        }
    }

    /// Computes compensation for every physician on the roster.
    ///
    /// Partner results come first, then employee-only results, each in
    /// roster order.
    pub fn compute(
        &self,
        physicians: &[Physician],
        year: i32,
        financials: &FiscalYearFinancials,
        benefit_growth_rate: Decimal,
        options: CompensationOptions,
    ) -> Vec<CompensationResult> {
        self.compute_detailed(physicians, year, financials, benefit_growth_rate, options)
            .0
    }

    /// Same as [`compute`](Self::compute) with `include_retired` forced on.
    pub fn compute_with_retired(
        &self,
        physicians: &[Physician],
        year: i32,
        financials: &FiscalYearFinancials,
        benefit_growth_rate: Decimal,
        options: CompensationOptions,
    ) -> Vec<CompensationResult> {
        self.compute(
            physicians,
            year,
            financials,
            benefit_growth_rate,
            options.with_retired(),
        )
    }

    /// Computes compensation and returns the run summary alongside it.
    pub fn compute_detailed(
        &self,
        physicians: &[Physician],
        year: i32,
        financials: &FiscalYearFinancials,
        benefit_growth_rate: Decimal,
        options: CompensationOptions,
    ) -> (Vec<CompensationResult>, AllocationSummary) {
        let model = self.model;
        let mut audit_steps: Vec<AuditStep> = Vec::new();
        let mut warnings: Vec<AuditWarning> = Vec::new();
        let mut step_number: u32 = 1;

        let partners: Vec<&Physician> = physicians.iter().filter(|p| p.is_partner_like()).collect();
        let employees: Vec<&Physician> =
            physicians.iter().filter(|p| p.is_employee_like()).collect();
        audit_steps.push(partition_step(physicians.len(), &partners, &employees, step_number));
        step_number += 1;

        let employee_cost = calculate_total_employee_cost(
            &employees,
            year,
            benefit_growth_rate,
            model,
            step_number,
        );
        audit_steps.push(employee_cost.audit_step);
        step_number += 1;

        let buyout = calculate_total_buyout_cost(physicians, step_number);
        audit_steps.push(buyout.audit_step);
        step_number += 1;

        let delayed_w2 = calculate_delayed_w2(physicians, year, model, step_number);
        audit_steps.push(delayed_w2.audit_step);
        step_number += 1;

        let md = allocate_medical_director_income(&partners, financials, model, step_number);
        audit_steps.push(md.audit_step);
        warnings.extend(md.warnings);
        step_number += 1;

        let additional_days = allocate_additional_days(&partners, step_number);
        audit_steps.push(additional_days.audit_step);
        step_number += 1;

        let income = calculate_total_income(
            financials,
            md.shared_md_pool,
            md.prcs_md_pool,
            step_number,
        );
        audit_steps.push(income.audit_step);
        step_number += 1;

        let costs = calculate_total_costs(
            financials,
            employee_cost.total_employee_cost,
            buyout.total_buyout_cost,
            delayed_w2.total_delayed_w2_cost,
            step_number,
        );
        audit_steps.push(costs.audit_step);
        step_number += 1;

        let base_pool = calculate_base_pool(income.total_income, costs.total_costs, step_number);
        audit_steps.push(base_pool.audit_step);
        step_number += 1;
        if base_pool.clamped {
            warnings.push(AuditWarning {
                code: "BASE_POOL_CLAMPED".to_string(),
                message: format!(
                    "Costs of ${} exceed income of ${}; partners share nothing by FTE",
                    costs.total_costs.normalize(),
                    income.total_income.normalize()
                ),
                severity: "medium".to_string(),
            });
        }

        let distributable = calculate_distributable_pool(
            base_pool.pool,
            md.total_md_allocations,
            additional_days.total_additional_days,
            step_number,
        );
        audit_steps.push(distributable.audit_step);
        step_number += 1;
        if distributable.clamped {
            warnings.push(AuditWarning {
                code: "DISTRIBUTABLE_POOL_CLAMPED".to_string(),
                message: format!(
                    "Direct allocations exceed the base pool of ${}; distributable pool clamped to zero",
                    base_pool.pool.normalize()
                ),
                severity: "medium".to_string(),
            });
        }

        let fte = calculate_fte_weights(&partners, model, step_number);
        audit_steps.push(fte.audit_step);
        step_number += 1;

        let mut results = Vec::with_capacity(physicians.len());
        let mut skipped_retirees = Vec::new();

        for (partner, weight) in partners.iter().zip(&fte.weights) {
            let is_retiring = matches!(partner.role, PhysicianRole::PartnerToRetire { .. });
            if is_retiring && weight.is_zero() && !options.include_retired {
                skipped_retirees.push(partner.id.clone());
                continue;
            }

            let fte_share = *weight * distributable.pool / fte.divisor;
            let additional_days_allocation = additional_days
                .allocations
                .get(&partner.id)
                .copied()
                .or_zero();
            let buyout_amount = partner.buyout_cost();

            let (md_allocation, trailing_md) = if partner.is_prior_year_retiree() {
                (Decimal::ZERO, trailing_md_amount(partner, model))
            } else {
                (md.allocations.get(&partner.id).copied().or_zero(), Decimal::ZERO)
            };

            let (w2_salary, delayed_w2_amount) = match partner.role {
                PhysicianRole::EmployeeToPartner { .. } => (
                    partner.salary.or_zero() * model.employee_portion_of_year(partner),
                    delayed_w2
                        .payments
                        .get(&partner.id)
                        .map(|payment| payment.amount)
                        .or_zero(),
                ),
                _ => (Decimal::ZERO, Decimal::ZERO),
            };

            let mut comp =
                fte_share + md_allocation + additional_days_allocation + buyout_amount + trailing_md;
            if !options.exclude_w2_from_comp {
                comp += w2_salary + delayed_w2_amount;
            }

            results.push(CompensationResult {
                id: partner.id.clone(),
                name: partner.name.clone(),
                physician_type: PhysicianKind::Partner,
                comp,
                breakdown: CompensationBreakdown {
                    fte_share: Some(fte_share),
                    md_allocation: nonzero(md_allocation),
                    additional_days_allocation: nonzero(additional_days_allocation),
                    buyout: nonzero(buyout_amount),
                    delayed_w2: nonzero(delayed_w2_amount),
                    trailing_md: nonzero(trailing_md),
                    w2_salary: nonzero(w2_salary),
                },
            });
        }

        let partner_count = results.len();
        for employee in physicians.iter().filter(|p| p.is_employee_only()) {
            let portion = match employee.role {
                PhysicianRole::Employee => Decimal::ONE,
                _ => model.employee_portion_of_year(employee),
            };
            let w2_salary = employee.salary.or_zero() * portion;

            results.push(CompensationResult {
                id: employee.id.clone(),
                name: employee.name.clone(),
                physician_type: employee.kind(),
                comp: w2_salary,
                breakdown: CompensationBreakdown {
                    w2_salary: Some(w2_salary),
                    ..Default::default()
                },
            });
        }

        audit_steps.push(assembly_step(
            &results,
            partner_count,
            &skipped_retirees,
            options,
            step_number,
        ));

        for warning in &warnings {
            warn!(code = %warning.code, year, "{}", warning.message);
        }

        let summary = AllocationSummary {
            year,
            total_employee_cost: employee_cost.total_employee_cost,
            total_buyout_cost: buyout.total_buyout_cost,
            total_delayed_w2_cost: delayed_w2.total_delayed_w2_cost,
            shared_md_pool: md.shared_md_pool,
            prcs_md_pool: md.prcs_md_pool,
            trailing_md_total: md.trailing_md_total,
            total_md_allocations: md.total_md_allocations,
            total_additional_days: additional_days.total_additional_days,
            total_income: income.total_income,
            total_costs: costs.total_costs,
            base_pool: base_pool.pool,
            distributable_pool: distributable.pool,
            total_partner_weight: fte.total_weight,
            audit_trace: AuditTrace {
                steps: audit_steps,
                warnings,
            },
        };

        debug!(
            year,
            physicians = physicians.len(),
            results = results.len(),
            total_income = %summary.total_income,
            total_costs = %summary.total_costs,
            total_employee_cost = %summary.total_employee_cost,
            total_buyout_cost = %summary.total_buyout_cost,
            total_delayed_w2_cost = %summary.total_delayed_w2_cost,
            total_md_allocations = %summary.total_md_allocations,
            total_additional_days = %summary.total_additional_days,
            base_pool = %summary.base_pool,
            distributable_pool = %summary.distributable_pool,
            total_partner_weight = %summary.total_partner_weight,
            "Compensation allocated"
        );

        if let Some(observer) = self.observer {
            observer.on_allocation(&summary);
        }

        (results, summary)
    }
}

fn partition_step(
    physician_count: usize,
    partners: &[&Physician],
    employees: &[&Physician],
    step_number: u32,
) -> AuditStep {
    let ids = |group: &[&Physician]| -> Vec<String> { group.iter().map(|p| p.id.clone()).collect() };

    AuditStep {
        step_number,
        rule_id: "partition".to_string(),
        rule_name: "Partition Roster".to_string(),
        input: serde_json::json!({
            "physician_count": physician_count
        }),
        output: serde_json::json!({
            "partner_like": ids(partners),
            "employee_like": ids(employees)
        }),
        reasoning: format!(
            "{} partner-like and {} employee-like physicians; transitioning physicians appear in both",
            partners.len(),
            employees.len()
        ),
    }
}

fn assembly_step(
    results: &[CompensationResult],
    partner_count: usize,
    skipped_retirees: &[String],
    options: CompensationOptions,
    step_number: u32,
) -> AuditStep {
    let total_comp: Decimal = results.iter().map(|r| r.comp).sum();

    AuditStep {
        step_number,
        rule_id: "result_assembly".to_string(),
        rule_name: "Result Assembly".to_string(),
        input: serde_json::json!({
            "include_retired": options.include_retired,
            "exclude_w2_from_comp": options.exclude_w2_from_comp
        }),
        output: serde_json::json!({
            "partner_results": partner_count,
            "employee_results": results.len() - partner_count,
            "skipped_retirees": skipped_retirees,
            "total_comp": total_comp.normalize().to_string()
        }),
        reasoning: format!(
            "{} results totalling ${}; {} zero-weight retirees omitted",
            results.len(),
            total_comp.normalize(),
            skipped_retirees.len()
        ),
    }
}

/// Computes compensation with the given practice model.
///
/// See [`CompensationEngine::compute`].
pub fn compute_compensation(
    physicians: &[Physician],
    year: i32,
    financials: &FiscalYearFinancials,
    benefit_growth_rate: Decimal,
    options: CompensationOptions,
    model: &dyn PracticeModel,
) -> Vec<CompensationResult> {
    CompensationEngine::new(model).compute(physicians, year, financials, benefit_growth_rate, options)
}

/// Computes compensation including zero-weight prior-year retirees.
pub fn compute_compensation_with_retired(
    physicians: &[Physician],
    year: i32,
    financials: &FiscalYearFinancials,
    benefit_growth_rate: Decimal,
    options: CompensationOptions,
    model: &dyn PracticeModel,
) -> Vec<CompensationResult> {
    CompensationEngine::new(model).compute_with_retired(
        physicians,
        year,
        financials,
        benefit_growth_rate,
        options,
    )
}
