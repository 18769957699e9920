//! Compensation result models.
//!
//! This module contains the per-physician [`CompensationResult`], the
//! run-level [`AllocationSummary`] handed to observers, the audit records
//! that explain each allocation step, and the [`CompensationStatement`]
//! that packages a run for reporting.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PhysicianKind;
use super::money::OrZero;

/// Components that make up one physician's compensation.
///
/// A component is present only when it applies to the physician. Partner
/// results always carry `fte_share`; employee-only results carry only
/// `w2_salary`.
///
/// # Example
///
/// ```
/// use physician_comp_engine::models::CompensationBreakdown;
/// use rust_decimal::Decimal;
///
/// let breakdown = CompensationBreakdown {
///     w2_salary: Some(Decimal::from(200_000)),
///     ..Default::default()
/// };
/// assert_eq!(breakdown.components_total(), Decimal::from(200_000));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompensationBreakdown {
    /// Share of the distributable pool by weighted FTE.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fte_share: Option<Decimal>,
    /// Shared plus PRCS medical-director allocation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md_allocation: Option<Decimal>,
    /// Direct allocation for additional days worked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_days_allocation: Option<Decimal>,
    /// Retirement buyout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyout: Option<Decimal>,
    /// Prior-year W2 earnings paid this year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delayed_w2: Option<Decimal>,
    /// Fixed trailing shared-MD amount for a prior-year retiree.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailing_md: Option<Decimal>,
    /// Pro-rated W2 salary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w2_salary: Option<Decimal>,
}

impl CompensationBreakdown {
    /// Sums every component, including the W2 components.
    pub fn components_total(&self) -> Decimal {
        self.fte_share.or_zero()
            + self.md_allocation.or_zero()
            + self.additional_days_allocation.or_zero()
            + self.buyout.or_zero()
            + self.delayed_w2.or_zero()
            + self.trailing_md.or_zero()
            + self.w2_salary.or_zero()
    }

    /// Sums the W2 components only.
    pub fn w2_total(&self) -> Decimal {
        self.w2_salary.or_zero() + self.delayed_w2.or_zero()
    }
}

/// The computed compensation for one physician.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompensationResult {
    /// The physician's id.
    pub id: String,
    /// The physician's name.
    pub name: String,
    /// `partner` for every partner-like type, otherwise the physician's own type.
    #[serde(rename = "type")]
    pub physician_type: PhysicianKind,
    /// Final compensation total.
    pub comp: Decimal,
    /// The components behind `comp`.
    pub breakdown: CompensationBreakdown,
}

/// A single step in the audit trace recording an allocation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning raised during allocation or validation.
///
/// Warnings never change computed results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The audit trace of one compensation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of allocation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during allocation.
    pub warnings: Vec<AuditWarning>,
}

/// Run-level totals of one compensation run.
///
/// This is what an [`AllocationObserver`](crate::calculation::AllocationObserver)
/// receives once the pools are known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationSummary {
    /// The fiscal year computed.
    pub year: i32,
    /// Employer cost of all employee-status time.
    pub total_employee_cost: Decimal,
    /// Buyouts owed to retiring partners.
    pub total_buyout_cost: Decimal,
    /// Delayed W2 payments plus their taxes.
    pub total_delayed_w2_cost: Decimal,
    /// Shared medical-director income pool.
    pub shared_md_pool: Decimal,
    /// PRCS medical-director income pool (zero when no director is designated).
    pub prcs_md_pool: Decimal,
    /// Fixed trailing MD carve-outs for prior-year retirees.
    pub trailing_md_total: Decimal,
    /// All medical-director allocations including trailing carve-outs.
    pub total_md_allocations: Decimal,
    /// Additional-days allocations across partners.
    pub total_additional_days: Decimal,
    /// Total practice income.
    pub total_income: Decimal,
    /// Total practice costs.
    pub total_costs: Decimal,
    /// Income less costs, floored at zero.
    pub base_pool: Decimal,
    /// Base pool less direct allocations, floored at zero.
    pub distributable_pool: Decimal,
    /// Sum of partner FTE weights before the zero-divisor substitution.
    pub total_partner_weight: Decimal,
    /// The step-by-step audit trace.
    pub audit_trace: AuditTrace,
}

/// A compensation run packaged for reporting.
///
/// The identifier and timestamp belong to the statement, not to the
/// computation; `results` are exactly what the engine returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationStatement {
    /// Unique identifier for this statement.
    pub statement_id: Uuid,
    /// When the statement was generated.
    pub generated_at: DateTime<Utc>,
    /// The version of the engine that produced the results.
    pub engine_version: String,
    /// The fiscal year computed.
    pub year: i32,
    /// Per-physician results in engine order.
    pub results: Vec<CompensationResult>,
    /// Run-level totals and audit trace.
    pub summary: AllocationSummary,
}

impl CompensationStatement {
    /// Sums `comp` across every result.
    pub fn total_compensation(&self) -> Decimal {
        self.results.iter().map(|r| r.comp).sum()
    }

    /// Finds the result for a physician id.
    pub fn result_for(&self, id: &str) -> Option<&CompensationResult> {
        self.results.iter().find(|r| r.id == id)
    }
}
