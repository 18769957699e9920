//! Fiscal-year financial parameters and engine options.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Financial inputs for one fiscal year.
///
/// Every amount is optional and read as zero when absent, except the two
/// medical-director pools which fall back to the practice baselines.
///
/// # Example
///
/// ```
/// use physician_comp_engine::models::FiscalYearFinancials;
///
/// let json = r#"{"therapyIncome": 1000000, "nonEmploymentCosts": 200000}"#;
/// let financials: FiscalYearFinancials = serde_json::from_str(json).unwrap();
/// assert!(financials.medical_director_hours.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FiscalYearFinancials {
    /// Income from therapy services.
    pub therapy_income: Option<Decimal>,
    /// Shared medical-director income pool.
    pub medical_director_hours: Option<Decimal>,
    /// PRCS medical-director income pool, paid to the designated director.
    pub prcs_medical_director_hours: Option<Decimal>,
    /// Consulting services income.
    pub consulting_services_income: Option<Decimal>,
    /// Costs unrelated to employment.
    pub non_employment_costs: Option<Decimal>,
    /// Employment costs for non-physician staff.
    pub non_md_employment_costs: Option<Decimal>,
    /// Miscellaneous employment costs.
    pub misc_employment_costs: Option<Decimal>,
    /// Locum coverage costs.
    pub locum_costs: Option<Decimal>,
    /// Annual growth rate of benefit costs, as a fraction.
    ///
    /// Informational only. The engine ignores this field and grows benefits
    /// by the `benefit_growth_rate` argument it is called with.
    pub benefit_cost_growth_rate: Option<Decimal>,
    /// Physician designated as PRCS medical director, if any.
    pub prcs_director_physician_id: Option<String>,
}

/// Switches that change what the engine reports.
///
/// # Example
///
/// ```
/// use physician_comp_engine::models::CompensationOptions;
///
/// let options = CompensationOptions::default();
/// assert!(!options.include_retired);
/// assert!(!options.exclude_w2_from_comp);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompensationOptions {
    /// Report prior-year retirees whose time weight is zero.
    pub include_retired: bool,
    /// Report W2 salary and delayed W2 in the breakdown without adding them to `comp`.
    pub exclude_w2_from_comp: bool,
}

impl CompensationOptions {
    /// Returns these options with `include_retired` forced on.
    pub fn with_retired(self) -> Self {
        Self {
            include_retired: true,
            ..self
        }
    }
}
