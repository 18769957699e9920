//! Configuration types for the practice model.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML files of a practice configuration directory.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};

/// Practice-wide assumptions from `practice.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PracticeAssumptions {
    /// Shared-MD pool used when a fiscal year omits it.
    pub shared_md_baseline: Decimal,
    /// PRCS-MD pool used when a fiscal year omits it.
    pub prcs_md_baseline: Decimal,
    /// Trailing shared-MD amount for a prior-year retiree without an override.
    pub default_trailing_shared_md_amount: Decimal,
    /// Working weeks in a partner year.
    pub weeks_per_year: Decimal,
    /// Days of prior-year W2 pay that post in the following year.
    pub payroll_lag_days: u32,
}

impl Default for PracticeAssumptions {
    fn default() -> Self {
        Self {
            shared_md_baseline: Decimal::new(97_200, 0),
            prcs_md_baseline: Decimal::new(60_000, 0),
            default_trailing_shared_md_amount: Decimal::new(8_000, 0),
            weeks_per_year: Decimal::new(52, 0),
            payroll_lag_days: 14,
        }
    }
}

/// Employee benefit costs from `benefits.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BenefitsConfig {
    /// The year `annual_benefit_cost` is expressed in.
    pub base_year: i32,
    /// Full-year employer benefit cost for one physician in the base year.
    pub annual_benefit_cost: Decimal,
}

impl Default for BenefitsConfig {
    fn default() -> Self {
        Self {
            base_year: 2025,
            annual_benefit_cost: Decimal::new(32_000, 0),
        }
    }
}

/// Employer payroll tax rates effective from a given year.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PayrollTaxTable {
    /// First year these rates apply to.
    pub effective_year: i32,
    /// Employer social security rate.
    pub social_security_rate: Decimal,
    /// Wages above this amount are not subject to social security.
    pub social_security_wage_base: Decimal,
    /// Employer Medicare rate, uncapped.
    pub medicare_rate: Decimal,
    /// Employer unemployment insurance rate.
    pub unemployment_rate: Decimal,
    /// Wages above this amount are not subject to unemployment insurance.
    pub unemployment_wage_base: Decimal,
}

impl PayrollTaxTable {
    /// Employer payroll taxes on one year's wages.
    pub fn employer_taxes(&self, wages: Decimal) -> Decimal {
        if wages <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        let social_security = wages.min(self.social_security_wage_base) * self.social_security_rate;
        let medicare = wages * self.medicare_rate;
        let unemployment = wages.min(self.unemployment_wage_base) * self.unemployment_rate;
        social_security + medicare + unemployment
    }

    /// Employer social security and Medicare on a payment, ignoring wage bases.
    pub fn fica_on(&self, amount: Decimal) -> Decimal {
        if amount <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        amount * (self.social_security_rate + self.medicare_rate)
    }
}

/// The complete practice configuration loaded from YAML files.
#[derive(Debug, Clone, PartialEq)]
pub struct PracticeConfig {
    assumptions: PracticeAssumptions,
    benefits: BenefitsConfig,
    /// Tax tables sorted oldest first.
    tax_tables: Vec<PayrollTaxTable>,
}

impl PracticeConfig {
    /// Creates a new PracticeConfig from its component parts.
    pub fn new(
        assumptions: PracticeAssumptions,
        benefits: BenefitsConfig,
        tax_tables: Vec<PayrollTaxTable>,
    ) -> Self {
        let mut sorted_tables = tax_tables;
        sorted_tables.sort_by_key(|t| t.effective_year);
        Self {
            assumptions,
            benefits,
            tax_tables: sorted_tables,
        }
    }

    /// Returns the practice assumptions.
    pub fn assumptions(&self) -> &PracticeAssumptions {
        &self.assumptions
    }

    /// Returns the benefits configuration.
    pub fn benefits(&self) -> &BenefitsConfig {
        &self.benefits
    }

    /// Returns all tax tables, oldest first.
    pub fn tax_tables(&self) -> &[PayrollTaxTable] {
        &self.tax_tables
    }

    /// Returns the tax table effective for `year`.
    ///
    /// Falls back to the earliest table for years that predate every table,
    /// and returns `None` only when there are no tables at all.
    pub fn tax_table_for(&self, year: i32) -> Option<&PayrollTaxTable> {
        self.tax_tables
            .iter()
            .rfind(|t| t.effective_year <= year)
            .or_else(|| self.tax_tables.first())
    }

    /// Checks every assumption is within range.
    pub fn validate(&self) -> EngineResult<()> {
        let a = &self.assumptions;
        require_non_negative("shared_md_baseline", a.shared_md_baseline)?;
        require_non_negative("prcs_md_baseline", a.prcs_md_baseline)?;
        require_non_negative(
            "default_trailing_shared_md_amount",
            a.default_trailing_shared_md_amount,
        )?;
        if a.weeks_per_year <= Decimal::ZERO {
            return Err(EngineError::InvalidAssumption {
                field: "weeks_per_year".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        require_non_negative("annual_benefit_cost", self.benefits.annual_benefit_cost)?;

        for table in &self.tax_tables {
            require_non_negative("social_security_rate", table.social_security_rate)?;
            require_non_negative("social_security_wage_base", table.social_security_wage_base)?;
            require_non_negative("medicare_rate", table.medicare_rate)?;
            require_non_negative("unemployment_rate", table.unemployment_rate)?;
            require_non_negative("unemployment_wage_base", table.unemployment_wage_base)?;
        }
        Ok(())
    }
}

impl Default for PracticeConfig {
    fn default() -> Self {
        Self::new(
            PracticeAssumptions::default(),
            BenefitsConfig::default(),
            vec![PayrollTaxTable {
                effective_year: 2025,
                social_security_rate: Decimal::new(62, 3),
                social_security_wage_base: Decimal::new(176_100, 0),
                medicare_rate: Decimal::new(145, 4),
                unemployment_rate: Decimal::new(6, 3),
                unemployment_wage_base: Decimal::new(7_000, 0),
            }],
        )
    }
}

fn require_non_negative(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::InvalidAssumption {
            field: field.to_string(),
            message: format!("must not be negative (got {})", value),
        });
    }
    Ok(())
}
