//! The practice model: cost, pro-ration and default lookups the engine relies on.
//!
//! The allocation engine treats these as black boxes behind the
//! [`PracticeModel`] trait. [`StandardPracticeModel`] implements them from a
//! [`PracticeConfig`]; callers with their own payroll or FTE rules can supply
//! another implementation.

use rust_decimal::Decimal;

use crate::config::PracticeConfig;
use crate::models::{Physician, PhysicianRole};

use super::delayed_w2::{DelayedW2Payment, delayed_w2_payment};
use super::employee_cost::{ProRatedEmployee, employer_cost};
use super::fte_weight::partner_fte_weight;
use super::portion_of_year::employee_portion_of_year;

/// Collaborators consulted by the allocation engine.
///
/// Every method must be deterministic and free of side effects.
pub trait PracticeModel {
    /// Total employer cost (wages, benefits, taxes) of pro-rated employee time.
    fn employee_cost(
        &self,
        employee: &ProRatedEmployee<'_>,
        year: i32,
        benefit_growth_rate: Decimal,
    ) -> Decimal;

    /// Prior-year W2 pay that posts in `year`, with its employer taxes.
    fn delayed_w2(&self, physician: &Physician, year: i32) -> DelayedW2Payment;

    /// Fraction of the year spent in employee status, in `[0, 1]`.
    fn employee_portion_of_year(&self, physician: &Physician) -> Decimal;

    /// Normalized partner working-time weight, never negative.
    fn partner_fte_weight(&self, physician: &Physician) -> Decimal;

    /// Trailing shared-MD amount for a prior-year retiree without an override.
    fn default_trailing_md(&self, physician: &Physician) -> Decimal;

    /// Shared-MD pool used when the fiscal year omits it.
    fn shared_md_baseline(&self) -> Decimal;

    /// PRCS-MD pool used when the fiscal year omits it.
    fn prcs_md_baseline(&self) -> Decimal;
}

/// The practice model backed by a [`PracticeConfig`].
///
/// # Example
///
/// ```
/// use physician_comp_engine::calculation::{PracticeModel, StandardPracticeModel};
/// use physician_comp_engine::models::{Physician, PhysicianRole};
/// use rust_decimal::Decimal;
///
/// let model = StandardPracticeModel::default();
/// let partner = Physician::new("phys_001", "Dr. Adams", PhysicianRole::Partner);
/// assert_eq!(model.partner_fte_weight(&partner), Decimal::ONE);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StandardPracticeModel {
    config: PracticeConfig,
}

impl StandardPracticeModel {
    /// Creates a model from a practice configuration.
    pub fn new(config: PracticeConfig) -> Self {
        Self { config }
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &PracticeConfig {
        &self.config
    }
}

impl PracticeModel for StandardPracticeModel {
    fn employee_cost(
        &self,
        employee: &ProRatedEmployee<'_>,
        year: i32,
        benefit_growth_rate: Decimal,
    ) -> Decimal {
        employer_cost(
            employee,
            year,
            benefit_growth_rate,
            self.config.benefits(),
            self.config.tax_table_for(year),
        )
    }

    fn delayed_w2(&self, physician: &Physician, year: i32) -> DelayedW2Payment {
        match physician.role {
            PhysicianRole::EmployeeToPartner { .. } => delayed_w2_payment(
                physician,
                year,
                self.config.assumptions().payroll_lag_days,
                self.config.tax_table_for(year),
            ),
            _ => DelayedW2Payment::default(),
        }
    }

    fn employee_portion_of_year(&self, physician: &Physician) -> Decimal {
        employee_portion_of_year(physician)
    }

    fn partner_fte_weight(&self, physician: &Physician) -> Decimal {
        partner_fte_weight(physician, self.config.assumptions().weeks_per_year)
    }

    fn default_trailing_md(&self, _physician: &Physician) -> Decimal {
        self.config.assumptions().default_trailing_shared_md_amount
    }

    fn shared_md_baseline(&self) -> Decimal {
        self.config.assumptions().shared_md_baseline
    }

    fn prcs_md_baseline(&self) -> Decimal {
        self.config.assumptions().prcs_md_baseline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BenefitsConfig, PracticeAssumptions};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_baselines_come_from_assumptions() {
        let assumptions = PracticeAssumptions {
            shared_md_baseline: dec("120000"),
            prcs_md_baseline: dec("45000"),
            default_trailing_shared_md_amount: dec("9000"),
            ..PracticeAssumptions::default()
        };
        let model = StandardPracticeModel::new(PracticeConfig::new(
            assumptions,
            BenefitsConfig::default(),
            vec![],
        ));
        let retiree = Physician::new(
            "r",
            "R",
            PhysicianRole::PartnerToRetire {
                partner_portion_of_year: None,
                buyout_cost: None,
                trailing_shared_md_amount: None,
            },
        );

        assert_eq!(model.shared_md_baseline(), dec("120000"));
        assert_eq!(model.prcs_md_baseline(), dec("45000"));
        assert_eq!(model.default_trailing_md(&retiree), dec("9000"));
    }

    #[test]
    fn test_delayed_w2_only_for_employee_to_partner() {
        let model = StandardPracticeModel::default();
        let partner = Physician::new("a", "A", PhysicianRole::Partner).with_salary(dec("300000"));
        let transitioning = Physician::new(
            "t",
            "T",
            PhysicianRole::EmployeeToPartner {
                employee_portion_of_year: Some(dec("0.5")),
            },
        )
        .with_salary(dec("365000"));

        assert_eq!(model.delayed_w2(&partner, 2025), DelayedW2Payment::default());

        // 2024 has 366 days.
        let payment = model.delayed_w2(&transitioning, 2025);
        assert_eq!(payment.amount, dec("365000") * dec("14") / dec("366"));
        assert!(payment.taxes > Decimal::ZERO);
    }

    #[test]
    fn test_weeks_per_year_from_assumptions() {
        let assumptions = PracticeAssumptions {
            weeks_per_year: dec("48"),
            ..PracticeAssumptions::default()
        };
        let model = StandardPracticeModel::new(PracticeConfig::new(
            assumptions,
            BenefitsConfig::default(),
            vec![],
        ));
        let partner = Physician::new("a", "A", PhysicianRole::Partner).with_weeks_off(dec("12"));

        assert_eq!(model.partner_fte_weight(&partner), dec("0.75"));
    }
}
