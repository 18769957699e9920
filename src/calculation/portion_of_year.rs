//! Pro-ration of a physician's year between employee and partner status.
//!
//! Transition fractions come straight from the physician's role. Absent
//! fractions read as zero, and every result is clamped into `[0, 1]`.

use rust_decimal::Decimal;

use crate::models::{OrZero, Physician, PhysicianRole, clamp_fraction};

/// Returns the fraction of the year the physician spent in employee status.
///
/// | Type | Fraction |
/// |---|---|
/// | `employee` | 1 |
/// | `newEmployee` | 1 − start portion |
/// | `employeeToTerminate` | terminate portion |
/// | `employeeToPartner` | employee portion |
/// | `partner`, `partnerToRetire` | 0 |
///
/// # Examples
///
/// ```
/// use physician_comp_engine::calculation::employee_portion_of_year;
/// use physician_comp_engine::models::{Physician, PhysicianRole};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let joiner = Physician::new(
///     "phys_005",
///     "Dr. Shah",
///     PhysicianRole::NewEmployee {
///         start_portion_of_year: Some(Decimal::from_str("0.25").unwrap()),
///     },
/// );
/// assert_eq!(employee_portion_of_year(&joiner), Decimal::from_str("0.75").unwrap());
/// ```
pub fn employee_portion_of_year(physician: &Physician) -> Decimal {
    let portion = match &physician.role {
        PhysicianRole::Employee => Decimal::ONE,
        PhysicianRole::NewEmployee {
            start_portion_of_year,
        } => Decimal::ONE - start_portion_of_year.or_zero(),
        PhysicianRole::EmployeeToTerminate {
            terminate_portion_of_year,
        } => terminate_portion_of_year.or_zero(),
        PhysicianRole::EmployeeToPartner {
            employee_portion_of_year,
        } => employee_portion_of_year.or_zero(),
        PhysicianRole::Partner | PhysicianRole::PartnerToRetire { .. } => Decimal::ZERO,
    };
    clamp_fraction(portion)
}

/// Returns the fraction of the year the physician spent in partner status.
///
/// `partner` is 1, `employeeToPartner` is the complement of its employee
/// portion, `partnerToRetire` is its partner portion, and the employee
/// types are 0.
pub fn partner_portion_of_year(physician: &Physician) -> Decimal {
    let portion = match &physician.role {
        PhysicianRole::Partner => Decimal::ONE,
        PhysicianRole::EmployeeToPartner {
            employee_portion_of_year,
        } => Decimal::ONE - employee_portion_of_year.or_zero(),
        PhysicianRole::PartnerToRetire {
            partner_portion_of_year,
            ..
        } => partner_portion_of_year.or_zero(),
        PhysicianRole::Employee
        | PhysicianRole::NewEmployee { .. }
        | PhysicianRole::EmployeeToTerminate { .. } => Decimal::ZERO,
    };
    clamp_fraction(portion)
}
