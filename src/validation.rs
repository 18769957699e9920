//! Roster checks for callers.
//!
//! The engine accepts any well-typed roster and never calls into this
//! module. Callers that want to surface input problems before computing
//! use these checks.

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditWarning, OrZero, Physician, PhysicianRole};

const ONE_HUNDRED: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Warns when active partners' medical-director percentages do not sum to 100.
///
/// Only partners who claim medical-director hours and worked part of the
/// year count. A roster where nobody claims hours produces no warning.
///
/// # Example
///
/// ```
/// use physician_comp_engine::models::{Physician, PhysicianRole};
/// use physician_comp_engine::validation::validate_medical_director_percentages;
/// use rust_decimal::Decimal;
///
/// let roster = vec![
///     Physician::new("a", "Dr. A", PhysicianRole::Partner)
///         .with_medical_director_percentage(Decimal::from(60)),
///     Physician::new("b", "Dr. B", PhysicianRole::Partner)
///         .with_medical_director_percentage(Decimal::from(30)),
/// ];
///
/// let warnings = validate_medical_director_percentages(&roster);
/// assert_eq!(warnings.len(), 1);
/// assert_eq!(warnings[0].code, "MD_PERCENTAGE_SUM");
/// ```
pub fn validate_medical_director_percentages(physicians: &[Physician]) -> Vec<AuditWarning> {
    let claimants: Vec<&Physician> = physicians
        .iter()
        .filter(|p| p.is_partner_like() && !p.is_prior_year_retiree())
        .filter(|p| p.has_medical_director_hours)
        .collect();

    if claimants.is_empty() {
        return Vec::new();
    }

    let total: Decimal = claimants
        .iter()
        .map(|p| p.medical_director_hours_percentage.or_zero())
        .sum();

    if total == ONE_HUNDRED {
        return Vec::new();
    }

    let direction = if total > ONE_HUNDRED {
        "over-allocates"
    } else {
        "under-allocates"
    };

    vec![AuditWarning {
        code: "MD_PERCENTAGE_SUM".to_string(),
        message: format!(
            "Medical director percentages across {} partners sum to {}%, which {} the shared pool",
            claimants.len(),
            total.normalize(),
            direction
        ),
        severity: "medium".to_string(),
    }]
}

/// Checks each physician's fields are in range and ids are unique.
///
/// Returns the first problem found.
pub fn validate_roster(physicians: &[Physician]) -> EngineResult<()> {
    let mut seen: HashSet<&str> = HashSet::new();

    for physician in physicians {
        if !seen.insert(physician.id.as_str()) {
            return Err(invalid(physician, "id", "duplicate physician id"));
        }

        let portion = match &physician.role {
            PhysicianRole::EmployeeToPartner {
                employee_portion_of_year,
            } => Some(("employeePortionOfYear", *employee_portion_of_year)),
            PhysicianRole::PartnerToRetire {
                partner_portion_of_year,
                ..
            } => Some(("partnerPortionOfYear", *partner_portion_of_year)),
            PhysicianRole::NewEmployee {
                start_portion_of_year,
            } => Some(("startPortionOfYear", *start_portion_of_year)),
            PhysicianRole::EmployeeToTerminate {
                terminate_portion_of_year,
            } => Some(("terminatePortionOfYear", *terminate_portion_of_year)),
            PhysicianRole::Partner | PhysicianRole::Employee => None,
        };
        if let Some((field, Some(value))) = portion {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(invalid(
                    physician,
                    field,
                    &format!("{} is outside [0, 1]", value.normalize()),
                ));
            }
        }

        let amounts = [
            ("salary", physician.salary),
            ("bonusAmount", physician.bonus_amount),
            ("weeksOff", physician.weeks_off),
            (
                "medicalDirectorHoursPercentage",
                physician.medical_director_hours_percentage,
            ),
            ("additionalDaysWorked", physician.additional_days_worked),
            ("buyoutCost", Some(physician.buyout_cost())),
            ("trailingSharedMdAmount", physician.trailing_shared_md_amount()),
        ];
        for (field, value) in amounts {
            if value.or_zero() < Decimal::ZERO {
                return Err(invalid(physician, field, "must not be negative"));
            }
        }
    }

    Ok(())
}

fn invalid(physician: &Physician, field: &str, message: &str) -> EngineError {
    EngineError::InvalidPhysician {
        id: physician.id.clone(),
        field: field.to_string(),
        message: message.to_string(),
    }
}
