//! Physician model and related types.
//!
//! A [`Physician`] describes one person's configuration for one fiscal year.
//! The employment transition the physician is going through is carried by
//! [`PhysicianRole`], a sum type whose variants hold only the fields that
//! make sense for that transition.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::OrZero;

/// The six physician type tags, without variant data.
///
/// Used wherever only the discriminant matters, such as compensation results
/// and audit output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PhysicianKind {
    /// Partner for the whole year.
    Partner,
    /// W2 employee for the whole year.
    Employee,
    /// Employee who becomes a partner during the year.
    EmployeeToPartner,
    /// Partner who retires during (or before) the year.
    PartnerToRetire,
    /// Employee who starts during the year.
    NewEmployee,
    /// Employee whose employment ends during the year.
    EmployeeToTerminate,
}

impl PhysicianKind {
    /// Returns the tag as it appears in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            PhysicianKind::Partner => "partner",
            PhysicianKind::Employee => "employee",
            PhysicianKind::EmployeeToPartner => "employeeToPartner",
            PhysicianKind::PartnerToRetire => "partnerToRetire",
            PhysicianKind::NewEmployee => "newEmployee",
            PhysicianKind::EmployeeToTerminate => "employeeToTerminate",
        }
    }
}

/// The employment transition of a physician, with its transition-specific data.
///
/// Serialized with an internal `type` tag, so a physician record reads
/// `{"type": "partnerToRetire", "partnerPortionOfYear": "0.5", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum PhysicianRole {
    /// Partner for the whole year.
    Partner,
    /// W2 employee for the whole year.
    Employee,
    /// Employee for the first part of the year, partner for the rest.
    EmployeeToPartner {
        /// Fraction of the year spent as an employee.
        #[serde(default)]
        employee_portion_of_year: Option<Decimal>,
    },
    /// Partner who retires. A partner portion of zero marks a prior-year retiree.
    PartnerToRetire {
        /// Fraction of the year worked as a partner before retiring.
        #[serde(default)]
        partner_portion_of_year: Option<Decimal>,
        /// Buyout owed to the retiring partner this year.
        #[serde(default)]
        buyout_cost: Option<Decimal>,
        /// Fixed trailing shared-MD amount owed to a prior-year retiree.
        #[serde(default)]
        trailing_shared_md_amount: Option<Decimal>,
    },
    /// Employee who joins part way through the year.
    NewEmployee {
        /// Fraction of the year elapsed before the start date.
        #[serde(default)]
        start_portion_of_year: Option<Decimal>,
    },
    /// Employee who leaves part way through the year.
    EmployeeToTerminate {
        /// Fraction of the year worked before termination.
        #[serde(default)]
        terminate_portion_of_year: Option<Decimal>,
    },
}

impl PhysicianRole {
    /// Returns the plain discriminant for this role.
    pub fn kind(&self) -> PhysicianKind {
        match self {
            PhysicianRole::Partner => PhysicianKind::Partner,
            PhysicianRole::Employee => PhysicianKind::Employee,
            PhysicianRole::EmployeeToPartner { .. } => PhysicianKind::EmployeeToPartner,
            PhysicianRole::PartnerToRetire { .. } => PhysicianKind::PartnerToRetire,
            PhysicianRole::NewEmployee { .. } => PhysicianKind::NewEmployee,
            PhysicianRole::EmployeeToTerminate { .. } => PhysicianKind::EmployeeToTerminate,
        }
    }
}

/// One physician's configuration for one fiscal year.
///
/// Every numeric field is optional; the engine reads absent values as zero.
///
/// # Example
///
/// ```
/// use physician_comp_engine::models::{Physician, PhysicianKind, PhysicianRole};
/// use rust_decimal::Decimal;
///
/// let physician = Physician::new("phys_001", "Dr. Lee", PhysicianRole::Employee)
///     .with_salary(Decimal::from(200_000));
///
/// assert_eq!(physician.kind(), PhysicianKind::Employee);
/// assert!(physician.is_employee_like());
/// assert!(!physician.is_partner_like());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Physician {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Employment transition and its variant-specific fields.
    #[serde(flatten)]
    pub role: PhysicianRole,
    /// Annual W2 salary.
    #[serde(default)]
    pub salary: Option<Decimal>,
    /// Whether the employer pays benefits for this physician.
    #[serde(default)]
    pub receives_benefits: bool,
    /// Whether the employer pays a bonus to this physician.
    #[serde(default)]
    pub receives_bonuses: bool,
    /// Full-year bonus paid when `receives_bonuses` is set, pro-rated like salary.
    #[serde(default)]
    pub bonus_amount: Option<Decimal>,
    /// Weeks of time off during the physician's partner period.
    #[serde(default)]
    pub weeks_off: Option<Decimal>,
    /// Whether the physician holds shared medical-director hours.
    #[serde(default)]
    pub has_medical_director_hours: bool,
    /// Share of the shared-MD pool, in percent of the whole pool.
    #[serde(default)]
    pub medical_director_hours_percentage: Option<Decimal>,
    /// Dollar value of additional days worked, paid directly.
    #[serde(default)]
    pub additional_days_worked: Option<Decimal>,
}

impl Physician {
    /// Creates a physician with the given role and every optional field unset.
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: PhysicianRole) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
            salary: None,
            receives_benefits: false,
            receives_bonuses: false,
            bonus_amount: None,
            weeks_off: None,
            has_medical_director_hours: false,
            medical_director_hours_percentage: None,
            additional_days_worked: None,
        }
    }

    /// Sets the annual salary.
    pub fn with_salary(mut self, salary: Decimal) -> Self {
        self.salary = Some(salary);
        self
    }

    /// Sets the weeks off.
    pub fn with_weeks_off(mut self, weeks_off: Decimal) -> Self {
        self.weeks_off = Some(weeks_off);
        self
    }

    /// Grants shared medical-director hours at the given percentage of the pool.
    pub fn with_medical_director_percentage(mut self, percentage: Decimal) -> Self {
        self.has_medical_director_hours = true;
        self.medical_director_hours_percentage = Some(percentage);
        self
    }

    /// Sets the dollar value of additional days worked.
    pub fn with_additional_days(mut self, amount: Decimal) -> Self {
        self.additional_days_worked = Some(amount);
        self
    }

    /// Returns the plain type tag.
    pub fn kind(&self) -> PhysicianKind {
        self.role.kind()
    }

    /// True for `partner`, `employeeToPartner` and `partnerToRetire`.
    pub fn is_partner_like(&self) -> bool {
        match self.role {
            PhysicianRole::Partner
            | PhysicianRole::EmployeeToPartner { .. }
            | PhysicianRole::PartnerToRetire { .. } => true,
            PhysicianRole::Employee
            | PhysicianRole::NewEmployee { .. }
            | PhysicianRole::EmployeeToTerminate { .. } => false,
        }
    }

    /// True for every type that carries W2 employment cost, including `employeeToPartner`.
    pub fn is_employee_like(&self) -> bool {
        match self.role {
            PhysicianRole::Employee
            | PhysicianRole::EmployeeToPartner { .. }
            | PhysicianRole::NewEmployee { .. }
            | PhysicianRole::EmployeeToTerminate { .. } => true,
            PhysicianRole::Partner | PhysicianRole::PartnerToRetire { .. } => false,
        }
    }

    /// True for the employee types that receive only a W2 result.
    pub fn is_employee_only(&self) -> bool {
        self.is_employee_like() && !self.is_partner_like()
    }

    /// True for a `partnerToRetire` physician who did no partner work this year.
    pub fn is_prior_year_retiree(&self) -> bool {
        match &self.role {
            PhysicianRole::PartnerToRetire {
                partner_portion_of_year,
                ..
            } => partner_portion_of_year.or_zero().is_zero(),
            _ => false,
        }
    }

    /// Buyout owed this year; zero for every type but `partnerToRetire`.
    pub fn buyout_cost(&self) -> Decimal {
        match &self.role {
            PhysicianRole::PartnerToRetire { buyout_cost, .. } => buyout_cost.or_zero(),
            _ => Decimal::ZERO,
        }
    }

    /// Explicit trailing shared-MD amount, if one was configured.
    pub fn trailing_shared_md_amount(&self) -> Option<Decimal> {
        match &self.role {
            PhysicianRole::PartnerToRetire {
                trailing_shared_md_amount,
                ..
            } => *trailing_shared_md_amount,
            _ => None,
        }
    }
}
