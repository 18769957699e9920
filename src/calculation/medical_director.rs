//! Medical-director income allocation.
//!
//! Two pools exist. The shared-MD pool is split among active partners by
//! their declared percentage of the whole pool, after fixed-dollar trailing
//! carve-outs for prior-year retirees. The PRCS-MD pool goes entirely to the
//! designated PRCS director.
//!
//! Percentages are not checked against 100; see
//! [`validate_medical_director_percentages`](crate::validation::validate_medical_director_percentages).

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::models::{AuditStep, AuditWarning, FiscalYearFinancials, OrZero, Physician};

use super::PracticeModel;

const ONE_HUNDRED: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// The result of allocating medical-director income.
#[derive(Debug, Clone)]
pub struct MdAllocationResult {
    /// Shared-MD income pool for the year.
    pub shared_md_pool: Decimal,
    /// PRCS-MD income pool; zero when no director is designated.
    pub prcs_md_pool: Decimal,
    /// Trailing carve-outs owed to prior-year retirees.
    pub trailing_md_total: Decimal,
    /// Shared plus PRCS allocation per active partner id.
    pub allocations: HashMap<String, Decimal>,
    /// Sum of `allocations` plus `trailing_md_total`.
    pub total_md_allocations: Decimal,
    /// Anomalies tolerated during allocation.
    pub warnings: Vec<AuditWarning>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns a prior-year retiree's trailing shared-MD amount.
///
/// The explicit `trailingSharedMdAmount` wins; otherwise the model default applies.
pub fn trailing_md_amount(physician: &Physician, model: &dyn PracticeModel) -> Decimal {
    physician
        .trailing_shared_md_amount()
        .unwrap_or_else(|| model.default_trailing_md(physician))
}

/// Returns the designated PRCS director id, ignoring blank values.
pub fn prcs_director_id(financials: &FiscalYearFinancials) -> Option<&str> {
    financials
        .prcs_director_physician_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
}

/// Allocates shared and PRCS medical-director income across partners.
///
/// # Arguments
///
/// * `partners` - Partner-like physicians in roster order
/// * `financials` - The fiscal year's financial parameters
/// * `model` - Supplies the pool baselines and default trailing amount
/// * `step_number` - The step number for audit trail sequencing
pub fn allocate_medical_director_income(
    partners: &[&Physician],
    financials: &FiscalYearFinancials,
    model: &dyn PracticeModel,
    step_number: u32,
) -> MdAllocationResult {
    let shared_md_pool = financials
        .medical_director_hours
        .unwrap_or_else(|| model.shared_md_baseline());

    let director_id = prcs_director_id(financials);
    let prcs_md_pool = match director_id {
        Some(_) => financials
            .prcs_medical_director_hours
            .unwrap_or_else(|| model.prcs_md_baseline()),
        None => Decimal::ZERO,
    };

    let trailing_md_total: Decimal = partners
        .iter()
        .filter(|p| p.is_prior_year_retiree())
        .map(|p| trailing_md_amount(p, model))
        .sum();

    let mut allocations: HashMap<String, Decimal> = HashMap::new();
    for partner in partners.iter().filter(|p| !p.is_prior_year_retiree()) {
        let percentage = partner.medical_director_hours_percentage.or_zero();
        if partner.has_medical_director_hours && !percentage.is_zero() {
            *allocations.entry(partner.id.clone()).or_default() +=
                percentage / ONE_HUNDRED * shared_md_pool;
        }
    }

    let mut warnings = Vec::new();
    if let Some(director_id) = director_id {
        *allocations.entry(director_id.to_string()).or_default() += prcs_md_pool;

        let director_is_active = partners
            .iter()
            .any(|p| p.id == director_id && !p.is_prior_year_retiree());
        if !director_is_active {
            warnings.push(AuditWarning {
                code: "PRCS_DIRECTOR_NOT_ACTIVE".to_string(),
                message: format!(
                    "PRCS director '{}' is not an active partner; the PRCS pool is allocated but paid to no result",
                    director_id
                ),
                severity: "high".to_string(),
            });
        }
    }

    let total_md_allocations = allocations.values().copied().sum::<Decimal>() + trailing_md_total;

    let mut per_partner: Vec<(&String, &Decimal)> = allocations.iter().collect();
    per_partner.sort();
    let per_partner: Vec<serde_json::Value> = per_partner
        .into_iter()
        .map(|(id, amount)| {
            serde_json::json!({
                "id": id,
                "amount": amount.normalize().to_string()
            })
        })
        .collect();

    let audit_step = AuditStep {
        step_number,
        rule_id: "md_allocation".to_string(),
        rule_name: "Medical Director Allocation".to_string(),
        input: serde_json::json!({
            "shared_md_pool": shared_md_pool.normalize().to_string(),
            "prcs_md_pool": prcs_md_pool.normalize().to_string(),
            "prcs_director_id": director_id
        }),
        output: serde_json::json!({
            "allocations": per_partner,
            "trailing_md_total": trailing_md_total.normalize().to_string(),
            "total_md_allocations": total_md_allocations.normalize().to_string()
        }),
        reasoning: format!(
            "Shared pool ${} by declared percentage, PRCS pool ${}, trailing carve-outs ${}: ${} allocated",
            shared_md_pool.normalize(),
            prcs_md_pool.normalize(),
            trailing_md_total.normalize(),
            total_md_allocations.normalize()
        ),
    };

    MdAllocationResult {
        shared_md_pool,
        prcs_md_pool,
        trailing_md_total,
        allocations,
        total_md_allocations,
        warnings,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::StandardPracticeModel;
    use crate::models::PhysicianRole;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn partner(id: &str, md_percentage: Option<&str>) -> Physician {
        let p = Physician::new(id, format!("Dr. {}", id), PhysicianRole::Partner);
        match md_percentage {
            Some(pct) => p.with_medical_director_percentage(dec(pct)),
            None => p,
        }
    }

    fn prior_year_retiree(id: &str, trailing: Option<&str>) -> Physician {
        Physician::new(
            id,
            "Dr. Retired",
            PhysicianRole::PartnerToRetire {
                partner_portion_of_year: Some(Decimal::ZERO),
                buyout_cost: None,
                trailing_shared_md_amount: trailing.map(dec),
            },
        )
    }

    fn financials(shared: Option<&str>) -> FiscalYearFinancials {
        FiscalYearFinancials {
            medical_director_hours: shared.map(dec),
            ..Default::default()
        }
    }

    #[test]
    fn test_shared_pool_split_by_percentage() {
        let model = StandardPracticeModel::default();
        let a = partner("a", Some("60"));
        let b = partner("b", Some("40"));
        let partners = vec![&a, &b];

        let result =
            allocate_medical_director_income(&partners, &financials(Some("100000")), &model, 5);

        assert_eq!(result.allocations["a"], dec("60000"));
        assert_eq!(result.allocations["b"], dec("40000"));
        assert_eq!(result.total_md_allocations, dec("100000"));
        assert_eq!(result.prcs_md_pool, Decimal::ZERO);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_missing_shared_pool_uses_baseline() {
        let model = StandardPracticeModel::default();
        let a = partner("a", Some("100"));
        let partners = vec![&a];

        let result = allocate_medical_director_income(&partners, &financials(None), &model, 5);

        assert_eq!(result.shared_md_pool, dec("97200"));
        assert_eq!(result.allocations["a"], dec("97200"));
    }

    #[test]
    fn test_flag_without_percentage_gets_nothing() {
        let model = StandardPracticeModel::default();
        let mut a = partner("a", None);
        a.has_medical_director_hours = true;
        let mut b = partner("b", None);
        b.medical_director_hours_percentage = Some(dec("50"));
        let partners = vec![&a, &b];

        let result =
            allocate_medical_director_income(&partners, &financials(Some("100000")), &model, 5);

        assert!(result.allocations.is_empty());
        assert_eq!(result.total_md_allocations, Decimal::ZERO);
    }

    #[test]
    fn test_trailing_amount_is_fixed_carve_out() {
        let model = StandardPracticeModel::default();
        let a = partner("a", Some("90"));
        let r = prior_year_retiree("r", Some("10000"));
        let partners = vec![&a, &r];

        let result =
            allocate_medical_director_income(&partners, &financials(Some("100000")), &model, 5);

        // Percentages are of the whole pool, not of the remainder.
        assert_eq!(result.allocations["a"], dec("90000"));
        assert!(!result.allocations.contains_key("r"));
        assert_eq!(result.trailing_md_total, dec("10000"));
        assert_eq!(result.total_md_allocations, dec("100000"));
    }

    #[test]
    fn test_prior_year_retiree_percentage_is_ignored() {
        let model = StandardPracticeModel::default();
        let r = prior_year_retiree("r", Some("10000")).with_medical_director_percentage(dec("20"));
        let partners = vec![&r];

        let result =
            allocate_medical_director_income(&partners, &financials(Some("100000")), &model, 5);

        assert!(result.allocations.is_empty());
        assert_eq!(result.total_md_allocations, dec("10000"));
    }

    #[test]
    fn test_trailing_amount_defaults_from_model() {
        let model = StandardPracticeModel::default();
        let r = prior_year_retiree("r", None);
        assert_eq!(trailing_md_amount(&r, &model), dec("8000"));
    }

    #[test]
    fn test_prcs_pool_added_to_director_allocation() {
        let model = StandardPracticeModel::default();
        let a = partner("a", Some("50"));
        let b = partner("b", Some("50"));
        let partners = vec![&a, &b];
        let financials = FiscalYearFinancials {
            medical_director_hours: Some(dec("100000")),
            prcs_medical_director_hours: Some(dec("40000")),
            prcs_director_physician_id: Some("a".to_string()),
            ..Default::default()
        };

        let result = allocate_medical_director_income(&partners, &financials, &model, 5);

        assert_eq!(result.prcs_md_pool, dec("40000"));
        assert_eq!(result.allocations["a"], dec("90000"));
        assert_eq!(result.allocations["b"], dec("50000"));
        assert_eq!(result.total_md_allocations, dec("140000"));
    }

    #[test]
    fn test_prcs_pool_ignored_without_director() {
        let model = StandardPracticeModel::default();
        let a = partner("a", None);
        let partners = vec![&a];
        let financials = FiscalYearFinancials {
            prcs_medical_director_hours: Some(dec("40000")),
            prcs_director_physician_id: Some("  ".to_string()),
            ..Default::default()
        };

        let result = allocate_medical_director_income(&partners, &financials, &model, 5);

        assert_eq!(result.prcs_md_pool, Decimal::ZERO);
        assert!(result.allocations.is_empty());
    }

    #[test]
    fn test_prcs_director_missing_from_roster_warns() {
        let model = StandardPracticeModel::default();
        let a = partner("a", None);
        let partners = vec![&a];
        let financials = FiscalYearFinancials {
            medical_director_hours: Some(Decimal::ZERO),
            prcs_director_physician_id: Some("ghost".to_string()),
            ..Default::default()
        };

        let result = allocate_medical_director_income(&partners, &financials, &model, 5);

        assert_eq!(result.prcs_md_pool, dec("60000"));
        assert_eq!(result.allocations["ghost"], dec("60000"));
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code, "PRCS_DIRECTOR_NOT_ACTIVE");
    }

    #[test]
    fn test_over_allocation_is_not_corrected() {
        let model = StandardPracticeModel::default();
        let a = partner("a", Some("80"));
        let b = partner("b", Some("80"));
        let partners = vec![&a, &b];

        let result =
            allocate_medical_director_income(&partners, &financials(Some("100000")), &model, 5);

        assert_eq!(result.total_md_allocations, dec("160000"));
    }

    #[test]
    fn test_audit_step_lists_allocations() {
        let model = StandardPracticeModel::default();
        let a = partner("a", Some("100"));
        let partners = vec![&a];

        let result =
            allocate_medical_director_income(&partners, &financials(Some("100000")), &model, 5);

        assert_eq!(result.audit_step.rule_id, "md_allocation");
        assert_eq!(
            result.audit_step.output["allocations"][0]["id"].as_str().unwrap(),
            "a"
        );
        assert_eq!(
            result.audit_step.output["total_md_allocations"]
                .as_str()
                .unwrap(),
            "100000"
        );
    }
}
