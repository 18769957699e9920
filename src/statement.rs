//! Compensation statements.
//!
//! A statement packages one engine run with an identifier, a generation
//! timestamp and the engine version, for reporting or archiving as JSON.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::calculation::CompensationEngine;
use crate::models::{CompensationOptions, CompensationStatement, FiscalYearFinancials, Physician};

/// Runs the engine and wraps its output in a [`CompensationStatement`].
///
/// Any observer attached to `engine` is notified as usual.
///
/// # Example
///
/// ```
/// use physician_comp_engine::calculation::{CompensationEngine, StandardPracticeModel};
/// use physician_comp_engine::models::{
///     CompensationOptions, FiscalYearFinancials, Physician, PhysicianRole,
/// };
/// use physician_comp_engine::statement::prepare_statement;
/// use rust_decimal::Decimal;
///
/// let model = StandardPracticeModel::default();
/// let roster = vec![Physician::new("phys_001", "Dr. Adams", PhysicianRole::Partner)];
///
/// let statement = prepare_statement(
///     &CompensationEngine::new(&model),
///     &roster,
///     2025,
///     &FiscalYearFinancials::default(),
///     Decimal::ZERO,
///     CompensationOptions::default(),
/// );
/// assert_eq!(statement.year, 2025);
/// assert_eq!(statement.results.len(), 1);
/// ```
pub fn prepare_statement(
    engine: &CompensationEngine<'_>,
    physicians: &[Physician],
    year: i32,
    financials: &FiscalYearFinancials,
    benefit_growth_rate: Decimal,
    options: CompensationOptions,
) -> CompensationStatement {
    let (results, summary) =
        engine.compute_detailed(physicians, year, financials, benefit_growth_rate, options);

    let statement = CompensationStatement {
        statement_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        year,
        results,
        summary,
    };

    info!(
        statement_id = %statement.statement_id,
        year,
        results = statement.results.len(),
        total_compensation = %statement.total_compensation(),
        "Prepared compensation statement"
    );

    statement
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{StandardPracticeModel, compute_compensation};
    use crate::models::PhysicianRole;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn roster() -> Vec<Physician> {
        vec![
            Physician::new("a", "Dr. A", PhysicianRole::Partner)
                .with_medical_director_percentage(dec("100")),
            Physician::new("b", "Dr. B", PhysicianRole::Employee).with_salary(dec("200000")),
        ]
    }

    fn financials() -> FiscalYearFinancials {
        FiscalYearFinancials {
            therapy_income: Some(dec("1000000")),
            non_employment_costs: Some(dec("200000")),
            medical_director_hours: Some(dec("100000")),
            ..Default::default()
        }
    }

    #[test]
    fn test_statement_results_match_engine() {
        let model = StandardPracticeModel::default();
        let statement = prepare_statement(
            &CompensationEngine::new(&model),
            &roster(),
            2025,
            &financials(),
            dec("0.05"),
            CompensationOptions::default(),
        );
        let direct = compute_compensation(
            &roster(),
            2025,
            &financials(),
            dec("0.05"),
            CompensationOptions::default(),
            &model,
        );

        assert_eq!(statement.results, direct);
        assert_eq!(statement.engine_version, env!("CARGO_PKG_VERSION"));
        assert_eq!(statement.summary.year, 2025);
        assert_eq!(statement.total_compensation(), dec("886139.8"));
        assert_eq!(statement.result_for("b").map(|r| r.comp), Some(dec("200000")));
    }

    #[test]
    fn test_statements_get_distinct_ids() {
        let model = StandardPracticeModel::default();
        let engine = CompensationEngine::new(&model);
        let first = prepare_statement(
            &engine,
            &roster(),
            2025,
            &financials(),
            Decimal::ZERO,
            CompensationOptions::default(),
        );
        let second = prepare_statement(
            &engine,
            &roster(),
            2025,
            &financials(),
            Decimal::ZERO,
            CompensationOptions::default(),
        );

        assert_ne!(first.statement_id, second.statement_id);
        assert_eq!(first.results, second.results);
    }

    #[test]
    fn test_statement_serializes_to_json() {
        let model = StandardPracticeModel::default();
        let statement = prepare_statement(
            &CompensationEngine::new(&model),
            &roster(),
            2025,
            &financials(),
            Decimal::ZERO,
            CompensationOptions::default(),
        );

        let json = serde_json::to_value(&statement).unwrap();
        assert_eq!(json["year"], 2025);
        assert_eq!(json["results"][0]["type"], "partner");
        assert_eq!(json["results"][1]["breakdown"]["w2Salary"], "200000");
        assert!(json["results"][1]["breakdown"].get("fteShare").is_none());
        assert!(json["summary"]["audit_trace"]["steps"].is_array());
    }
}
