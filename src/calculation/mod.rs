//! Calculation logic for the physician compensation engine.
//!
//! This module contains one function per allocation step: employee-status
//! pro-ration and cost, retirement buyouts, delayed W2 payments,
//! medical-director and additional-days allocations, practice income and
//! cost totals, the base and distributable pools, and partner FTE
//! weighting. The [`engine`](CompensationEngine) runs them in order behind
//! the [`PracticeModel`] collaborators.

mod additional_days;
mod buyout;
mod delayed_w2;
mod employee_cost;
mod engine;
mod fte_weight;
mod medical_director;
mod pool;
mod portion_of_year;
mod practice_model;

pub use additional_days::{AdditionalDaysResult, allocate_additional_days};
pub use buyout::{BuyoutResult, calculate_total_buyout_cost};
pub use delayed_w2::{
    DelayedW2Payment, DelayedW2Result, calculate_delayed_w2, days_in_year, delayed_w2_payment,
};
pub use employee_cost::{
    EmployeeCostResult, MAX_GROWN_AMOUNT, ProRatedEmployee, calculate_total_employee_cost,
    employer_cost, grow_by_rate,
};
pub use engine::{
    AllocationObserver, CompensationEngine, compute_compensation,
    compute_compensation_with_retired,
};
pub use fte_weight::{
    DEFAULT_WEEKS_PER_YEAR, FteWeightResult, calculate_fte_weights, partner_fte_weight,
};
pub use medical_director::{
    MdAllocationResult, allocate_medical_director_income, prcs_director_id, trailing_md_amount,
};
pub use pool::{
    CostResult, IncomeResult, PoolResult, calculate_base_pool, calculate_distributable_pool,
    calculate_total_costs, calculate_total_income,
};
pub use portion_of_year::{employee_portion_of_year, partner_portion_of_year};
pub use practice_model::{PracticeModel, StandardPracticeModel};
