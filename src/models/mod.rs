//! Core data models for the physician compensation engine.
//!
//! This module contains the roster, financial-input and result types used
//! throughout the engine.

mod compensation_result;
mod financials;
mod money;
mod physician;

pub use compensation_result::{
    AllocationSummary, AuditStep, AuditTrace, AuditWarning, CompensationBreakdown,
    CompensationResult, CompensationStatement,
};
pub use financials::{CompensationOptions, FiscalYearFinancials};
pub use money::{OrZero, clamp_fraction, non_negative, nonzero, safe_divisor};
pub use physician::{Physician, PhysicianKind, PhysicianRole};
