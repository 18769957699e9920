//! Physician Compensation Engine
//!
//! This crate allocates a medical practice's fiscal-year income among its
//! physicians: W2 pay for employees, and for partners a time-weighted share
//! of the distributable pool plus medical-director, additional-days,
//! buyout and trailing allocations.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod statement;
pub mod validation;
