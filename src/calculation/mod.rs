//! Calculation logic for the Payroll Calculation Engine.
//!
//! This module contains input validation for templates and employees, the
//! per-employee compensation formula, and the pay run calculation that filters
//! a roster by department and aggregates totals.

mod compensation;
mod pay_run;
mod validation;

pub use compensation::{calculate_breakdown, percent};
pub use pay_run::{NEGATIVE_NET_PAY_WARNING, calculate_pay_run};
pub use validation::{MAX_OFFICE_SCORE, MAX_PERCENT, validate_employee, validate_template};
