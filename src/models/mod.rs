//! Core data models for the Payroll Calculation Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod department;
mod employee;
mod pay_period;
mod template;

pub use calculation_result::{
    EmployeePay, PayBreakdown, PayRunResult, PayRunTotals, PayRunWarning, round_currency,
};
pub use department::{ALL_DEPARTMENTS, DepartmentFilter};
pub use employee::Employee;
pub use pay_period::PayPeriod;
pub use template::{CompensationTemplate, TemplateParameters, TemplatePatch};
