//! Pay run calculation across a roster.
//!
//! [`calculate_pay_run`] filters the roster by department, validates every
//! input, computes each employee's breakdown and aggregates the totals.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    CompensationTemplate, DepartmentFilter, Employee, EmployeePay, PayPeriod, PayRunResult,
    PayRunTotals, PayRunWarning,
};

use super::compensation::calculate_breakdown;
use super::validation::{validate_employee, validate_template};

/// Warning code raised when deductions exceed gross pay.
pub const NEGATIVE_NET_PAY_WARNING: &str = "NEGATIVE_NET_PAY";

/// Calculates pay for every employee selected by the department filter.
///
/// Employees outside the filter are excluded from the result entirely.
/// The template is validated first, then each selected employee; on the first
/// failure the error is returned and no result is produced. An empty selection
/// yields all-zero totals.
///
/// The function has no side effects, so identical inputs always produce equal
/// results.
///
/// # Errors
///
/// - `InvalidTemplate` if a percentage is outside 0 to 100, professional tax
///   is negative, or the template's ID or name is empty
/// - `InvalidEmployeeData` if a selected employee has non-positive basic pay,
///   an office score outside 0 to 10, or negative attendance or leave, or if
///   an amount or a total is too large for a `Decimal`
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_pay_run;
/// use payroll_engine::models::{CompensationTemplate, DepartmentFilter, TemplateParameters};
/// use rust_decimal::Decimal;
///
/// let template = CompensationTemplate::new("default", "Default Template", TemplateParameters::default());
/// let period = "2025-11".parse().unwrap();
///
/// let result = calculate_pay_run(&[], &template, &DepartmentFilter::All, period).unwrap();
/// assert_eq!(result.totals.employee_count, 0);
/// assert_eq!(result.totals.sum_net, Decimal::ZERO);
/// ```
pub fn calculate_pay_run(
    roster: &[Employee],
    template: &CompensationTemplate,
    department: &DepartmentFilter,
    pay_period: PayPeriod,
) -> EngineResult<PayRunResult> {
    validate_template(template)?;

    let selected: Vec<&Employee> = roster.iter().filter(|e| department.matches(e)).collect();
    for employee in &selected {
        validate_employee(employee)?;
    }

    let mut employees = Vec::with_capacity(selected.len());
    let mut totals = PayRunTotals::default();
    let mut warnings = Vec::new();

    for employee in selected {
        let breakdown = calculate_breakdown(employee, &template.parameters)?;

        if breakdown.net_pay < Decimal::ZERO {
            warn!(
                employee_id = %employee.id,
                net_pay = %breakdown.net_pay,
                template_id = %template.id,
                "Deductions exceed gross pay"
            );
            warnings.push(PayRunWarning {
                code: NEGATIVE_NET_PAY_WARNING.to_string(),
                employee_id: employee.id.clone(),
                message: format!(
                    "Net pay {} is negative: deductions {} exceed gross pay {}",
                    breakdown.net_pay, breakdown.total_deductions, breakdown.gross_pay
                ),
                severity: "high".to_string(),
            });
        }

        totals = totals
            .checked_add(&breakdown)
            .ok_or_else(|| EngineError::InvalidEmployeeData {
                employee_id: employee.id.clone(),
                field: "basic_pay".to_string(),
                message: "pay run totals exceed the supported range".to_string(),
            })?;
        employees.push(EmployeePay {
            employee_id: employee.id.clone(),
            name: employee.name.clone(),
            employee_code: employee.employee_code.clone(),
            department: employee.department.clone(),
            breakdown,
        });
    }

    debug!(
        template_id = %template.id,
        department = %department,
        pay_period = %pay_period,
        employee_count = totals.employee_count,
        sum_net = %totals.sum_net,
        "Pay run calculated"
    );

    Ok(PayRunResult {
        pay_period,
        department: department.clone(),
        template_id: template.id.clone(),
        employees,
        totals,
        warnings,
    })
}
