//! Per-employee compensation calculation.
//!
//! This module turns one employee's basic pay and office score into a full
//! [`PayBreakdown`] using a template's parameters.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, PayBreakdown, TemplateParameters};

use super::validation::MAX_OFFICE_SCORE;

/// Converts a percentage into a fraction (`40` becomes `0.40`).
pub fn percent(value: Decimal) -> Decimal {
    value / Decimal::ONE_HUNDRED
}

/// Computes the pay breakdown for one employee.
///
/// The calculation is:
///
/// ```text
/// hra               = basic * hra%
/// performance_bonus = basic * bonus% * (office_score / 10)
/// gross             = basic + hra + performance_bonus
/// pf                = basic * pf%
/// esi               = gross * esi%
/// tds               = gross * tds%
/// total_deductions  = pf + esi + tds + professional_tax
/// net               = gross - total_deductions
/// ```
///
/// Inputs are expected to have passed
/// [`validate_employee`](super::validate_employee) and
/// [`validate_template`](super::validate_template). No intermediate value is
/// rounded.
///
/// # Errors
///
/// - `InvalidEmployeeData` on field `basic_pay` if an amount does not fit in a
///   `Decimal`
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_breakdown;
/// use payroll_engine::models::{Employee, TemplateParameters};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let employee = Employee {
///     id: "emp_1001".to_string(),
///     name: "Asha Patel".to_string(),
///     employee_code: "WZ-1001".to_string(),
///     department: "Product".to_string(),
///     basic_pay: Decimal::new(50000, 0),
///     office_score: Decimal::from_str("8.5").unwrap(),
///     attendance_days: 22,
///     leave_days: 0,
/// };
///
/// let breakdown = calculate_breakdown(&employee, &TemplateParameters::default()).unwrap();
/// assert_eq!(breakdown.gross_pay, Decimal::from_str("74250").unwrap());
/// assert_eq!(breakdown.net_pay, Decimal::from_str("60068.125").unwrap());
/// ```
pub fn calculate_breakdown(
    employee: &Employee,
    params: &TemplateParameters,
) -> EngineResult<PayBreakdown> {
    let overflow = || EngineError::InvalidEmployeeData {
        employee_id: employee.id.clone(),
        field: "basic_pay".to_string(),
        message: "pay amounts exceed the supported range".to_string(),
    };
    let mul = |a: Decimal, b: Decimal| a.checked_mul(b).ok_or_else(overflow);
    let add = |a: Decimal, b: Decimal| a.checked_add(b).ok_or_else(overflow);

    let basic_pay = employee.basic_pay;

    let hra = mul(basic_pay, percent(params.hra_percent))?;
    let performance_bonus = mul(
        mul(basic_pay, percent(params.bonus_percent))?,
        employee.office_score / MAX_OFFICE_SCORE,
    )?;
    let gross_pay = add(add(basic_pay, hra)?, performance_bonus)?;

    let pf = mul(basic_pay, percent(params.pf_percent))?;
    let esi = mul(gross_pay, percent(params.esi_percent))?;
    let tds = mul(gross_pay, percent(params.tds_percent))?;
    let professional_tax = params.professional_tax;
    let total_deductions = add(add(add(pf, esi)?, tds)?, professional_tax)?;

    let net_pay = gross_pay
        .checked_sub(total_deductions)
        .ok_or_else(overflow)?;

    Ok(PayBreakdown {
        basic_pay,
        hra,
        performance_bonus,
        gross_pay,
        pf,
        esi,
        tds,
        professional_tax,
        total_deductions,
        net_pay,
    })
}
