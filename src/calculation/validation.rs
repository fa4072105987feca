//! Input validation for pay calculations.
//!
//! Templates and employees are checked before any amount is computed so that
//! a calculation either succeeds completely or returns no result at all.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{CompensationTemplate, Employee};

/// The highest value a percentage parameter may take.
pub const MAX_PERCENT: Decimal = Decimal::ONE_HUNDRED;

/// The highest office score an employee may have.
pub const MAX_OFFICE_SCORE: Decimal = Decimal::TEN;

/// Checks that a template can be used for calculation.
///
/// A template is valid when its ID and name are non-empty, every percentage
/// lies in 0 to 100 inclusive, and professional tax is not negative.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::validate_template;
/// use payroll_engine::models::{CompensationTemplate, TemplateParameters};
/// use rust_decimal::Decimal;
///
/// let mut template = CompensationTemplate::new("default", "Default Template", TemplateParameters::default());
/// assert!(validate_template(&template).is_ok());
///
/// template.parameters.pf_percent = Decimal::new(-1, 0);
/// assert!(validate_template(&template).is_err());
/// ```
pub fn validate_template(template: &CompensationTemplate) -> EngineResult<()> {
    let invalid = |field: &str, message: String| EngineError::InvalidTemplate {
        template_id: template.id.clone(),
        field: field.to_string(),
        message,
    };

    if template.id.trim().is_empty() {
        return Err(invalid("id", "must not be empty".to_string()));
    }
    if template.name.trim().is_empty() {
        return Err(invalid("name", "must not be empty".to_string()));
    }

    for (field, value) in template.parameters.percentages() {
        if value < Decimal::ZERO {
            return Err(invalid(field, format!("must not be negative, got {}", value)));
        }
        if value > MAX_PERCENT {
            return Err(invalid(
                field,
                format!("must not exceed {}, got {}", MAX_PERCENT, value),
            ));
        }
    }

    let tax = template.parameters.professional_tax;
    if tax < Decimal::ZERO {
        return Err(invalid(
            "professional_tax",
            format!("must not be negative, got {}", tax),
        ));
    }

    Ok(())
}

/// Checks that an employee record can be paid.
///
/// Basic pay must be positive, the office score must lie in 0 to 10
/// inclusive, and attendance and leave counts must not be negative.
pub fn validate_employee(employee: &Employee) -> EngineResult<()> {
    let invalid = |field: &str, message: String| EngineError::InvalidEmployeeData {
        employee_id: employee.id.clone(),
        field: field.to_string(),
        message,
    };

    if employee.basic_pay <= Decimal::ZERO {
        return Err(invalid(
            "basic_pay",
            format!("must be positive, got {}", employee.basic_pay),
        ));
    }
    if employee.office_score < Decimal::ZERO || employee.office_score > MAX_OFFICE_SCORE {
        return Err(invalid(
            "office_score",
            format!(
                "must be between 0 and {}, got {}",
                MAX_OFFICE_SCORE, employee.office_score
            ),
        ));
    }
    if employee.attendance_days < 0 {
        return Err(invalid(
            "attendance_days",
            format!("must not be negative, got {}", employee.attendance_days),
        ));
    }
    if employee.leave_days < 0 {
        return Err(invalid(
            "leave_days",
            format!("must not be negative, got {}", employee.leave_days),
        ));
    }

    Ok(())
}
