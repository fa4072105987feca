//! Calculation result models for the Payroll Calculation Engine.
//!
//! This module contains the [`PayRunResult`] type and its associated structures
//! that capture all outputs from a pay run calculation: per-employee pay
//! breakdowns, aggregate totals and warnings.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::{DepartmentFilter, PayPeriod};

/// Rounds a currency amount for presentation.
///
/// Midpoints round away from zero, so `556.875` becomes `556.88` at scale 2.
///
/// # Example
///
/// ```
/// use payroll_engine::models::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let amount = Decimal::from_str("556.875").unwrap();
/// assert_eq!(round_currency(amount, 2), Decimal::from_str("556.88").unwrap());
/// ```
pub fn round_currency(amount: Decimal, scale: u32) -> Decimal {
    amount.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
}

/// The computed pay components for one employee.
///
/// All amounts are exact; nothing is rounded during calculation.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayBreakdown;
/// use rust_decimal::Decimal;
///
/// let breakdown = PayBreakdown::default();
/// assert_eq!(breakdown.net_pay, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayBreakdown {
    /// The employee's basic pay.
    pub basic_pay: Decimal,
    /// House Rent Allowance.
    pub hra: Decimal,
    /// Performance bonus scaled by office score.
    pub performance_bonus: Decimal,
    /// Basic pay plus allowances and bonus.
    pub gross_pay: Decimal,
    /// Provident Fund deduction.
    pub pf: Decimal,
    /// Employee State Insurance deduction.
    pub esi: Decimal,
    /// Tax Deducted at Source.
    pub tds: Decimal,
    /// Fixed professional tax.
    pub professional_tax: Decimal,
    /// Sum of all deductions.
    pub total_deductions: Decimal,
    /// Gross pay minus total deductions.
    pub net_pay: Decimal,
}

impl PayBreakdown {
    /// Returns a copy with every amount rounded to `scale` decimal places.
    pub fn rounded(&self, scale: u32) -> Self {
        Self {
            basic_pay: round_currency(self.basic_pay, scale),
            hra: round_currency(self.hra, scale),
            performance_bonus: round_currency(self.performance_bonus, scale),
            gross_pay: round_currency(self.gross_pay, scale),
            pf: round_currency(self.pf, scale),
            esi: round_currency(self.esi, scale),
            tds: round_currency(self.tds, scale),
            professional_tax: round_currency(self.professional_tax, scale),
            total_deductions: round_currency(self.total_deductions, scale),
            net_pay: round_currency(self.net_pay, scale),
        }
    }
}

/// A pay breakdown attributed to an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePay {
    /// The ID of the employee.
    pub employee_id: String,
    /// The employee's display name.
    pub name: String,
    /// The employee code.
    pub employee_code: String,
    /// The employee's department.
    pub department: String,
    /// The computed pay components.
    pub breakdown: PayBreakdown,
}

impl EmployeePay {
    /// Returns a copy with the breakdown rounded to `scale` decimal places.
    pub fn rounded(&self, scale: u32) -> Self {
        Self {
            breakdown: self.breakdown.rounded(scale),
            ..self.clone()
        }
    }
}

/// Aggregate totals across every employee in a pay run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayRunTotals {
    /// Number of employees included.
    pub employee_count: usize,
    /// Sum of basic pay.
    pub sum_basic_pay: Decimal,
    /// Sum of HRA.
    pub sum_hra: Decimal,
    /// Sum of performance bonuses.
    pub sum_performance_bonus: Decimal,
    /// Sum of gross pay.
    pub sum_gross: Decimal,
    /// Sum of PF deductions.
    pub sum_pf: Decimal,
    /// Sum of ESI deductions.
    pub sum_esi: Decimal,
    /// Sum of TDS deductions.
    pub sum_tds: Decimal,
    /// Sum of professional tax.
    pub sum_professional_tax: Decimal,
    /// Sum of total deductions.
    pub sum_deductions: Decimal,
    /// Sum of net pay.
    pub sum_net: Decimal,
}

impl PayRunTotals {
    /// Returns the totals with one more employee's breakdown added.
    ///
    /// Returns `None` if any sum would overflow.
    pub fn checked_add(&self, breakdown: &PayBreakdown) -> Option<Self> {
        Some(Self {
            employee_count: self.employee_count + 1,
            sum_basic_pay: self.sum_basic_pay.checked_add(breakdown.basic_pay)?,
            sum_hra: self.sum_hra.checked_add(breakdown.hra)?,
            sum_performance_bonus: self
                .sum_performance_bonus
                .checked_add(breakdown.performance_bonus)?,
            sum_gross: self.sum_gross.checked_add(breakdown.gross_pay)?,
            sum_pf: self.sum_pf.checked_add(breakdown.pf)?,
            sum_esi: self.sum_esi.checked_add(breakdown.esi)?,
            sum_tds: self.sum_tds.checked_add(breakdown.tds)?,
            sum_professional_tax: self
                .sum_professional_tax
                .checked_add(breakdown.professional_tax)?,
            sum_deductions: self.sum_deductions.checked_add(breakdown.total_deductions)?,
            sum_net: self.sum_net.checked_add(breakdown.net_pay)?,
        })
    }

    /// Returns a copy with every amount rounded to `scale` decimal places.
    pub fn rounded(&self, scale: u32) -> Self {
        Self {
            employee_count: self.employee_count,
            sum_basic_pay: round_currency(self.sum_basic_pay, scale),
            sum_hra: round_currency(self.sum_hra, scale),
            sum_performance_bonus: round_currency(self.sum_performance_bonus, scale),
            sum_gross: round_currency(self.sum_gross, scale),
            sum_pf: round_currency(self.sum_pf, scale),
            sum_esi: round_currency(self.sum_esi, scale),
            sum_tds: round_currency(self.sum_tds, scale),
            sum_professional_tax: round_currency(self.sum_professional_tax, scale),
            sum_deductions: round_currency(self.sum_deductions, scale),
            sum_net: round_currency(self.sum_net, scale),
        }
    }
}

/// A warning generated during calculation.
///
/// Warnings flag results that are computed but suspicious, such as a negative
/// net pay, without failing the calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayRunWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// The employee the warning concerns.
    pub employee_id: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete result of one pay run calculation.
///
/// Produced by a single calculator invocation and never mutated afterwards.
/// It holds no identifiers or timestamps, so identical inputs produce equal
/// results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayRunResult {
    /// The pay period calculated.
    pub pay_period: PayPeriod,
    /// The department filter applied.
    pub department: DepartmentFilter,
    /// The ID of the template whose parameters were applied.
    pub template_id: String,
    /// Per-employee results in roster order.
    pub employees: Vec<EmployeePay>,
    /// Aggregate totals.
    pub totals: PayRunTotals,
    /// Warnings raised during calculation.
    #[serde(default)]
    pub warnings: Vec<PayRunWarning>,
}

impl PayRunResult {
    /// Looks up the pay of one employee.
    pub fn employee(&self, employee_id: &str) -> Option<&EmployeePay> {
        self.employees.iter().find(|e| e.employee_id == employee_id)
    }

    /// Returns the IDs of all employees in the result, in order.
    pub fn employee_ids(&self) -> Vec<&str> {
        self.employees.iter().map(|e| e.employee_id.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    /// Helper function to create Decimal values from strings
    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_breakdown() -> PayBreakdown {
        PayBreakdown {
            basic_pay: dec("50000"),
            hra: dec("20000"),
            performance_bonus: dec("4250"),
            gross_pay: dec("74250"),
            pf: dec("6000"),
            esi: dec("556.875"),
            tds: dec("7425"),
            professional_tax: dec("200"),
            total_deductions: dec("14181.875"),
            net_pay: dec("60068.125"),
        }
    }

    fn sample_result() -> PayRunResult {
        let totals = PayRunTotals::default()
            .checked_add(&sample_breakdown())
            .unwrap();
        PayRunResult {
            pay_period: "2025-11".parse().unwrap(),
            department: DepartmentFilter::All,
            template_id: "default".to_string(),
            employees: vec![EmployeePay {
                employee_id: "emp_1001".to_string(),
                name: "Asha Patel".to_string(),
                employee_code: "WZ-1001".to_string(),
                department: "Product".to_string(),
                breakdown: sample_breakdown(),
            }],
            totals,
            warnings: vec![],
        }
    }

    #[test]
    fn test_round_currency_midpoint_away_from_zero() {
        assert_eq!(round_currency(dec("556.875"), 2), dec("556.88"));
        assert_eq!(round_currency(dec("-556.875"), 2), dec("-556.88"));
        assert_eq!(round_currency(dec("60068.125"), 2), dec("60068.13"));
        assert_eq!(round_currency(dec("10.004"), 2), dec("10.00"));
    }

    #[test]
    fn test_breakdown_rounded_leaves_original_exact() {
        let breakdown = sample_breakdown();
        let rounded = breakdown.rounded(2);

        assert_eq!(rounded.esi, dec("556.88"));
        assert_eq!(rounded.total_deductions, dec("14181.88"));
        assert_eq!(breakdown.esi, dec("556.875"));
    }

    #[test]
    fn test_employee_pay_rounded_keeps_identity() {
        let pay = &sample_result().employees[0];
        let rounded = pay.rounded(2);

        assert_eq!(rounded.employee_id, "emp_1001");
        assert_eq!(rounded.breakdown.net_pay, dec("60068.13"));
        assert_eq!(pay.breakdown.net_pay, dec("60068.125"));
    }

    #[test]
    fn test_totals_add_accumulates_every_field() {
        let totals = PayRunTotals::default()
            .checked_add(&sample_breakdown())
            .and_then(|t| t.checked_add(&sample_breakdown()))
            .unwrap();

        assert_eq!(totals.employee_count, 2);
        assert_eq!(totals.sum_gross, dec("148500"));
        assert_eq!(totals.sum_esi, dec("1113.750"));
        assert_eq!(totals.sum_deductions, dec("28363.750"));
        assert_eq!(totals.sum_net, dec("120136.250"));
    }

    #[test]
    fn test_totals_add_reports_overflow() {
        let mut big = sample_breakdown();
        big.basic_pay = dec("50000000000000000000000000000");
        let totals = PayRunTotals::default().checked_add(&big).unwrap();

        assert!(totals.checked_add(&big).is_none());
    }

    #[test]
    fn test_totals_rounded_keeps_count() {
        let totals = PayRunTotals::default()
            .checked_add(&sample_breakdown())
            .unwrap();
        let rounded = totals.rounded(0);

        assert_eq!(rounded.employee_count, 1);
        assert_eq!(rounded.sum_esi, dec("557"));
        assert_eq!(rounded.sum_net, dec("60068"));
    }

    #[test]
    fn test_breakdown_serializes_amounts_as_strings() {
        let json = serde_json::to_string(&sample_breakdown()).unwrap();
        assert!(json.contains("\"esi\":\"556.875\""));
        assert!(json.contains("\"net_pay\":\"60068.125\""));
    }

    #[test]
    fn test_result_serialization_is_lossless() {
        let result = sample_result();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"pay_period\":\"2025-11\""));
        assert!(json.contains("\"department\":\"all\""));

        let deserialized: PayRunResult = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, result);
    }

    #[test]
    fn test_employee_lookup() {
        let result = sample_result();
        assert!(result.employee("emp_1001").is_some());
        assert!(result.employee("emp_9999").is_none());
        assert_eq!(result.employee_ids(), vec!["emp_1001"]);
    }

    #[test]
    fn test_warning_serialization() {
        let warning = PayRunWarning {
            code: "NEGATIVE_NET_PAY".to_string(),
            employee_id: "emp_1".to_string(),
            message: "Net pay is negative".to_string(),
            severity: "high".to_string(),
        };

        let json = serde_json::to_string(&warning).unwrap();
        assert!(json.contains("\"code\":\"NEGATIVE_NET_PAY\""));
        assert!(json.contains("\"severity\":\"high\""));
    }
}
