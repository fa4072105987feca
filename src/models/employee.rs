//! Employee model for payroll input.
//!
//! Employees are owned by the external roster and are never mutated by a
//! calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents an employee on the payroll roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// The employee code printed on payslips (e.g., "WZ-1001").
    pub employee_code: String,
    /// The department the employee belongs to (e.g., "Engineering").
    pub department: String,
    /// Monthly basic pay. Must be positive.
    pub basic_pay: Decimal,
    /// Office performance score on a 0 to 10 scale.
    pub office_score: Decimal,
    /// Days attended in the pay period.
    #[serde(default)]
    pub attendance_days: i32,
    /// Days of leave taken in the pay period.
    #[serde(default)]
    pub leave_days: i32,
}

impl Employee {
    /// Returns true if the employee belongs to the named department.
    ///
    /// The comparison is exact and case-sensitive.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::Employee;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: "emp_1002".to_string(),
    ///     name: "Rajesh Kumar".to_string(),
    ///     employee_code: "WZ-1002".to_string(),
    ///     department: "Engineering".to_string(),
    ///     basic_pay: Decimal::new(60000, 0),
    ///     office_score: Decimal::new(92, 1),
    ///     attendance_days: 21,
    ///     leave_days: 1,
    /// };
    /// assert!(employee.is_in_department("Engineering"));
    /// assert!(!employee.is_in_department("engineering"));
    /// ```
    pub fn is_in_department(&self, department: &str) -> bool {
        self.department == department
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn create_test_employee() -> Employee {
        Employee {
            id: "emp_1001".to_string(),
            name: "Asha Patel".to_string(),
            employee_code: "WZ-1001".to_string(),
            department: "Product".to_string(),
            basic_pay: Decimal::new(50000, 0),
            office_score: Decimal::from_str("8.5").unwrap(),
            attendance_days: 22,
            leave_days: 0,
        }
    }

    #[test]
    fn test_deserialize_employee() {
        let json = r#"{
            "id": "emp_1003",
            "name": "Priya Singh",
            "employee_code": "WZ-1003",
            "department": "Sales",
            "basic_pay": "45000",
            "office_score": "7.8",
            "attendance_days": 20,
            "leave_days": 2
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, "emp_1003");
        assert_eq!(employee.department, "Sales");
        assert_eq!(employee.basic_pay, Decimal::new(45000, 0));
        assert_eq!(employee.office_score, Decimal::new(78, 1));
        assert_eq!(employee.attendance_days, 20);
        assert_eq!(employee.leave_days, 2);
    }

    #[test]
    fn test_attendance_and_leave_default_to_zero() {
        let json = r#"{
            "id": "emp_1005",
            "name": "Anita Desai",
            "employee_code": "WZ-1005",
            "department": "HR",
            "basic_pay": "48000",
            "office_score": "8.0"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.attendance_days, 0);
        assert_eq!(employee.leave_days, 0);
    }

    #[test]
    fn test_serialize_employee_keeps_decimal_precision() {
        let employee = create_test_employee();
        let json = serde_json::to_string(&employee).unwrap();

        assert!(json.contains("\"basic_pay\":\"50000\""));
        assert!(json.contains("\"office_score\":\"8.5\""));

        let deserialized: Employee = serde_json::from_str(&json).unwrap();
        assert_eq!(employee, deserialized);
    }

    #[test]
    fn test_is_in_department_is_case_sensitive() {
        let employee = create_test_employee();
        assert!(employee.is_in_department("Product"));
        assert!(!employee.is_in_department("product"));
        assert!(!employee.is_in_department("Sales"));
    }
}
