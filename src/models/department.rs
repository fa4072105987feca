//! Department filter for pay runs.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Employee;

/// The token that selects every department.
pub const ALL_DEPARTMENTS: &str = "all";

/// Restricts a pay run to one department or to the whole roster.
///
/// Serialized as a plain string: `"all"` or the department name.
///
/// # Example
///
/// ```
/// use payroll_engine::models::DepartmentFilter;
///
/// let filter: DepartmentFilter = "Engineering".parse().unwrap();
/// assert_eq!(filter, DepartmentFilter::Department("Engineering".to_string()));
///
/// let all: DepartmentFilter = "all".parse().unwrap();
/// assert_eq!(all, DepartmentFilter::All);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DepartmentFilter {
    /// Every employee participates.
    #[default]
    All,
    /// Only employees whose department equals this name participate.
    Department(String),
}

impl DepartmentFilter {
    /// Returns true if the employee participates under this filter.
    pub fn matches(&self, employee: &Employee) -> bool {
        match self {
            DepartmentFilter::All => true,
            DepartmentFilter::Department(name) => employee.is_in_department(name),
        }
    }
}

impl fmt::Display for DepartmentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepartmentFilter::All => f.write_str(ALL_DEPARTMENTS),
            DepartmentFilter::Department(name) => f.write_str(name),
        }
    }
}

impl From<&str> for DepartmentFilter {
    fn from(value: &str) -> Self {
        if value == ALL_DEPARTMENTS {
            DepartmentFilter::All
        } else {
            DepartmentFilter::Department(value.to_string())
        }
    }
}

impl From<String> for DepartmentFilter {
    fn from(value: String) -> Self {
        if value == ALL_DEPARTMENTS {
            DepartmentFilter::All
        } else {
            DepartmentFilter::Department(value)
        }
    }
}

impl From<DepartmentFilter> for String {
    fn from(filter: DepartmentFilter) -> Self {
        filter.to_string()
    }
}

impl FromStr for DepartmentFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.into())
    }
}
