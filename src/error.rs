//! Error types for the Payroll Calculation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the calculator, the template store and pay run sessions
//! can report.

use thiserror::Error;

/// The main error type for the Payroll Calculation Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::TemplateNotFound {
///     id: "missing".to_string(),
/// };
/// assert_eq!(error.to_string(), "Template not found: missing");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A compensation template carried an invalid parameter.
    #[error("Invalid template '{template_id}' field '{field}': {message}")]
    InvalidTemplate {
        /// The ID of the offending template.
        template_id: String,
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee '{employee_id}' field '{field}': {message}")]
    InvalidEmployeeData {
        /// The ID of the offending employee.
        employee_id: String,
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// No template exists with the given ID.
    #[error("Template not found: {id}")]
    TemplateNotFound {
        /// The template ID that was not found.
        id: String,
    },

    /// Deleting the template would leave the store empty.
    #[error("Cannot delete template '{id}': at least one template must exist")]
    LastTemplate {
        /// The ID of the template that was kept.
        id: String,
    },

    /// A pay run was confirmed while its calculation was stale.
    #[error("Pay run {session_id} is stale: recalculate before confirming")]
    StaleConfirmation {
        /// The pay run session that was stale.
        session_id: String,
    },

    /// An action is not allowed in the pay run's current state.
    #[error("Cannot {action} a pay run in state '{state}'")]
    InvalidTransition {
        /// The state the pay run was in.
        state: String,
        /// The action that was attempted.
        action: String,
    },

    /// A pay period token could not be parsed.
    #[error("Invalid pay period '{value}': expected YYYY-MM")]
    InvalidPeriod {
        /// The rejected token.
        value: String,
    },

    /// No pay run session exists with the given ID.
    #[error("Pay run session not found: {id}")]
    SessionNotFound {
        /// The session ID that was not found.
        id: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/engine.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/engine.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_template_displays_id_field_and_message() {
        let error = EngineError::InvalidTemplate {
            template_id: "tech".to_string(),
            field: "hra_percent".to_string(),
            message: "must not be negative".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid template 'tech' field 'hra_percent': must not be negative"
        );
    }

    #[test]
    fn test_invalid_employee_displays_id_field_and_message() {
        let error = EngineError::InvalidEmployeeData {
            employee_id: "emp_1001".to_string(),
            field: "office_score".to_string(),
            message: "must be between 0 and 10".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid employee 'emp_1001' field 'office_score': must be between 0 and 10"
        );
    }

    #[test]
    fn test_last_template_displays_id() {
        let error = EngineError::LastTemplate {
            id: "default".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Cannot delete template 'default': at least one template must exist"
        );
    }

    #[test]
    fn test_invalid_transition_displays_state_and_action() {
        let error = EngineError::InvalidTransition {
            state: "confirmed".to_string(),
            action: "calculate".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Cannot calculate a pay run in state 'confirmed'"
        );
    }

    #[test]
    fn test_invalid_period_displays_value() {
        let error = EngineError::InvalidPeriod {
            value: "2025-13".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid pay period '2025-13': expected YYYY-MM"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> EngineResult<()> {
            Err(EngineError::TemplateNotFound {
                id: "nope".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
