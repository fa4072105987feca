//! Request types for the Payroll Engine API.
//!
//! This module defines the JSON request bodies. Employees, periods and
//! template patches are accepted in their domain form.

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{
    CompensationTemplate, DepartmentFilter, Employee, PayPeriod, TemplateParameters,
};
use crate::store::TemplateStore;

/// Request body for the stateless `/calculate` endpoint.
///
/// The template is either given inline or named by ID. When both are given
/// the inline template wins; when neither is, the store's fallback template
/// is used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The employees to consider.
    pub roster: Vec<Employee>,
    /// ID of a stored template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    /// A complete template that is not stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<CompensationTemplate>,
    /// Which employees to include. Defaults to all.
    #[serde(default)]
    pub department: DepartmentFilter,
    /// The pay period, formatted `YYYY-MM`.
    pub pay_period: PayPeriod,
}

impl CalculationRequest {
    /// Resolves the template to calculate with.
    ///
    /// # Errors
    ///
    /// - `TemplateNotFound` if `template_id` names no stored template
    pub fn resolve_template(&self, store: &TemplateStore) -> EngineResult<CompensationTemplate> {
        if let Some(template) = &self.template {
            return Ok(template.clone());
        }
        let id = self
            .template_id
            .as_deref()
            .unwrap_or_else(|| store.fallback_template_id());
        Ok(store.get(id)?.clone())
    }
}

/// Request body for `POST /templates`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTemplateRequest {
    /// Name for the new template. Defaults to "New Custom Template".
    #[serde(default)]
    pub name: Option<String>,
    /// Parameters to start from. Defaults to the default template's values.
    #[serde(default)]
    pub parameters: Option<TemplateParameters>,
}

/// Request body for `POST /payruns`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePayRunRequest {
    /// The pay period, formatted `YYYY-MM`.
    pub pay_period: PayPeriod,
    /// Which employees to include. Defaults to all.
    #[serde(default)]
    pub department: DepartmentFilter,
    /// The template to start from. Defaults to the store's fallback template.
    #[serde(default)]
    pub template_id: Option<String>,
}

/// Request body for `POST /payruns/:id/template`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectTemplateRequest {
    /// The template to select.
    pub template_id: String,
}

/// Request body for `PUT /payruns/:id/filter`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterRequest {
    /// New pay period, if changing.
    #[serde(default)]
    pub pay_period: Option<PayPeriod>,
    /// New department filter, if changing.
    #[serde(default)]
    pub department: Option<DepartmentFilter>,
}

/// Request body for `POST /payruns/:id/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterRequest {
    /// The employees to consider.
    pub roster: Vec<Employee>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TemplateStore;

    #[test]
    fn test_calculation_request_defaults() {
        let json = r#"{"roster": [], "pay_period": "2025-11"}"#;
        let request: CalculationRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.department, DepartmentFilter::All);
        assert!(request.template_id.is_none());
        assert_eq!(request.pay_period.to_string(), "2025-11");
    }

    #[test]
    fn test_calculation_request_rejects_bad_period() {
        let json = r#"{"roster": [], "pay_period": "2025-13"}"#;
        let result: Result<CalculationRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_template_prefers_inline() {
        let store = TemplateStore::with_builtin_templates();
        let json = r#"{
            "roster": [],
            "pay_period": "2025-11",
            "template_id": "tech",
            "template": {
                "id": "adhoc", "name": "Ad hoc",
                "basic_pay_percent": "50", "hra_percent": "20", "bonus_percent": "0",
                "office_score_weight": "0", "pf_percent": "12", "esi_percent": "0",
                "tds_percent": "0", "professional_tax": "0"
            }
        }"#;
        let request: CalculationRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.resolve_template(&store).unwrap().id, "adhoc");
    }

    #[test]
    fn test_resolve_template_falls_back_to_default() {
        let store = TemplateStore::with_builtin_templates();
        let json = r#"{"roster": [], "pay_period": "2025-11"}"#;
        let request: CalculationRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.resolve_template(&store).unwrap().id, "default");
    }

    #[test]
    fn test_filter_request_partial() {
        let request: FilterRequest = serde_json::from_str(r#"{"department": "Sales"}"#).unwrap();
        assert!(request.pay_period.is_none());
        assert_eq!(request.department, Some(DepartmentFilter::from("Sales")));
    }
}
