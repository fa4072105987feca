//! In-memory store of compensation templates.
//!
//! The [`TemplateStore`] owns the set of named templates, keeps them in
//! insertion order and guarantees that at least one template always exists.

use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

use crate::calculation::validate_template;
use crate::error::{EngineError, EngineResult};
use crate::models::{CompensationTemplate, TemplateParameters, TemplatePatch};

/// ID of the built-in default template.
pub const DEFAULT_TEMPLATE_ID: &str = "default";

/// Name given to templates created with [`TemplateStore::create`].
pub const NEW_TEMPLATE_NAME: &str = "New Custom Template";

/// Prefix of generated template IDs.
const CUSTOM_ID_PREFIX: &str = "custom_";

/// Returns the built-in seed templates: default, tech and sales.
///
/// # Example
///
/// ```
/// use payroll_engine::store::builtin_templates;
///
/// let ids: Vec<String> = builtin_templates().into_iter().map(|t| t.id).collect();
/// assert_eq!(ids, vec!["default", "tech", "sales"]);
/// ```
pub fn builtin_templates() -> Vec<CompensationTemplate> {
    let default = TemplateParameters::default();
    vec![
        CompensationTemplate::new(DEFAULT_TEMPLATE_ID, "Default Template", default.clone()),
        CompensationTemplate::new(
            "tech",
            "Tech Department Template",
            TemplateParameters {
                basic_pay_percent: Decimal::new(55, 0),
                hra_percent: Decimal::new(35, 0),
                bonus_percent: Decimal::new(15, 0),
                office_score_weight: Decimal::new(8, 0),
                tds_percent: Decimal::new(12, 0),
                ..default.clone()
            },
        ),
        CompensationTemplate::new(
            "sales",
            "Sales Template",
            TemplateParameters {
                basic_pay_percent: Decimal::new(45, 0),
                hra_percent: Decimal::new(30, 0),
                bonus_percent: Decimal::new(25, 0),
                office_score_weight: Decimal::new(10, 0),
                tds_percent: Decimal::new(8, 0),
                ..default
            },
        ),
    ]
}

/// Owns the named compensation templates.
///
/// # Example
///
/// ```
/// use payroll_engine::store::TemplateStore;
///
/// let mut store = TemplateStore::with_builtin_templates();
/// let copy = store.duplicate("default").unwrap();
///
/// assert_ne!(copy.id, "default");
/// assert_eq!(copy.name, "Default Template (Copy)");
/// assert_eq!(store.len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct TemplateStore {
    templates: Vec<CompensationTemplate>,
    default_template_id: String,
}

impl TemplateStore {
    /// Creates a store from seed templates.
    ///
    /// `default_template_id` names the template reselected when an active
    /// template is deleted; it does not need to be among the seeds.
    ///
    /// # Errors
    ///
    /// - `InvalidTemplate` if a seed is invalid, two seeds share an ID, or
    ///   no seed is given
    pub fn new(
        templates: Vec<CompensationTemplate>,
        default_template_id: impl Into<String>,
    ) -> EngineResult<Self> {
        if templates.is_empty() {
            return Err(EngineError::InvalidTemplate {
                template_id: String::new(),
                field: "templates".to_string(),
                message: "at least one template must exist".to_string(),
            });
        }

        for (index, template) in templates.iter().enumerate() {
            validate_template(template)?;
            if templates[..index].iter().any(|t| t.id == template.id) {
                return Err(EngineError::InvalidTemplate {
                    template_id: template.id.clone(),
                    field: "id".to_string(),
                    message: "duplicate template ID".to_string(),
                });
            }
        }

        Ok(Self {
            templates,
            default_template_id: default_template_id.into(),
        })
    }

    /// Creates a store holding the built-in default, tech and sales templates.
    pub fn with_builtin_templates() -> Self {
        Self {
            templates: builtin_templates(),
            default_template_id: DEFAULT_TEMPLATE_ID.to_string(),
        }
    }

    /// Returns all templates in insertion order.
    pub fn list(&self) -> &[CompensationTemplate] {
        &self.templates
    }

    /// Returns the number of templates. Never zero.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Always false: the store never becomes empty.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Returns true if a template with this ID exists.
    pub fn contains(&self, id: &str) -> bool {
        self.templates.iter().any(|t| t.id == id)
    }

    /// Looks up a template by ID.
    pub fn get(&self, id: &str) -> EngineResult<&CompensationTemplate> {
        self.templates
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| EngineError::TemplateNotFound { id: id.to_string() })
    }

    /// The ID of the designated default template.
    pub fn default_template_id(&self) -> &str {
        &self.default_template_id
    }

    /// The template to select when the active one disappears.
    ///
    /// This is the designated default template while it exists, otherwise the
    /// first template in insertion order.
    pub fn fallback_template_id(&self) -> &str {
        if self.contains(&self.default_template_id) {
            &self.default_template_id
        } else {
            // The store is never empty.
            self.templates
                .first()
                .map(|t| t.id.as_str())
                .unwrap_or(self.default_template_id.as_str())
        }
    }

    /// Creates a new template seeded from `base`, or from the default
    /// parameters when no base is given.
    ///
    /// The new template gets a fresh ID and is named
    /// [`NEW_TEMPLATE_NAME`]. Existing templates are not touched.
    ///
    /// # Errors
    ///
    /// - `InvalidTemplate` if `base` holds invalid parameters
    pub fn create(&mut self, base: Option<&TemplateParameters>) -> EngineResult<CompensationTemplate> {
        self.create_named(NEW_TEMPLATE_NAME, base)
    }

    /// Like [`create`](Self::create), but with the given name.
    ///
    /// The template is validated before it is stored, so a rejected name or
    /// base leaves the store unchanged.
    ///
    /// # Errors
    ///
    /// - `InvalidTemplate` if the name is empty or `base` is invalid
    pub fn create_named(
        &mut self,
        name: impl Into<String>,
        base: Option<&TemplateParameters>,
    ) -> EngineResult<CompensationTemplate> {
        let parameters = base.cloned().unwrap_or_default();
        let template = CompensationTemplate::new(self.generate_id(), name, parameters);
        validate_template(&template)?;

        info!(template_id = %template.id, "Template created");
        self.templates.push(template.clone());
        Ok(template)
    }

    /// Copies an existing template under a new ID.
    ///
    /// The copy keeps every parameter and is named `"<name> (Copy)"`.
    ///
    /// # Errors
    ///
    /// - `TemplateNotFound` if `id` does not exist
    pub fn duplicate(&mut self, id: &str) -> EngineResult<CompensationTemplate> {
        let source = self.get(id)?;
        let copy = CompensationTemplate::new(
            self.generate_id(),
            format!("{} (Copy)", source.name),
            source.parameters.clone(),
        );

        info!(source_id = %id, template_id = %copy.id, "Template duplicated");
        self.templates.push(copy.clone());
        Ok(copy)
    }

    /// Merges field changes into a template.
    ///
    /// The merged template is validated before it replaces the stored one, so
    /// a rejected update leaves the store unchanged.
    ///
    /// # Errors
    ///
    /// - `TemplateNotFound` if `id` does not exist
    /// - `InvalidTemplate` if the merged template is invalid
    pub fn update(&mut self, id: &str, patch: &TemplatePatch) -> EngineResult<CompensationTemplate> {
        let slot = self
            .templates
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| EngineError::TemplateNotFound { id: id.to_string() })?;

        let updated = slot.patched(patch);
        validate_template(&updated)?;
        *slot = updated.clone();

        info!(template_id = %id, "Template updated");
        Ok(updated)
    }

    /// Removes a template and returns it.
    ///
    /// Callers holding the deleted template as their active selection should
    /// reselect [`fallback_template_id`](Self::fallback_template_id).
    ///
    /// # Errors
    ///
    /// - `TemplateNotFound` if `id` does not exist
    /// - `LastTemplate` if it is the only template left
    pub fn delete(&mut self, id: &str) -> EngineResult<CompensationTemplate> {
        let index = self
            .templates
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| EngineError::TemplateNotFound { id: id.to_string() })?;

        if self.templates.len() == 1 {
            return Err(EngineError::LastTemplate { id: id.to_string() });
        }

        let removed = self.templates.remove(index);
        info!(template_id = %id, remaining = self.templates.len(), "Template deleted");
        Ok(removed)
    }

    fn generate_id(&self) -> String {
        loop {
            let id = format!("{}{}", CUSTOM_ID_PREFIX, Uuid::new_v4().simple());
            if !self.contains(&id) {
                debug!(template_id = %id, "Generated template ID");
                return id;
            }
        }
    }
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::with_builtin_templates()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn single_template_store() -> TemplateStore {
        TemplateStore::new(
            vec![CompensationTemplate::new(
                "only",
                "Only Template",
                TemplateParameters::default(),
            )],
            DEFAULT_TEMPLATE_ID,
        )
        .unwrap()
    }

    #[test]
    fn test_builtin_templates_are_valid() {
        for template in builtin_templates() {
            assert!(validate_template(&template).is_ok(), "{} invalid", template.id);
        }
    }

    #[test]
    fn test_builtin_tech_and_sales_parameters() {
        let store = TemplateStore::with_builtin_templates();
        let tech = store.get("tech").unwrap();
        assert_eq!(tech.parameters.hra_percent, dec("35"));
        assert_eq!(tech.parameters.tds_percent, dec("12"));

        let sales = store.get("sales").unwrap();
        assert_eq!(sales.parameters.bonus_percent, dec("25"));
        assert_eq!(sales.parameters.esi_percent, dec("0.75"));
    }

    #[test]
    fn test_new_rejects_empty_seed() {
        let result = TemplateStore::new(vec![], DEFAULT_TEMPLATE_ID);
        assert!(matches!(result, Err(EngineError::InvalidTemplate { .. })));
    }

    #[test]
    fn test_new_rejects_duplicate_ids() {
        let template =
            CompensationTemplate::new("dup", "Duplicate", TemplateParameters::default());
        let result = TemplateStore::new(vec![template.clone(), template], DEFAULT_TEMPLATE_ID);
        match result {
            Err(EngineError::InvalidTemplate { template_id, field, .. }) => {
                assert_eq!(template_id, "dup");
                assert_eq!(field, "id");
            }
            other => panic!("Expected InvalidTemplate, got {:?}", other.map(|s| s.len())),
        }
    }

    #[test]
    fn test_get_unknown_returns_not_found() {
        let store = TemplateStore::with_builtin_templates();
        match store.get("missing") {
            Err(EngineError::TemplateNotFound { id }) => assert_eq!(id, "missing"),
            other => panic!("Expected TemplateNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_create_uses_defaults_without_base() {
        let mut store = TemplateStore::with_builtin_templates();
        let created = store.create(None).unwrap();

        assert!(created.id.starts_with("custom_"));
        assert_eq!(created.name, NEW_TEMPLATE_NAME);
        assert_eq!(created.parameters, TemplateParameters::default());
        assert_eq!(store.len(), 4);
        assert_eq!(store.get(&created.id).unwrap(), &created);
    }

    #[test]
    fn test_create_from_base_does_not_mutate_existing() {
        let mut store = TemplateStore::with_builtin_templates();
        let before = store.get("sales").unwrap().clone();

        let created = store.create(Some(&before.parameters)).unwrap();

        assert_ne!(created.id, "sales");
        assert_eq!(created.parameters, before.parameters);
        assert_eq!(store.get("sales").unwrap(), &before);
    }

    #[test]
    fn test_create_rejects_invalid_base() {
        let mut store = TemplateStore::with_builtin_templates();
        let mut base = TemplateParameters::default();
        base.pf_percent = dec("-12");

        assert!(store.create(Some(&base)).is_err());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_create_named_uses_given_name() {
        let mut store = TemplateStore::with_builtin_templates();
        let created = store.create_named("Interns", None).unwrap();

        assert_eq!(created.name, "Interns");
        assert_eq!(store.get(&created.id).unwrap().name, "Interns");
    }

    #[test]
    fn test_create_named_rejects_empty_name_without_storing() {
        let mut store = TemplateStore::with_builtin_templates();

        match store.create_named("", None) {
            Err(EngineError::InvalidTemplate { field, .. }) => assert_eq!(field, "name"),
            other => panic!("Expected InvalidTemplate, got {:?}", other),
        }
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_duplicate_default() {
        let mut store = TemplateStore::with_builtin_templates();
        let copy = store.duplicate("default").unwrap();
        let original = store.get("default").unwrap();

        assert_ne!(copy.id, original.id);
        assert_eq!(copy.parameters, original.parameters);
        assert_eq!(copy.name, "Default Template (Copy)");
    }

    #[test]
    fn test_duplicate_generates_distinct_ids() {
        let mut store = TemplateStore::with_builtin_templates();
        let first = store.duplicate("tech").unwrap();
        let second = store.duplicate("tech").unwrap();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_duplicate_unknown_returns_not_found() {
        let mut store = TemplateStore::with_builtin_templates();
        assert!(matches!(
            store.duplicate("missing"),
            Err(EngineError::TemplateNotFound { .. })
        ));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_update_merges_fields() {
        let mut store = TemplateStore::with_builtin_templates();
        let patch = TemplatePatch {
            hra_percent: Some(dec("45")),
            ..TemplatePatch::default()
        };

        let updated = store.update("tech", &patch).unwrap();
        assert_eq!(updated.parameters.hra_percent, dec("45"));
        assert_eq!(updated.parameters.bonus_percent, dec("15"));
        assert_eq!(store.get("tech").unwrap(), &updated);
    }

    #[test]
    fn test_update_unknown_returns_not_found() {
        let mut store = TemplateStore::with_builtin_templates();
        let result = store.update("missing", &TemplatePatch::default());
        assert!(matches!(result, Err(EngineError::TemplateNotFound { .. })));
    }

    #[test]
    fn test_rejected_update_leaves_store_unchanged() {
        let mut store = TemplateStore::with_builtin_templates();
        let before = store.get("default").unwrap().clone();
        let patch = TemplatePatch {
            name: Some("Still valid".to_string()),
            tds_percent: Some(dec("-1")),
            ..TemplatePatch::default()
        };

        assert!(matches!(
            store.update("default", &patch),
            Err(EngineError::InvalidTemplate { .. })
        ));
        assert_eq!(store.get("default").unwrap(), &before);
    }

    #[test]
    fn test_delete_removes_template() {
        let mut store = TemplateStore::with_builtin_templates();
        let removed = store.delete("sales").unwrap();

        assert_eq!(removed.id, "sales");
        assert_eq!(store.len(), 2);
        assert!(!store.contains("sales"));
    }

    #[test]
    fn test_delete_last_template_fails() {
        let mut store = single_template_store();

        match store.delete("only") {
            Err(EngineError::LastTemplate { id }) => assert_eq!(id, "only"),
            other => panic!("Expected LastTemplate, got {:?}", other),
        }
        assert_eq!(store.len(), 1);
        assert!(store.contains("only"));
    }

    #[test]
    fn test_delete_down_to_one_then_fails() {
        let mut store = TemplateStore::with_builtin_templates();
        store.delete("default").unwrap();
        store.delete("tech").unwrap();

        assert!(matches!(
            store.delete("sales"),
            Err(EngineError::LastTemplate { .. })
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_delete_unknown_returns_not_found() {
        let mut store = single_template_store();
        assert!(matches!(
            store.delete("missing"),
            Err(EngineError::TemplateNotFound { .. })
        ));
    }

    #[test]
    fn test_fallback_prefers_designated_default() {
        let mut store = TemplateStore::with_builtin_templates();
        store.delete("tech").unwrap();
        assert_eq!(store.fallback_template_id(), "default");
    }

    #[test]
    fn test_fallback_uses_first_remaining_without_default() {
        let mut store = TemplateStore::with_builtin_templates();
        store.delete("default").unwrap();
        assert_eq!(store.fallback_template_id(), "tech");
    }
}
