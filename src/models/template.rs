//! Compensation template models.
//!
//! A [`CompensationTemplate`] is a named, reusable set of percentage and fixed
//! parameters that defines how pay is computed. [`TemplatePatch`] carries a
//! partial update to a template.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The parameter set of a compensation template.
///
/// All `*_percent` fields are percentages in the range 0 to 100.
/// `professional_tax` is a fixed currency amount.
///
/// # Example
///
/// ```
/// use payroll_engine::models::TemplateParameters;
/// use rust_decimal::Decimal;
///
/// let params = TemplateParameters::default();
/// assert_eq!(params.hra_percent, Decimal::new(40, 0));
/// assert_eq!(params.esi_percent, Decimal::new(75, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateParameters {
    /// Share of the cost-to-company allotted to basic pay.
    pub basic_pay_percent: Decimal,
    /// House Rent Allowance as a percentage of basic pay.
    pub hra_percent: Decimal,
    /// Performance bonus as a percentage of basic pay at an office score of 10.
    pub bonus_percent: Decimal,
    /// Weight of the office score in bonus calculation.
    pub office_score_weight: Decimal,
    /// Provident Fund as a percentage of basic pay.
    pub pf_percent: Decimal,
    /// Employee State Insurance as a percentage of gross pay.
    pub esi_percent: Decimal,
    /// Tax Deducted at Source as a percentage of gross pay.
    pub tds_percent: Decimal,
    /// Fixed professional tax deducted per employee.
    pub professional_tax: Decimal,
}

impl Default for TemplateParameters {
    fn default() -> Self {
        Self {
            basic_pay_percent: Decimal::new(50, 0),
            hra_percent: Decimal::new(40, 0),
            bonus_percent: Decimal::new(10, 0),
            office_score_weight: Decimal::new(5, 0),
            pf_percent: Decimal::new(12, 0),
            esi_percent: Decimal::new(75, 2),
            tds_percent: Decimal::new(10, 0),
            professional_tax: Decimal::new(200, 0),
        }
    }
}

impl TemplateParameters {
    /// Returns every percentage field paired with its name.
    pub fn percentages(&self) -> [(&'static str, Decimal); 7] {
        [
            ("basic_pay_percent", self.basic_pay_percent),
            ("hra_percent", self.hra_percent),
            ("bonus_percent", self.bonus_percent),
            ("office_score_weight", self.office_score_weight),
            ("pf_percent", self.pf_percent),
            ("esi_percent", self.esi_percent),
            ("tds_percent", self.tds_percent),
        ]
    }
}

/// A named compensation template.
///
/// Parameters are flattened into the template when serialized, so a template
/// reads as a single flat record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationTemplate {
    /// Unique identifier for the template.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// The template's pay parameters.
    #[serde(flatten)]
    pub parameters: TemplateParameters,
}

impl CompensationTemplate {
    /// Creates a template from its parts.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        parameters: TemplateParameters,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parameters,
        }
    }

    /// Returns a copy of this template with the patch applied.
    ///
    /// Fields absent from the patch keep their current value. The ID never
    /// changes.
    pub fn patched(&self, patch: &TemplatePatch) -> Self {
        let mut updated = self.clone();
        patch.apply_to(&mut updated);
        updated
    }

    /// Returns a patch that would overwrite every field of another template
    /// with this template's name and parameters.
    pub fn to_patch(&self) -> TemplatePatch {
        let p = &self.parameters;
        TemplatePatch {
            name: Some(self.name.clone()),
            basic_pay_percent: Some(p.basic_pay_percent),
            hra_percent: Some(p.hra_percent),
            bonus_percent: Some(p.bonus_percent),
            office_score_weight: Some(p.office_score_weight),
            pf_percent: Some(p.pf_percent),
            esi_percent: Some(p.esi_percent),
            tds_percent: Some(p.tds_percent),
            professional_tax: Some(p.professional_tax),
        }
    }
}

/// A partial update to a compensation template.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{CompensationTemplate, TemplateParameters, TemplatePatch};
/// use rust_decimal::Decimal;
///
/// let template = CompensationTemplate::new("default", "Default Template", TemplateParameters::default());
/// let patch = TemplatePatch {
///     hra_percent: Some(Decimal::new(35, 0)),
///     ..TemplatePatch::default()
/// };
///
/// let updated = template.patched(&patch);
/// assert_eq!(updated.parameters.hra_percent, Decimal::new(35, 0));
/// assert_eq!(updated.parameters.pf_percent, Decimal::new(12, 0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplatePatch {
    /// New template name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New basic pay percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_pay_percent: Option<Decimal>,
    /// New HRA percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hra_percent: Option<Decimal>,
    /// New bonus percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus_percent: Option<Decimal>,
    /// New office score weight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub office_score_weight: Option<Decimal>,
    /// New PF percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pf_percent: Option<Decimal>,
    /// New ESI percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub esi_percent: Option<Decimal>,
    /// New TDS percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tds_percent: Option<Decimal>,
    /// New professional tax amount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professional_tax: Option<Decimal>,
}

impl TemplatePatch {
    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Writes every present field into the template.
    pub fn apply_to(&self, template: &mut CompensationTemplate) {
        if let Some(name) = &self.name {
            template.name = name.clone();
        }

        let p = &mut template.parameters;
        let fields = [
            (&mut p.basic_pay_percent, self.basic_pay_percent),
            (&mut p.hra_percent, self.hra_percent),
            (&mut p.bonus_percent, self.bonus_percent),
            (&mut p.office_score_weight, self.office_score_weight),
            (&mut p.pf_percent, self.pf_percent),
            (&mut p.esi_percent, self.esi_percent),
            (&mut p.tds_percent, self.tds_percent),
            (&mut p.professional_tax, self.professional_tax),
        ];
        for (slot, value) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}
