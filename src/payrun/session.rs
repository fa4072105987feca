//! Pay run sessions.
//!
//! A [`PayRunSession`] ties together a pay period, a department filter, the
//! selected template and a session-scoped working copy of that template.
//! Edits touch only the working copy until [`PayRunSession::save`] writes it
//! back to the [`TemplateStore`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::calculation::calculate_pay_run;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    CompensationTemplate, DepartmentFilter, Employee, PayPeriod, PayRunResult, TemplatePatch,
};
use crate::store::TemplateStore;

use super::state::{PayRunEvent, PayRunState};

/// One pay run being prepared, calculated and confirmed.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{DepartmentFilter, TemplatePatch};
/// use payroll_engine::payrun::{PayRunSession, PayRunState};
/// use payroll_engine::store::TemplateStore;
/// use rust_decimal::Decimal;
///
/// let store = TemplateStore::with_builtin_templates();
/// let mut session = PayRunSession::new(&store, "default", "2025-11".parse().unwrap(), DepartmentFilter::All).unwrap();
///
/// session.calculate(&[]).unwrap();
/// assert_eq!(session.state(), PayRunState::Fresh);
///
/// session.edit(&TemplatePatch { hra_percent: Some(Decimal::new(30, 0)), ..Default::default() }).unwrap();
/// assert_eq!(session.state(), PayRunState::Stale);
/// assert!(session.confirm().is_err());
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct PayRunSession {
    id: Uuid,
    pay_period: PayPeriod,
    department: DepartmentFilter,
    template_id: String,
    working_config: CompensationTemplate,
    state: PayRunState,
    result: Option<PayRunResult>,
    created_at: DateTime<Utc>,
    confirmed_at: Option<DateTime<Utc>>,
}

impl PayRunSession {
    /// Starts a new session in the `Idle` state.
    ///
    /// # Errors
    ///
    /// - `TemplateNotFound` if `template_id` is not in the store
    pub fn new(
        store: &TemplateStore,
        template_id: &str,
        pay_period: PayPeriod,
        department: DepartmentFilter,
    ) -> EngineResult<Self> {
        let working_config = store.get(template_id)?.clone();
        let session = Self {
            id: Uuid::new_v4(),
            pay_period,
            department,
            template_id: template_id.to_string(),
            working_config,
            state: PayRunState::Idle,
            result: None,
            created_at: Utc::now(),
            confirmed_at: None,
        };

        info!(
            session_id = %session.id,
            template_id = %template_id,
            pay_period = %pay_period,
            department = %session.department,
            "Pay run session started"
        );
        Ok(session)
    }

    /// The session's unique ID.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The pay period being run.
    pub fn pay_period(&self) -> PayPeriod {
        self.pay_period
    }

    /// The department filter in effect.
    pub fn department(&self) -> &DepartmentFilter {
        &self.department
    }

    /// The ID of the selected template.
    pub fn template_id(&self) -> &str {
        &self.template_id
    }

    /// The working configuration used for calculation.
    pub fn working_config(&self) -> &CompensationTemplate {
        &self.working_config
    }

    /// The current state.
    pub fn state(&self) -> PayRunState {
        self.state
    }

    /// The latest calculation result, fresh or not.
    pub fn result(&self) -> Option<&PayRunResult> {
        self.result.as_ref()
    }

    /// When the session was started.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the pay run was confirmed, if it was.
    pub fn confirmed_at(&self) -> Option<DateTime<Utc>> {
        self.confirmed_at
    }

    fn id_string(&self) -> String {
        self.id.to_string()
    }

    /// Applies an edit event, then runs `change` if the transition is allowed.
    fn apply_edit(&mut self, change: impl FnOnce(&mut Self)) -> EngineResult<()> {
        let next = self.state.transition(PayRunEvent::Edit, &self.id_string())?;
        change(self);
        self.state = next;
        Ok(())
    }

    /// Loads a stored template as the working configuration.
    ///
    /// Any unsaved edits to the previous working configuration are discarded.
    ///
    /// # Errors
    ///
    /// - `TemplateNotFound` if `template_id` is not in the store
    /// - `InvalidTransition` if the pay run is confirmed
    pub fn select_template(&mut self, store: &TemplateStore, template_id: &str) -> EngineResult<()> {
        let template = store.get(template_id)?.clone();
        self.apply_edit(|session| {
            session.template_id = template.id.clone();
            session.working_config = template;
        })?;

        info!(session_id = %self.id, template_id = %template_id, "Template selected");
        Ok(())
    }

    /// Changes fields of the working configuration.
    ///
    /// The stored template is not touched. A patch that changes nothing leaves
    /// the state as it is.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` if the pay run is confirmed
    pub fn edit(&mut self, patch: &TemplatePatch) -> EngineResult<&CompensationTemplate> {
        let updated = self.working_config.patched(patch);
        if updated != self.working_config {
            self.apply_edit(|session| session.working_config = updated)?;
        }
        Ok(&self.working_config)
    }

    /// Changes the department filter.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` if the pay run is confirmed
    pub fn set_department(&mut self, department: DepartmentFilter) -> EngineResult<()> {
        if department != self.department {
            self.apply_edit(|session| session.department = department)?;
        }
        Ok(())
    }

    /// Changes the pay period.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` if the pay run is confirmed
    pub fn set_period(&mut self, pay_period: PayPeriod) -> EngineResult<()> {
        if pay_period != self.pay_period {
            self.apply_edit(|session| session.pay_period = pay_period)?;
        }
        Ok(())
    }

    /// Calculates the pay run with the working configuration.
    ///
    /// On failure the previous result and state are kept.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` if the pay run is confirmed
    /// - `InvalidTemplate` or `InvalidEmployeeData` from the calculator
    pub fn calculate(&mut self, roster: &[Employee]) -> EngineResult<&PayRunResult> {
        let next = self
            .state
            .transition(PayRunEvent::Calculate, &self.id_string())?;
        let result = calculate_pay_run(
            roster,
            &self.working_config,
            &self.department,
            self.pay_period,
        )?;

        info!(
            session_id = %self.id,
            employee_count = result.totals.employee_count,
            sum_net = %result.totals.sum_net,
            "Pay run calculated"
        );
        self.state = next;
        Ok(&*self.result.insert(result))
    }

    /// Confirms the pay run, marking its payslips as generated.
    ///
    /// Only a fresh result can be confirmed.
    ///
    /// # Errors
    ///
    /// - `StaleConfirmation` if the configuration changed since calculation
    /// - `InvalidTransition` if nothing was calculated or the pay run is
    ///   already confirmed
    pub fn confirm(&mut self) -> EngineResult<&PayRunResult> {
        let next = self
            .state
            .transition(PayRunEvent::Confirm, &self.id_string())?;
        let Some(result) = self.result.as_ref() else {
            return Err(EngineError::InvalidTransition {
                state: self.state.to_string(),
                action: PayRunEvent::Confirm.to_string(),
            });
        };

        let confirmed_at = Utc::now();
        info!(
            session_id = %self.id,
            pay_period = %self.pay_period,
            employee_count = result.totals.employee_count,
            "Pay run confirmed"
        );
        self.state = next;
        self.confirmed_at = Some(confirmed_at);
        Ok(result)
    }

    /// Writes the working configuration back to the selected stored template.
    ///
    /// Saving does not change the pay run state.
    ///
    /// # Errors
    ///
    /// - `TemplateNotFound` if the selected template was deleted
    /// - `InvalidTemplate` if the working configuration is invalid
    pub fn save(&self, store: &mut TemplateStore) -> EngineResult<CompensationTemplate> {
        let saved = store.update(&self.template_id, &self.working_config.to_patch())?;
        info!(session_id = %self.id, template_id = %self.template_id, "Working configuration saved");
        Ok(saved)
    }

    /// Reacts to a template being deleted from the store.
    ///
    /// If the deleted template is the selected one, the store's fallback
    /// template is selected instead and `true` is returned. Confirmed pay runs
    /// keep their selection.
    ///
    /// # Errors
    ///
    /// - `TemplateNotFound` if the fallback template is not in the store
    pub fn handle_template_deleted(
        &mut self,
        store: &TemplateStore,
        deleted_id: &str,
    ) -> EngineResult<bool> {
        if self.template_id != deleted_id || self.state == PayRunState::Confirmed {
            return Ok(false);
        }

        let fallback = store.fallback_template_id().to_string();
        self.select_template(store, &fallback)?;
        Ok(true)
    }
}
