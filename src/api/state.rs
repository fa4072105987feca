//! Application state for the Payroll Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use uuid::Uuid;

use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::payrun::PayRunSession;
use crate::store::SharedTemplateStore;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// loaded configuration, the template store and the open pay run sessions.
///
/// Handlers that need both the template store and a session always lock the
/// store first.
#[derive(Clone)]
pub struct AppState {
    /// The loaded payroll configuration.
    config: Arc<ConfigLoader>,
    /// The template store shared by every request.
    templates: SharedTemplateStore,
    /// Open pay run sessions by ID.
    sessions: Arc<Mutex<HashMap<Uuid, PayRunSession>>>,
}

impl AppState {
    /// Creates a new application state, seeding the template store from the
    /// configuration.
    ///
    /// # Errors
    ///
    /// - `InvalidTemplate` if a configured template is invalid
    pub fn new(config: ConfigLoader) -> EngineResult<Self> {
        let templates = SharedTemplateStore::new(config.template_store()?);
        Ok(Self {
            config: Arc::new(config),
            templates,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the shared template store.
    pub fn templates(&self) -> &SharedTemplateStore {
        &self.templates
    }

    /// Decimal places used for presented totals.
    pub fn presentation_scale(&self) -> u32 {
        self.config.engine().presentation_scale
    }

    fn sessions_guard(&self) -> MutexGuard<'_, HashMap<Uuid, PayRunSession>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a new session.
    pub fn insert_session(&self, session: PayRunSession) {
        self.sessions_guard().insert(session.id(), session);
    }

    /// Runs a closure against one session.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if no session has the given ID
    /// - whatever error the closure returns
    pub fn with_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut PayRunSession) -> EngineResult<T>,
    ) -> EngineResult<T> {
        let mut sessions = self.sessions_guard();
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| EngineError::SessionNotFound { id: id.to_string() })?;
        f(session)
    }

    /// Removes a session and returns it.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if no session has the given ID
    pub fn remove_session(&self, id: Uuid) -> EngineResult<PayRunSession> {
        self.sessions_guard()
            .remove(&id)
            .ok_or_else(|| EngineError::SessionNotFound { id: id.to_string() })
    }

    /// Runs a closure against every open session.
    pub fn for_each_session<T>(&self, mut f: impl FnMut(&mut PayRunSession) -> T) -> Vec<T> {
        self.sessions_guard().values_mut().map(|s| f(s)).collect()
    }
}
