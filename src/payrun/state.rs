//! Pay run state machine.
//!
//! A pay run is `Idle` until first calculated, `Fresh` while its result
//! matches the working configuration, `Stale` after any edit, and `Confirmed`
//! once payslips are deemed generated.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The lifecycle state of a pay run.
///
/// # Example
///
/// ```
/// use payroll_engine::payrun::{PayRunEvent, PayRunState};
///
/// let state = PayRunState::Idle
///     .transition(PayRunEvent::Calculate, "run-1")
///     .unwrap()
///     .transition(PayRunEvent::Edit, "run-1")
///     .unwrap();
/// assert_eq!(state, PayRunState::Stale);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayRunState {
    /// No calculation has been run yet.
    #[default]
    Idle,
    /// The latest result matches the current configuration.
    Fresh,
    /// The configuration changed since the latest result.
    Stale,
    /// The pay run was confirmed. Terminal.
    Confirmed,
}

/// Something that happens to a pay run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayRunEvent {
    /// A calculation succeeded.
    Calculate,
    /// The template, a template field, the department filter or the period
    /// changed.
    Edit,
    /// The user confirmed the pay run.
    Confirm,
}

impl PayRunState {
    /// Returns the state reached by applying `event`.
    ///
    /// `session_id` is only used to describe errors.
    ///
    /// # Errors
    ///
    /// - `StaleConfirmation` when confirming a `Stale` pay run
    /// - `InvalidTransition` when confirming an `Idle` pay run or applying
    ///   any event to a `Confirmed` one
    pub fn transition(self, event: PayRunEvent, session_id: &str) -> EngineResult<Self> {
        use PayRunEvent::*;
        use PayRunState::*;

        match (self, event) {
            (Idle | Fresh | Stale, Calculate) => Ok(Fresh),
            (Idle, Edit) => Ok(Idle),
            (Fresh | Stale, Edit) => Ok(Stale),
            (Fresh, Confirm) => Ok(Confirmed),
            (Stale, Confirm) => Err(EngineError::StaleConfirmation {
                session_id: session_id.to_string(),
            }),
            (Idle, Confirm) | (Confirmed, _) => Err(EngineError::InvalidTransition {
                state: self.to_string(),
                action: event.to_string(),
            }),
        }
    }
}

impl fmt::Display for PayRunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PayRunState::Idle => "idle",
            PayRunState::Fresh => "fresh",
            PayRunState::Stale => "stale",
            PayRunState::Confirmed => "confirmed",
        };
        f.write_str(name)
    }
}

impl fmt::Display for PayRunEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PayRunEvent::Calculate => "calculate",
            PayRunEvent::Edit => "edit",
            PayRunEvent::Confirm => "confirm",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PayRunEvent::*;
    use PayRunState::*;

    fn apply(state: PayRunState, event: PayRunEvent) -> EngineResult<PayRunState> {
        state.transition(event, "run-1")
    }

    #[test]
    fn test_idle_calculate_becomes_fresh() {
        assert_eq!(apply(Idle, Calculate).unwrap(), Fresh);
    }

    #[test]
    fn test_fresh_edit_becomes_stale() {
        assert_eq!(apply(Fresh, Edit).unwrap(), Stale);
    }

    #[test]
    fn test_stale_calculate_becomes_fresh() {
        assert_eq!(apply(Stale, Calculate).unwrap(), Fresh);
    }

    #[test]
    fn test_fresh_confirm_becomes_confirmed() {
        assert_eq!(apply(Fresh, Confirm).unwrap(), Confirmed);
    }

    #[test]
    fn test_recalculating_fresh_stays_fresh() {
        assert_eq!(apply(Fresh, Calculate).unwrap(), Fresh);
    }

    #[test]
    fn test_edits_before_first_calculation_stay_idle() {
        assert_eq!(apply(Idle, Edit).unwrap(), Idle);
        assert_eq!(apply(Stale, Edit).unwrap(), Stale);
    }

    #[test]
    fn test_stale_confirm_is_rejected() {
        match apply(Stale, Confirm) {
            Err(EngineError::StaleConfirmation { session_id }) => assert_eq!(session_id, "run-1"),
            other => panic!("Expected StaleConfirmation, got {:?}", other),
        }
    }

    #[test]
    fn test_idle_confirm_is_rejected() {
        match apply(Idle, Confirm) {
            Err(EngineError::InvalidTransition { state, action }) => {
                assert_eq!(state, "idle");
                assert_eq!(action, "confirm");
            }
            other => panic!("Expected InvalidTransition, got {:?}", other),
        }
    }

    #[test]
    fn test_confirmed_is_terminal() {
        for event in [Calculate, Edit, Confirm] {
            assert!(
                matches!(
                    apply(Confirmed, event),
                    Err(EngineError::InvalidTransition { .. })
                ),
                "confirmed accepted {}",
                event
            );
        }
    }

    #[test]
    fn test_state_serialization() {
        assert_eq!(serde_json::to_string(&Fresh).unwrap(), "\"fresh\"");
        assert_eq!(serde_json::to_string(&Confirmed).unwrap(), "\"confirmed\"");
    }
}
