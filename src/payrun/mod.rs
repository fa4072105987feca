//! Pay run lifecycle.
//!
//! This module provides the [`PayRunState`] machine that tracks whether a
//! calculated result is fresh, and the [`PayRunSession`] that owns a
//! session-scoped working configuration.

mod session;
mod state;

pub use session::PayRunSession;
pub use state::{PayRunEvent, PayRunState};
