//! Storage for compensation templates.
//!
//! [`TemplateStore`] holds the templates and enforces that at least one
//! exists. [`SharedTemplateStore`] wraps it for use across threads.

mod shared;
mod template_store;

pub use shared::SharedTemplateStore;
pub use template_store::{
    DEFAULT_TEMPLATE_ID, NEW_TEMPLATE_NAME, TemplateStore, builtin_templates,
};
