//! Payroll Calculation Engine
//!
//! This crate computes monthly employee pay from named compensation
//! templates: earnings (basic, HRA, performance bonus), statutory deductions
//! (PF, ESI, TDS, professional tax) and net pay, aggregated over a
//! department-filtered roster. It also manages the template store and the
//! pay run lifecycle (calculate, edit, confirm), and serves both over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod payrun;
pub mod store;
