//! Common types and utilities for the tshape structural validator.
//!
//! This crate provides the pieces shared by the solver and the CLI:
//! - Diagnostic codes, message templates and the `Diagnostic` record
//! - Centralized limits (nesting depth for shapes and values)

// Diagnostic message table and rendering helpers
pub mod diagnostics;
pub use diagnostics::{
    Diagnostic, DiagnosticCategory, DiagnosticMessage, DiagnosticRelatedInformation,
    diagnostic_codes, format_message, get_diagnostic_message,
};

// Centralized limits and thresholds
pub mod limits;

#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod diagnostics_tests;
