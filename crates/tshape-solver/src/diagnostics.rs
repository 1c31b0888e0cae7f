//! Validation errors and the tracer seam used to collect them.
//!
//! ## Tracer Pattern
//!
//! The validator reports every failure through a [`ValidationTracer`]. The
//! failure is passed as a closure, so:
//!
//! - [`FastTracer`] never builds the error (no formatting, no allocation) and
//!   stops at the first failure; it backs the boolean `is_assignable` path.
//! - [`DiagnosticTracer`] builds and stores errors, and decides per
//!   [`ReportPolicy`] whether the current phase keeps going.

use crate::options::ReportPolicy;
use crate::types::ShapeType;
use std::fmt;
use thiserror::Error;
use tshape_common::diagnostics::{Diagnostic, diagnostic_codes as codes};
use tshape_common::limits::MAX_ERRORS_PER_VALIDATION;

/// Why a candidate is not assignable to a shape.
///
/// `property` fields hold the full path of the offending property, e.g.
/// `error.message` or `artworks[0].title`.
#[derive(Clone, Debug, PartialEq)]
pub enum ValidationError {
    /// The value's type is not in the declared type set (including `never`).
    TypeMismatch {
        property: String,
        expected: ShapeType,
        actual: ShapeType,
        /// Display name of the shape declaring the property.
        declared_in: String,
    },
    /// A fresh candidate carries a property the shape does not declare.
    ExcessProperty { property: String, target: String },
    /// A required property is absent.
    MissingRequiredProperty {
        property: String,
        source: String,
        target: String,
    },
    /// A regular candidate shares no property with a weak shape.
    NoCommonProperties { source: String, target: String },
    /// A type assertion between types that do not overlap.
    InvalidAssertion {
        source: String,
        target: String,
        reasons: Vec<ValidationError>,
    },
}

impl ValidationError {
    /// Diagnostic code for this error.
    #[must_use]
    pub const fn code(&self) -> u32 {
        match self {
            Self::TypeMismatch { .. } => codes::TYPE_NOT_ASSIGNABLE,
            Self::ExcessProperty { .. } => codes::EXCESS_PROPERTY,
            Self::MissingRequiredProperty { .. } => codes::PROPERTY_MISSING,
            Self::NoCommonProperties { .. } => codes::NO_COMMON_PROPERTIES,
            Self::InvalidAssertion { .. } => codes::CONVERSION_MAY_BE_MISTAKE,
        }
    }

    /// Path of the property the error is about, if any.
    #[must_use]
    pub fn property(&self) -> Option<&str> {
        match self {
            Self::TypeMismatch { property, .. }
            | Self::ExcessProperty { property, .. }
            | Self::MissingRequiredProperty { property, .. } => Some(property),
            Self::NoCommonProperties { .. } | Self::InvalidAssertion { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_excess_property(&self) -> bool {
        matches!(self, Self::ExcessProperty { .. })
    }

    #[must_use]
    pub const fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }

    #[must_use]
    pub const fn is_missing_property(&self) -> bool {
        matches!(self, Self::MissingRequiredProperty { .. })
    }

    /// Render into a user-facing diagnostic.
    #[must_use]
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Self::TypeMismatch {
                property,
                expected,
                actual,
                declared_in,
            } => {
                let expected = expected.to_string();
                let actual = actual.to_string();
                Diagnostic::from_code(self.code(), &[actual.as_str(), expected.as_str()])
                    .with_property(property.as_str())
                    .with_related(
                        codes::EXPECTED_TYPE_FROM_PROPERTY,
                        &[leaf_name(property), declared_in.as_str()],
                    )
            }
            Self::ExcessProperty { property, target } => {
                Diagnostic::from_code(self.code(), &[leaf_name(property), target.as_str()])
                    .with_property(property.as_str())
            }
            Self::MissingRequiredProperty {
                property,
                source,
                target,
            } => Diagnostic::from_code(self.code(), &[
                leaf_name(property),
                source.as_str(),
                target.as_str(),
            ])
                .with_property(property.as_str())
                .with_related(codes::PROPERTY_DECLARED_HERE, &[leaf_name(property)]),
            Self::NoCommonProperties { source, target } => {
                Diagnostic::from_code(self.code(), &[source.as_str(), target.as_str()])
            }
            Self::InvalidAssertion {
                source,
                target,
                reasons,
            } => {
                let mut diag = Diagnostic::from_code(self.code(), &[source.as_str(), target.as_str()]);
                for reason in reasons {
                    let nested = reason.to_diagnostic();
                    diag.related_information.push(
                        tshape_common::DiagnosticRelatedInformation {
                            message_text: nested.message_text,
                            category: tshape_common::DiagnosticCategory::Message,
                            code: nested.code,
                        },
                    );
                }
                diag
            }
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let diag = self.to_diagnostic();
        match self.property() {
            Some(path) if path.contains(['.', '[']) => {
                write!(f, "{path}: {}", diag.message_text)
            }
            _ => f.write_str(&diag.message_text),
        }
    }
}

/// Last segment of a property path: `error.message` -> `message`.
fn leaf_name(path: &str) -> &str {
    let tail = path.rsplit('.').next().unwrap_or(path);
    match tail.find('[') {
        Some(0) | None => tail,
        Some(pos) => &tail[..pos],
    }
}

/// A rejected candidate: the target it was checked against and why it failed.
///
/// `errors` is never empty.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("candidate is not assignable to '{target}' ({} error(s))", .errors.len())]
pub struct ValidationFailure {
    pub target: String,
    pub errors: Vec<ValidationError>,
}

impl ValidationFailure {
    #[must_use]
    pub fn first(&self) -> Option<&ValidationError> {
        self.errors.first()
    }

    /// Whether an excess-property error names `property`.
    #[must_use]
    pub fn has_excess_property(&self, property: &str) -> bool {
        self.errors.iter().any(|e| {
            matches!(e, ValidationError::ExcessProperty { property: p, .. } if p == property)
        })
    }

    /// Whether a missing-property error names `property`.
    #[must_use]
    pub fn has_missing_property(&self, property: &str) -> bool {
        self.errors.iter().any(|e| {
            matches!(e, ValidationError::MissingRequiredProperty { property: p, .. } if p == property)
        })
    }

    /// Whether a type-mismatch error names `property`.
    #[must_use]
    pub fn has_type_mismatch(&self, property: &str) -> bool {
        self.errors.iter().any(|e| {
            matches!(e, ValidationError::TypeMismatch { property: p, .. } if p == property)
        })
    }

    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.errors.iter().map(ValidationError::to_diagnostic).collect()
    }
}

// =============================================================================
// Tracers
// =============================================================================

/// The phase of a validation call a failure was found in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationPhase {
    /// Checking the candidate's own properties (excess properties, type mismatches).
    Properties,
    /// Looking for required properties the candidate lacks.
    MissingProperties,
    /// Weak type detection.
    WeakType,
}

/// Receives validation failures.
pub trait ValidationTracer {
    /// Called for every failure. The `reason` closure is only invoked by
    /// tracers that keep the error.
    ///
    /// Returns `true` if the current phase should keep checking, `false` to
    /// stop the phase.
    fn on_failure(
        &mut self,
        phase: ValidationPhase,
        reason: impl FnOnce() -> ValidationError,
    ) -> bool;

    /// Whether validation should stop entirely (no further phases).
    fn is_aborted(&self) -> bool {
        false
    }
}

/// Stops at the first failure without constructing it.
#[derive(Clone, Copy, Debug, Default)]
pub struct FastTracer {
    failed: bool,
}

impl FastTracer {
    #[must_use]
    pub const fn new() -> Self {
        Self { failed: false }
    }

    #[must_use]
    pub const fn failed(&self) -> bool {
        self.failed
    }
}

impl ValidationTracer for FastTracer {
    #[inline(always)]
    fn on_failure(
        &mut self,
        _phase: ValidationPhase,
        _reason: impl FnOnce() -> ValidationError,
    ) -> bool {
        self.failed = true;
        false
    }

    fn is_aborted(&self) -> bool {
        self.failed
    }
}

/// Collects failures according to a [`ReportPolicy`].
#[derive(Clone, Debug)]
pub struct DiagnosticTracer {
    policy: ReportPolicy,
    errors: Vec<ValidationError>,
    aborted: bool,
}

impl DiagnosticTracer {
    #[must_use]
    pub const fn new(policy: ReportPolicy) -> Self {
        Self {
            policy,
            errors: Vec::new(),
            aborted: false,
        }
    }

    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    #[must_use]
    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}

impl ValidationTracer for DiagnosticTracer {
    fn on_failure(
        &mut self,
        phase: ValidationPhase,
        reason: impl FnOnce() -> ValidationError,
    ) -> bool {
        if self.errors.len() < MAX_ERRORS_PER_VALIDATION {
            self.errors.push(reason());
        } else {
            self.aborted = true;
            return false;
        }
        match self.policy {
            ReportPolicy::Exhaustive => true,
            // Only the property scan short-circuits; every missing property is reported.
            ReportPolicy::PerPhase => phase != ValidationPhase::Properties,
            ReportPolicy::FirstError => {
                self.aborted = true;
                false
            }
        }
    }

    fn is_aborted(&self) -> bool {
        self.aborted
    }
}

#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod tests;
