//! Validator configuration.

use serde::Deserialize;

/// How many errors a validation call reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReportPolicy {
    /// Stop scanning candidate properties at the first excess-property or
    /// type-mismatch error, then report every missing required property.
    #[default]
    PerPhase,
    /// Report every error.
    Exhaustive,
    /// Stop at the first error of any kind.
    FirstError,
}

/// Options controlling validation.
///
/// Deserialized from the `"options"` object of a declaration document
/// (camelCase keys, every field optional).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidatorOptions {
    pub report_policy: ReportPolicy,
    /// Reject regular candidates sharing no property with an all-optional
    /// shape. Off unless requested.
    pub weak_type_detection: bool,
    /// When set, optional properties no longer accept an explicit `undefined`.
    pub exact_optional_property_types: bool,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            report_policy: ReportPolicy::PerPhase,
            weak_type_detection: false,
            exact_optional_property_types: false,
        }
    }
}
