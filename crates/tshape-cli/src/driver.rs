//! Command implementations: load documents, run the validator, collect results.
//!
//! Nothing here prints; the binary renders the returned outcomes.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};
use tshape_common::Diagnostic;
use tshape_solver::{
    Freshness, Record, ReportPolicy, Shape, ShapeRegistry, ShapeValidator, TypeFormatter,
    ValidatorOptions, parse_candidate, try_intersect_all,
};

use crate::args::{CheckArgs, IntersectArgs, ListArgs};

/// How the candidate was checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CheckMode {
    /// Object literal assigned to the target.
    Literal,
    /// Value bound to a variable, assigned to the target.
    Regular,
    /// `candidate as Target`.
    Assertion,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckOutcome {
    pub target: String,
    pub candidate: String,
    pub mode: CheckMode,
    pub accepted: bool,
    pub diagnostics: Vec<Diagnostic>,
}

/// A property of a rendered shape.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySummary {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub optional: bool,
    pub readonly: bool,
    pub method: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeSummary {
    pub name: String,
    /// The shape expanded as an object literal type.
    pub declaration: String,
    pub weak: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_signature: Option<String>,
    pub properties: Vec<PropertySummary>,
}

impl ShapeSummary {
    #[must_use]
    pub fn of(name: &str, shape: &Shape) -> Self {
        Self {
            name: name.to_string(),
            declaration: TypeFormatter::new().format_shape(shape),
            weak: shape.is_weak(),
            index_signature: shape
                .index_signature()
                .map(|index| index.value_type.to_string()),
            properties: shape
                .properties()
                .map(|prop| PropertySummary {
                    name: prop.name.to_string(),
                    ty: prop.ty.to_string(),
                    optional: prop.optional(),
                    readonly: prop.readonly(),
                    method: prop.is_method(),
                })
                .collect(),
        }
    }
}

pub fn load_registry(path: &Path) -> Result<ShapeRegistry> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read declarations {}", path.display()))?;
    let registry = ShapeRegistry::from_json_str(&text)
        .with_context(|| format!("invalid declarations in {}", path.display()))?;
    debug!(path = %path.display(), shapes = registry.len(), "loaded declaration document");
    Ok(registry)
}

pub fn load_candidate(path: &Path) -> Result<Record> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read candidate {}", path.display()))?;
    parse_candidate(&text).with_context(|| format!("invalid candidate in {}", path.display()))
}

/// Document options with command-line overrides applied.
#[must_use]
pub fn validator_options(args: &CheckArgs, document: &ValidatorOptions) -> ValidatorOptions {
    let mut options = document.clone();
    if args.all_errors {
        options.report_policy = ReportPolicy::Exhaustive;
    } else if args.first_error {
        options.report_policy = ReportPolicy::FirstError;
    }
    if args.weak_type_detection {
        options.weak_type_detection = true;
    }
    if args.exact_optional_property_types {
        options.exact_optional_property_types = true;
    }
    options
}

/// `tshape check`
pub fn check(args: &CheckArgs) -> Result<CheckOutcome> {
    let registry = load_registry(&args.declarations)?;
    let target = registry
        .resolve_target(&args.target)
        .with_context(|| format!("cannot resolve target '{}'", args.target))?;
    let candidate = load_candidate(&args.candidate)?;
    let validator = ShapeValidator::new(validator_options(args, registry.options()));

    let mode = if args.assert {
        CheckMode::Assertion
    } else if args.regular {
        CheckMode::Regular
    } else {
        CheckMode::Literal
    };
    let result = match mode {
        CheckMode::Assertion => validator.assert(&target, &candidate),
        CheckMode::Literal => validator.validate(&target, &candidate, Freshness::Fresh),
        CheckMode::Regular => validator.validate(&target, &candidate, Freshness::Regular),
    };

    let file = args.candidate.display().to_string();
    let diagnostics: Vec<Diagnostic> = match &result {
        Ok(()) => Vec::new(),
        Err(failure) => failure
            .diagnostics()
            .into_iter()
            .map(|diag| diag.in_file(file.as_str()))
            .collect(),
    };
    info!(
        target_shape = %target.display_name(),
        ?mode,
        errors = diagnostics.len(),
        "check finished"
    );

    Ok(CheckOutcome {
        target: target.display_name(),
        candidate: file,
        mode,
        accepted: result.is_ok(),
        diagnostics,
    })
}

/// `tshape intersect`
pub fn intersect(args: &IntersectArgs) -> Result<ShapeSummary> {
    let registry = load_registry(&args.declarations)?;
    let shapes = args
        .shapes
        .iter()
        .map(|name| {
            registry
                .resolve_target(name)
                .with_context(|| format!("cannot resolve '{name}'"))
        })
        .collect::<Result<Vec<_>>>()?;
    let merged = try_intersect_all(&shapes)?.context("nothing to intersect")?;
    Ok(ShapeSummary::of(&merged.display_name(), &merged))
}

/// `tshape list`
pub fn list(args: &ListArgs) -> Result<Vec<ShapeSummary>> {
    let registry = load_registry(&args.declarations)?;
    Ok(registry
        .iter()
        .map(|(name, shape)| ShapeSummary::of(name, shape))
        .collect())
}
