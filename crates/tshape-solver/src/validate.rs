//! Structural validation of candidates against shapes.
//!
//! A validation call runs three phases over a candidate record:
//!
//! 1. **Properties**, in candidate order. Declared properties must hold a
//!    value of the declared type. Undeclared properties are checked against
//!    the index signature if there is one, rejected on fresh candidates, and
//!    ignored on regular ones.
//! 2. **Missing properties**: every required declared property must be present.
//! 3. **Weak type**, only with `weak_type_detection`: a regular candidate must
//!    share at least one property with an all-optional shape.
//!
//! Nested object literals are validated recursively with the freshness of the
//! enclosing candidate. Intersection shapes need no special handling: they are
//! merged into an ordinary shape first.

use crate::diagnostics::{
    DiagnosticTracer, FastTracer, ValidationError, ValidationFailure, ValidationPhase,
    ValidationTracer,
};
use crate::freshness::{Freshness, checks_excess_properties, violates_weak_type};
use crate::options::{ReportPolicy, ValidatorOptions};
use crate::types::{Shape, ShapeType};
use crate::values::{Record, Value};
use tracing::{debug, trace};
use tshape_common::limits::MAX_SHAPE_DEPTH;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    /// `const x: Shape = candidate`
    Assign,
    /// `candidate as Shape`: no missing-property or weak-type checks.
    Assert,
}

#[derive(Clone, Copy, Debug)]
struct CheckContext {
    freshness: Freshness,
    mode: Mode,
    depth: u32,
}

impl CheckContext {
    const fn nested(self) -> Self {
        Self {
            depth: self.depth + 1,
            ..self
        }
    }
}

/// Validates candidates against shapes with a fixed set of options.
#[derive(Clone, Debug, Default)]
pub struct ShapeValidator {
    options: ValidatorOptions,
}

impl ShapeValidator {
    #[must_use]
    pub const fn new(options: ValidatorOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Check `candidate` against `shape`, collecting errors per the report policy.
    pub fn validate(
        &self,
        shape: &Shape,
        candidate: &Record,
        freshness: Freshness,
    ) -> Result<(), ValidationFailure> {
        debug!(
            target_shape = %shape.display_name(),
            fresh = freshness.is_fresh(),
            properties = candidate.len(),
            "validating candidate"
        );
        let mut tracer = DiagnosticTracer::new(self.options.report_policy);
        self.validate_with_tracer(shape, candidate, freshness, &mut tracer);

        if !tracer.has_errors() {
            debug!("candidate accepted");
            return Ok(());
        }
        let errors = tracer.into_errors();
        debug!(errors = errors.len(), "candidate rejected");
        Err(ValidationFailure {
            target: shape.display_name(),
            errors,
        })
    }

    /// Run validation, reporting every failure to `tracer`.
    pub fn validate_with_tracer<T: ValidationTracer>(
        &self,
        shape: &Shape,
        candidate: &Record,
        freshness: Freshness,
        tracer: &mut T,
    ) {
        let ctx = CheckContext {
            freshness,
            mode: Mode::Assign,
            depth: 0,
        };
        self.check_record(shape, candidate, "", ctx, tracer);
    }

    /// Boolean fast path: stops at the first failure, builds no errors.
    #[must_use]
    pub fn is_assignable(&self, shape: &Shape, candidate: &Record, freshness: Freshness) -> bool {
        let mut tracer = FastTracer::new();
        self.validate_with_tracer(shape, candidate, freshness, &mut tracer);
        !tracer.failed()
    }

    /// Check a type assertion `candidate as shape`.
    ///
    /// Assertions erase freshness and allow down-casting, so excess and
    /// missing properties are fine; properties present on both sides must
    /// still have compatible types.
    pub fn assert(&self, shape: &Shape, candidate: &Record) -> Result<(), ValidationFailure> {
        let ctx = CheckContext {
            freshness: Freshness::Regular,
            mode: Mode::Assert,
            depth: 0,
        };
        let mut tracer = DiagnosticTracer::new(ReportPolicy::Exhaustive);
        self.check_record(shape, candidate, "", ctx, &mut tracer);
        if !tracer.has_errors() {
            return Ok(());
        }

        let target = shape.display_name();
        let error = ValidationError::InvalidAssertion {
            source: candidate.inferred_shape().display_name(),
            target: target.clone(),
            reasons: tracer.into_errors(),
        };
        Err(ValidationFailure {
            target,
            errors: vec![error],
        })
    }

    fn check_record<T: ValidationTracer>(
        &self,
        shape: &Shape,
        record: &Record,
        path: &str,
        ctx: CheckContext,
        tracer: &mut T,
    ) -> Flow {
        let mut flow = Flow::Continue;

        for (name, value) in record.iter() {
            let step = match shape.property(name) {
                Some(prop) => {
                    let implicit_undefined = prop.optional()
                        && matches!(value, Value::Undefined)
                        && !self.options.exact_optional_property_types;
                    if implicit_undefined {
                        Flow::Continue
                    } else {
                        let prop_path = join_path(path, name);
                        self.check_value(&prop.ty, value, &prop_path, shape, ctx, tracer)
                    }
                }
                None => match shape.index_signature() {
                    Some(index) => {
                        let prop_path = join_path(path, name);
                        self.check_value(&index.value_type, value, &prop_path, shape, ctx, tracer)
                    }
                    None if ctx.freshness.is_fresh() && checks_excess_properties(shape) => {
                        trace!(property = name, "excess property on fresh candidate");
                        report(tracer, ValidationPhase::Properties, || {
                            ValidationError::ExcessProperty {
                                property: join_path(path, name),
                                target: shape.display_name(),
                            }
                        })
                    }
                    None => {
                        trace!(property = name, "ignoring undeclared property on regular candidate");
                        Flow::Continue
                    }
                },
            };
            if step == Flow::Stop {
                flow = Flow::Stop;
                break;
            }
        }
        if tracer.is_aborted() {
            return Flow::Stop;
        }

        if ctx.mode == Mode::Assert {
            return flow;
        }

        for prop in shape.required_properties() {
            if record.contains(&prop.name) {
                continue;
            }
            trace!(property = %prop.name, "missing required property");
            let step = report(tracer, ValidationPhase::MissingProperties, || {
                ValidationError::MissingRequiredProperty {
                    property: join_path(path, &prop.name),
                    source: record.inferred_shape().display_name(),
                    target: shape.display_name(),
                }
            });
            if step == Flow::Stop {
                flow = Flow::Stop;
                break;
            }
        }
        if tracer.is_aborted() {
            return Flow::Stop;
        }

        if self.options.weak_type_detection
            && !ctx.freshness.is_fresh()
            && violates_weak_type(shape, record)
        {
            trace!(target_shape = %shape.display_name(), "no properties in common with weak shape");
            let step = report(tracer, ValidationPhase::WeakType, || {
                ValidationError::NoCommonProperties {
                    source: record.inferred_shape().display_name(),
                    target: shape.display_name(),
                }
            });
            if step == Flow::Stop {
                flow = Flow::Stop;
            }
        }

        flow
    }

    fn check_value<T: ValidationTracer>(
        &self,
        expected: &ShapeType,
        value: &Value,
        path: &str,
        declared_in: &Shape,
        ctx: CheckContext,
        tracer: &mut T,
    ) -> Flow {
        if ctx.depth > MAX_SHAPE_DEPTH {
            return self.mismatch(expected, value, path, declared_in, tracer);
        }

        match (expected, value) {
            (ShapeType::Any, _) => Flow::Continue,
            (ShapeType::Object(shape), Value::Object(record)) => {
                self.check_record(shape, record, path, ctx.nested(), tracer)
            }
            (ShapeType::Array(element), Value::Array(items)) => {
                for (i, item) in items.iter().enumerate() {
                    let item_path = format!("{path}[{i}]");
                    let step =
                        self.check_value(element, item, &item_path, declared_in, ctx.nested(), tracer);
                    if step == Flow::Stop {
                        return Flow::Stop;
                    }
                }
                Flow::Continue
            }
            (ShapeType::Union(members), _) => {
                if members
                    .iter()
                    .any(|member| self.satisfies(member, value, path, declared_in, ctx))
                {
                    Flow::Continue
                } else {
                    self.mismatch(expected, value, path, declared_in, tracer)
                }
            }
            (ShapeType::Intrinsic(kind), _) if value.kind().intrinsic() == Some(*kind) => {
                Flow::Continue
            }
            _ => self.mismatch(expected, value, path, declared_in, tracer),
        }
    }

    /// Silent probe used for union members.
    fn satisfies(
        &self,
        expected: &ShapeType,
        value: &Value,
        path: &str,
        declared_in: &Shape,
        ctx: CheckContext,
    ) -> bool {
        let mut probe = FastTracer::new();
        self.check_value(expected, value, path, declared_in, ctx, &mut probe);
        !probe.failed()
    }

    fn mismatch<T: ValidationTracer>(
        &self,
        expected: &ShapeType,
        value: &Value,
        path: &str,
        declared_in: &Shape,
        tracer: &mut T,
    ) -> Flow {
        trace!(property = path, expected = %expected, actual = %value.kind(), "type mismatch");
        report(tracer, ValidationPhase::Properties, || {
            ValidationError::TypeMismatch {
                property: path.to_string(),
                expected: expected.clone(),
                actual: value.type_of(),
                declared_in: declared_in.display_name(),
            }
        })
    }
}

fn report<T: ValidationTracer>(
    tracer: &mut T,
    phase: ValidationPhase,
    reason: impl FnOnce() -> ValidationError,
) -> Flow {
    if tracer.on_failure(phase, reason) {
        Flow::Continue
    } else {
        Flow::Stop
    }
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

// =============================================================================
// Convenience entry points (default options)
// =============================================================================

/// Validate `candidate` against `shape` with default options.
///
/// `is_literal` says whether the candidate is an object literal written at the
/// call site (fresh, subject to excess-property checks) or a value that went
/// through a variable (regular).
pub fn validate_assignment(
    shape: &Shape,
    candidate: &Record,
    is_literal: bool,
) -> Result<(), ValidationFailure> {
    ShapeValidator::default().validate(shape, candidate, Freshness::from_literal(is_literal))
}

/// Boolean form of [`validate_assignment`].
#[must_use]
pub fn is_assignable(shape: &Shape, candidate: &Record, is_literal: bool) -> bool {
    ShapeValidator::default().is_assignable(shape, candidate, Freshness::from_literal(is_literal))
}

/// Check a type assertion `candidate as shape` with default options.
pub fn assert_shape(shape: &Shape, candidate: &Record) -> Result<(), ValidationFailure> {
    ShapeValidator::default().assert(shape, candidate)
}

#[cfg(test)]
#[path = "../tests/validate_tests.rs"]
mod tests;
