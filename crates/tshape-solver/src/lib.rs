//! Structural Shape Validator
//!
//! Decides whether a candidate object may be assigned to a declared shape,
//! using TypeScript's structural rules:
//!
//! - **Excess property checks** on fresh object literals (`colour` for `color`)
//! - **Index signatures** (`[propName: string]: any`) accepting any extra name
//! - **Regular candidates** (values bound to a variable) skipping excess checks
//! - **Intersection shapes** (`A & B`) merged eagerly into one shape
//!
//! Shapes are built with [`Shape::builder`] or loaded from a JSON declaration
//! document through [`ShapeRegistry`]; candidates are [`Record`]s.
//!
//! ```
//! use tshape_solver::{Record, Shape, ShapeType, validate_assignment};
//!
//! let config = Shape::builder("SquareConfig")
//!     .optional("color", ShapeType::STRING)
//!     .optional("width", ShapeType::NUMBER)
//!     .build()
//!     .unwrap();
//!
//! let literal = Record::new().with("colour", "red").with("width", 100);
//! let failure = validate_assignment(&config, &literal, true).unwrap_err();
//! assert!(failure.has_excess_property("colour"));
//!
//! // The same object through a variable is accepted.
//! assert!(validate_assignment(&config, &literal, false).is_ok());
//! ```
pub mod decl;
mod diagnostics;
mod error;
mod format;
pub mod freshness;
pub mod intersection;
mod options;
pub mod types;
pub mod validate;
pub mod values;

pub use decl::{ShapeRegistry, parse_candidate, record_from_json, value_from_json};
pub use diagnostics::{
    DiagnosticTracer, FastTracer, ValidationError, ValidationFailure, ValidationPhase,
    ValidationTracer,
};
pub use error::DeclarationError;
pub use format::TypeFormatter;
pub use freshness::Freshness;
pub use intersection::{
    intersect, intersect_all, intersect_types, try_intersect_all, try_intersect_types,
};
pub use options::{ReportPolicy, ValidatorOptions};
pub use types::{
    IndexSignature, IntrinsicKind, PropertyFlags, PropertyInfo, Shape, ShapeBuilder, ShapeType,
};
pub use validate::{ShapeValidator, assert_shape, is_assignable, validate_assignment};
pub use values::{Record, Value, ValueKind};
