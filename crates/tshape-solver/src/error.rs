//! Errors raised while building shapes or loading declarations.
//!
//! Validation outcomes are not errors in this sense; they are reported as
//! [`ValidationFailure`](crate::ValidationFailure) values.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeclarationError {
    #[error("duplicate property '{property}' in shape '{shape}'")]
    DuplicateProperty { shape: String, property: String },

    #[error("'{0}' is declared more than once")]
    DuplicateDeclaration(String),

    #[error("cannot find type '{0}'")]
    UnknownType(String),

    #[error("invalid type expression '{expr}': {reason}")]
    InvalidTypeExpression { expr: String, reason: String },

    #[error("type '{0}' circularly references itself")]
    CircularReference(String),

    #[error("type '{0}' is not an object type")]
    NotAnObjectType(String),

    #[error(
        "intersecting a {left}-member union with a {right}-member union exceeds the limit of {limit} members"
    )]
    UnionTooLarge {
        left: usize,
        right: usize,
        limit: usize,
    },

    #[error("shape nesting exceeds the maximum depth of {0}")]
    DepthLimitExceeded(u32),

    #[error("candidate must be a JSON object, found {0}")]
    CandidateNotAnObject(&'static str),

    #[error("number {0} cannot be represented as a candidate value")]
    UnrepresentableNumber(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
