//! Freshness (excess property checking).
//!
//! Object literals written at the validation site are *fresh*: their full
//! property set is known, so properties the target shape does not declare are
//! almost certainly typos (`colour` for `color`) and are rejected. Values that
//! went through a variable are *regular* and may legitimately carry more
//! properties than the target mentions.

use crate::types::Shape;
use crate::values::Record;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Freshness {
    /// Object literal at the validation site.
    Fresh,
    /// Bound to a variable or produced by an expression.
    Regular,
}

impl Freshness {
    #[must_use]
    pub const fn from_literal(is_literal: bool) -> Self {
        if is_literal { Self::Fresh } else { Self::Regular }
    }

    #[must_use]
    pub const fn is_fresh(self) -> bool {
        matches!(self, Self::Fresh)
    }
}

/// Whether `shape` rejects undeclared properties at all.
///
/// Index signatures accept every property name. Unlike `tsc`, the empty
/// shape `{}` still rejects excess properties on fresh candidates.
#[must_use]
pub fn checks_excess_properties(shape: &Shape) -> bool {
    shape.index_signature().is_none()
}

/// Properties of `record` that `shape` neither declares nor covers with an
/// index signature, in candidate order.
pub fn excess_properties<'a>(
    shape: &'a Shape,
    record: &'a Record,
) -> impl Iterator<Item = &'a str> + 'a {
    let check = checks_excess_properties(shape);
    record
        .names()
        .filter(move |name| check && shape.property(name).is_none())
}

/// Weak type detection: a non-empty candidate assigned to a weak shape must
/// share at least one property with it.
#[must_use]
pub fn violates_weak_type(shape: &Shape, record: &Record) -> bool {
    shape.is_weak()
        && !record.is_empty()
        && !record.names().any(|name| shape.property(name).is_some())
}

#[cfg(test)]
#[path = "../tests/freshness_tests.rs"]
mod tests;
