//! Intersection of types and property merging for intersection shapes.
//!
//! `A & B` is computed eagerly into a single merged shape:
//! - the property set is the union of both sides
//! - a property present on both sides gets the intersection of the two types
//! - optional only if optional on both sides (required wins)
//! - readonly if readonly on either side (readonly is cumulative)
//! - index signatures merge, intersecting value types when both exist

use crate::error::DeclarationError;
use crate::types::{IndexSignature, PropertyFlags, PropertyMap, Shape, ShapeType};
use std::sync::Arc;
use tracing::trace;
use tshape_common::limits::MAX_UNION_DISTRIBUTION;

/// Member counts of the first union distribution that went over
/// [`MAX_UNION_DISTRIBUTION`].
type Overflow = Option<(usize, usize)>;

/// Intersect two declared types.
///
/// - `never & T` is `never`
/// - `any & T` is `any` for every other `T`
/// - unions distribute: `(A | B) & C = (A & C) | (B & C)`
/// - identical intrinsics stay, different intrinsics are `never`
/// - objects merge via [`intersect`], arrays intersect element-wise
/// - every other pairing is `never`
///
/// A distribution larger than [`MAX_UNION_DISTRIBUTION`] members is `never`;
/// use [`try_intersect_types`] to have it reported instead.
#[must_use]
pub fn intersect_types(a: &ShapeType, b: &ShapeType) -> ShapeType {
    intersect_types_in(a, b, &mut None)
}

/// [`intersect_types`], failing with [`DeclarationError::UnionTooLarge`]
/// when a union distribution exceeds the limit.
pub fn try_intersect_types(a: &ShapeType, b: &ShapeType) -> Result<ShapeType, DeclarationError> {
    let mut overflow = None;
    let ty = intersect_types_in(a, b, &mut overflow);
    check_overflow(overflow)?;
    Ok(ty)
}

fn intersect_types_in(a: &ShapeType, b: &ShapeType, overflow: &mut Overflow) -> ShapeType {
    match (a, b) {
        (ShapeType::Never, _) | (_, ShapeType::Never) => ShapeType::Never,
        (ShapeType::Any, _) | (_, ShapeType::Any) => ShapeType::Any,
        (ShapeType::Union(_), _) | (_, ShapeType::Union(_)) => distribute(a, b, overflow),
        (ShapeType::Intrinsic(x), ShapeType::Intrinsic(y)) => {
            if x == y {
                a.clone()
            } else {
                ShapeType::Never
            }
        }
        (ShapeType::Object(x), ShapeType::Object(y)) => {
            if Arc::ptr_eq(x, y) {
                a.clone()
            } else {
                ShapeType::object(intersect_in(x, y, overflow))
            }
        }
        (ShapeType::Array(x), ShapeType::Array(y)) => {
            ShapeType::array(intersect_types_in(x, y, overflow))
        }
        _ => ShapeType::Never,
    }
}

fn distribute(a: &ShapeType, b: &ShapeType, overflow: &mut Overflow) -> ShapeType {
    let (left, right) = (a.members(), b.members());
    if left.len().saturating_mul(right.len()) > MAX_UNION_DISTRIBUTION {
        trace!(
            left = left.len(),
            right = right.len(),
            "union distribution too large, collapsing to never"
        );
        overflow.get_or_insert((left.len(), right.len()));
        return ShapeType::Never;
    }
    let mut members = Vec::with_capacity(left.len() * right.len());
    for l in left {
        for r in right {
            members.push(intersect_types_in(l, r, overflow));
        }
    }
    ShapeType::union(members)
}

fn check_overflow(overflow: Overflow) -> Result<(), DeclarationError> {
    match overflow {
        Some((left, right)) => Err(DeclarationError::UnionTooLarge {
            left,
            right,
            limit: MAX_UNION_DISTRIBUTION,
        }),
        None => Ok(()),
    }
}

/// Compute the merged shape `a & b`.
///
/// Properties keep declaration order: all of `a`'s, then those only `b` declares.
#[must_use]
pub fn intersect(a: &Shape, b: &Shape) -> Shape {
    intersect_in(a, b, &mut None)
}

fn intersect_in(a: &Shape, b: &Shape, overflow: &mut Overflow) -> Shape {
    let mut collector = PropertyCollector::default();
    collector.merge_shape(a);
    collector.merge_shape(b);
    trace!(
        left = %a.display_name(),
        right = %b.display_name(),
        properties = collector.properties.len(),
        "intersected shapes"
    );
    if overflow.is_none() {
        *overflow = collector.overflow;
    }
    collector.finish(intersection_name(a, b))
}

/// Fold a list of shapes into one intersection (`A & B & C`).
///
/// Returns `None` for an empty list.
pub fn intersect_all<'a>(shapes: impl IntoIterator<Item = &'a Shape>) -> Option<Shape> {
    fold_shapes(shapes).map(|(shape, _)| shape)
}

/// [`intersect_all`], failing with [`DeclarationError::UnionTooLarge`] when
/// merging any shared property distributes past the limit.
pub fn try_intersect_all<'a>(
    shapes: impl IntoIterator<Item = &'a Shape>,
) -> Result<Option<Shape>, DeclarationError> {
    match fold_shapes(shapes) {
        Some((shape, overflow)) => {
            check_overflow(overflow)?;
            Ok(Some(shape))
        }
        None => Ok(None),
    }
}

fn fold_shapes<'a>(shapes: impl IntoIterator<Item = &'a Shape>) -> Option<(Shape, Overflow)> {
    let mut iter = shapes.into_iter();
    let first = iter.next()?;
    let mut collector = PropertyCollector::default();
    collector.merge_shape(first);
    let mut names = vec![first.display_name()];
    for shape in iter {
        collector.merge_shape(shape);
        names.push(shape.display_name());
    }
    let name = if names.len() == 1 {
        Arc::from(first.name())
    } else {
        Arc::from(names.join(" & "))
    };
    let overflow = collector.overflow;
    Some((collector.finish(name), overflow))
}

fn intersection_name(a: &Shape, b: &Shape) -> Arc<str> {
    if a.is_anonymous() && b.is_anonymous() {
        Arc::from("")
    } else {
        Arc::from(format!("{} & {}", a.display_name(), b.display_name()))
    }
}

/// Merge two property flag sets for an intersection.
fn merge_flags(a: PropertyFlags, b: PropertyFlags) -> PropertyFlags {
    let mut flags = PropertyFlags::empty();
    // Optional only if ALL are optional
    flags.set(
        PropertyFlags::OPTIONAL,
        a.contains(PropertyFlags::OPTIONAL) && b.contains(PropertyFlags::OPTIONAL),
    );
    flags.set(
        PropertyFlags::READONLY,
        a.contains(PropertyFlags::READONLY) || b.contains(PropertyFlags::READONLY),
    );
    // A method on one side and a property on the other is treated as a property
    flags.set(
        PropertyFlags::METHOD,
        a.contains(PropertyFlags::METHOD) && b.contains(PropertyFlags::METHOD),
    );
    flags
}

/// Collects properties of intersection members, merging same-named ones.
#[derive(Default)]
struct PropertyCollector {
    properties: PropertyMap,
    index: Option<IndexSignature>,
    overflow: Overflow,
}

impl PropertyCollector {
    fn merge_shape(&mut self, shape: &Shape) {
        for prop in shape.properties() {
            if let Some(existing) = self.properties.get_mut(&prop.name) {
                existing.ty = intersect_types_in(&existing.ty, &prop.ty, &mut self.overflow);
                existing.flags = merge_flags(existing.flags, prop.flags);
            } else {
                self.properties.insert(prop.name.clone(), prop.clone());
            }
        }

        if let Some(idx) = shape.index_signature() {
            if let Some(existing) = &mut self.index {
                existing.value_type =
                    intersect_types_in(&existing.value_type, &idx.value_type, &mut self.overflow);
                existing.readonly = existing.readonly || idx.readonly;
            } else {
                self.index = Some(idx.clone());
            }
        }
    }

    fn finish(self, name: Arc<str>) -> Shape {
        Shape::from_parts(name, self.properties, self.index)
    }
}

#[cfg(test)]
#[path = "../tests/intersection_tests.rs"]
mod tests;
