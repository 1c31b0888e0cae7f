//! Type representation for shapes.
//!
//! A `ShapeType` is a small structural type language: `any`, `never`, the
//! primitive intrinsics, unions, nested object shapes and arrays. Unions are
//! normalized on construction so that two structurally equal unions always
//! compare equal regardless of how they were written.

use crate::error::DeclarationError;
use bitflags::bitflags;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::Serialize;
use smallvec::SmallVec;
use std::sync::Arc;

/// Primitive kinds a property can be declared with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum IntrinsicKind {
    String,
    Number,
    Boolean,
    Null,
    Undefined,
    /// Any callable value (`() => void`, methods).
    Function,
}

impl IntrinsicKind {
    /// Keyword used for this kind in type expressions.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Null => "null",
            Self::Undefined => "undefined",
            Self::Function => "Function",
        }
    }
}

/// Member list of a union type.
pub type TypeList = Vec<ShapeType>;

/// The declared type of a property or index signature.
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeType {
    /// Accepts every value.
    Any,
    /// Uninhabited: no value satisfies it. Produced by disjoint intersections.
    Never,
    Intrinsic(IntrinsicKind),
    /// Normalized union with at least two members.
    Union(TypeList),
    Object(Arc<Shape>),
    Array(Box<ShapeType>),
}

impl ShapeType {
    pub const STRING: Self = Self::Intrinsic(IntrinsicKind::String);
    pub const NUMBER: Self = Self::Intrinsic(IntrinsicKind::Number);
    pub const BOOLEAN: Self = Self::Intrinsic(IntrinsicKind::Boolean);
    pub const NULL: Self = Self::Intrinsic(IntrinsicKind::Null);
    pub const UNDEFINED: Self = Self::Intrinsic(IntrinsicKind::Undefined);
    pub const FUNCTION: Self = Self::Intrinsic(IntrinsicKind::Function);

    /// Build a normalized union.
    ///
    /// - nested unions are flattened
    /// - `never` members are dropped
    /// - any `any` member makes the whole union `any`
    /// - duplicates are removed and members are put in canonical order
    /// - zero members is `never`, one member is that member
    pub fn union(members: impl IntoIterator<Item = ShapeType>) -> Self {
        let mut flat: SmallVec<[ShapeType; 4]> = SmallVec::new();
        for member in members {
            match member {
                Self::Any => return Self::Any,
                Self::Never => {}
                Self::Union(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }

        flat.sort_by_cached_key(crate::format::canonical_key);
        flat.dedup();

        match flat.len() {
            0 => Self::Never,
            1 => flat.remove(0),
            _ => Self::Union(flat.into_vec()),
        }
    }

    /// Wrap a shape as an object type.
    #[must_use]
    pub fn object(shape: Shape) -> Self {
        Self::Object(Arc::new(shape))
    }

    #[must_use]
    pub fn array(element: ShapeType) -> Self {
        Self::Array(Box::new(element))
    }

    #[must_use]
    pub const fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    #[must_use]
    pub const fn is_never(&self) -> bool {
        matches!(self, Self::Never)
    }

    /// Union members, or the type itself for non-unions.
    #[must_use]
    pub fn members(&self) -> &[ShapeType] {
        match self {
            Self::Union(members) => members.as_slice(),
            other => std::slice::from_ref(other),
        }
    }

    /// Whether the intrinsic `kind` is one of this type's members.
    #[must_use]
    pub fn contains_intrinsic(&self, kind: IntrinsicKind) -> bool {
        self.members()
            .iter()
            .any(|m| matches!(m, Self::Intrinsic(k) if *k == kind))
    }

    /// The object shape, if this is an object type.
    #[must_use]
    pub fn as_shape(&self) -> Option<&Arc<Shape>> {
        match self {
            Self::Object(shape) => Some(shape),
            _ => None,
        }
    }
}

impl From<IntrinsicKind> for ShapeType {
    fn from(kind: IntrinsicKind) -> Self {
        Self::Intrinsic(kind)
    }
}

impl From<Shape> for ShapeType {
    fn from(shape: Shape) -> Self {
        Self::object(shape)
    }
}

bitflags! {
    /// Modifiers on a property declaration.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PropertyFlags: u8 {
        /// `name?: T`
        const OPTIONAL = 1 << 0;
        /// `readonly name: T`
        const READONLY = 1 << 1;
        /// `name(): void` rather than `name: () => void`
        const METHOD = 1 << 2;
    }
}

/// A single property declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyInfo {
    pub name: Arc<str>,
    pub ty: ShapeType,
    pub flags: PropertyFlags,
}

impl PropertyInfo {
    pub fn new(name: impl Into<Arc<str>>, ty: ShapeType, flags: PropertyFlags) -> Self {
        Self {
            name: name.into(),
            ty,
            flags,
        }
    }

    #[must_use]
    pub const fn optional(&self) -> bool {
        self.flags.contains(PropertyFlags::OPTIONAL)
    }

    #[must_use]
    pub const fn readonly(&self) -> bool {
        self.flags.contains(PropertyFlags::READONLY)
    }

    #[must_use]
    pub const fn is_method(&self) -> bool {
        self.flags.contains(PropertyFlags::METHOD)
    }
}

/// `[propName: string]: T`
#[derive(Clone, Debug, PartialEq)]
pub struct IndexSignature {
    pub value_type: ShapeType,
    pub readonly: bool,
}

impl IndexSignature {
    #[must_use]
    pub fn new(value_type: ShapeType) -> Self {
        Self {
            value_type,
            readonly: false,
        }
    }
}

/// Ordered property table. Iteration order is declaration order.
pub type PropertyMap = IndexMap<Arc<str>, PropertyInfo, FxBuildHasher>;

/// A named set of property declarations with an optional index signature.
///
/// Equality is structural: the name and the declaration order are ignored.
#[derive(Clone, Debug)]
pub struct Shape {
    name: Arc<str>,
    properties: PropertyMap,
    index: Option<IndexSignature>,
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        // IndexMap equality is order-insensitive.
        self.properties == other.properties && self.index == other.index
    }
}

impl Shape {
    pub fn builder(name: impl Into<Arc<str>>) -> ShapeBuilder {
        ShapeBuilder {
            name: name.into(),
            properties: PropertyMap::default(),
            index: None,
            duplicate: None,
        }
    }

    /// An anonymous shape (`{ ... }` written inline).
    pub fn anonymous() -> ShapeBuilder {
        Self::builder("")
    }

    pub(crate) fn from_parts(
        name: Arc<str>,
        properties: PropertyMap,
        index: Option<IndexSignature>,
    ) -> Self {
        Self {
            name,
            properties,
            index,
        }
    }

    /// Declared name, empty for anonymous shapes.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }

    /// Name used in messages: the declared name, or the expanded literal form.
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.is_anonymous() {
            crate::format::TypeFormatter::new().format_shape(self)
        } else {
            self.name.to_string()
        }
    }

    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyInfo> {
        self.properties.get(name)
    }

    pub fn properties(&self) -> impl Iterator<Item = &PropertyInfo> {
        self.properties.values()
    }

    pub fn required_properties(&self) -> impl Iterator<Item = &PropertyInfo> {
        self.properties.values().filter(|p| !p.optional())
    }

    #[must_use]
    pub fn index_signature(&self) -> Option<&IndexSignature> {
        self.index.as_ref()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.index.is_none()
    }

    /// A weak shape has at least one property, all of them optional, and no
    /// index signature (`{ color?: string; width?: number }`).
    #[must_use]
    pub fn is_weak(&self) -> bool {
        self.index.is_none()
            && !self.properties.is_empty()
            && self.properties.values().all(PropertyInfo::optional)
    }

    /// Same structure under a different name.
    #[must_use]
    pub fn renamed(&self, name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }
}

/// Incremental construction of a [`Shape`].
///
/// Declaring the same property twice is recorded and reported by `build`.
#[derive(Debug)]
pub struct ShapeBuilder {
    name: Arc<str>,
    properties: PropertyMap,
    index: Option<IndexSignature>,
    duplicate: Option<Arc<str>>,
}

impl ShapeBuilder {
    #[must_use]
    pub fn property(mut self, info: PropertyInfo) -> Self {
        if self.properties.contains_key(&info.name) {
            self.duplicate.get_or_insert_with(|| info.name.clone());
        } else {
            self.properties.insert(info.name.clone(), info);
        }
        self
    }

    #[must_use]
    pub fn required(self, name: &str, ty: ShapeType) -> Self {
        self.property(PropertyInfo::new(name, ty, PropertyFlags::empty()))
    }

    #[must_use]
    pub fn optional(self, name: &str, ty: ShapeType) -> Self {
        self.property(PropertyInfo::new(name, ty, PropertyFlags::OPTIONAL))
    }

    #[must_use]
    pub fn method(self, name: &str) -> Self {
        self.property(PropertyInfo::new(
            name,
            ShapeType::FUNCTION,
            PropertyFlags::METHOD,
        ))
    }

    #[must_use]
    pub fn index_signature(mut self, value_type: ShapeType) -> Self {
        self.index = Some(IndexSignature::new(value_type));
        self
    }

    #[must_use]
    pub fn readonly_index_signature(mut self, value_type: ShapeType) -> Self {
        self.index = Some(IndexSignature {
            value_type,
            readonly: true,
        });
        self
    }

    pub fn build(self) -> Result<Shape, DeclarationError> {
        if let Some(property) = self.duplicate {
            return Err(DeclarationError::DuplicateProperty {
                shape: self.name.to_string(),
                property: property.to_string(),
            });
        }
        Ok(Shape::from_parts(self.name, self.properties, self.index))
    }
}

#[cfg(test)]
#[path = "../tests/types_tests.rs"]
mod tests;
