//! Candidate values.
//!
//! Candidates are explicit property bags: each property maps to a tagged
//! `Value`, so every type comparison in the validator is a pattern match on
//! the value's kind.

use crate::types::{IntrinsicKind, PropertyFlags, PropertyInfo, Shape, ShapeType};
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use std::fmt;
use std::sync::Arc;

/// Runtime kind of a value, as reported in type-mismatch messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    String,
    Number,
    Boolean,
    Null,
    Undefined,
    Function,
    Object,
    Array,
}

impl ValueKind {
    /// The intrinsic type this kind inhabits, if it is a primitive.
    #[must_use]
    pub const fn intrinsic(self) -> Option<IntrinsicKind> {
        match self {
            Self::String => Some(IntrinsicKind::String),
            Self::Number => Some(IntrinsicKind::Number),
            Self::Boolean => Some(IntrinsicKind::Boolean),
            Self::Null => Some(IntrinsicKind::Null),
            Self::Undefined => Some(IntrinsicKind::Undefined),
            Self::Function => Some(IntrinsicKind::Function),
            Self::Object | Self::Array => None,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Null => "null",
            Self::Undefined => "undefined",
            Self::Function => "function",
            Self::Object => "object",
            Self::Array => "array",
        };
        f.write_str(name)
    }
}

/// A runtime value held by a candidate property.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    String(Arc<str>),
    Number(f64),
    Boolean(bool),
    Null,
    Undefined,
    /// A callable; the name is informational only.
    Function(Option<Arc<str>>),
    Object(Record),
    Array(Vec<Value>),
}

impl Value {
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::String(_) => ValueKind::String,
            Self::Number(_) => ValueKind::Number,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Null => ValueKind::Null,
            Self::Undefined => ValueKind::Undefined,
            Self::Function(_) => ValueKind::Function,
            Self::Object(_) => ValueKind::Object,
            Self::Array(_) => ValueKind::Array,
        }
    }

    pub fn function(name: impl Into<Arc<str>>) -> Self {
        Self::Function(Some(name.into()))
    }

    /// The widened type of this value, as TypeScript would infer it for an
    /// expression: literals widen to their primitive, object literals become
    /// anonymous shapes with every property required.
    #[must_use]
    pub fn type_of(&self) -> ShapeType {
        match self {
            Self::Object(record) => ShapeType::object(record.inferred_shape()),
            Self::Array(items) => ShapeType::array(ShapeType::union(items.iter().map(Self::type_of))),
            other => match other.kind().intrinsic() {
                Some(kind) => ShapeType::Intrinsic(kind),
                None => ShapeType::Any,
            },
        }
    }
}

macro_rules! impl_from_value {
    ($($source:ty => $variant:ident),* $(,)?) => {
        $(impl From<$source> for Value {
            fn from(v: $source) -> Self { Self::$variant(v.into()) }
        })*
    };
}

impl_from_value! {
    &str     => String,
    String   => String,
    Arc<str> => String,
    f64      => Number,
    i32      => Number,
    u32      => Number,
    bool     => Boolean,
    Record   => Object,
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Array(items)
    }
}

/// Ordered property table of a candidate.
pub type ValueMap = IndexMap<Arc<str>, Value, FxBuildHasher>;

/// A candidate value: an ordered set of (property name, value) pairs.
///
/// Insertion order is the order properties are checked and reported in.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    entries: ValueMap,
}

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a property; returns the previous value.
    pub fn insert(&mut self, name: &str, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(Arc::from(name), value.into())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (&**k, v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| &**k)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Anonymous shape describing this record's own properties.
    #[must_use]
    pub fn inferred_shape(&self) -> Shape {
        let mut properties = crate::types::PropertyMap::default();
        for (name, value) in &self.entries {
            properties.insert(
                name.clone(),
                PropertyInfo::new(name.clone(), value.type_of(), PropertyFlags::empty()),
            );
        }
        Shape::from_parts(Arc::from(""), properties, None)
    }
}

impl<'a, V: Into<Value>> FromIterator<(&'a str, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (&'a str, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

#[cfg(test)]
#[path = "../tests/values_tests.rs"]
mod tests;
