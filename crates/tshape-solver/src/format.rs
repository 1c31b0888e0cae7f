//! Type formatting for diagnostics and CLI output.
//!
//! Formatting follows TypeScript's printer closely enough that messages read
//! like `tsc` output: `{ color?: string; width?: number; }`, `(string | number)[]`.

use crate::types::{IntrinsicKind, Shape, ShapeType};
use std::fmt;

/// Renders types to strings.
///
/// Named shapes print by name unless `expand_named` is set, in which case the
/// outermost named shape is expanded to its members.
#[derive(Clone, Copy, Debug, Default)]
pub struct TypeFormatter {
    expand_named: bool,
}

impl TypeFormatter {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            expand_named: false,
        }
    }

    /// Expand the outermost named shape instead of printing its name.
    #[must_use]
    pub const fn expand_named(mut self, expand: bool) -> Self {
        self.expand_named = expand;
        self
    }

    #[must_use]
    pub fn format(&self, ty: &ShapeType) -> String {
        let mut out = String::new();
        self.write_type(&mut out, ty, self.expand_named);
        out
    }

    /// Render a shape's members as an object literal type.
    #[must_use]
    pub fn format_shape(&self, shape: &Shape) -> String {
        let mut out = String::new();
        self.write_members(&mut out, shape);
        out
    }

    fn write_type(&self, out: &mut String, ty: &ShapeType, expand: bool) {
        match ty {
            ShapeType::Any => out.push_str("any"),
            ShapeType::Never => out.push_str("never"),
            ShapeType::Intrinsic(kind) => out.push_str(kind.keyword()),
            ShapeType::Union(members) => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        out.push_str(" | ");
                    }
                    self.write_type(out, member, false);
                }
            }
            ShapeType::Object(shape) => {
                if shape.is_anonymous() || expand {
                    self.write_members(out, shape);
                } else {
                    out.push_str(shape.name());
                }
            }
            ShapeType::Array(element) => {
                let needs_parens = matches!(**element, ShapeType::Union(_))
                    || matches!(**element, ShapeType::Intrinsic(IntrinsicKind::Function));
                if needs_parens {
                    out.push('(');
                }
                self.write_type(out, element, false);
                if needs_parens {
                    out.push(')');
                }
                out.push_str("[]");
            }
        }
    }

    fn write_members(&self, out: &mut String, shape: &Shape) {
        if shape.is_empty() {
            out.push_str("{}");
            return;
        }
        out.push_str("{ ");
        if let Some(index) = shape.index_signature() {
            if index.readonly {
                out.push_str("readonly ");
            }
            out.push_str("[x: string]: ");
            self.write_type(out, &index.value_type, false);
            out.push_str("; ");
        }
        for prop in shape.properties() {
            if prop.readonly() {
                out.push_str("readonly ");
            }
            out.push_str(&prop.name);
            if prop.is_method() {
                out.push_str(if prop.optional() { "?(): void; " } else { "(): void; " });
                continue;
            }
            if prop.optional() {
                out.push('?');
            }
            out.push_str(": ");
            if matches!(prop.ty, ShapeType::Intrinsic(IntrinsicKind::Function)) {
                out.push_str("() => void");
            } else {
                self.write_type(out, &prop.ty, false);
            }
            out.push_str("; ");
        }
        out.push('}');
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&TypeFormatter::new().format(self))
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

/// Name- and order-independent key used to order union members.
///
/// Structurally equal types produce equal keys.
pub(crate) fn canonical_key(ty: &ShapeType) -> String {
    let mut out = String::new();
    write_canonical(&mut out, ty);
    out
}

fn write_canonical(out: &mut String, ty: &ShapeType) {
    match ty {
        ShapeType::Any => out.push_str("0any"),
        ShapeType::Never => out.push_str("0never"),
        ShapeType::Intrinsic(kind) => {
            // Rank intrinsics by declaration order so `string | number` stays stable.
            out.push_str(&format!("1{}", *kind as u8));
        }
        ShapeType::Union(members) => {
            out.push_str("2(");
            for member in members {
                write_canonical(out, member);
                out.push('|');
            }
            out.push(')');
        }
        ShapeType::Array(element) => {
            out.push_str("3[");
            write_canonical(out, element);
            out.push(']');
        }
        ShapeType::Object(shape) => {
            out.push_str("4{");
            let mut props: Vec<_> = shape.properties().collect();
            props.sort_by(|a, b| a.name.cmp(&b.name));
            for prop in props {
                out.push_str(&format!("{}:{}:", prop.name, prop.flags.bits()));
                write_canonical(out, &prop.ty);
                out.push(';');
            }
            if let Some(index) = shape.index_signature() {
                out.push_str(&format!("[{}]:", u8::from(index.readonly)));
                write_canonical(out, &index.value_type);
            }
            out.push('}');
        }
    }
}

#[cfg(test)]
#[path = "../tests/format_tests.rs"]
mod tests;
