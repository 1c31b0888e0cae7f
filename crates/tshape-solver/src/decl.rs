//! Declaration documents: named shapes and intersection aliases loaded from JSON.
//!
//! ```json
//! {
//!   "options": { "reportPolicy": "exhaustive" },
//!   "shapes": {
//!     "ErrorHandling": {
//!       "properties": { "success": "boolean", "error?": { "message": "string" } }
//!     },
//!     "ArtworksData": { "properties": { "artworks": [{ "title": "string" }] } }
//!   },
//!   "aliases": { "ArtworksResponse": ["ArtworksData", "ErrorHandling"] }
//! }
//! ```
//!
//! Property keys may carry a `readonly ` prefix and a `?` suffix. Types are
//! a type expression string, an inline object for an anonymous shape, or a
//! one-element JSON array for an array of that element type.
//! Type expressions support keywords, declared names, `|`, `&`, `T[]`,
//! parentheses and `() => T` for functions; the bare keyword `method` declares
//! a method.
//!
//! Candidates are plain JSON objects. `{"$function": "name"}` stands for a
//! function value and `{"$undefined": true}` for `undefined`.

use crate::error::DeclarationError;
use crate::intersection::{try_intersect_all, try_intersect_types};
use crate::options::ValidatorOptions;
use crate::types::{PropertyFlags, PropertyInfo, Shape, ShapeType};
use crate::values::{Record, Value};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;
use tshape_common::limits::MAX_SHAPE_DEPTH;

// =============================================================================
// Document model
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeclarationDocument {
    pub options: ValidatorOptions,
    pub shapes: IndexMap<String, ShapeDecl>,
    /// Intersection aliases: `type ArtworksResponse = ArtworksData & ErrorHandling`.
    pub aliases: IndexMap<String, Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ShapeDecl {
    pub properties: IndexMap<String, TypeExpr>,
    /// Value type of `[propName: string]: T`.
    pub index: Option<TypeExpr>,
    pub readonly_index: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TypeExpr {
    Text(String),
    Inline(IndexMap<String, TypeExpr>),
    /// `[T]` is `T[]`.
    Array(Vec<TypeExpr>),
}

// =============================================================================
// Registry
// =============================================================================

/// Resolved shapes of a declaration document, in declaration order.
#[derive(Debug, Default)]
pub struct ShapeRegistry {
    options: ValidatorOptions,
    shapes: IndexMap<String, Arc<Shape>>,
}

impl ShapeRegistry {
    pub fn from_json_str(text: &str) -> Result<Self, DeclarationError> {
        let doc: DeclarationDocument = serde_json::from_str(text)?;
        Self::from_document(&doc)
    }

    pub fn from_document(doc: &DeclarationDocument) -> Result<Self, DeclarationError> {
        if let Some(name) = doc.aliases.keys().find(|name| doc.shapes.contains_key(*name)) {
            return Err(DeclarationError::DuplicateDeclaration(name.clone()));
        }

        let mut resolver = DocumentResolver {
            doc,
            resolved: FxHashMap::default(),
            in_progress: Vec::new(),
        };
        let mut shapes = IndexMap::new();
        for name in doc.shapes.keys().chain(doc.aliases.keys()) {
            let shape = resolver.lookup(name, 0)?;
            shapes.insert(name.clone(), shape);
        }
        debug!(shapes = shapes.len(), "loaded declarations");

        Ok(Self {
            options: doc.options.clone(),
            shapes,
        })
    }

    #[must_use]
    pub const fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<Shape>> {
        self.shapes.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.shapes.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<Shape>)> {
        self.shapes.iter().map(|(name, shape)| (name.as_str(), shape))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Resolve a target type expression such as `SquareConfig` or
    /// `Developer & Designer` to a shape.
    pub fn resolve_target(&self, expr: &str) -> Result<Shape, DeclarationError> {
        let mut lookup = RegistryLookup { registry: self };
        match parse_type_expr(expr, &mut lookup, 0)? {
            ShapeType::Object(shape) => Ok(Arc::unwrap_or_clone(shape)),
            _ => Err(DeclarationError::NotAnObjectType(expr.trim().to_string())),
        }
    }
}

/// Name resolution used by the type expression parser.
trait NameLookup {
    fn lookup(&mut self, name: &str, depth: u32) -> Result<Arc<Shape>, DeclarationError>;
}

struct RegistryLookup<'r> {
    registry: &'r ShapeRegistry,
}

impl NameLookup for RegistryLookup<'_> {
    fn lookup(&mut self, name: &str, _depth: u32) -> Result<Arc<Shape>, DeclarationError> {
        self.registry
            .get(name)
            .cloned()
            .ok_or_else(|| DeclarationError::UnknownType(name.to_string()))
    }
}

/// Resolves names against a document, building each shape once.
struct DocumentResolver<'d> {
    doc: &'d DeclarationDocument,
    resolved: FxHashMap<String, Arc<Shape>>,
    /// Names currently being built, for cycle detection.
    in_progress: Vec<String>,
}

impl NameLookup for DocumentResolver<'_> {
    fn lookup(&mut self, name: &str, depth: u32) -> Result<Arc<Shape>, DeclarationError> {
        let doc = self.doc;
        if let Some(shape) = self.resolved.get(name) {
            return Ok(shape.clone());
        }
        if self.in_progress.iter().any(|n| n == name) {
            return Err(DeclarationError::CircularReference(name.to_string()));
        }
        if depth > MAX_SHAPE_DEPTH {
            return Err(DeclarationError::DepthLimitExceeded(MAX_SHAPE_DEPTH));
        }

        self.in_progress.push(name.to_string());
        let built = if let Some(decl) = doc.shapes.get(name) {
            self.build_shape(name, decl, depth)
        } else if let Some(members) = doc.aliases.get(name) {
            self.build_alias(name, members, depth)
        } else {
            Err(DeclarationError::UnknownType(name.to_string()))
        };
        self.in_progress.pop();

        let shape = Arc::new(built?);
        self.resolved.insert(name.to_string(), shape.clone());
        Ok(shape)
    }
}

impl DocumentResolver<'_> {
    fn build_shape(
        &mut self,
        name: &str,
        decl: &ShapeDecl,
        depth: u32,
    ) -> Result<Shape, DeclarationError> {
        let mut builder = Shape::builder(name);
        for (key, expr) in &decl.properties {
            builder = builder.property(self.declare_property(key, expr, depth)?);
        }
        if let Some(index) = &decl.index {
            let (value_type, _) = self.resolve_expr(index, depth + 1)?;
            builder = if decl.readonly_index {
                builder.readonly_index_signature(value_type)
            } else {
                builder.index_signature(value_type)
            };
        }
        builder.build()
    }

    fn build_alias(
        &mut self,
        name: &str,
        members: &[String],
        depth: u32,
    ) -> Result<Shape, DeclarationError> {
        let mut shapes = Vec::with_capacity(members.len());
        for member in members {
            match parse_type_expr(member, self, depth + 1)? {
                ShapeType::Object(shape) => shapes.push(shape),
                _ => return Err(DeclarationError::NotAnObjectType(member.clone())),
            }
        }
        try_intersect_all(shapes.iter().map(|shape| &**shape))?
            .map(|merged| merged.renamed(name))
            .ok_or_else(|| DeclarationError::InvalidTypeExpression {
                expr: name.to_string(),
                reason: "alias has no members".to_string(),
            })
    }

    fn declare_property(
        &mut self,
        key: &str,
        expr: &TypeExpr,
        depth: u32,
    ) -> Result<PropertyInfo, DeclarationError> {
        let (name, flags) = parse_property_key(key)?;
        let (ty, extra) = self.resolve_expr(expr, depth + 1)?;
        Ok(PropertyInfo::new(name, ty, flags | extra))
    }

    fn resolve_expr(
        &mut self,
        expr: &TypeExpr,
        depth: u32,
    ) -> Result<(ShapeType, PropertyFlags), DeclarationError> {
        if depth > MAX_SHAPE_DEPTH {
            return Err(DeclarationError::DepthLimitExceeded(MAX_SHAPE_DEPTH));
        }
        match expr {
            TypeExpr::Text(text) if text.trim() == "method" => {
                Ok((ShapeType::FUNCTION, PropertyFlags::METHOD))
            }
            TypeExpr::Text(text) => Ok((parse_type_expr(text, self, depth)?, PropertyFlags::empty())),
            TypeExpr::Inline(properties) => {
                let mut builder = Shape::anonymous();
                for (key, expr) in properties {
                    builder = builder.property(self.declare_property(key, expr, depth)?);
                }
                Ok((ShapeType::object(builder.build()?), PropertyFlags::empty()))
            }
            TypeExpr::Array(items) => match items.as_slice() {
                [element] => {
                    let (element, _) = self.resolve_expr(element, depth + 1)?;
                    Ok((ShapeType::array(element), PropertyFlags::empty()))
                }
                _ => Err(DeclarationError::InvalidTypeExpression {
                    expr: format!("[{} types]", items.len()),
                    reason: "array types take exactly one element type".to_string(),
                }),
            },
        }
    }
}

/// Split `readonly name?` into the name and its flags.
fn parse_property_key(key: &str) -> Result<(&str, PropertyFlags), DeclarationError> {
    let mut rest = key.trim();
    let mut flags = PropertyFlags::empty();
    if let Some(stripped) = rest.strip_prefix("readonly ") {
        flags |= PropertyFlags::READONLY;
        rest = stripped.trim_start();
    }
    if let Some(stripped) = rest.strip_suffix('?') {
        flags |= PropertyFlags::OPTIONAL;
        rest = stripped.trim_end();
    }
    if rest.is_empty() || rest.contains(char::is_whitespace) {
        return Err(DeclarationError::InvalidTypeExpression {
            expr: key.to_string(),
            reason: "invalid property name".to_string(),
        });
    }
    Ok((rest, flags))
}

// =============================================================================
// Type expressions
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Token<'a> {
    Ident(&'a str),
    Pipe,
    Amp,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Arrow,
}

fn tokenize(text: &str) -> Result<Vec<Token<'_>>, DeclarationError> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();
    while let Some((start, c)) = chars.next() {
        let token = match c {
            c if c.is_whitespace() => continue,
            '|' => Token::Pipe,
            '&' => Token::Amp,
            '[' => Token::LBracket,
            ']' => Token::RBracket,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '=' if chars.next_if(|&(_, next)| next == '>').is_some() => Token::Arrow,
            c if is_ident_char(c) => {
                let mut end = start + c.len_utf8();
                while let Some((pos, next)) = chars.next_if(|&(_, next)| is_ident_char(next)) {
                    end = pos + next.len_utf8();
                }
                Token::Ident(&text[start..end])
            }
            other => {
                return Err(DeclarationError::InvalidTypeExpression {
                    expr: text.to_string(),
                    reason: format!("unexpected character '{other}'"),
                });
            }
        };
        tokens.push(token);
    }
    Ok(tokens)
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Recursive descent over a token list:
///
/// ```text
/// union        := '|'? intersection ('|' intersection)*
/// intersection := postfix ('&' postfix)*
/// postfix      := primary ('[' ']')*
/// primary      := IDENT | '(' ')' '=>' union | '(' union ')'
/// ```
struct TypeParser<'t, 'a, L> {
    text: &'a str,
    tokens: &'t [Token<'a>],
    pos: usize,
    lookup: &'t mut L,
    depth: u32,
}

fn parse_type_expr<L: NameLookup>(
    text: &str,
    lookup: &mut L,
    depth: u32,
) -> Result<ShapeType, DeclarationError> {
    let tokens = tokenize(text)?;
    let mut parser = TypeParser {
        text,
        tokens: &tokens,
        pos: 0,
        lookup,
        depth,
    };
    let ty = parser.parse_union()?;
    if parser.pos != tokens.len() {
        return Err(parser.error("unexpected trailing tokens"));
    }
    Ok(ty)
}

impl<'a, L: NameLookup> TypeParser<'_, 'a, L> {
    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn eat(&mut self, token: Token<'_>) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: Token<'_>, what: &str) -> Result<(), DeclarationError> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.error(&format!("expected {what}")))
        }
    }

    fn error(&self, reason: &str) -> DeclarationError {
        DeclarationError::InvalidTypeExpression {
            expr: self.text.trim().to_string(),
            reason: reason.to_string(),
        }
    }

    fn parse_union(&mut self) -> Result<ShapeType, DeclarationError> {
        self.eat(Token::Pipe);
        let mut members = vec![self.parse_intersection()?];
        while self.eat(Token::Pipe) {
            members.push(self.parse_intersection()?);
        }
        Ok(ShapeType::union(members))
    }

    fn parse_intersection(&mut self) -> Result<ShapeType, DeclarationError> {
        let mut ty = self.parse_postfix()?;
        while self.eat(Token::Amp) {
            let rhs = self.parse_postfix()?;
            ty = try_intersect_types(&ty, &rhs)?;
        }
        Ok(ty)
    }

    fn parse_postfix(&mut self) -> Result<ShapeType, DeclarationError> {
        let mut ty = self.parse_primary()?;
        while self.eat(Token::LBracket) {
            self.expect(Token::RBracket, "']'")?;
            ty = ShapeType::array(ty);
        }
        Ok(ty)
    }

    fn parse_primary(&mut self) -> Result<ShapeType, DeclarationError> {
        match self.peek() {
            Some(Token::Ident(name)) => {
                self.pos += 1;
                self.resolve_name(name)
            }
            Some(Token::LParen) => {
                self.pos += 1;
                if self.depth >= MAX_SHAPE_DEPTH {
                    return Err(DeclarationError::DepthLimitExceeded(MAX_SHAPE_DEPTH));
                }
                self.depth += 1;
                let ty = self.parse_group();
                self.depth -= 1;
                ty
            }
            Some(_) => Err(self.error("expected a type")),
            None => Err(self.error("unexpected end of type expression")),
        }
    }

    /// Body of a group after its opening parenthesis.
    fn parse_group(&mut self) -> Result<ShapeType, DeclarationError> {
        if self.eat(Token::RParen) {
            self.expect(Token::Arrow, "'=>'")?;
            // The return type is parsed for validity only.
            self.parse_union()?;
            return Ok(ShapeType::FUNCTION);
        }
        let inner = self.parse_union()?;
        self.expect(Token::RParen, "')'")?;
        Ok(inner)
    }

    fn resolve_name(&mut self, name: &str) -> Result<ShapeType, DeclarationError> {
        let ty = match name {
            "any" | "unknown" => ShapeType::Any,
            "never" => ShapeType::Never,
            "string" => ShapeType::STRING,
            "number" => ShapeType::NUMBER,
            "boolean" => ShapeType::BOOLEAN,
            "null" => ShapeType::NULL,
            "undefined" | "void" => ShapeType::UNDEFINED,
            "function" | "Function" => ShapeType::FUNCTION,
            _ => ShapeType::Object(self.lookup.lookup(name, self.depth + 1)?),
        };
        Ok(ty)
    }
}

// =============================================================================
// Candidates
// =============================================================================

/// Parse a candidate record from JSON text.
pub fn parse_candidate(text: &str) -> Result<Record, DeclarationError> {
    let json: serde_json::Value = serde_json::from_str(text)?;
    record_from_json(&json)
}

/// Convert a JSON object into a candidate record.
pub fn record_from_json(json: &serde_json::Value) -> Result<Record, DeclarationError> {
    match value_from_json(json)? {
        Value::Object(record) => Ok(record),
        _ => Err(DeclarationError::CandidateNotAnObject(json_kind(json))),
    }
}

/// Convert any JSON value into a candidate value.
pub fn value_from_json(json: &serde_json::Value) -> Result<Value, DeclarationError> {
    use serde_json::Value as Json;

    let value = match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Boolean(*b),
        Json::Number(n) => Value::Number(
            n.as_f64()
                .ok_or_else(|| DeclarationError::UnrepresentableNumber(n.to_string()))?,
        ),
        Json::String(s) => Value::String(Arc::from(s.as_str())),
        Json::Array(items) => Value::Array(
            items
                .iter()
                .map(value_from_json)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Json::Object(map) if map.len() == 1 && map.contains_key("$function") => {
            Value::Function(map["$function"].as_str().map(Arc::from))
        }
        Json::Object(map) if map.len() == 1 && map.contains_key("$undefined") => Value::Undefined,
        Json::Object(map) => {
            let mut record = Record::new();
            for (name, value) in map {
                record.insert(name, value_from_json(value)?);
            }
            Value::Object(record)
        }
    };
    Ok(value)
}

const fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "../tests/decl_tests.rs"]
mod tests;
