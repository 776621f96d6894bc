//! SDL document model
//!
//! A closed set of definition kinds so that every traversal is an exhaustive
//! `match` — a definition kind a pass forgot to handle is a compile error,
//! not a silently skipped node.

use serde::{Deserialize, Serialize};

/// The built-in scalar type names that must never be renamed or redefined
/// on behalf of a subgraph.
pub const BUILT_IN_SCALARS: [&str; 5] = ["Int", "Float", "String", "Boolean", "ID"];

/// Returns true if `name` is one of the five built-in scalar types.
#[inline]
#[must_use]
pub fn is_built_in_scalar(name: &str) -> bool {
    BUILT_IN_SCALARS.contains(&name)
}

/// A parsed SDL document: the ordered list of definitions exactly as the
/// subgraph published them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    /// Top-level definitions in source order
    pub definitions: Vec<Definition>,
}

impl Document {
    /// Find a definition by its declared name, if it has one.
    ///
    /// Schema definitions are anonymous and never match.
    #[must_use]
    pub fn definition(&self, name: &str) -> Option<&Definition> {
        self.definitions.iter().find(|d| d.name() == Some(name))
    }
}

/// One top-level SDL definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Definition {
    /// `schema { query: … }`
    Schema(SchemaDefinition),
    /// `type Name { … }`
    Object(ObjectType),
    /// `interface Name { … }`
    Interface(InterfaceType),
    /// `union Name = A | B`
    Union(UnionType),
    /// `enum Name { … }`
    Enum(EnumType),
    /// `input Name { … }`
    InputObject(InputObjectType),
    /// `scalar Name`
    Scalar(ScalarType),
    /// `directive @name(…) on …`
    Directive(DirectiveDefinition),
}

impl Definition {
    /// The declared name of this definition (`None` for schema definitions).
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Schema(_) => None,
            Self::Object(o) => Some(&o.name),
            Self::Interface(i) => Some(&i.name),
            Self::Union(u) => Some(&u.name),
            Self::Enum(e) => Some(&e.name),
            Self::InputObject(i) => Some(&i.name),
            Self::Scalar(s) => Some(&s.name),
            Self::Directive(d) => Some(&d.name),
        }
    }
}

/// `schema` definition with its root operation bindings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SchemaDefinition {
    /// Leading description string, if any
    pub description: Option<String>,
    /// Directives applied to the schema itself
    pub directives: Vec<ConstDirective>,
    /// Root query type name
    pub query: Option<String>,
    /// Root mutation type name
    pub mutation: Option<String>,
    /// Root subscription type name
    pub subscription: Option<String>,
}

/// `type` definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectType {
    /// Type name
    pub name: String,
    /// Leading description string, if any
    pub description: Option<String>,
    /// Names of implemented interfaces
    pub interfaces: Vec<String>,
    /// Directives on the type
    pub directives: Vec<ConstDirective>,
    /// Field definitions
    pub fields: Vec<FieldDefinition>,
}

/// `interface` definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceType {
    /// Interface name
    pub name: String,
    /// Leading description string, if any
    pub description: Option<String>,
    /// Names of implemented interfaces
    pub interfaces: Vec<String>,
    /// Directives on the interface
    pub directives: Vec<ConstDirective>,
    /// Field definitions
    pub fields: Vec<FieldDefinition>,
}

/// `union` definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnionType {
    /// Union name
    pub name: String,
    /// Leading description string, if any
    pub description: Option<String>,
    /// Directives on the union
    pub directives: Vec<ConstDirective>,
    /// Member type names
    pub members: Vec<String>,
}

/// `enum` definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumType {
    /// Enum name
    pub name: String,
    /// Leading description string, if any
    pub description: Option<String>,
    /// Directives on the enum
    pub directives: Vec<ConstDirective>,
    /// Enum values
    pub values: Vec<EnumValueDefinition>,
}

/// One value inside an `enum` definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumValueDefinition {
    /// Value name
    pub name: String,
    /// Leading description string, if any
    pub description: Option<String>,
    /// Directives on the value
    pub directives: Vec<ConstDirective>,
}

/// `input` definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputObjectType {
    /// Input object name
    pub name: String,
    /// Leading description string, if any
    pub description: Option<String>,
    /// Directives on the input object
    pub directives: Vec<ConstDirective>,
    /// Input field definitions
    pub fields: Vec<InputValueDefinition>,
}

/// `scalar` definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarType {
    /// Scalar name
    pub name: String,
    /// Leading description string, if any
    pub description: Option<String>,
    /// Directives on the scalar
    pub directives: Vec<ConstDirective>,
}

/// `directive @name on LOCATION | …` definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectiveDefinition {
    /// Directive name (without the `@`)
    pub name: String,
    /// Leading description string, if any
    pub description: Option<String>,
    /// Argument definitions
    pub arguments: Vec<InputValueDefinition>,
    /// Whether the directive is declared `repeatable`
    pub repeatable: bool,
    /// Declared locations (e.g. `FIELD_DEFINITION`, `OBJECT`)
    pub locations: Vec<String>,
}

/// A field inside an object or interface definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Field name
    pub name: String,
    /// Leading description string, if any
    pub description: Option<String>,
    /// Argument definitions
    pub arguments: Vec<InputValueDefinition>,
    /// Field result type
    pub ty: TypeRef,
    /// Directives on the field
    pub directives: Vec<ConstDirective>,
}

/// An argument or input-object field definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputValueDefinition {
    /// Argument/field name
    pub name: String,
    /// Leading description string, if any
    pub description: Option<String>,
    /// Declared type
    pub ty: TypeRef,
    /// Default value, if declared
    pub default_value: Option<ConstValue>,
    /// Directives on the argument/field
    pub directives: Vec<ConstDirective>,
}

/// A type reference: a named type possibly wrapped in list and non-null
/// modifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeRef {
    /// `Name`
    Named(String),
    /// `[Inner]`
    List(Box<TypeRef>),
    /// `Inner!`
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    /// The innermost named type this reference points at.
    #[must_use]
    pub fn named_type(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::List(inner) | Self::NonNull(inner) => inner.named_type(),
        }
    }
}

/// A directive application with const arguments, e.g. `@key(fields: "id")`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstDirective {
    /// Directive name (without the `@`)
    pub name: String,
    /// Named arguments in source order
    pub arguments: Vec<(String, ConstValue)>,
}

/// A constant value usable in SDL positions (directive arguments, defaults)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConstValue {
    /// Integer literal
    Int(i64),
    /// Float literal
    Float(f64),
    /// String literal
    String(String),
    /// `true` / `false`
    Boolean(bool),
    /// `null`
    Null,
    /// Bare enum value name
    Enum(String),
    /// `[a, b, c]`
    List(Vec<ConstValue>),
    /// `{key: value, …}`
    Object(Vec<(String, ConstValue)>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_scalar_set() {
        assert!(is_built_in_scalar("String"));
        assert!(is_built_in_scalar("ID"));
        assert!(!is_built_in_scalar("DateTime"));
    }

    #[test]
    fn type_ref_unwraps_to_named_type() {
        let ty = TypeRef::NonNull(Box::new(TypeRef::List(Box::new(TypeRef::Named(
            "User".to_string(),
        )))));
        assert_eq!(ty.named_type(), "User");
    }

    #[test]
    fn definition_names() {
        let def = Definition::Scalar(ScalarType {
            name: "DateTime".to_string(),
            description: None,
            directives: vec![],
        });
        assert_eq!(def.name(), Some("DateTime"));
        assert_eq!(Definition::Schema(SchemaDefinition::default()).name(), None);
    }
}
