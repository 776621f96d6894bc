//! GraphQL SDL document model, parser, printer, and namespace prefixer
//!
//! This crate owns the schema-definition-language side of the gateway:
//! - Parsing the SDL text a subgraph returns from `{ _service { sdl } }`
//!   into a closed [`Document`] AST
//! - Printing a document back to stable SDL text
//! - Rewriting type names with a per-subgraph namespace prefix before
//!   composition
//!
//! # Example
//!
//! ```rust
//! use fedgate_sdl::{parse_document, prefix_document};
//!
//! let doc = parse_document("type Bar { id: ID }").unwrap();
//! let doc = prefix_document(doc, "B", &["B"]).unwrap();
//! assert_eq!(doc.to_string(), "type BBar {\n  id: ID\n}\n");
//! ```

#![warn(unreachable_pub)]

pub mod ast;
pub mod error;
mod lexer;
pub mod parser;
pub mod prefix;
mod print;

pub use ast::{
    is_built_in_scalar, ConstDirective, ConstValue, Definition, DirectiveDefinition, Document,
    EnumType, EnumValueDefinition, FieldDefinition, InputObjectType, InputValueDefinition,
    InterfaceType, ObjectType, ScalarType, SchemaDefinition, TypeRef, UnionType,
    BUILT_IN_SCALARS,
};
pub use error::{ParseError, RewriteError};
pub use parser::parse_document;
pub use prefix::{prefix_document, NamespacePrefixer};
