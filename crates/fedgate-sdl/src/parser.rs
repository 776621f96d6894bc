//! Recursive descent parser for SDL documents
//!
//! Covers the definition language a subgraph returns from
//! `{ _service { sdl } }`: schema, object, interface, union, enum, input,
//! scalar, and directive definitions, with descriptions and const
//! directives. Executable definitions and type extensions are rejected.

use crate::ast::{
    ConstDirective, ConstValue, Definition, DirectiveDefinition, Document, EnumType,
    EnumValueDefinition, FieldDefinition, InputObjectType, InputValueDefinition, InterfaceType,
    ObjectType, ScalarType, SchemaDefinition, TypeRef, UnionType,
};
use crate::error::ParseError;
use crate::lexer::{tokenize, SpannedToken, Token};

/// Parse SDL `source` into a [`Document`].
///
/// # Errors
/// Returns a [`ParseError`] with source position on malformed input.
pub fn parse_document(source: &str) -> Result<Document, ParseError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser { tokens, pos: 0 };
    parser.document()
}

struct Parser {
    tokens: Vec<SpannedToken>,
    pos: usize,
}

impl Parser {
    fn document(&mut self) -> Result<Document, ParseError> {
        let mut definitions = Vec::new();
        while self.peek().is_some() {
            definitions.push(self.definition()?);
        }
        Ok(Document { definitions })
    }

    fn definition(&mut self) -> Result<Definition, ParseError> {
        let description = self.description();
        let keyword = self.expect_any_name()?;
        match keyword.as_str() {
            "schema" => self.schema_definition(description),
            "scalar" => self.scalar_definition(description),
            "type" => self.object_definition(description),
            "interface" => self.interface_definition(description),
            "union" => self.union_definition(description),
            "enum" => self.enum_definition(description),
            "input" => self.input_definition(description),
            "directive" => self.directive_definition(description),
            "extend" => Err(self.error_here("type extensions are not supported")),
            other => Err(self.error_here(format!("unexpected definition keyword `{other}`"))),
        }
    }

    fn schema_definition(&mut self, description: Option<String>) -> Result<Definition, ParseError> {
        let directives = self.directives()?;
        self.expect_punct('{')?;
        let mut schema = SchemaDefinition {
            description,
            directives,
            ..SchemaDefinition::default()
        };
        while !self.eat_punct('}') {
            let operation = self.expect_any_name()?;
            self.expect_punct(':')?;
            let ty = self.expect_any_name()?;
            match operation.as_str() {
                "query" => schema.query = Some(ty),
                "mutation" => schema.mutation = Some(ty),
                "subscription" => schema.subscription = Some(ty),
                other => {
                    return Err(self.error_here(format!("unknown root operation `{other}`")));
                }
            }
        }
        Ok(Definition::Schema(schema))
    }

    fn scalar_definition(&mut self, description: Option<String>) -> Result<Definition, ParseError> {
        let name = self.expect_any_name()?;
        let directives = self.directives()?;
        Ok(Definition::Scalar(ScalarType {
            name,
            description,
            directives,
        }))
    }

    fn object_definition(&mut self, description: Option<String>) -> Result<Definition, ParseError> {
        let name = self.expect_any_name()?;
        let interfaces = self.implements_interfaces()?;
        let directives = self.directives()?;
        let fields = self.fields_block()?;
        Ok(Definition::Object(ObjectType {
            name,
            description,
            interfaces,
            directives,
            fields,
        }))
    }

    fn interface_definition(
        &mut self,
        description: Option<String>,
    ) -> Result<Definition, ParseError> {
        let name = self.expect_any_name()?;
        let interfaces = self.implements_interfaces()?;
        let directives = self.directives()?;
        let fields = self.fields_block()?;
        Ok(Definition::Interface(InterfaceType {
            name,
            description,
            interfaces,
            directives,
            fields,
        }))
    }

    fn union_definition(&mut self, description: Option<String>) -> Result<Definition, ParseError> {
        let name = self.expect_any_name()?;
        let directives = self.directives()?;
        self.expect_punct('=')?;
        self.eat_punct('|');
        let mut members = vec![self.expect_any_name()?];
        while self.eat_punct('|') {
            members.push(self.expect_any_name()?);
        }
        Ok(Definition::Union(UnionType {
            name,
            description,
            directives,
            members,
        }))
    }

    fn enum_definition(&mut self, description: Option<String>) -> Result<Definition, ParseError> {
        let name = self.expect_any_name()?;
        let directives = self.directives()?;
        self.expect_punct('{')?;
        let mut values = Vec::new();
        while !self.eat_punct('}') {
            let description = self.description();
            let name = self.expect_any_name()?;
            let directives = self.directives()?;
            values.push(EnumValueDefinition {
                name,
                description,
                directives,
            });
        }
        Ok(Definition::Enum(EnumType {
            name,
            description,
            directives,
            values,
        }))
    }

    fn input_definition(&mut self, description: Option<String>) -> Result<Definition, ParseError> {
        let name = self.expect_any_name()?;
        let directives = self.directives()?;
        self.expect_punct('{')?;
        let mut fields = Vec::new();
        while !self.eat_punct('}') {
            fields.push(self.input_value()?);
        }
        Ok(Definition::InputObject(InputObjectType {
            name,
            description,
            directives,
            fields,
        }))
    }

    fn directive_definition(
        &mut self,
        description: Option<String>,
    ) -> Result<Definition, ParseError> {
        self.expect_punct('@')?;
        let name = self.expect_any_name()?;
        let arguments = self.argument_definitions()?;
        let repeatable = self.eat_name("repeatable");
        self.expect_name("on")?;
        self.eat_punct('|');
        let mut locations = vec![self.expect_any_name()?];
        while self.eat_punct('|') {
            locations.push(self.expect_any_name()?);
        }
        Ok(Definition::Directive(DirectiveDefinition {
            name,
            description,
            arguments,
            repeatable,
            locations,
        }))
    }

    fn implements_interfaces(&mut self) -> Result<Vec<String>, ParseError> {
        let mut interfaces = Vec::new();
        if self.eat_name("implements") {
            self.eat_punct('&');
            interfaces.push(self.expect_any_name()?);
            while self.eat_punct('&') {
                interfaces.push(self.expect_any_name()?);
            }
        }
        Ok(interfaces)
    }

    fn fields_block(&mut self) -> Result<Vec<FieldDefinition>, ParseError> {
        let mut fields = Vec::new();
        if self.eat_punct('{') {
            while !self.eat_punct('}') {
                fields.push(self.field_definition()?);
            }
        }
        Ok(fields)
    }

    fn field_definition(&mut self) -> Result<FieldDefinition, ParseError> {
        let description = self.description();
        let name = self.expect_any_name()?;
        let arguments = self.argument_definitions()?;
        self.expect_punct(':')?;
        let ty = self.type_ref()?;
        let directives = self.directives()?;
        Ok(FieldDefinition {
            name,
            description,
            arguments,
            ty,
            directives,
        })
    }

    fn argument_definitions(&mut self) -> Result<Vec<InputValueDefinition>, ParseError> {
        let mut arguments = Vec::new();
        if self.eat_punct('(') {
            while !self.eat_punct(')') {
                arguments.push(self.input_value()?);
            }
        }
        Ok(arguments)
    }

    fn input_value(&mut self) -> Result<InputValueDefinition, ParseError> {
        let description = self.description();
        let name = self.expect_any_name()?;
        self.expect_punct(':')?;
        let ty = self.type_ref()?;
        let default_value = if self.eat_punct('=') {
            Some(self.const_value()?)
        } else {
            None
        };
        let directives = self.directives()?;
        Ok(InputValueDefinition {
            name,
            description,
            ty,
            default_value,
            directives,
        })
    }

    fn type_ref(&mut self) -> Result<TypeRef, ParseError> {
        let base = if self.eat_punct('[') {
            let inner = self.type_ref()?;
            self.expect_punct(']')?;
            TypeRef::List(Box::new(inner))
        } else {
            TypeRef::Named(self.expect_any_name()?)
        };
        if self.eat_punct('!') {
            Ok(TypeRef::NonNull(Box::new(base)))
        } else {
            Ok(base)
        }
    }

    fn directives(&mut self) -> Result<Vec<ConstDirective>, ParseError> {
        let mut directives = Vec::new();
        while self.eat_punct('@') {
            let name = self.expect_any_name()?;
            let mut arguments = Vec::new();
            if self.eat_punct('(') {
                while !self.eat_punct(')') {
                    let arg = self.expect_any_name()?;
                    self.expect_punct(':')?;
                    arguments.push((arg, self.const_value()?));
                }
            }
            directives.push(ConstDirective { name, arguments });
        }
        Ok(directives)
    }

    fn const_value(&mut self) -> Result<ConstValue, ParseError> {
        match self.next() {
            Some(SpannedToken {
                token: Token::Int(v),
                ..
            }) => Ok(ConstValue::Int(v)),
            Some(SpannedToken {
                token: Token::Float(v),
                ..
            }) => Ok(ConstValue::Float(v)),
            Some(SpannedToken {
                token: Token::Str(v),
                ..
            }) => Ok(ConstValue::String(v)),
            Some(SpannedToken {
                token: Token::Name(n),
                ..
            }) => match n.as_str() {
                "true" => Ok(ConstValue::Boolean(true)),
                "false" => Ok(ConstValue::Boolean(false)),
                "null" => Ok(ConstValue::Null),
                _ => Ok(ConstValue::Enum(n)),
            },
            Some(SpannedToken {
                token: Token::Punct('['),
                ..
            }) => {
                let mut items = Vec::new();
                while !self.eat_punct(']') {
                    items.push(self.const_value()?);
                }
                Ok(ConstValue::List(items))
            }
            Some(SpannedToken {
                token: Token::Punct('{'),
                ..
            }) => {
                let mut entries = Vec::new();
                while !self.eat_punct('}') {
                    let key = self.expect_any_name()?;
                    self.expect_punct(':')?;
                    entries.push((key, self.const_value()?));
                }
                Ok(ConstValue::Object(entries))
            }
            Some(SpannedToken { token, line, column }) => Err(ParseError::new(
                format!("expected value, found {}", token.describe()),
                line,
                column,
            )),
            None => Err(self.eof_error("expected value")),
        }
    }

    fn description(&mut self) -> Option<String> {
        match self.peek() {
            Some(SpannedToken {
                token: Token::Str(_),
                ..
            }) => match self.next()?.token {
                Token::Str(s) => Some(s),
                _ => None,
            },
            _ => None,
        }
    }

    fn peek(&self) -> Option<&SpannedToken> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<SpannedToken> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat_punct(&mut self, c: char) -> bool {
        if matches!(self.peek(), Some(SpannedToken { token: Token::Punct(p), .. }) if *p == c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_name(&mut self, name: &str) -> bool {
        if matches!(self.peek(), Some(SpannedToken { token: Token::Name(n), .. }) if n == name) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect_punct(&mut self, c: char) -> Result<(), ParseError> {
        match self.next() {
            Some(SpannedToken {
                token: Token::Punct(p),
                ..
            }) if p == c => Ok(()),
            Some(SpannedToken { token, line, column }) => Err(ParseError::new(
                format!("expected `{c}`, found {}", token.describe()),
                line,
                column,
            )),
            None => Err(self.eof_error(format!("expected `{c}`"))),
        }
    }

    fn expect_name(&mut self, name: &str) -> Result<(), ParseError> {
        match self.next() {
            Some(SpannedToken {
                token: Token::Name(n),
                ..
            }) if n == name => Ok(()),
            Some(SpannedToken { token, line, column }) => Err(ParseError::new(
                format!("expected `{name}`, found {}", token.describe()),
                line,
                column,
            )),
            None => Err(self.eof_error(format!("expected `{name}`"))),
        }
    }

    fn expect_any_name(&mut self) -> Result<String, ParseError> {
        match self.next() {
            Some(SpannedToken {
                token: Token::Name(n),
                ..
            }) => Ok(n),
            Some(SpannedToken { token, line, column }) => Err(ParseError::new(
                format!("expected name, found {}", token.describe()),
                line,
                column,
            )),
            None => Err(self.eof_error("expected name")),
        }
    }

    fn error_here(&self, message: impl Into<String>) -> ParseError {
        // Position of the most recently consumed token.
        let at = self.tokens.get(self.pos.saturating_sub(1));
        match at {
            Some(SpannedToken { line, column, .. }) => ParseError::new(message, *line, *column),
            None => ParseError::new(message, 1, 1),
        }
    }

    fn eof_error(&self, message: impl Into<String>) -> ParseError {
        match self.tokens.last() {
            Some(SpannedToken { line, column, .. }) => ParseError::new(message, *line, *column),
            None => ParseError::new(message, 1, 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_object_with_fields() {
        let doc = parse_document("type User { id: ID! name: String }").unwrap();
        assert_eq!(doc.definitions.len(), 1);
        let Definition::Object(obj) = &doc.definitions[0] else {
            panic!("expected object definition");
        };
        assert_eq!(obj.name, "User");
        assert_eq!(obj.fields.len(), 2);
        assert_eq!(
            obj.fields[0].ty,
            TypeRef::NonNull(Box::new(TypeRef::Named("ID".to_string())))
        );
    }

    #[test]
    fn parses_implements_and_directives() {
        let doc = parse_document(
            r#"type Review implements Node & Timestamped @key(fields: "id") { id: ID! }"#,
        )
        .unwrap();
        let Definition::Object(obj) = &doc.definitions[0] else {
            panic!("expected object definition");
        };
        assert_eq!(obj.interfaces, vec!["Node", "Timestamped"]);
        assert_eq!(obj.directives[0].name, "key");
        assert_eq!(
            obj.directives[0].arguments[0],
            ("fields".to_string(), ConstValue::String("id".to_string()))
        );
    }

    #[test]
    fn parses_field_arguments_with_defaults() {
        let doc = parse_document("type Query { top(first: Int = 5, after: String): [Item!]! }")
            .unwrap();
        let Definition::Object(obj) = &doc.definitions[0] else {
            panic!("expected object definition");
        };
        let field = &obj.fields[0];
        assert_eq!(field.arguments.len(), 2);
        assert_eq!(field.arguments[0].default_value, Some(ConstValue::Int(5)));
        assert_eq!(field.ty.named_type(), "Item");
    }

    #[test]
    fn parses_union_enum_input_scalar() {
        let doc = parse_document(
            "union Pet = Dog | Cat\n\
             enum Role { ADMIN USER }\n\
             input Filter { q: String }\n\
             scalar DateTime",
        )
        .unwrap();
        assert_eq!(doc.definitions.len(), 4);
        let Definition::Union(u) = &doc.definitions[0] else {
            panic!("expected union");
        };
        assert_eq!(u.members, vec!["Dog", "Cat"]);
        let Definition::Enum(e) = &doc.definitions[1] else {
            panic!("expected enum");
        };
        assert_eq!(e.values.len(), 2);
    }

    #[test]
    fn parses_schema_definition() {
        let doc = parse_document("schema { query: Query mutation: Mutation }").unwrap();
        let Definition::Schema(s) = &doc.definitions[0] else {
            panic!("expected schema definition");
        };
        assert_eq!(s.query.as_deref(), Some("Query"));
        assert_eq!(s.mutation.as_deref(), Some("Mutation"));
        assert_eq!(s.subscription, None);
    }

    #[test]
    fn parses_directive_definition() {
        let doc =
            parse_document("directive @tag(name: String!) repeatable on FIELD_DEFINITION | OBJECT")
                .unwrap();
        let Definition::Directive(d) = &doc.definitions[0] else {
            panic!("expected directive definition");
        };
        assert_eq!(d.name, "tag");
        assert!(d.repeatable);
        assert_eq!(d.locations, vec!["FIELD_DEFINITION", "OBJECT"]);
    }

    #[test]
    fn schema_description_is_kept() {
        let doc = parse_document("\"\"\"Gateway entry points.\"\"\"\nschema { query: Query }")
            .unwrap();
        let Definition::Schema(s) = &doc.definitions[0] else {
            panic!("expected schema definition");
        };
        assert_eq!(s.description.as_deref(), Some("Gateway entry points."));
        assert_eq!(
            doc.to_string(),
            "\"\"\"Gateway entry points.\"\"\"\nschema {\n  query: Query\n}\n"
        );
    }

    #[test]
    fn parses_descriptions() {
        let doc = parse_document("\"\"\"A user.\"\"\"\ntype User { id: ID }").unwrap();
        let Definition::Object(obj) = &doc.definitions[0] else {
            panic!("expected object definition");
        };
        assert_eq!(obj.description.as_deref(), Some("A user."));
    }

    #[test]
    fn rejects_type_extensions() {
        let err = parse_document("extend type Query { extra: Int }").unwrap_err();
        assert!(err.message.contains("extensions"));
    }

    #[test]
    fn reports_position_on_malformed_input() {
        let err = parse_document("type User {\n  id ID\n}").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.message.contains("expected `:`"));
    }
}
