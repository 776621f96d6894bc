//! SDL printer
//!
//! `Display` renders a [`Document`] back to definition-language text with a
//! stable layout (two-space indent, one blank line between definitions).

use crate::ast::{
    ConstDirective, ConstValue, Definition, Document, FieldDefinition, InputValueDefinition,
    TypeRef,
};
use std::fmt::{self, Display, Formatter, Write as _};

impl Display for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, def) in self.definitions.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write_definition(f, def)?;
        }
        Ok(())
    }
}

impl Display for TypeRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::List(inner) => write!(f, "[{inner}]"),
            Self::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

impl Display for ConstValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(v) => write_quoted(f, v),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Null => f.write_str("null"),
            Self::Enum(v) => f.write_str(v),
            Self::List(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.fmt(f)?;
                }
                f.write_char(']')
            }
            Self::Object(entries) => {
                f.write_char('{')?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_char('}')
            }
        }
    }
}

fn write_definition(f: &mut Formatter<'_>, def: &Definition) -> fmt::Result {
    match def {
        Definition::Schema(s) => {
            write_description(f, s.description.as_deref())?;
            f.write_str("schema")?;
            write_directives(f, &s.directives)?;
            f.write_str(" {\n")?;
            if let Some(query) = &s.query {
                writeln!(f, "  query: {query}")?;
            }
            if let Some(mutation) = &s.mutation {
                writeln!(f, "  mutation: {mutation}")?;
            }
            if let Some(subscription) = &s.subscription {
                writeln!(f, "  subscription: {subscription}")?;
            }
            f.write_str("}\n")
        }
        Definition::Object(o) => {
            write_description(f, o.description.as_deref())?;
            write!(f, "type {}", o.name)?;
            write_implements(f, &o.interfaces)?;
            write_directives(f, &o.directives)?;
            write_fields(f, &o.fields)
        }
        Definition::Interface(i) => {
            write_description(f, i.description.as_deref())?;
            write!(f, "interface {}", i.name)?;
            write_implements(f, &i.interfaces)?;
            write_directives(f, &i.directives)?;
            write_fields(f, &i.fields)
        }
        Definition::Union(u) => {
            write_description(f, u.description.as_deref())?;
            write!(f, "union {}", u.name)?;
            write_directives(f, &u.directives)?;
            write!(f, " = {}", u.members.join(" | "))?;
            f.write_char('\n')
        }
        Definition::Enum(e) => {
            write_description(f, e.description.as_deref())?;
            write!(f, "enum {}", e.name)?;
            write_directives(f, &e.directives)?;
            f.write_str(" {\n")?;
            for value in &e.values {
                if let Some(desc) = &value.description {
                    write!(f, "  ")?;
                    write_quoted_block(f, desc)?;
                }
                write!(f, "  {}", value.name)?;
                write_directives(f, &value.directives)?;
                f.write_char('\n')?;
            }
            f.write_str("}\n")
        }
        Definition::InputObject(i) => {
            write_description(f, i.description.as_deref())?;
            write!(f, "input {}", i.name)?;
            write_directives(f, &i.directives)?;
            f.write_str(" {\n")?;
            for field in &i.fields {
                f.write_str("  ")?;
                write_input_value(f, field)?;
                f.write_char('\n')?;
            }
            f.write_str("}\n")
        }
        Definition::Scalar(s) => {
            write_description(f, s.description.as_deref())?;
            write!(f, "scalar {}", s.name)?;
            write_directives(f, &s.directives)?;
            f.write_char('\n')
        }
        Definition::Directive(d) => {
            write_description(f, d.description.as_deref())?;
            write!(f, "directive @{}", d.name)?;
            write_arguments(f, &d.arguments)?;
            if d.repeatable {
                f.write_str(" repeatable")?;
            }
            write!(f, " on {}", d.locations.join(" | "))?;
            f.write_char('\n')
        }
    }
}

fn write_fields(f: &mut Formatter<'_>, fields: &[FieldDefinition]) -> fmt::Result {
    if fields.is_empty() {
        return f.write_char('\n');
    }
    f.write_str(" {\n")?;
    for field in fields {
        if let Some(desc) = &field.description {
            f.write_str("  ")?;
            write_quoted_block(f, desc)?;
        }
        write!(f, "  {}", field.name)?;
        write_arguments(f, &field.arguments)?;
        write!(f, ": {}", field.ty)?;
        write_directives(f, &field.directives)?;
        f.write_char('\n')?;
    }
    f.write_str("}\n")
}

fn write_arguments(f: &mut Formatter<'_>, arguments: &[InputValueDefinition]) -> fmt::Result {
    if arguments.is_empty() {
        return Ok(());
    }
    f.write_char('(')?;
    for (i, arg) in arguments.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_input_value(f, arg)?;
    }
    f.write_char(')')
}

fn write_input_value(f: &mut Formatter<'_>, value: &InputValueDefinition) -> fmt::Result {
    write!(f, "{}: {}", value.name, value.ty)?;
    if let Some(default) = &value.default_value {
        write!(f, " = {default}")?;
    }
    write_directives(f, &value.directives)
}

fn write_implements(f: &mut Formatter<'_>, interfaces: &[String]) -> fmt::Result {
    if interfaces.is_empty() {
        return Ok(());
    }
    write!(f, " implements {}", interfaces.join(" & "))
}

fn write_directives(f: &mut Formatter<'_>, directives: &[ConstDirective]) -> fmt::Result {
    for directive in directives {
        write!(f, " @{}", directive.name)?;
        if !directive.arguments.is_empty() {
            f.write_char('(')?;
            for (i, (name, value)) in directive.arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{name}: {value}")?;
            }
            f.write_char(')')?;
        }
    }
    Ok(())
}

fn write_description(f: &mut Formatter<'_>, description: Option<&str>) -> fmt::Result {
    match description {
        Some(desc) => write_quoted_block(f, desc),
        None => Ok(()),
    }
}

fn write_quoted_block(f: &mut Formatter<'_>, text: &str) -> fmt::Result {
    if text.contains('\n') {
        writeln!(f, "\"\"\"\n{text}\n\"\"\"")
    } else {
        writeln!(f, "\"\"\"{text}\"\"\"")
    }
}

fn write_quoted(f: &mut Formatter<'_>, text: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in text.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            other => f.write_char(other)?,
        }
    }
    f.write_char('"')
}

#[cfg(test)]
mod tests {
    use crate::parser::parse_document;
    use pretty_assertions::assert_eq;

    #[test]
    fn prints_object_type() {
        let doc = parse_document(
            r#"type User implements Node @key(fields: "id") { id: ID! friends(first: Int = 10): [User!] }"#,
        )
        .unwrap();
        assert_eq!(
            doc.to_string(),
            "type User implements Node @key(fields: \"id\") {\n  id: ID!\n  friends(first: Int = 10): [User!]\n}\n"
        );
    }

    #[test]
    fn prints_remaining_definition_kinds() {
        let source = "union Pet = Dog | Cat\n\
                      \n\
                      enum Role {\n  ADMIN\n  USER\n}\n\
                      \n\
                      input Filter {\n  q: String = \"*\"\n}\n\
                      \n\
                      scalar DateTime\n\
                      \n\
                      schema {\n  query: Query\n}\n";
        let doc = parse_document(source).unwrap();
        assert_eq!(doc.to_string(), source);
    }

    #[test]
    fn print_parse_is_stable() {
        let doc = parse_document(
            "directive @tag(name: String!) repeatable on FIELD_DEFINITION | OBJECT",
        )
        .unwrap();
        let printed = doc.to_string();
        assert_eq!(parse_document(&printed).unwrap(), doc);
    }
}
