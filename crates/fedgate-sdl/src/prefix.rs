//! Namespace prefixer
//!
//! Rewrites a subgraph's document so its type names carry the subgraph's
//! namespace, reducing collision risk when many subgraphs compose into one
//! schema. This is a textual heuristic, not an ownership check: the matcher
//! that decides whether a name is "already namespaced" is built from the
//! union of every namespace configured in the round, so a foreign type that
//! merely shares a prefix is skipped too.
//!
//! Scope is deliberately narrow and mirrors what composition currently
//! consumes: object and scalar *definitions* are renamed, and every
//! named-type *reference* is renamed, wherever it appears. Interface, union,
//! enum, input-object, and directive definition names are left untouched, so
//! a reference to one of them can dangle after rewriting. Known gap; fixing
//! it changes composed output and needs its own migration.

use crate::ast::{
    is_built_in_scalar, Definition, Document, FieldDefinition, InputValueDefinition, TypeRef,
};
use crate::error::RewriteError;
use regex::Regex;

/// Per-round namespace matcher plus the rewrite itself.
#[derive(Debug, Clone)]
pub struct NamespacePrefixer {
    matcher: Option<Regex>,
}

impl NamespacePrefixer {
    /// Build a prefixer from every namespace configured across the round's
    /// subgraphs. Empty namespace strings are ignored.
    ///
    /// A name counts as already namespaced when it starts with one of the
    /// configured namespaces followed by an uppercase letter — `BBar` is
    /// namespaced under `B`, plain `Bar` is not.
    ///
    /// # Errors
    /// Returns [`RewriteError::Pattern`] if the combined alternation does
    /// not compile.
    pub fn new<S: AsRef<str>>(namespaces: &[S]) -> Result<Self, RewriteError> {
        let alternatives: Vec<String> = namespaces
            .iter()
            .map(AsRef::as_ref)
            .filter(|ns| !ns.is_empty())
            .map(regex::escape)
            .collect();
        let matcher = if alternatives.is_empty() {
            None
        } else {
            Some(Regex::new(&format!(
                "^(?:{})[A-Z]",
                alternatives.join("|")
            ))?)
        };
        Ok(Self { matcher })
    }

    /// Rewrite `document` so its type names carry `namespace`.
    #[must_use]
    pub fn apply(&self, document: Document, namespace: &str) -> Document {
        let definitions = document
            .definitions
            .into_iter()
            .map(|def| self.rewrite_definition(def, namespace))
            .collect();
        Document { definitions }
    }

    fn rewrite_definition(&self, def: Definition, ns: &str) -> Definition {
        match def {
            Definition::Schema(mut s) => {
                // Root operation bindings are named-type references.
                s.query = s.query.map(|n| self.rename(ns, n));
                s.mutation = s.mutation.map(|n| self.rename(ns, n));
                s.subscription = s.subscription.map(|n| self.rename(ns, n));
                Definition::Schema(s)
            }
            Definition::Object(mut o) => {
                o.name = self.rename(ns, o.name);
                o.interfaces = self.rename_all(ns, o.interfaces);
                for field in &mut o.fields {
                    self.rewrite_field(ns, field);
                }
                Definition::Object(o)
            }
            Definition::Interface(mut i) => {
                // Definition name stays; references inside are rewritten.
                i.interfaces = self.rename_all(ns, i.interfaces);
                for field in &mut i.fields {
                    self.rewrite_field(ns, field);
                }
                Definition::Interface(i)
            }
            Definition::Union(mut u) => {
                u.members = self.rename_all(ns, u.members);
                Definition::Union(u)
            }
            Definition::Enum(e) => Definition::Enum(e),
            Definition::InputObject(mut i) => {
                for field in &mut i.fields {
                    self.rewrite_input_value(ns, field);
                }
                Definition::InputObject(i)
            }
            Definition::Scalar(mut s) => {
                s.name = self.rename(ns, s.name);
                Definition::Scalar(s)
            }
            Definition::Directive(mut d) => {
                for argument in &mut d.arguments {
                    self.rewrite_input_value(ns, argument);
                }
                Definition::Directive(d)
            }
        }
    }

    fn rewrite_field(&self, ns: &str, field: &mut FieldDefinition) {
        for argument in &mut field.arguments {
            self.rewrite_input_value(ns, argument);
        }
        self.rewrite_type_ref(ns, &mut field.ty);
    }

    fn rewrite_input_value(&self, ns: &str, value: &mut InputValueDefinition) {
        self.rewrite_type_ref(ns, &mut value.ty);
    }

    fn rewrite_type_ref(&self, ns: &str, ty: &mut TypeRef) {
        match ty {
            TypeRef::Named(name) => {
                let taken = std::mem::take(name);
                *name = self.rename(ns, taken);
            }
            TypeRef::List(inner) | TypeRef::NonNull(inner) => self.rewrite_type_ref(ns, inner),
        }
    }

    fn rename(&self, ns: &str, name: String) -> String {
        if is_built_in_scalar(&name) || self.is_namespaced(&name) {
            name
        } else {
            format!("{ns}{name}")
        }
    }

    fn rename_all(&self, ns: &str, names: Vec<String>) -> Vec<String> {
        names.into_iter().map(|n| self.rename(ns, n)).collect()
    }

    fn is_namespaced(&self, name: &str) -> bool {
        self.matcher.as_ref().is_some_and(|m| m.is_match(name))
    }
}

/// One-shot convenience over [`NamespacePrefixer`].
///
/// # Errors
/// Returns [`RewriteError::Pattern`] if the combined matcher does not
/// compile.
pub fn prefix_document<S: AsRef<str>>(
    document: Document,
    namespace: &str,
    all_namespaces: &[S],
) -> Result<Document, RewriteError> {
    Ok(NamespacePrefixer::new(all_namespaces)?.apply(document, namespace))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_document;
    use pretty_assertions::assert_eq;

    fn rewrite(source: &str, namespace: &str, all: &[&str]) -> String {
        let doc = parse_document(source).unwrap();
        prefix_document(doc, namespace, all).unwrap().to_string()
    }

    #[test]
    fn prefixes_object_definitions_and_references() {
        let out = rewrite("type Bar { id: ID self: Bar }", "B", &["B"]);
        assert_eq!(out, "type BBar {\n  id: ID\n  self: BBar\n}\n");
    }

    #[test]
    fn built_in_scalars_are_never_renamed() {
        let out = rewrite("type Bar { name: String count: Int! }", "B", &["B"]);
        assert_eq!(out, "type BBar {\n  name: String\n  count: Int!\n}\n");
    }

    #[test]
    fn already_namespaced_names_are_left_alone() {
        let out = rewrite("type BBar { id: ID }", "B", &["B"]);
        assert_eq!(out, "type BBar {\n  id: ID\n}\n");
    }

    #[test]
    fn foreign_namespace_prefixes_are_respected() {
        // `ABaz` looks like it belongs to subgraph A, so B leaves it alone
        // even though B does not own it.
        let out = rewrite("type Bar { other: ABaz }", "B", &["A", "B"]);
        assert_eq!(out, "type BBar {\n  other: ABaz\n}\n");
    }

    #[test]
    fn scalar_definitions_are_renamed() {
        let out = rewrite("scalar DateTime", "B", &["B"]);
        assert_eq!(out, "scalar BDateTime\n");
    }

    #[test]
    fn interface_definition_names_are_not_renamed() {
        // References get the prefix while the interface definition keeps its
        // name, which can dangle after composition. Intentional scope gap.
        let out = rewrite(
            "interface Node { id: ID }\n\ntype Bar implements Node { id: ID }",
            "B",
            &["B"],
        );
        assert_eq!(
            out,
            "interface Node {\n  id: ID\n}\n\ntype BBar implements BNode {\n  id: ID\n}\n"
        );
    }

    #[test]
    fn union_members_are_renamed_but_union_is_not() {
        let out = rewrite("union Pet = Dog | Cat", "B", &["B"]);
        assert_eq!(out, "union Pet = BDog | BCat\n");
    }

    #[test]
    fn schema_root_operations_are_renamed() {
        let out = rewrite("schema { query: Query }", "B", &["B"]);
        assert_eq!(out, "schema {\n  query: BQuery\n}\n");
    }

    #[test]
    fn empty_namespace_entries_are_ignored() {
        // A subgraph without a namespace contributes nothing to the matcher.
        let out = rewrite("type Bar { id: ID }", "B", &["", "B"]);
        assert_eq!(out, "type BBar {\n  id: ID\n}\n");
    }
}
