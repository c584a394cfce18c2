//! Declaration collection: one walk over a C# syntax tree producing the
//! scopes, using directives, type declarations and attribute syntax that
//! binding needs.

mod attributes;
mod constants;
mod helpers;
pub mod names;

use ast_grep_core::{Doc, Node};
use symck_core::{MetadataName, NamedArgument, TypeKind, TypeSegment, TypedConstant};

use names::QualifiedName;

/// Index of the compilation-unit scope in [`SourceUnit::scopes`].
pub const ROOT_SCOPE: usize = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsingKind {
    /// `using A.B;`
    Namespace(Vec<String>),
    /// `using X = A.B.C;`
    Alias { alias: String, target: QualifiedName },
    /// `using static A.B.C;` (brings members, not types, into scope)
    Static(QualifiedName),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsingDirective {
    pub global: bool,
    pub kind: UsingKind,
    pub line: u32,
}

/// A namespace body (or the compilation unit) and the usings written in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub namespace: Vec<String>,
    pub usings: Vec<UsingDirective>,
    pub parent: Option<usize>,
}

/// An attribute application before binding.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSyntax {
    pub name: QualifiedName,
    pub arguments: Vec<TypedConstant>,
    pub named_arguments: Vec<NamedArgument>,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDeclaration {
    pub metadata_name: MetadataName,
    pub kind: TypeKind,
    /// Innermost enclosing namespace scope.
    pub scope: usize,
    pub is_partial: bool,
    pub attributes: Vec<AttributeSyntax>,
    pub line: u32,
}

/// Everything one syntax tree declares.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceUnit {
    pub scopes: Vec<Scope>,
    pub types: Vec<TypeDeclaration>,
    /// `global using` directives; they apply to every tree in a compilation.
    pub global_usings: Vec<UsingDirective>,
}

impl Default for SourceUnit {
    fn default() -> Self {
        Self {
            scopes: vec![Scope {
                namespace: Vec::new(),
                usings: Vec::new(),
                parent: None,
            }],
            types: Vec::new(),
            global_usings: Vec::new(),
        }
    }
}

impl SourceUnit {
    fn push_scope(&mut self, parent: usize, name: &str) -> usize {
        let mut namespace = self.scopes[parent].namespace.clone();
        if let Some(parsed) = QualifiedName::parse(name) {
            namespace.extend(parsed.namespace_parts());
        }
        self.scopes.push(Scope {
            namespace,
            usings: Vec::new(),
            parent: Some(parent),
        });
        self.scopes.len() - 1
    }
}

/// Collect declarations from the root of a parsed C# tree.
pub fn collect<D: Doc>(root: &Node<D>) -> SourceUnit {
    let mut unit = SourceUnit::default();
    walk(root, ROOT_SCOPE, None, &mut unit);
    unit
}

fn walk<D: Doc>(
    node: &Node<D>,
    scope: usize,
    containing: Option<&MetadataName>,
    unit: &mut SourceUnit,
) {
    let mut current = scope;
    for child in node.children() {
        match child.kind().as_ref() {
            "using_directive" => {
                if let Some(using) = helpers::parse_using(&child) {
                    if using.global {
                        unit.global_usings.push(using);
                    } else {
                        unit.scopes[current].usings.push(using);
                    }
                }
            }
            "namespace_declaration" => {
                let Some(name) = child.field("name") else {
                    continue;
                };
                let inner = unit.push_scope(current, &name.text());
                walk(&child, inner, None, unit);
            }
            "file_scoped_namespace_declaration" => {
                let Some(name) = child.field("name") else {
                    continue;
                };
                // applies to every following sibling as well as its own children
                current = unit.push_scope(current, &name.text());
                walk(&child, current, None, unit);
            }
            "declaration_list" | "ERROR" => walk(&child, current, containing, unit),
            _ => {
                if let Some(kind) = helpers::type_kind(&child) {
                    collect_type(&child, kind, current, containing, unit);
                }
            }
        }
    }
}

fn collect_type<D: Doc>(
    node: &Node<D>,
    kind: TypeKind,
    scope: usize,
    containing: Option<&MetadataName>,
    unit: &mut SourceUnit,
) {
    let Some(name) = node.field("name").map(|n| n.text().trim().to_string()) else {
        return;
    };
    let segment = TypeSegment::new(name.trim_start_matches('@'), helpers::generic_arity(node));
    let metadata_name = match containing {
        Some(outer) => outer.nested(segment),
        None => MetadataName::new(unit.scopes[scope].namespace.clone(), Vec::new(), segment),
    };

    let modifiers = helpers::extract_modifiers(node);
    unit.types.push(TypeDeclaration {
        metadata_name: metadata_name.clone(),
        kind,
        scope,
        is_partial: modifiers.iter().any(|m| m == "partial"),
        attributes: attributes::collect_attributes(node),
        line: helpers::line_of(node),
    });

    let body = node.field("body").or_else(|| {
        node.children()
            .find(|child| child.kind().as_ref() == "declaration_list")
    });
    if let Some(body) = body {
        walk(&body, scope, Some(&metadata_name), unit);
    }
}

#[cfg(test)]
mod tests;
