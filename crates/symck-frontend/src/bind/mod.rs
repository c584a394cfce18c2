//! Attribute class binding.
//!
//! Implements the subset of C# name lookup that attribute names need:
//! containing types, then each enclosing namespace from the innermost
//! outward, consulting at every level the types declared there, then the
//! aliases and namespace imports written at that level.

use std::collections::HashMap;

use symck_core::{Diagnostic, DiagnosticCode, MetadataName, TypeSegment};

use crate::collect::names::QualifiedName;
use crate::collect::{
    AttributeSyntax, ROOT_SCOPE, SourceUnit, TypeDeclaration, UsingDirective, UsingKind,
};
use crate::reference::MetadataReference;

const ATTRIBUTE_SUFFIX: &str = "Attribute";

/// A type found by lookup, before it is materialised as a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TypeRef {
    /// Declared by the compilation being bound.
    Own(usize),
    /// Declared by `references[reference]`.
    Referenced { reference: usize, index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Lookup {
    Found(TypeRef),
    Ambiguous(Vec<TypeRef>),
    NotFound,
}

impl Lookup {
    fn from_hits(hits: Vec<TypeRef>) -> Self {
        match hits.len() {
            0 => Self::NotFound,
            1 => Self::Found(hits[0]),
            _ => Self::Ambiguous(hits),
        }
    }

    const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// Where an attribute is written.
pub(crate) struct BindContext<'c> {
    pub unit: &'c SourceUnit,
    pub global_usings: &'c [UsingDirective],
    pub declaration: &'c TypeDeclaration,
    pub path: &'c str,
}

/// Resolves attribute names against one compilation's declarations and its
/// references.
pub(crate) struct Binder<'a> {
    own: &'a HashMap<MetadataName, usize>,
    own_names: &'a [MetadataName],
    references: &'a [MetadataReference],
}

impl<'a> Binder<'a> {
    pub(crate) const fn new(
        own: &'a HashMap<MetadataName, usize>,
        own_names: &'a [MetadataName],
        references: &'a [MetadataReference],
    ) -> Self {
        Self {
            own,
            own_names,
            references,
        }
    }

    /// Bind one attribute's class.
    ///
    /// Returns `None` (plus a diagnostic) when the name is unresolved or
    /// ambiguous; the caller substitutes an error type.
    pub(crate) fn bind_attribute(
        &self,
        ctx: &BindContext<'_>,
        attribute: &AttributeSyntax,
    ) -> (Option<TypeRef>, Vec<Diagnostic>) {
        let mut lookup = AttributeLookup {
            binder: self,
            ctx,
            line: attribute.line,
            diagnostics: Vec::new(),
        };

        let written = &attribute.name;
        let plain = lookup.lookup(written);
        let outcome = if written.verbatim {
            plain
        } else {
            let suffixed = written.map_last(|name| format!("{name}{ATTRIBUTE_SUFFIX}"));
            match (lookup.lookup(&suffixed), plain) {
                (Lookup::Found(with_suffix), Lookup::Found(without)) if with_suffix != without => {
                    lookup.report(
                        DiagnosticCode::AmbiguousAttribute,
                        format!(
                            "'{}' is ambiguous between '{}' and '{}'; use '@{}' or the full name",
                            display_name(written),
                            self.describe(with_suffix),
                            self.describe(without),
                            display_name(written),
                        ),
                    );
                    return (None, lookup.diagnostics);
                }
                (Lookup::Found(found), _) | (_, Lookup::Found(found)) => Lookup::Found(found),
                (Lookup::Ambiguous(hits), _) | (_, Lookup::Ambiguous(hits)) => {
                    Lookup::Ambiguous(hits)
                }
                (Lookup::NotFound, Lookup::NotFound) => Lookup::NotFound,
            }
        };

        let bound = match outcome {
            Lookup::Found(found) => {
                tracing::debug!(
                    attribute = %display_name(written),
                    bound = %self.describe(found),
                    "bound attribute class"
                );
                Some(found)
            }
            Lookup::Ambiguous(hits) => {
                let candidates: Vec<String> = hits.iter().map(|hit| self.describe(*hit)).collect();
                lookup.report(
                    DiagnosticCode::AmbiguousReference,
                    format!(
                        "'{}' is an ambiguous reference between {}",
                        display_name(written),
                        candidates.join(" and ")
                    ),
                );
                None
            }
            Lookup::NotFound => {
                lookup.report(
                    DiagnosticCode::TypeNotFound,
                    format!(
                        "The type or namespace name '{}' could not be found",
                        display_name(written)
                    ),
                );
                None
            }
        };
        (bound, lookup.diagnostics)
    }

    fn describe(&self, found: TypeRef) -> String {
        match found {
            TypeRef::Own(index) => self.own_names[index].to_string(),
            TypeRef::Referenced { reference, index } => {
                let reference = &self.references[reference];
                format!("{} [{}]", reference.declared(index).metadata_name, reference.assembly().name)
            }
        }
    }

    /// Exact lookup of one metadata name. The compilation's own declaration
    /// wins over referenced ones.
    fn find_exact(&self, name: &MetadataName) -> (Lookup, bool) {
        let referenced: Vec<TypeRef> = self
            .references
            .iter()
            .enumerate()
            .filter_map(|(reference, data)| {
                data.index_of(name)
                    .map(|index| TypeRef::Referenced { reference, index })
            })
            .collect();

        match self.own.get(name) {
            Some(&index) => (Lookup::Found(TypeRef::Own(index)), !referenced.is_empty()),
            None => (Lookup::from_hits(referenced), false),
        }
    }
}

struct AttributeLookup<'b, 'c> {
    binder: &'b Binder<'b>,
    ctx: &'c BindContext<'c>,
    line: u32,
    diagnostics: Vec<Diagnostic>,
}

impl AttributeLookup<'_, '_> {
    fn report(&mut self, code: DiagnosticCode, message: String) {
        self.diagnostics
            .push(Diagnostic::new(code, message).at(self.ctx.path, self.line));
    }

    fn lookup(&mut self, name: &QualifiedName) -> Lookup {
        if name.global {
            return self.members_at(&[], &name.segments);
        }

        if name.segments.len() == 1 {
            let found = self.in_containing_types(&name.segments[0]);
            if !found.is_not_found() {
                return found;
            }
        }

        let scopes = &self.ctx.unit.scopes;
        let mut current = Some(self.ctx.declaration.scope);
        while let Some(id) = current {
            let scope = &scopes[id];
            let parent_depth = scope.parent.map_or(0, |p| scopes[p].namespace.len());

            let found = self.members_at(&scope.namespace, &name.segments);
            if !found.is_not_found() {
                return found;
            }

            let found = if id == ROOT_SCOPE {
                let usings: Vec<&UsingDirective> = scope
                    .usings
                    .iter()
                    .chain(self.ctx.global_usings.iter())
                    .collect();
                self.through_usings(&usings, &name.segments)
            } else {
                let usings: Vec<&UsingDirective> = scope.usings.iter().collect();
                self.through_usings(&usings, &name.segments)
            };
            if !found.is_not_found() {
                return found;
            }

            // `namespace A.B` also opens level A with no usings of its own
            for depth in (parent_depth + 1..scope.namespace.len()).rev() {
                let found = self.members_at(&scope.namespace[..depth], &name.segments);
                if !found.is_not_found() {
                    return found;
                }
            }

            current = scope.parent;
        }

        Lookup::NotFound
    }

    /// Types nested in the declaration's containing types, innermost first.
    fn in_containing_types(&mut self, segment: &TypeSegment) -> Lookup {
        let declared = &self.ctx.declaration.metadata_name;
        for depth in (0..declared.containing_types.len()).rev() {
            let container = MetadataName::new(
                declared.namespace.clone(),
                declared.containing_types[..depth].to_vec(),
                declared.containing_types[depth].clone(),
            );
            let found = self.exact(&container.nested(segment.clone()));
            if !found.is_not_found() {
                return found;
            }
        }
        Lookup::NotFound
    }

    /// Resolve `segments` relative to `namespace`. Tries the deepest
    /// namespace reading first (`A.B.X` as namespace `A.B`, type `X`), then
    /// readings where trailing segments are nested types.
    fn members_at(&mut self, namespace: &[String], segments: &[TypeSegment]) -> Lookup {
        let last = segments.len() - 1;
        for split in (0..segments.len()).rev() {
            if segments[..split].iter().any(|s| s.arity != 0) {
                continue;
            }
            let mut full_namespace = namespace.to_vec();
            full_namespace.extend(segments[..split].iter().map(|s| s.name.clone()));
            let candidate = MetadataName::new(
                full_namespace,
                segments[split..last].to_vec(),
                segments[last].clone(),
            );
            let found = self.exact(&candidate);
            if !found.is_not_found() {
                return found;
            }
        }
        Lookup::NotFound
    }

    fn through_usings(&mut self, usings: &[&UsingDirective], segments: &[TypeSegment]) -> Lookup {
        let first = &segments[0];
        if first.arity == 0 {
            let alias_target = usings.iter().find_map(|using| match &using.kind {
                UsingKind::Alias { alias, target } if *alias == first.name => Some(target),
                _ => None,
            });
            if let Some(target) = alias_target {
                let mut expanded = target.segments.clone();
                expanded.extend_from_slice(&segments[1..]);
                return self.members_at(&[], &expanded);
            }
        }

        let mut hits: Vec<TypeRef> = Vec::new();
        for using in usings {
            let UsingKind::Namespace(namespace) = &using.kind else {
                continue;
            };
            let last = segments.len() - 1;
            let candidate = MetadataName::new(
                namespace.clone(),
                segments[..last].to_vec(),
                segments[last].clone(),
            );
            match self.exact(&candidate) {
                Lookup::Found(found) => push_unique(&mut hits, found),
                Lookup::Ambiguous(found) => {
                    for hit in found {
                        push_unique(&mut hits, hit);
                    }
                }
                Lookup::NotFound => {}
            }
        }
        Lookup::from_hits(hits)
    }

    fn exact(&mut self, name: &MetadataName) -> Lookup {
        let (found, shadows_reference) = self.binder.find_exact(name);
        if shadows_reference {
            self.report(
                DiagnosticCode::SourceShadowsReference,
                format!("The type '{name}' in this compilation conflicts with an imported type; using the one declared here"),
            );
        }
        found
    }
}

fn push_unique(hits: &mut Vec<TypeRef>, hit: TypeRef) {
    if !hits.contains(&hit) {
        hits.push(hit);
    }
}

fn display_name(name: &QualifiedName) -> String {
    name.segments
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests;
