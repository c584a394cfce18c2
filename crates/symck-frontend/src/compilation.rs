//! Compilations: syntax trees plus references, bound into a queryable model.

use std::collections::HashMap;
use std::sync::Arc;

use symck_core::{
    AssemblyIdentity, AttributeInstance, ContextId, Diagnostic, DiagnosticCode, MetadataName,
    NamedTypeHandle, ResolveError, SemanticModel, TypeKey, TypeKind,
};

use crate::bind::{BindContext, Binder, TypeRef};
use crate::collect::UsingDirective;
use crate::reference::MetadataReference;
use crate::syntax::SyntaxTree;

/// Slot used for error types; they have no declaration to point at.
const ERROR_SLOT: u32 = u32::MAX;

/// A bound type declaration.
#[derive(Debug, Clone)]
pub(crate) struct DeclaredType {
    pub metadata_name: MetadataName,
    pub kind: TypeKind,
    pub attributes: Vec<AttributeInstance>,
}

/// The bound contents of one assembly.
#[derive(Debug)]
pub(crate) struct AssemblyData {
    pub assembly: AssemblyIdentity,
    pub context: ContextId,
    pub types: Vec<DeclaredType>,
    pub index: HashMap<MetadataName, usize>,
}

impl AssemblyData {
    fn lookup(&self, name: &MetadataName) -> Option<(usize, &DeclaredType)> {
        self.index.get(name).map(|&index| (index, &self.types[index]))
    }
}

/// An immutable, fully bound compilation.
///
/// Every compilation owns a fresh [`ContextId`]. Handles it hands out for
/// its own types, and the attribute classes it binds (including classes
/// from references), carry that context. `resolve_type` on a referenced
/// type instead returns the handle from the reference's own context, so
/// the two are equal by key but distinct instances.
#[derive(Debug, Clone)]
pub struct Compilation {
    data: Arc<AssemblyData>,
    syntax_trees: Vec<SyntaxTree>,
    references: Vec<MetadataReference>,
    diagnostics: Vec<Diagnostic>,
}

impl Compilation {
    /// Declare and bind `syntax_trees` as assembly `assembly`.
    ///
    /// Binding problems never fail creation; they are reported through
    /// [`Compilation::diagnostics`] and unresolved attribute classes become
    /// error types.
    #[must_use]
    pub fn create(
        assembly: AssemblyIdentity,
        syntax_trees: Vec<SyntaxTree>,
        references: Vec<MetadataReference>,
    ) -> Self {
        let context = ContextId::next();
        let references = dedupe_references(references);
        let mut diagnostics: Vec<Diagnostic> = syntax_trees
            .iter()
            .flat_map(|tree| {
                tree.syntax_error_lines().iter().map(|line| {
                    Diagnostic::new(DiagnosticCode::SyntaxError, "Invalid syntax")
                        .at(tree.path(), *line)
                })
            })
            .collect();

        let declarations = declare(&syntax_trees, &mut diagnostics);
        let names: Vec<MetadataName> = declarations
            .parts
            .iter()
            .map(|parts| declarations.first(&syntax_trees, parts).metadata_name.clone())
            .collect();

        let global_usings: Vec<UsingDirective> = syntax_trees
            .iter()
            .flat_map(|tree| tree.unit().global_usings.iter().cloned())
            .collect();

        let materializer = Materializer {
            assembly: &assembly,
            context,
            own_names: &names,
            own_kinds: &declarations.kinds,
            references: &references,
        };
        let binder = Binder::new(&declarations.index, &names, &references);

        let mut types = Vec::with_capacity(declarations.parts.len());
        for parts in &declarations.parts {
            let first = declarations.first(&syntax_trees, parts);
            let mut attributes = Vec::new();
            for &(tree_index, decl_index) in parts {
                let tree = &syntax_trees[tree_index];
                let declaration = &tree.unit().types[decl_index];
                let ctx = BindContext {
                    unit: tree.unit(),
                    global_usings: &global_usings,
                    declaration,
                    path: tree.path(),
                };
                for attribute in &declaration.attributes {
                    let (bound, found) = binder.bind_attribute(&ctx, attribute);
                    diagnostics.extend(found);
                    let attribute_class = bound.map_or_else(
                        || {
                            NamedTypeHandle::error(
                                attribute.name.to_metadata_name(),
                                context,
                                ERROR_SLOT,
                            )
                        },
                        |found| materializer.handle(found),
                    );
                    attributes.push(AttributeInstance {
                        attribute_class,
                        constructor_arguments: attribute.arguments.clone(),
                        named_arguments: attribute.named_arguments.clone(),
                        line: attribute.line,
                    });
                }
            }
            types.push(DeclaredType {
                metadata_name: first.metadata_name.clone(),
                kind: first.kind,
                attributes,
            });
        }

        for diagnostic in &diagnostics {
            tracing::warn!(%diagnostic, "compilation diagnostic");
        }
        tracing::debug!(
            assembly = %assembly,
            %context,
            types = types.len(),
            references = references.len(),
            diagnostics = diagnostics.len(),
            "compilation created"
        );

        Self {
            data: Arc::new(AssemblyData {
                assembly,
                context,
                types,
                index: declarations.index,
            }),
            syntax_trees,
            references,
            diagnostics,
        }
    }

    /// A new compilation with `trees` appended. Gets a new context.
    #[must_use]
    pub fn with_syntax_trees(&self, trees: impl IntoIterator<Item = SyntaxTree>) -> Self {
        let mut syntax_trees = self.syntax_trees.clone();
        syntax_trees.extend(trees);
        Self::create(self.data.assembly.clone(), syntax_trees, self.references.clone())
    }

    /// A new compilation with `references` appended. Gets a new context.
    #[must_use]
    pub fn with_references(
        &self,
        references: impl IntoIterator<Item = MetadataReference>,
    ) -> Self {
        let mut all = self.references.clone();
        all.extend(references);
        Self::create(self.data.assembly.clone(), self.syntax_trees.clone(), all)
    }

    /// Emit this compilation as a reference for other compilations.
    #[must_use]
    pub fn to_metadata_reference(&self) -> MetadataReference {
        MetadataReference::from_data(Arc::clone(&self.data))
    }

    #[must_use]
    pub fn context(&self) -> ContextId {
        self.data.context
    }

    #[must_use]
    pub fn syntax_trees(&self) -> &[SyntaxTree] {
        &self.syntax_trees
    }

    #[must_use]
    pub fn references(&self) -> &[MetadataReference] {
        &self.references
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Handles for every type the compilation declares, in declaration order.
    #[must_use]
    pub fn declared_types(&self) -> Vec<NamedTypeHandle> {
        self.data
            .types
            .iter()
            .enumerate()
            .map(|(index, declared)| {
                NamedTypeHandle::new(
                    TypeKey::new(self.data.assembly.clone(), declared.metadata_name.clone()),
                    declared.kind,
                    self.data.context,
                    slot(index),
                )
            })
            .collect()
    }
}

impl SemanticModel for Compilation {
    fn assembly(&self) -> &AssemblyIdentity {
        &self.data.assembly
    }

    fn resolve_type(&self, metadata_name: &str) -> Result<NamedTypeHandle, ResolveError> {
        let name = MetadataName::parse(metadata_name)?;

        if let Some((index, declared)) = self.data.lookup(&name) {
            tracing::debug!(%name, "resolved type in compilation");
            return Ok(handle_in(&self.data, index, declared));
        }

        let mut found: Vec<(&MetadataReference, usize)> = self
            .references
            .iter()
            .filter_map(|reference| reference.index_of(&name).map(|index| (reference, index)))
            .collect();

        match found.len() {
            0 => {
                tracing::debug!(%name, "type not found");
                Err(ResolveError::not_found(metadata_name))
            }
            1 => {
                let (reference, index) = found.remove(0);
                tracing::debug!(%name, assembly = %reference.assembly(), "resolved type in reference");
                Ok(handle_in(reference.data(), index, reference.declared(index)))
            }
            _ => Err(ResolveError::Ambiguous {
                name: metadata_name.to_string(),
                assemblies: found
                    .iter()
                    .map(|(reference, _)| reference.assembly().name.clone())
                    .collect(),
            }),
        }
    }

    fn attributes_of(&self, ty: &NamedTypeHandle) -> Vec<AttributeInstance> {
        let data = if ty.assembly() == &self.data.assembly {
            Some(self.data.as_ref())
        } else {
            self.references
                .iter()
                .find(|reference| reference.assembly() == ty.assembly())
                .map(MetadataReference::data)
        };

        data.and_then(|data| data.lookup(ty.metadata_name()))
            .map(|(_, declared)| declared.attributes.clone())
            .unwrap_or_default()
    }
}

fn handle_in(data: &AssemblyData, index: usize, declared: &DeclaredType) -> NamedTypeHandle {
    NamedTypeHandle::new(
        TypeKey::new(data.assembly.clone(), declared.metadata_name.clone()),
        declared.kind,
        data.context,
        slot(index),
    )
}

fn slot(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(ERROR_SLOT - 1)
}

/// Keep the first reference per assembly identity.
fn dedupe_references(references: Vec<MetadataReference>) -> Vec<MetadataReference> {
    let mut unique: Vec<MetadataReference> = Vec::with_capacity(references.len());
    for reference in references {
        if unique.iter().any(|seen| seen.assembly() == reference.assembly()) {
            tracing::debug!(assembly = %reference.assembly(), "dropping duplicate reference");
            continue;
        }
        unique.push(reference);
    }
    unique
}

/// Type declarations grouped by metadata name.
struct Declarations {
    index: HashMap<MetadataName, usize>,
    /// `(tree, declaration)` pairs per type; several for partial types.
    parts: Vec<Vec<(usize, usize)>>,
    kinds: Vec<TypeKind>,
}

impl Declarations {
    fn first<'t>(
        &self,
        trees: &'t [SyntaxTree],
        parts: &[(usize, usize)],
    ) -> &'t crate::collect::TypeDeclaration {
        let (tree, decl) = parts[0];
        &trees[tree].unit().types[decl]
    }
}

fn declare(trees: &[SyntaxTree], diagnostics: &mut Vec<Diagnostic>) -> Declarations {
    let mut declarations = Declarations {
        index: HashMap::new(),
        parts: Vec::new(),
        kinds: Vec::new(),
    };

    for (tree_index, tree) in trees.iter().enumerate() {
        for (decl_index, declaration) in tree.unit().types.iter().enumerate() {
            match declarations.index.get(&declaration.metadata_name) {
                Some(&existing) => {
                    let first = declarations.first(trees, &declarations.parts[existing]);
                    if first.is_partial && declaration.is_partial {
                        declarations.parts[existing].push((tree_index, decl_index));
                    } else {
                        diagnostics.push(
                            Diagnostic::new(
                                DiagnosticCode::DuplicateType,
                                format!(
                                    "The namespace already contains a definition for '{}'",
                                    declaration.metadata_name
                                ),
                            )
                            .at(tree.path(), declaration.line),
                        );
                    }
                }
                None => {
                    declarations
                        .index
                        .insert(declaration.metadata_name.clone(), declarations.parts.len());
                    declarations.parts.push(vec![(tree_index, decl_index)]);
                    declarations.kinds.push(declaration.kind);
                }
            }
        }
    }
    declarations
}

/// Turns lookup results into handles in the binding compilation's context.
struct Materializer<'a> {
    assembly: &'a AssemblyIdentity,
    context: ContextId,
    own_names: &'a [MetadataName],
    own_kinds: &'a [TypeKind],
    references: &'a [MetadataReference],
}

impl Materializer<'_> {
    fn handle(&self, found: TypeRef) -> NamedTypeHandle {
        match found {
            TypeRef::Own(index) => NamedTypeHandle::new(
                TypeKey::new(self.assembly.clone(), self.own_names[index].clone()),
                self.own_kinds[index],
                self.context,
                slot(index),
            ),
            TypeRef::Referenced { reference, index } => {
                let preceding: usize = self.references[..reference]
                    .iter()
                    .map(MetadataReference::type_count)
                    .sum();
                let data = &self.references[reference];
                let declared = data.declared(index);
                NamedTypeHandle::new(
                    TypeKey::new(data.assembly().clone(), declared.metadata_name.clone()),
                    declared.kind,
                    self.context,
                    slot(self.own_names.len() + preceding + index),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn compile(source: &str) -> Compilation {
        Compilation::create(
            AssemblyIdentity::named("Test"),
            vec![SyntaxTree::parse(source)],
            vec![MetadataReference::core_library()],
        )
    }

    #[test]
    fn resolves_own_type_in_own_context() {
        let compilation = compile("namespace P { class A { } }");
        let handle = compilation.resolve_type("P.A").expect("resolve");
        assert_eq!(handle.origin(), compilation.context());
        assert_eq!(handle.assembly().name, "Test");
        assert_eq!(handle.kind(), TypeKind::Class);
    }

    #[test]
    fn resolves_referenced_type_in_reference_context() {
        let compilation = compile("class A { }");
        let handle = compilation.resolve_type("System.Attribute").expect("resolve");
        assert_eq!(handle.origin(), MetadataReference::core_library().context());
        assert_ne!(handle.origin(), compilation.context());
    }

    #[test]
    fn unknown_name_is_not_found() {
        let compilation = compile("class A { }");
        assert_eq!(
            compilation.resolve_type("P.Missing"),
            Err(ResolveError::not_found("P.Missing"))
        );
    }

    #[test]
    fn malformed_name_is_invalid() {
        let compilation = compile("class A { }");
        assert!(matches!(
            compilation.resolve_type("P..A"),
            Err(ResolveError::InvalidName { .. })
        ));
    }

    #[test]
    fn partial_declarations_merge_attributes_in_order() {
        let compilation = Compilation::create(
            AssemblyIdentity::named("Test"),
            vec![
                SyntaxTree::parse("using System; [Serializable] partial class Split { }"),
                SyntaxTree::parse("using System; [Obsolete] partial class Split { }"),
            ],
            vec![MetadataReference::core_library()],
        );
        let split = compilation.resolve_type("Split").expect("resolve");
        let names: Vec<String> = compilation
            .attributes_of(&split)
            .iter()
            .map(|a| a.attribute_class.qualified_name())
            .collect();
        assert_eq!(
            names,
            vec![
                "System.SerializableAttribute".to_string(),
                "System.ObsoleteAttribute".to_string()
            ]
        );
        assert!(compilation.diagnostics().is_empty());
    }

    #[test]
    fn non_partial_duplicates_are_reported() {
        let compilation = compile("class Twice { } class Twice { }");
        assert_eq!(compilation.diagnostics().len(), 1);
        assert_eq!(compilation.diagnostics()[0].code, DiagnosticCode::DuplicateType);
    }

    #[test]
    fn derived_compilations_get_new_contexts() {
        let base = compile("namespace P { class A { } }");
        let extended = base.with_syntax_trees([SyntaxTree::parse("namespace P { class B { } }")]);
        assert_ne!(base.context(), extended.context());
        assert!(extended.resolve_type("P.B").is_ok());
        assert!(base.resolve_type("P.B").is_err());

        let a_base = base.resolve_type("P.A").expect("resolve");
        let a_extended = extended.resolve_type("P.A").expect("resolve");
        assert_eq!(a_base, a_extended);
        assert!(!a_base.is_same_instance(&a_extended));
    }

    #[test]
    fn duplicate_references_are_collapsed() {
        let compilation = Compilation::create(
            AssemblyIdentity::named("Test"),
            vec![SyntaxTree::parse("class A { }")],
            vec![
                MetadataReference::core_library(),
                MetadataReference::core_library(),
            ],
        );
        assert_eq!(compilation.references().len(), 1);
        assert!(compilation.resolve_type("System.Attribute").is_ok());
    }

    #[test]
    fn declared_types_lists_own_types() {
        let compilation = compile("namespace P { class A { } struct B { } }");
        let names: Vec<String> = compilation
            .declared_types()
            .iter()
            .map(NamedTypeHandle::qualified_name)
            .collect();
        assert_eq!(names, vec!["P.A".to_string(), "P.B".to_string()]);
    }
}
