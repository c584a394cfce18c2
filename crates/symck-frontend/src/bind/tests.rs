use pretty_assertions::assert_eq;
use rstest::rstest;

use super::*;
use crate::syntax::SyntaxTree;
use symck_core::AssemblyIdentity;

const ATTRIBUTE_LIB: &str = r"
namespace RoslynBug
{
    public sealed class FromAnotherAssemblyAttribute : System.Attribute
    {
        public FromAnotherAssemblyAttribute(int value) { }
    }
}";

fn lib() -> MetadataReference {
    MetadataReference::from_source(
        AssemblyIdentity::named("RoslynBug"),
        ATTRIBUTE_LIB,
        vec![MetadataReference::core_library()],
    )
}

/// What binding each attribute of `target` produced: the bound metadata
/// name (or `None`) and the diagnostic codes raised.
fn bind_all(
    source: &str,
    target: &str,
    references: &[MetadataReference],
) -> Vec<(Option<String>, Vec<DiagnosticCode>)> {
    let tree = SyntaxTree::parse(source);
    let unit = tree.unit();
    let own_names: Vec<MetadataName> = unit
        .types
        .iter()
        .map(|t| t.metadata_name.clone())
        .collect();
    let own: HashMap<MetadataName, usize> = own_names
        .iter()
        .enumerate()
        .map(|(index, name)| (name.clone(), index))
        .collect();
    let binder = Binder::new(&own, &own_names, references);

    let declaration = unit
        .types
        .iter()
        .find(|t| t.metadata_name.to_string() == target)
        .unwrap_or_else(|| panic!("no type '{target}'"));
    let ctx = BindContext {
        unit,
        global_usings: &unit.global_usings,
        declaration,
        path: tree.path(),
    };

    declaration
        .attributes
        .iter()
        .map(|attribute| {
            let (bound, diagnostics) = binder.bind_attribute(&ctx, attribute);
            let name = bound.map(|found| match found {
                TypeRef::Own(index) => own_names[index].to_string(),
                TypeRef::Referenced { reference, index } => {
                    references[reference].declared(index).metadata_name.to_string()
                }
            });
            (name, diagnostics.iter().map(|d| d.code).collect())
        })
        .collect()
}

fn bound_names(source: &str, target: &str, references: &[MetadataReference]) -> Vec<String> {
    bind_all(source, target, references)
        .into_iter()
        .map(|(name, codes)| {
            assert!(codes.is_empty(), "unexpected diagnostics {codes:?}");
            name.unwrap_or_else(|| "<unbound>".to_string())
        })
        .collect()
}

#[test]
fn binds_current_and_referenced_attributes() {
    let source = r"
using System;
using RoslynBug;

namespace Project
{
    public sealed class FromCurrentAssemblyAttribute : Attribute
    {
        public FromCurrentAssemblyAttribute(int value) { }
    }

    [FromAnotherAssembly(10)]
    [FromCurrentAssembly(10)]
    public class SimpleClass { }
}";
    let names = bound_names(
        source,
        "Project.SimpleClass",
        &[MetadataReference::core_library(), lib()],
    );
    assert_eq!(
        names,
        vec![
            "RoslynBug.FromAnotherAssemblyAttribute".to_string(),
            "Project.FromCurrentAssemblyAttribute".to_string(),
        ]
    );
}

#[rstest]
#[case::short_name("[Obsolete] class C { }")]
#[case::full_suffix("[ObsoleteAttribute] class C { }")]
#[case::qualified("[System.Obsolete] class C { }")]
#[case::global_qualified("[global::System.Obsolete] class C { }")]
#[case::verbatim_full_name("[@ObsoleteAttribute] class C { }")]
fn spellings_of_one_attribute_bind_alike(#[case] body: &str) {
    let source = format!("using System;\n{body}");
    let names = bound_names(&source, "C", &[MetadataReference::core_library()]);
    assert_eq!(names, vec!["System.ObsoleteAttribute".to_string()]);
}

#[test]
fn verbatim_name_skips_suffix() {
    let results = bind_all(
        "using System;\n[@Obsolete] class C { }",
        "C",
        &[MetadataReference::core_library()],
    );
    assert_eq!(results, vec![(None, vec![DiagnosticCode::TypeNotFound])]);
}

#[test]
fn missing_attribute_reports_type_not_found() {
    let results = bind_all("[Nowhere] class C { }", "C", &[]);
    assert_eq!(results, vec![(None, vec![DiagnosticCode::TypeNotFound])]);
}

#[test]
fn suffixed_and_plain_types_conflict() {
    let source = r"
class Marker : System.Attribute { }
class MarkerAttribute : System.Attribute { }
[Marker] class C { }";
    let results = bind_all(source, "C", &[MetadataReference::core_library()]);
    assert_eq!(results, vec![(None, vec![DiagnosticCode::AmbiguousAttribute])]);
}

#[test]
fn two_imports_with_the_same_type_are_ambiguous() {
    let source = r"
using Left;
using Right;
namespace Left { class TagAttribute : System.Attribute { } }
namespace Right { class TagAttribute : System.Attribute { } }
[Tag] class C { }";
    let results = bind_all(source, "C", &[MetadataReference::core_library()]);
    assert_eq!(results, vec![(None, vec![DiagnosticCode::AmbiguousReference])]);
}

#[test]
fn alias_selects_between_conflicting_imports() {
    let source = r"
using Left;
using Tag = Right.TagAttribute;
namespace Left { class OtherAttribute : System.Attribute { } }
namespace Right { class TagAttribute : System.Attribute { } }
[Tag] class C { }";
    let names = bound_names(source, "C", &[MetadataReference::core_library()]);
    assert_eq!(names, vec!["Right.TagAttribute".to_string()]);
}

#[test]
fn enclosing_namespace_wins_over_imports() {
    let source = r"
using Other;
namespace Other { class TagAttribute : System.Attribute { } }
namespace Outer.Inner
{
    [Tag] class C { }
}
namespace Outer { class TagAttribute : System.Attribute { } }";
    let names = bound_names(source, "Outer.Inner.C", &[MetadataReference::core_library()]);
    assert_eq!(names, vec!["Outer.TagAttribute".to_string()]);
}

#[test]
fn containing_type_members_are_visible() {
    let source = r"
class Outer
{
    class LocalAttribute : System.Attribute { }
    [Local] class Inner { }
}";
    let names = bound_names(source, "Outer+Inner", &[MetadataReference::core_library()]);
    assert_eq!(names, vec!["Outer+LocalAttribute".to_string()]);
}

#[test]
fn global_usings_apply_from_the_compilation_root() {
    let source = "global using System;\n[Serializable] class C { }";
    let names = bound_names(source, "C", &[MetadataReference::core_library()]);
    assert_eq!(names, vec!["System.SerializableAttribute".to_string()]);
}

#[test]
fn usings_inside_a_namespace_only_apply_there() {
    let source = r"
namespace A
{
    using System;
    [Serializable] class Inside { }
}
namespace B
{
    [Serializable] class Outside { }
}";
    let references = [MetadataReference::core_library()];
    assert_eq!(
        bound_names(source, "A.Inside", &references),
        vec!["System.SerializableAttribute".to_string()]
    );
    assert_eq!(
        bind_all(source, "B.Outside", &references),
        vec![(None, vec![DiagnosticCode::TypeNotFound])]
    );
}

#[test]
fn source_type_shadows_referenced_one_with_warning() {
    let source = r"
namespace RoslynBug { class FromAnotherAssemblyAttribute : System.Attribute { } }
[RoslynBug.FromAnotherAssembly(1)] class C { }";
    let results = bind_all(source, "C", &[MetadataReference::core_library(), lib()]);
    assert_eq!(
        results,
        vec![(
            Some("RoslynBug.FromAnotherAssemblyAttribute".to_string()),
            vec![DiagnosticCode::SourceShadowsReference]
        )]
    );
}

#[test]
fn static_usings_do_not_import_types() {
    let results = bind_all(
        "using static System.String;\n[Serializable] class C { }",
        "C",
        &[MetadataReference::core_library()],
    );
    assert_eq!(results, vec![(None, vec![DiagnosticCode::TypeNotFound])]);
}
