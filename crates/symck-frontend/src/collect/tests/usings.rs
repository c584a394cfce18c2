use pretty_assertions::assert_eq;

use super::*;

fn root_usings(source: &str) -> Vec<UsingKind> {
    collect_source(source).scopes[ROOT_SCOPE]
        .usings
        .iter()
        .map(|u| u.kind.clone())
        .collect()
}

#[test]
fn namespace_imports_are_split_into_parts() {
    assert_eq!(
        root_usings("using System.Collections.Generic; class C { }"),
        vec![UsingKind::Namespace(vec![
            "System".to_string(),
            "Collections".to_string(),
            "Generic".to_string()
        ])]
    );
}

#[test]
fn aliases_keep_their_target() {
    let usings = root_usings("using Attr = RoslynBug.FromAnotherAssemblyAttribute; class C { }");
    let UsingKind::Alias { alias, target } = &usings[0] else {
        panic!("expected alias, got {usings:?}");
    };
    assert_eq!(alias, "Attr");
    assert_eq!(
        target.namespace_parts(),
        vec!["RoslynBug", "FromAnotherAssemblyAttribute"]
    );
}

#[test]
fn static_usings_are_distinguished() {
    let usings = root_usings("using static System.Math; class C { }");
    assert!(matches!(usings[0], UsingKind::Static(_)));
}

#[test]
fn global_usings_are_collected_separately() {
    let unit = collect_source("global using System; class C { }");
    assert!(unit.scopes[ROOT_SCOPE].usings.is_empty());
    assert_eq!(unit.global_usings.len(), 1);
    assert!(unit.global_usings[0].global);
}

#[test]
fn usings_inside_namespace_belong_to_its_scope() {
    let unit = collect_source(
        "namespace Project { using RoslynBug; using System; class SimpleClass { } }",
    );
    let simple = find_type(&unit, "Project.SimpleClass");
    let scope = &unit.scopes[simple.scope];
    assert_eq!(scope.namespace, vec!["Project".to_string()]);
    assert_eq!(scope.usings.len(), 2);
    assert_eq!(scope.parent, Some(ROOT_SCOPE));
}
