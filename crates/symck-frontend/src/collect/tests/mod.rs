use super::*;
use crate::parser::parse_source;

mod usings;

fn collect_source(source: &str) -> SourceUnit {
    let root = parse_source(source);
    collect(&root.root())
}

fn find_type<'a>(unit: &'a SourceUnit, name: &str) -> &'a TypeDeclaration {
    unit.types
        .iter()
        .find(|t| t.metadata_name.to_string() == name)
        .unwrap_or_else(|| panic!("should find type named '{name}'"))
}

/// The single attribute's first constructor argument on `class C`.
fn first_argument(argument_source: &str) -> TypedConstant {
    let source = format!("[Marker({argument_source})] class C {{ }}");
    let unit = collect_source(&source);
    let attribute = &find_type(&unit, "C").attributes[0];
    attribute
        .arguments
        .first()
        .cloned()
        .unwrap_or_else(|| panic!("no argument collected for '{argument_source}'"))
}
