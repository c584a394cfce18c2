use ast_grep_core::{Doc, Node};
use symck_core::TypeKind;

use super::names::QualifiedName;
use super::{UsingDirective, UsingKind};

pub(super) fn type_kind<D: Doc>(node: &Node<D>) -> Option<TypeKind> {
    let kind = match node.kind().as_ref() {
        "class_declaration" => TypeKind::Class,
        "struct_declaration" => TypeKind::Struct,
        "interface_declaration" => TypeKind::Interface,
        "enum_declaration" => TypeKind::Enum,
        "delegate_declaration" => TypeKind::Delegate,
        "record_struct_declaration" => TypeKind::RecordStruct,
        "record_declaration" => {
            if node.children().any(|child| child.kind().as_ref() == "struct") {
                TypeKind::RecordStruct
            } else {
                TypeKind::Record
            }
        }
        _ => return None,
    };
    Some(kind)
}

pub(super) fn extract_modifiers<D: Doc>(node: &Node<D>) -> Vec<String> {
    node.children()
        .filter(|child| child.kind().as_ref() == "modifier")
        .map(|child| child.text().trim().to_string())
        .collect()
}

pub(super) fn generic_arity<D: Doc>(node: &Node<D>) -> usize {
    node.field("type_parameters")
        .or_else(|| {
            node.children()
                .find(|child| child.kind().as_ref() == "type_parameter_list")
        })
        .map_or(0, |list| {
            list.children()
                .filter(|child| child.kind().as_ref() == "type_parameter")
                .count()
        })
}

pub(super) fn line_of<D: Doc>(node: &Node<D>) -> u32 {
    node.start_pos().line() as u32 + 1
}

/// Parse a using directive from its text.
///
/// Handles `global using`, `using static` and `using Alias = Target;`.
pub(super) fn parse_using<D: Doc>(node: &Node<D>) -> Option<UsingDirective> {
    let text = node.text();
    let mut rest = text.trim().trim_end_matches(';').trim();

    let global = match rest.strip_prefix("global") {
        Some(after) if after.starts_with(char::is_whitespace) => {
            rest = after.trim_start();
            true
        }
        _ => false,
    };

    rest = rest.strip_prefix("using")?.trim_start();

    let kind = if let Some(target) = rest.strip_prefix("static ") {
        UsingKind::Static(QualifiedName::parse(target)?)
    } else if let Some((alias, target)) = rest.split_once('=') {
        let alias = alias.trim().trim_start_matches("unsafe ").trim();
        UsingKind::Alias {
            alias: alias.trim_start_matches('@').to_string(),
            target: QualifiedName::parse(target)?,
        }
    } else {
        UsingKind::Namespace(QualifiedName::parse(rest)?.namespace_parts())
    };

    Some(UsingDirective {
        global,
        kind,
        line: line_of(node),
    })
}
