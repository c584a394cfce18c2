use ast_grep_core::{Doc, Node};
use symck_core::{NamedArgument, TypedConstant};

use super::constants;
use super::names::QualifiedName;
use super::AttributeSyntax;

enum ArgumentSyntax {
    Positional(TypedConstant),
    Named(String, TypedConstant),
}

/// Attributes applied to a declaration, in source order.
///
/// Lists with an explicit target other than `type` (`[return: X]`) do not
/// apply to the declaration and are skipped.
pub(super) fn collect_attributes<D: Doc>(node: &Node<D>) -> Vec<AttributeSyntax> {
    node.children()
        .filter(|child| child.kind().as_ref() == "attribute_list")
        .flat_map(|list| attributes_in_list(&list))
        .collect()
}

fn attributes_in_list<D: Doc>(list: &Node<D>) -> Vec<AttributeSyntax> {
    let target = list
        .children()
        .find(|child| child.kind().as_ref() == "attribute_target_specifier")
        .map(|spec| spec.text().trim().trim_end_matches(':').trim().to_string());
    if target.as_deref().is_some_and(|t| t != "type") {
        return Vec::new();
    }

    list.children()
        .filter(|child| child.kind().as_ref() == "attribute")
        .filter_map(|attribute| parse_attribute(&attribute))
        .collect()
}

fn parse_attribute<D: Doc>(attribute: &Node<D>) -> Option<AttributeSyntax> {
    let name_node = attribute
        .field("name")
        .or_else(|| attribute.children().find(|child| child.is_named()))?;
    let name = QualifiedName::parse(&name_node.text())?;

    let mut arguments = Vec::new();
    let mut named_arguments = Vec::new();
    if let Some(list) = attribute
        .children()
        .find(|child| child.kind().as_ref() == "attribute_argument_list")
    {
        for argument in list
            .children()
            .filter(|child| child.kind().as_ref() == "attribute_argument")
        {
            match split_argument(&argument) {
                ArgumentSyntax::Positional(value) => arguments.push(value),
                ArgumentSyntax::Named(name, value) => {
                    named_arguments.push(NamedArgument { name, value });
                }
            }
        }
    }

    Some(AttributeSyntax {
        name,
        arguments,
        named_arguments,
        line: super::helpers::line_of(attribute),
    })
}

/// `Prop = value` is a named argument; `param: value` is still positional.
fn split_argument<D: Doc>(argument: &Node<D>) -> ArgumentSyntax {
    let named: Vec<Node<D>> = argument.children().filter(|child| child.is_named()).collect();
    let Some(value) = named.last() else {
        return ArgumentSyntax::Positional(TypedConstant::new(
            "object",
            symck_core::ConstantValue::Expression(argument.text().to_string()),
        ));
    };
    if named.len() < 2 {
        // some grammar versions parse `Prop = value` as an assignment
        if value.kind().as_ref() == "assignment_expression" {
            if let (Some(left), Some(right)) = (value.field("left"), value.field("right")) {
                return ArgumentSyntax::Named(
                    left.text().trim().to_string(),
                    constants::evaluate(&right),
                );
            }
        }
        return ArgumentSyntax::Positional(constants::evaluate(value));
    }
    let constant = constants::evaluate(value);

    let head = &named[0];
    let is_parameter_name = match head.kind().as_ref() {
        "name_colon" => true,
        "name_equals" => false,
        _ => argument.children().any(|child| child.kind().as_ref() == ":"),
    };
    if is_parameter_name {
        ArgumentSyntax::Positional(constant)
    } else {
        let name = head.text().trim().trim_end_matches(['=', ':']).trim().to_string();
        ArgumentSyntax::Named(name, constant)
    }
}
