//! Pairing attribute applications with expected type handles.

use serde::Serialize;
use symck_core::{AttributeInstance, NamedTypeHandle};

/// An expected type handle and the attribute application it was paired with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchPair {
    pub expected: NamedTypeHandle,
    pub observed: AttributeInstance,
}

/// Pair each attribute with the first candidate sharing its simple name.
///
/// Pairs come out in attribute order. Attributes with no candidate of the
/// same simple name are dropped. Names are compared, not identities, so a
/// pair may still fail [`verify_identity`].
#[must_use]
pub fn match_attributes(
    candidates: &[NamedTypeHandle],
    attributes: &[AttributeInstance],
) -> Vec<MatchPair> {
    attributes
        .iter()
        .filter_map(|attribute| {
            let expected = candidates
                .iter()
                .find(|candidate| candidate.simple_name() == attribute.simple_name());
            if expected.is_none() {
                tracing::debug!(
                    attribute = %attribute.attribute_class.qualified_name(),
                    "no candidate for attribute"
                );
            }
            expected.map(|expected| MatchPair {
                expected: expected.clone(),
                observed: attribute.clone(),
            })
        })
        .collect()
}

/// Whether the attribute class is the expected type.
///
/// Compares canonical keys, so handles materialised in different contexts
/// still verify.
#[must_use]
pub fn verify_identity(pair: &MatchPair) -> bool {
    pair.expected == pair.observed.attribute_class
}

/// Whether the attribute was applied with exactly `expected` positional
/// arguments. Named arguments are not counted.
#[must_use]
pub fn verify_argument_count(pair: &MatchPair, expected: usize) -> bool {
    pair.observed.constructor_arguments.len() == expected
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use symck_core::{
        AssemblyIdentity, ContextId, MetadataName, NamedArgument, TypeKey, TypeKind,
        TypedConstant,
    };

    use super::*;

    fn handle(assembly: &str, name: &str, origin: ContextId) -> NamedTypeHandle {
        NamedTypeHandle::new(
            TypeKey::new(
                AssemblyIdentity::named(assembly),
                MetadataName::parse(name).expect("name"),
            ),
            TypeKind::Class,
            origin,
            0,
        )
    }

    fn applied(class: NamedTypeHandle, arguments: Vec<TypedConstant>) -> AttributeInstance {
        AttributeInstance {
            attribute_class: class,
            constructor_arguments: arguments,
            named_arguments: Vec::new(),
            line: 1,
        }
    }

    #[test]
    fn pairs_follow_attribute_order() {
        let ctx = ContextId::next();
        let current = handle("Project", "Project.FromCurrentAssemblyAttribute", ctx);
        let another = handle("RoslynBug", "RoslynBug.FromAnotherAssemblyAttribute", ctx);
        let attributes = vec![
            applied(another.clone(), vec![TypedConstant::int(10)]),
            applied(current.clone(), vec![TypedConstant::int(10)]),
        ];

        let pairs = match_attributes(&[current.clone(), another.clone()], &attributes);
        let expected: Vec<&NamedTypeHandle> = pairs.iter().map(|p| &p.expected).collect();
        assert_eq!(expected, vec![&another, &current]);
    }

    #[test]
    fn first_candidate_wins_on_shared_simple_name() {
        let ctx = ContextId::next();
        let left = handle("Left", "Left.TagAttribute", ctx);
        let right = handle("Right", "Right.TagAttribute", ctx);
        let attributes = vec![applied(right.clone(), Vec::new())];

        let pairs = match_attributes(&[left.clone(), right.clone()], &attributes);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].expected, left);
        assert!(!verify_identity(&pairs[0]));

        let reversed = match_attributes(&[right.clone(), left], &attributes);
        assert!(verify_identity(&reversed[0]));
    }

    #[test]
    fn unmatched_attributes_are_dropped() {
        let ctx = ContextId::next();
        let wanted = handle("App", "App.WantedAttribute", ctx);
        let other = handle("App", "App.OtherAttribute", ctx);
        let pairs = match_attributes(&[wanted], &[applied(other, Vec::new())]);
        assert!(pairs.is_empty());
    }

    #[test]
    fn no_attributes_means_no_pairs() {
        let wanted = handle("App", "App.WantedAttribute", ContextId::next());
        assert!(match_attributes(&[wanted], &[]).is_empty());
    }

    #[test]
    fn matching_is_deterministic() {
        let ctx = ContextId::next();
        let a = handle("App", "App.AAttribute", ctx);
        let b = handle("App", "App.BAttribute", ctx);
        let attributes = vec![
            applied(b.clone(), Vec::new()),
            applied(a.clone(), Vec::new()),
            applied(b.clone(), Vec::new()),
        ];
        let candidates = [a, b];
        assert_eq!(
            match_attributes(&candidates, &attributes),
            match_attributes(&candidates, &attributes)
        );
    }

    #[test]
    fn identity_holds_across_contexts() {
        let name = "RoslynBug.FromAnotherAssemblyAttribute";
        let resolved = handle("RoslynBug", name, ContextId::next());
        let bound = handle("RoslynBug", name, ContextId::next());
        assert!(!resolved.is_same_instance(&bound));

        let pair = MatchPair {
            expected: resolved,
            observed: applied(bound, vec![TypedConstant::int(10)]),
        };
        assert!(verify_identity(&pair));
    }

    #[test]
    fn same_simple_name_in_other_assembly_is_not_identical() {
        let ctx = ContextId::next();
        let pair = MatchPair {
            expected: handle("Lib", "Shared.MarkAttribute", ctx),
            observed: applied(handle("App", "Shared.MarkAttribute", ctx), Vec::new()),
        };
        assert!(!verify_identity(&pair));
    }

    #[rstest]
    #[case::exact(1, 1, true)]
    #[case::too_few(0, 1, false)]
    #[case::too_many(2, 1, false)]
    #[case::none_expected(0, 0, true)]
    fn argument_count_compares_positional_arguments(
        #[case] given: usize,
        #[case] expected: usize,
        #[case] verdict: bool,
    ) {
        let class = handle("App", "App.MarkAttribute", ContextId::next());
        let pair = MatchPair {
            expected: class.clone(),
            observed: applied(class, vec![TypedConstant::int(10); given]),
        };
        assert_eq!(verify_argument_count(&pair, expected), verdict);
    }

    #[test]
    fn named_arguments_do_not_count() {
        let class = handle("App", "App.MarkAttribute", ContextId::next());
        let mut observed = applied(class.clone(), vec![TypedConstant::int(10)]);
        observed.named_arguments.push(NamedArgument {
            name: "Label".to_string(),
            value: TypedConstant::string("x"),
        });
        let pair = MatchPair {
            expected: class,
            observed,
        };
        assert!(verify_argument_count(&pair, 1));
    }
}
