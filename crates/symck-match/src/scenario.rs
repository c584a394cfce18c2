//! Resolve-then-match scenarios over a semantic model.

use serde::{Deserialize, Serialize};
use symck_core::{NamedTypeHandle, ResolveError, SemanticModel};

use crate::matcher::{MatchPair, match_attributes};
use crate::verdict::{PairVerdict, ScenarioReport};

/// Pairs produced for one target, before judging.
#[derive(Debug, Clone, PartialEq)]
pub struct Matched {
    pub target: NamedTypeHandle,
    /// Attributes found on the target, matched or not.
    pub attribute_count: usize,
    pub pairs: Vec<MatchPair>,
}

/// Which attribute classes to expect on which declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Fully-qualified metadata names of the expected attribute classes.
    /// Order decides ties between candidates sharing a simple name.
    pub candidates: Vec<String>,
    /// Fully-qualified metadata name of the annotated declaration.
    pub target: String,
    pub expected_argument_count: usize,
}

impl Scenario {
    #[must_use]
    pub fn new(
        target: impl Into<String>,
        candidates: impl IntoIterator<Item = impl Into<String>>,
        expected_argument_count: usize,
    ) -> Self {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
            target: target.into(),
            expected_argument_count,
        }
    }

    /// Resolve every name, then match the target's attributes against the
    /// candidates.
    ///
    /// # Errors
    /// The first [`ResolveError`] hit while resolving candidates or the
    /// target. Nothing is matched in that case.
    pub fn pairs<M: SemanticModel + ?Sized>(&self, model: &M) -> Result<Matched, ResolveError> {
        let candidates = self
            .candidates
            .iter()
            .map(|name| model.resolve_type(name))
            .collect::<Result<Vec<_>, _>>()?;
        let target = model.resolve_type(&self.target)?;

        let attributes = model.attributes_of(&target);
        let pairs = match_attributes(&candidates, &attributes);
        tracing::debug!(
            target = %target.qualified_name(),
            attributes = attributes.len(),
            pairs = pairs.len(),
            "matched attributes"
        );
        Ok(Matched {
            target,
            attribute_count: attributes.len(),
            pairs,
        })
    }

    /// Run the scenario and judge every pair.
    ///
    /// # Errors
    /// See [`Scenario::pairs`].
    pub fn run<M: SemanticModel + ?Sized>(
        &self,
        model: &M,
    ) -> Result<ScenarioReport, ResolveError> {
        let matched = self.pairs(model)?;
        let verdicts: Vec<PairVerdict> = matched
            .pairs
            .iter()
            .map(|pair| PairVerdict::evaluate(pair, self.expected_argument_count))
            .collect();

        for verdict in verdicts.iter().filter(|v| !v.passed()) {
            tracing::warn!(
                expected = %verdict.expected,
                observed = %verdict.observed,
                failures = ?verdict.failures(),
                "attribute check failed"
            );
        }

        Ok(ScenarioReport {
            target: matched.target.key().clone(),
            attribute_count: matched.attribute_count,
            verdicts,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use symck_core::{
        AssemblyIdentity, AttributeInstance, ContextId, MetadataName, TypeKey, TypeKind,
        TypedConstant,
    };

    use super::*;

    /// A model where every type lives in its own context, like a reference.
    struct TableModel {
        assembly: AssemblyIdentity,
        types: HashMap<String, NamedTypeHandle>,
        attributes: HashMap<String, Vec<AttributeInstance>>,
    }

    impl TableModel {
        fn new() -> Self {
            Self {
                assembly: AssemblyIdentity::named("Project"),
                types: HashMap::new(),
                attributes: HashMap::new(),
            }
        }

        fn declare(&mut self, assembly: &str, name: &str) -> NamedTypeHandle {
            let handle = NamedTypeHandle::new(
                TypeKey::new(
                    AssemblyIdentity::named(assembly),
                    MetadataName::parse(name).expect("name"),
                ),
                TypeKind::Class,
                ContextId::next(),
                0,
            );
            self.types.insert(name.to_string(), handle.clone());
            handle
        }

        fn annotate(&mut self, target: &str, class: &NamedTypeHandle, arguments: usize) {
            // rematerialise in a fresh context, as binding does
            let bound = NamedTypeHandle::new(class.key().clone(), class.kind(), ContextId::next(), 7);
            self.attributes
                .entry(target.to_string())
                .or_default()
                .push(AttributeInstance {
                    attribute_class: bound,
                    constructor_arguments: vec![TypedConstant::int(10); arguments],
                    named_arguments: Vec::new(),
                    line: 1,
                });
        }
    }

    impl SemanticModel for TableModel {
        fn assembly(&self) -> &AssemblyIdentity {
            &self.assembly
        }

        fn resolve_type(&self, metadata_name: &str) -> Result<NamedTypeHandle, ResolveError> {
            self.types
                .get(metadata_name)
                .cloned()
                .ok_or_else(|| ResolveError::not_found(metadata_name))
        }

        fn attributes_of(&self, ty: &NamedTypeHandle) -> Vec<AttributeInstance> {
            self.attributes
                .get(&ty.qualified_name())
                .cloned()
                .unwrap_or_default()
        }
    }

    fn simple_class_model(arguments: usize) -> TableModel {
        let mut model = TableModel::new();
        model.declare("Project", "Project.SimpleClass");
        let another = model.declare("RoslynBug", "RoslynBug.FromAnotherAssemblyAttribute");
        let current = model.declare("Project", "Project.FromCurrentAssemblyAttribute");
        model.annotate("Project.SimpleClass", &another, arguments);
        model.annotate("Project.SimpleClass", &current, arguments);
        model
    }

    fn simple_class_scenario() -> Scenario {
        Scenario::new(
            "Project.SimpleClass",
            [
                "Project.FromCurrentAssemblyAttribute",
                "RoslynBug.FromAnotherAssemblyAttribute",
            ],
            1,
        )
    }

    #[test]
    fn both_pairs_pass() {
        let report = simple_class_scenario()
            .run(&simple_class_model(1))
            .expect("run");
        assert_eq!(report.verdicts.len(), 2);
        assert_eq!(report.attribute_count, 2);
        assert!(report.passed());
    }

    #[test]
    fn wrong_argument_count_fails_every_pair() {
        let report = simple_class_scenario()
            .run(&simple_class_model(2))
            .expect("run");
        assert!(!report.passed());
        assert!(report.verdicts.iter().all(|v| v.identity_equals));
        assert!(report.verdicts.iter().all(|v| !v.argument_count_equals));
    }

    #[test]
    fn unresolvable_candidate_stops_the_run() {
        let scenario = Scenario::new("Project.SimpleClass", ["Project.Missing"], 1);
        assert_eq!(
            scenario.run(&simple_class_model(1)),
            Err(ResolveError::not_found("Project.Missing"))
        );
    }

    #[test]
    fn unresolvable_target_stops_the_run() {
        let scenario = Scenario::new("Project.Nope", ["Project.FromCurrentAssemblyAttribute"], 1);
        assert!(matches!(
            scenario.run(&simple_class_model(1)),
            Err(ResolveError::NotFound { .. })
        ));
    }

    #[test]
    fn target_without_attributes_yields_no_pairs() {
        let mut model = TableModel::new();
        model.declare("Project", "Project.Bare");
        model.declare("Project", "Project.FromCurrentAssemblyAttribute");
        let scenario = Scenario::new("Project.Bare", ["Project.FromCurrentAssemblyAttribute"], 1);

        let matched = scenario.pairs(&model).expect("pairs");
        assert_eq!(matched.attribute_count, 0);
        assert!(matched.pairs.is_empty());
        assert!(!scenario.run(&model).expect("run").passed());
    }
}
