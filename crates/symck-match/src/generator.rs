//! Generators observe a compiled program during a driver run.

use std::cell::RefCell;

use symck_core::{Diagnostic, DiagnosticCode, SemanticModel};

use crate::error::GeneratorError;
use crate::matcher::MatchPair;
use crate::scenario::Scenario;

/// What a generator sees while it executes.
pub struct GeneratorContext<'m> {
    model: &'m dyn SemanticModel,
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl<'m> GeneratorContext<'m> {
    fn new(model: &'m dyn SemanticModel) -> Self {
        Self {
            model,
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    /// The compilation being generated for.
    #[must_use]
    pub fn model(&self) -> &'m dyn SemanticModel {
        self.model
    }

    pub fn report_diagnostic(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics.into_inner()
    }
}

/// A step run once per driver pass.
pub trait Generator {
    fn name(&self) -> &str;

    /// # Errors
    /// Any failure. The driver turns it into a warning diagnostic.
    fn execute(&mut self, context: &GeneratorContext<'_>) -> Result<(), GeneratorError>;
}

/// Result of one driver pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratorRunResult {
    /// Names of the generators that completed, in run order.
    pub succeeded: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Runs generators over a semantic model.
#[derive(Debug, Default)]
pub struct GeneratorDriver;

impl GeneratorDriver {
    /// Execute each generator once, in order.
    ///
    /// A failing generator is reported as a `CS8785` warning and does not
    /// stop the ones after it.
    pub fn run(
        model: &dyn SemanticModel,
        generators: &mut [&mut dyn Generator],
    ) -> GeneratorRunResult {
        let mut result = GeneratorRunResult::default();
        for generator in generators.iter_mut() {
            let context = GeneratorContext::new(model);
            let outcome = generator.execute(&context);
            result.diagnostics.extend(context.into_diagnostics());

            match outcome {
                Ok(()) => {
                    tracing::debug!(generator = generator.name(), "generator finished");
                    result.succeeded.push(generator.name().to_string());
                }
                Err(err) => {
                    tracing::warn!(generator = generator.name(), error = %err, "generator failed");
                    result.diagnostics.push(Diagnostic::new(
                        DiagnosticCode::GeneratorFailed,
                        format!(
                            "Generator '{}' failed to generate source: {err}",
                            generator.name()
                        ),
                    ));
                }
            }
        }
        result
    }
}

/// Records the pairs a [`Scenario`] produces when it runs inside a driver.
#[derive(Debug, Clone)]
pub struct AttributePairingGenerator {
    scenario: Scenario,
    pairs: Vec<MatchPair>,
}

impl AttributePairingGenerator {
    #[must_use]
    pub const fn new(scenario: Scenario) -> Self {
        Self {
            scenario,
            pairs: Vec::new(),
        }
    }

    /// Pairs from the last successful execution.
    #[must_use]
    pub fn pairs(&self) -> &[MatchPair] {
        &self.pairs
    }

    #[must_use]
    pub const fn scenario(&self) -> &Scenario {
        &self.scenario
    }
}

impl Generator for AttributePairingGenerator {
    fn name(&self) -> &str {
        "AttributePairingGenerator"
    }

    fn execute(&mut self, context: &GeneratorContext<'_>) -> Result<(), GeneratorError> {
        self.pairs = self.scenario.pairs(context.model())?.pairs;
        Ok(())
    }
}
