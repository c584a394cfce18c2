//! Per-pair verdicts and scenario reports.

use std::fmt;

use serde::Serialize;
use symck_core::TypeKey;

use crate::matcher::{MatchPair, verify_argument_count, verify_identity};

/// A check a [`PairVerdict`] can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckFailure {
    Identity,
    ArgumentCount,
}

impl fmt::Display for CheckFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => write!(f, "attribute class is not the expected type"),
            Self::ArgumentCount => write!(f, "unexpected constructor argument count"),
        }
    }
}

/// Outcome of both checks on one [`MatchPair`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairVerdict {
    pub expected: TypeKey,
    pub observed: TypeKey,
    pub identity_equals: bool,
    pub argument_count_equals: bool,
    pub argument_count: usize,
    pub expected_argument_count: usize,
    pub line: u32,
}

impl PairVerdict {
    #[must_use]
    pub fn evaluate(pair: &MatchPair, expected_argument_count: usize) -> Self {
        Self {
            expected: pair.expected.key().clone(),
            observed: pair.observed.attribute_class.key().clone(),
            identity_equals: verify_identity(pair),
            argument_count_equals: verify_argument_count(pair, expected_argument_count),
            argument_count: pair.observed.constructor_arguments.len(),
            expected_argument_count,
            line: pair.observed.line,
        }
    }

    /// Checks that did not hold, identity first.
    #[must_use]
    pub fn failures(&self) -> Vec<CheckFailure> {
        let mut failures = Vec::new();
        if !self.identity_equals {
            failures.push(CheckFailure::Identity);
        }
        if !self.argument_count_equals {
            failures.push(CheckFailure::ArgumentCount);
        }
        failures
    }

    #[must_use]
    pub const fn passed(&self) -> bool {
        self.identity_equals && self.argument_count_equals
    }
}

/// Every verdict produced for one target declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioReport {
    pub target: TypeKey,
    /// Attributes found on the target, matched or not.
    pub attribute_count: usize,
    pub verdicts: Vec<PairVerdict>,
}

impl ScenarioReport {
    /// True when at least one pair was produced and every pair passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        !self.verdicts.is_empty() && self.verdicts.iter().all(PairVerdict::passed)
    }

    #[must_use]
    pub fn failed_verdicts(&self) -> Vec<&PairVerdict> {
        self.verdicts.iter().filter(|v| !v.passed()).collect()
    }
}
