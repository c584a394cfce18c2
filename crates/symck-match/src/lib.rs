//! # symck-match
//!
//! Attribute matching and symbol identity verdicts.
//!
//! Given expected attribute classes and a target declaration, pairs every
//! attribute on the target with the first expected class of the same simple
//! name, then checks that the two are the same type by canonical key and
//! that the attribute was applied with the expected number of positional
//! arguments.
//!
//! Works against any [`symck_core::SemanticModel`]; nothing here depends on
//! a particular front end.

pub mod error;
pub mod generator;
pub mod matcher;
pub mod scenario;
pub mod verdict;

pub use error::GeneratorError;
pub use generator::{
    AttributePairingGenerator, Generator, GeneratorContext, GeneratorDriver, GeneratorRunResult,
};
pub use matcher::{MatchPair, match_attributes, verify_argument_count, verify_identity};
pub use scenario::{Matched, Scenario};
pub use verdict::{CheckFailure, PairVerdict, ScenarioReport};
