//! # symck-frontend
//!
//! ast-grep-based C# front end for symck.
//!
//! Parses C# sources into [`SyntaxTree`]s, collects the type declarations
//! and attribute syntax they contain, and binds attribute classes against
//! the declaring [`Compilation`] and its [`MetadataReference`]s. A
//! compilation implements [`symck_core::SemanticModel`].
//!
//! Each compilation is its own symbol context: handles for the same type
//! obtained through different compilations compare equal by key while
//! remaining distinct instances.

mod bind;
pub mod collect;
pub mod compilation;
pub mod error;
pub mod parser;
pub mod reference;
pub mod syntax;

pub use compilation::Compilation;
pub use error::FrontendError;
pub use reference::MetadataReference;
pub use syntax::SyntaxTree;
