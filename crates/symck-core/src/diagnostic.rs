//! Diagnostics reported while building or driving a compilation.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

/// What went wrong. `Display` renders the matching C# compiler id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticCode {
    SyntaxError,
    TypeNotFound,
    AmbiguousAttribute,
    AmbiguousReference,
    DuplicateType,
    SourceShadowsReference,
    GeneratorFailed,
}

impl DiagnosticCode {
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::SyntaxError => "CS1525",
            Self::TypeNotFound => "CS0246",
            Self::AmbiguousAttribute => "CS1614",
            Self::AmbiguousReference => "CS0104",
            Self::DuplicateType => "CS0101",
            Self::SourceShadowsReference => "CS0436",
            Self::GeneratorFailed => "CS8785",
        }
    }

    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::SourceShadowsReference | Self::GeneratorFailed => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub severity: Severity,
    pub message: String,
    /// Source file, when the diagnostic points into one.
    pub path: Option<String>,
    /// 1-based line, when known.
    pub line: Option<u32>,
}

impl Diagnostic {
    #[must_use]
    pub fn new(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: code.severity(),
            message: message.into(),
            path: None,
            line: None,
        }
    }

    #[must_use]
    pub fn at(mut self, path: impl Into<String>, line: u32) -> Self {
        self.path = Some(path.into());
        self.line = Some(line);
        self
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.path, self.line) {
            (Some(path), Some(line)) => write!(f, "{path}({line}): ")?,
            (Some(path), None) => write!(f, "{path}: ")?,
            _ => {}
        }
        let severity = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{severity} {}: {}", self.code, self.message)
    }
}
