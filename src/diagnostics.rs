//! Structured diagnostics reported while parsing resource lines.
//!
//! Diagnostics are never raised as errors. The parser hands them to a
//! [`DiagnosticSink`] in left-to-right scan order and marks the line as failed.

use std::fmt::Display;

use serde::Serialize;

/// The kind of problem a [`Diagnostic`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum DiagnosticCode {
    MultipleEqualsDelimiters,
    EmptyHole,
    NoNameInHole,
    NoTypeInHole,
    DuplicateKey,
    InvalidKey,
    ConflictingTypeConstraint,
}

impl DiagnosticCode {
    /// Stable identifier, e.g. `RG0003`.
    pub fn id(&self) -> String {
        format!("RG{:04}", self.number())
    }

    fn number(&self) -> u16 {
        match self {
            DiagnosticCode::MultipleEqualsDelimiters => 2,
            DiagnosticCode::EmptyHole => 3,
            DiagnosticCode::NoNameInHole => 4,
            DiagnosticCode::NoTypeInHole => 5,
            DiagnosticCode::DuplicateKey => 6,
            DiagnosticCode::InvalidKey => 7,
            DiagnosticCode::ConflictingTypeConstraint => 9,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DiagnosticCode::MultipleEqualsDelimiters => "Multiple key value delimiters",
            DiagnosticCode::EmptyHole => "Empty resource string value hole",
            DiagnosticCode::NoNameInHole => "Resource string value hole is missing an identifier",
            DiagnosticCode::NoTypeInHole => "Resource string value hole is missing a type",
            DiagnosticCode::DuplicateKey => "Duplicate resource key",
            DiagnosticCode::InvalidKey => "Invalid resource key",
            DiagnosticCode::ConflictingTypeConstraint => "Conflicting type constraint",
        }
    }

    /// Renders the message for this code. `args` fills the `{0}` slot where the
    /// message names a key or hole.
    pub fn message(&self, args: &[String]) -> String {
        let arg = args.first().map(String::as_str).unwrap_or_default();
        match self {
            DiagnosticCode::MultipleEqualsDelimiters => {
                "Multiple key value delimiters ('=') found.".to_string()
            }
            DiagnosticCode::EmptyHole => {
                "A hole in a resource string value must not be empty.".to_string()
            }
            DiagnosticCode::NoNameInHole => "All holes in resource string values must have a \
                 valid (non-empty and not \":\") identifier."
                .to_string(),
            DiagnosticCode::NoTypeInHole => "Resource string value is missing a type. Either add \
                 one, or remove the \":\" delimiter."
                .to_string(),
            DiagnosticCode::DuplicateKey => format!("Duplicate key '{}' found.", arg),
            DiagnosticCode::InvalidKey => format!("Invalid key '{}' found.", arg),
            DiagnosticCode::ConflictingTypeConstraint => format!(
                "Conflicting type constraint for resource hole with name '{}'.",
                arg
            ),
        }
    }

    pub fn severity(&self) -> Severity {
        Severity::Error
    }
}

impl Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A located report about one problem on one line.
///
/// `line` is the zero-based line index. `start` and `end` are byte offsets
/// within that line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub severity: Severity,
    pub file_path: String,
    pub line: usize,
    pub start: usize,
    pub end: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

impl Diagnostic {
    pub fn new(
        code: DiagnosticCode,
        file_path: impl Into<String>,
        line: usize,
        start: usize,
        end: usize,
    ) -> Self {
        Self {
            code,
            severity: code.severity(),
            file_path: file_path.into(),
            line,
            start,
            end,
            args: Vec::new(),
        }
    }

    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn message(&self) -> String {
        self.code.message(&self.args)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}[{}]: {}",
            self.file_path,
            self.line + 1,
            self.start + 1,
            self.severity,
            self.code,
            self.message()
        )
    }
}

/// Receives diagnostics as the parser finds them.
///
/// Implemented for `Vec<Diagnostic>` (collect everything) and for any
/// `FnMut(Diagnostic)` callback.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl<F> DiagnosticSink for F
where
    F: FnMut(Diagnostic),
{
    fn report(&mut self, diagnostic: Diagnostic) {
        self(diagnostic)
    }
}

/// Returns true when any diagnostic should block code generation.
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(Diagnostic::is_error)
}
