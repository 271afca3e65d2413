#![forbid(unsafe_code)]
//! Parser for localization resource lines with typed formatting holes.
//!
//! A resource line has the form `key = value`. The value is a display string
//! that may contain holes such as `{0}`, `{Name}` or `{Count:int}`. Parsing a
//! line yields a [`ResourceItem`] with normalized parameter names, ready for a
//! code emitter, or a list of positioned [`Diagnostic`]s.
//!
//! # Quick Start
//!
//! ```rust
//! use restext::{Diagnostic, ParserConfig, ResourceParser, diagnostics::has_errors};
//!
//! let parser = ResourceParser::new(ParserConfig::rust());
//! let mut diagnostics: Vec<Diagnostic> = Vec::new();
//! let document = parser.parse_document(
//!     "Strings.restext",
//!     "Welcome = Hello {Name}!\nItems = {Count:int} items",
//!     &mut diagnostics,
//! );
//!
//! assert!(!has_errors(&diagnostics));
//! let items = document.get("Items").unwrap();
//! assert_eq!(items.parameters(parser.config())[0].resolved_type, "i32");
//! ```
//!
//! # Hole grammar
//!
//! - `{name}`: a parameter of the configured default type.
//! - `{name:type}`: a parameter constrained to `type`, resolved through the
//!   alias table of the [`ParserConfig`].
//! - Digit names become positional parameters: `{0}` is named `arg0`.
//!
//! There are no nested holes and no escapes for literal braces.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod naming;
pub mod parser;
pub mod resolve;
pub mod scanner;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    config::ParserConfig,
    diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink, Severity},
    error::Error,
    parser::{ResourceParser, SourceLine},
    types::{Hole, LineOutcome, ParameterDefinition, ResourceDocument, ResourceItem},
};
