//! Line splitting and document parsing.
//!
//! A resource line has the form `key = value`. The value may contain holes,
//! which are handed to the [`HoleScanner`].

use std::collections::HashSet;

use tracing::debug;

use crate::{
    config::ParserConfig,
    diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink},
    scanner::HoleScanner,
    types::{LineOutcome, ResourceDocument, ResourceItem},
};

/// One line of a resource file together with its location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    pub path: &'a str,
    /// Zero-based line index.
    pub number: usize,
    pub text: &'a str,
}

impl<'a> SourceLine<'a> {
    pub fn new(path: &'a str, number: usize, text: &'a str) -> Self {
        Self { path, number, text }
    }
}

/// Parses resource lines against one set of lookup tables.
///
/// # Example
///
/// ```rust
/// use restext::{Diagnostic, ResourceParser, SourceLine};
///
/// let parser = ResourceParser::default();
/// let mut diagnostics: Vec<Diagnostic> = Vec::new();
/// let line = SourceLine::new("Strings.restext", 0, "Greeting = Hello {Name}!");
/// let outcome = parser.parse_line(line, &mut diagnostics);
///
/// let item = outcome.item().unwrap();
/// assert_eq!(item.key, "Greeting");
/// assert_eq!(item.holes[0].name, "name");
/// assert!(diagnostics.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResourceParser {
    config: ParserConfig,
}

impl ResourceParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Splits `line` into key and value and scans the value for holes.
    ///
    /// A line without `=` is [`LineOutcome::NoMatch`] and reports nothing.
    /// A malformed line is [`LineOutcome::Failed`] after reporting every
    /// problem found on it.
    pub fn parse_line<S: DiagnosticSink + ?Sized>(
        &self,
        line: SourceLine<'_>,
        sink: &mut S,
    ) -> LineOutcome {
        let text = line.text;
        let Some(delimiter) = text.find('=') else {
            return LineOutcome::NoMatch;
        };

        if let Some(second) = text[delimiter + 1..].find('=') {
            let pos = delimiter + 1 + second;
            sink.report(Diagnostic::new(
                DiagnosticCode::MultipleEqualsDelimiters,
                line.path,
                line.number,
                pos,
                pos,
            ));
            debug!(path = line.path, line = line.number, "multiple '=' delimiters");
            return LineOutcome::Failed;
        }

        let raw_key = &text[..delimiter];
        let key = raw_key.trim();
        if key.contains([' ', '\t']) {
            sink.report(
                Diagnostic::new(
                    DiagnosticCode::InvalidKey,
                    line.path,
                    line.number,
                    0,
                    raw_key.len(),
                )
                .with_arg(raw_key),
            );
            debug!(path = line.path, line = line.number, key, "invalid key");
            return LineOutcome::Failed;
        }

        // Offsets reported by the scanner must point into the original line,
        // so account for the whitespace trimmed off the front of the value.
        let after = &text[delimiter + 1..];
        let start_trimmed = after.trim_start();
        let offset = delimiter + 1 + (after.len() - start_trimmed.len());
        let value = start_trimmed.trim_end();

        let scanner = HoleScanner::new(&self.config, line.path, line.number, offset);
        match scanner.scan(value, sink) {
            Some(holes) => LineOutcome::Parsed(ResourceItem::new(key, holes, value.len())),
            None => {
                debug!(path = line.path, line = line.number, key, "malformed value");
                LineOutcome::Failed
            }
        }
    }

    /// Like [`parse_line`](Self::parse_line), collecting the diagnostics.
    pub fn parse_line_collect(&self, line: SourceLine<'_>) -> (LineOutcome, Vec<Diagnostic>) {
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let outcome = self.parse_line(line, &mut diagnostics);
        (outcome, diagnostics)
    }

    /// Parses every line of an in-memory resource text.
    ///
    /// Lines that are not key/value pairs are skipped, as are lines that fail;
    /// their diagnostics are still reported. The first item for a key wins and
    /// later items with the same key are reported as
    /// [`DiagnosticCode::DuplicateKey`].
    #[tracing::instrument(skip_all, fields(path = %path, line_count = text.lines().count()))]
    pub fn parse_document<S: DiagnosticSink + ?Sized>(
        &self,
        path: &str,
        text: &str,
        sink: &mut S,
    ) -> ResourceDocument {
        let mut document = ResourceDocument::new(path);
        let mut keys: HashSet<String> = HashSet::new();

        for (number, text) in text.lines().enumerate() {
            let LineOutcome::Parsed(item) = self.parse_line(SourceLine::new(path, number, text), sink)
            else {
                continue;
            };

            if keys.contains(&item.key) {
                sink.report(
                    Diagnostic::new(DiagnosticCode::DuplicateKey, path, number, 0, item.key.len())
                        .with_arg(&item.key),
                );
                debug!(path, line = number, key = %item.key, "duplicate key");
                continue;
            }

            keys.insert(item.key.clone());
            document.items.push(item);
        }

        document
    }
}
