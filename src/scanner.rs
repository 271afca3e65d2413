//! Hole scanning over a single resource value.
//!
//! The scan is a forward pass built on [`next_hole`], a pure step function
//! from `(value, position)` to the next brace pair and the position after it.
//! Every malformed hole is reported, in order, before the scan gives up on the
//! value; once any hole has failed no further [`Hole`] is recorded.

use tracing::trace;

use crate::{
    config::ParserConfig,
    diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink},
    naming::normalize_name,
    types::Hole,
};

/// A brace pair located in a value, by byte offsets of `{` and `}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawHole {
    pub open: usize,
    pub close: usize,
}

impl RawHole {
    /// Text strictly between the braces.
    pub fn contents<'a>(&self, value: &'a str) -> &'a str {
        &value[self.open + 1..self.close]
    }

    /// Length including both braces.
    pub fn length(&self) -> usize {
        self.close - self.open + 1
    }
}

/// Finds the next `{...}` pair at or after `pos`.
///
/// Returns the pair and the position just past its `}`. Returns `None` when
/// there is no further `{`, or when the last `{` is never closed.
pub fn next_hole(value: &str, pos: usize) -> Option<(RawHole, usize)> {
    let open = pos + value.get(pos..)?.find('{')?;
    let close = open + 1 + value[open + 1..].find('}')?;
    Some((RawHole { open, close }, close + 1))
}

/// Where the scanned value sits, for diagnostic locations.
#[derive(Debug, Clone, Copy)]
pub struct HoleScanner<'a> {
    config: &'a ParserConfig,
    path: &'a str,
    line: usize,
    offset: usize,
}

impl<'a> HoleScanner<'a> {
    /// `offset` is the byte position of the value's first character in its line.
    pub fn new(config: &'a ParserConfig, path: &'a str, line: usize, offset: usize) -> Self {
        Self {
            config,
            path,
            line,
            offset,
        }
    }

    /// Scans `value` for holes.
    ///
    /// Returns the holes in appearance order, or `None` if any hole was
    /// malformed. Diagnostics for every malformed hole go to `sink`.
    ///
    /// # Panics
    ///
    /// Panics if the scan loops more often than the value has room for holes,
    /// which means the step function stopped making progress.
    pub fn scan<S: DiagnosticSink + ?Sized>(&self, value: &str, sink: &mut S) -> Option<Vec<Hole>> {
        // Each step consumes at least "{}".
        let max_iterations = value.len() / 2 + 1;

        let mut holes: Vec<Hole> = Vec::new();
        let mut failed = false;
        let mut iterations = 0;
        let mut pos = 0;

        while let Some((raw, next)) = next_hole(value, pos) {
            iterations += 1;
            if iterations > max_iterations || next <= pos {
                panic!(
                    "hole scanner exceeded {} iterations on a {}-byte value; this is a restext bug",
                    max_iterations,
                    value.len()
                );
            }
            pos = next;

            let contents = raw.contents(value);
            if contents.is_empty() {
                self.report(sink, DiagnosticCode::EmptyHole, raw, None);
                failed = true;
                continue;
            }

            let separator = contents.find(':');
            match separator {
                Some(0) => {
                    self.report(sink, DiagnosticCode::NoNameInHole, raw, None);
                    failed = true;
                    continue;
                }
                Some(i) if i == contents.len() - 1 => {
                    self.report(sink, DiagnosticCode::NoTypeInHole, raw, None);
                    failed = true;
                    continue;
                }
                _ => {}
            }

            if failed {
                // Keep going for diagnostics only.
                continue;
            }

            let (raw_name, annotation) = match separator {
                Some(i) => (&contents[..i], Some(&contents[i + 1..])),
                None => (contents, None),
            };
            let name = normalize_name(Some(raw_name), holes.len(), self.config);

            if holes
                .iter()
                .any(|h| h.name == name && h.r#type.as_deref() != annotation)
            {
                self.report(
                    sink,
                    DiagnosticCode::ConflictingTypeConstraint,
                    raw,
                    Some(&name),
                );
                failed = true;
                continue;
            }

            trace!(name = %name, annotation = ?annotation, index = raw.open, "hole");
            holes.push(Hole {
                index: raw.open,
                length: raw.length(),
                name,
                r#type: annotation.map(str::to_string),
            });
        }

        if failed { None } else { Some(holes) }
    }

    fn report<S: DiagnosticSink + ?Sized>(
        &self,
        sink: &mut S,
        code: DiagnosticCode,
        raw: RawHole,
        arg: Option<&str>,
    ) {
        let mut diagnostic = Diagnostic::new(
            code,
            self.path,
            self.line,
            self.offset + raw.open,
            self.offset + raw.close,
        );
        if let Some(arg) = arg {
            diagnostic = diagnostic.with_arg(arg);
        }
        sink.report(diagnostic);
    }
}
