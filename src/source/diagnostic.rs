use std::fmt;
use std::iter;
use std::ops::Range;

use either::Either;

use crate::source::{ Source, Span };

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    severity: Severity,
    span: Span,
    message: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, span: Span, message: String) -> Self {
        Diagnostic { severity, span, message }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
    errors: usize,
    warnings: usize,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics::default()
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        log::debug!(
            "{} at {}..{}: {}",
            diagnostic.severity,
            diagnostic.span.start(),
            diagnostic.span.end(),
            diagnostic.message
        );

        match diagnostic.severity {
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
            Severity::Info => {}
        }
        self.entries.push(diagnostic);
    }

    pub fn error(&mut self, span: Span, message: impl Into<String>) {
        self.report(Diagnostic::new(Severity::Error, span, message.into()));
    }

    pub fn warning(&mut self, span: Span, message: impl Into<String>) {
        self.report(Diagnostic::new(Severity::Warning, span, message.into()));
    }

    pub fn info(&mut self, span: Span, message: impl Into<String>) {
        self.report(Diagnostic::new(Severity::Info, span, message.into()));
    }

    pub fn error_count(&self) -> usize {
        self.errors
    }

    pub fn warning_count(&self) -> usize {
        self.warnings
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(|d| d.severity == Severity::Error)
    }
}

enum Excerpt {
    // a source line and the byte range of it to underline
    Line { line: Range<usize>, marked: Range<usize> },
    Elided,
}

fn excerpts(source: &Source, span: Span) -> impl Iterator<Item = Excerpt> {
    let first = source.line_bounds(span.start());
    let last = source.line_bounds(span.end().saturating_sub(1).max(span.start()));

    if last.start == first.start {
        return Either::Left(iter::once(Excerpt::Line {
            marked: span.start()..span.end().min(first.end).max(span.start()),
            line: first,
        }));
    }

    let between = source.text()[first.end..last.start].matches('\n').count() - 1;

    let mut out = vec![Excerpt::Line {
        marked: span.start()..first.end,
        line: first.clone(),
    }];

    if between == 1 {
        let middle = source.line_bounds(first.end + 1);
        out.push(Excerpt::Line { marked: middle.clone(), line: middle });
    }
    else if between > 1 {
        out.push(Excerpt::Elided);
    }

    out.push(Excerpt::Line {
        marked: last.start..span.end().min(last.end),
        line: last,
    });

    Either::Right(out.into_iter())
}

fn underline(text: &str, line: &Range<usize>, marked: &Range<usize>) -> String {
    // tabs are kept so the marks line up with the printed line
    let mut out: String = text[line.start..marked.start]
        .chars()
        .map(|c| if c == '\t' { '\t' } else { ' ' })
        .collect();

    let width = text[marked.clone()].chars().count().max(1);
    out.extend(iter::repeat_n('~', width));
    out
}

pub fn render(source: &Source, diagnostic: &Diagnostic) -> String {
    let span = diagnostic.span();
    let start = source.location(span.start());
    let end = match source.text()[..span.end()].chars().next_back() {
        Some(c) if !span.is_empty() => source.location(span.end() - c.len_utf8()),
        _ => start,
    };

    let mut out = format!(
        "{}:{}-{}: {}: {}\n",
        source.name(),
        start,
        end,
        diagnostic.severity(),
        diagnostic.message()
    );

    for excerpt in excerpts(source, span) {
        match excerpt {
            Excerpt::Line { line, marked } => {
                out.push_str(&source.text()[line.clone()]);
                out.push('\n');
                out.push_str(&underline(source.text(), &line, &marked));
                out.push('\n');
            }

            Excerpt::Elided => out.push_str("...\n"),
        }
    }

    out
}
