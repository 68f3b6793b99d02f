pub mod diagnostic;

use std::fmt;
use std::fs;
use std::ops::Range;
use std::path::{ Path, PathBuf };

use thiserror::Error;

use crate::source::diagnostic::{ Diagnostic, Diagnostics };

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8", path.display())]
    Encoding { path: PathBuf },
}

/// Half-open byte range into the text of one [`Source`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        assert!(start <= end, "span starts after it ends: {}..{}", start, end);
        Span { start, end }
    }

    pub fn empty(at: usize) -> Self {
        Span { start: at, end: at }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    // smallest span covering both
    pub fn join(&self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// 1-based line and column; columns count characters, not bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

pub struct Source {
    name: String,
    text: String,
    diagnostics: Diagnostics,
}

impl Source {
    pub fn new(name: impl Into<String>, content: &str) -> Self {
        let mut text = String::with_capacity(content.len() + 1);
        text.push_str(content);
        // line printing always finds a line end
        text.push('\n');

        Source {
            name: name.into(),
            text,
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let bytes = fs::read(path).map_err(|source| SourceError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let Ok(content) = String::from_utf8(bytes) else {
            return Err(SourceError::Encoding { path: path.to_path_buf() });
        };

        log::debug!("loaded {} ({} bytes)", path.display(), content.len());
        Ok(Source::new(path.display().to_string(), &content))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn slice(&self, span: Span) -> &str {
        &self.text[span.range()]
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    // lets a stage read the text while it reports
    pub fn split_mut(&mut self) -> (&str, &mut Diagnostics) {
        (&self.text, &mut self.diagnostics)
    }

    pub fn location(&self, offset: usize) -> Location {
        let offset = offset.min(self.text.len());
        let before = &self.text[..offset];
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);

        Location {
            line: before.matches('\n').count() + 1,
            column: before[line_start..].chars().count() + 1,
        }
    }

    // byte range of the line holding `offset`, newline excluded
    pub fn line_bounds(&self, offset: usize) -> Range<usize> {
        let offset = offset.min(self.text.len());
        let start = self.text[..offset].rfind('\n').map_or(0, |i| i + 1);
        let end = self.text[offset..]
            .find('\n')
            .map_or(self.text.len(), |i| offset + i);

        start..end
    }

    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        diagnostic::render(self, diagnostic)
    }
}
