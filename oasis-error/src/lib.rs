//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages, and the [`Error`] type that ties an error kind to the text of the expression it
//! originated from.

use ariadne::{Color, Report, Source};
use std::{fmt::{self, Debug, Display}, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send {
    /// The short, one-line description of this error.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of the text of an expression that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The text of the expression that this error originated from.
    pub source: String,

    /// The regions of [`Error::source`] that this error points at.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given source text, spans and kind.
    pub fn new(source: impl Into<String>, spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { source: source.into(), spans, kind: Box::new(kind) }
    }

    /// Creates a new error whose single span covers the whole source text.
    pub fn whole(source: impl Into<String>, kind: impl ErrorKind + 'static) -> Self {
        let source = source.into();
        let span = 0..source.chars().count();
        Self::new(source, vec![span], kind)
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Renders the report for this error into a string, including any ANSI color codes.
    pub fn render(&self, src_id: &str) -> std::io::Result<String> {
        let mut buf = Vec::new();
        self.build_report(src_id)
            .write((src_id, Source::from(&self.source)), &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (in `{}`)", self.kind.message(), self.source)
    }
}

impl std::error::Error for Error {}
