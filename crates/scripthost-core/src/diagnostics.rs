use std::collections::VecDeque;
use std::fmt;

/// A single message reported by a compiler backend.
///
/// Diagnostics carry the message text, the severity, and the location in the
/// compiled text. Rows and columns are 1-based; `0` means "unknown".
///
/// # Examples
///
/// ```
/// use scripthost_core::{Diagnostic, DiagnosticKind};
///
/// let diagnostic = Diagnostic::error("unexpected end of input").at(Some("script"), 4, 1);
/// assert_eq!(diagnostic.kind, DiagnosticKind::Error);
/// assert_eq!(diagnostic.to_string(), "script:4:1: error: unexpected end of input");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The severity level of this diagnostic
    pub kind: DiagnosticKind,
    /// The diagnostic message text
    pub message: String,
    /// The source section the diagnostic refers to, if the backend knows it
    pub section: Option<String>,
    /// The line number where this diagnostic occurred (1-based)
    pub row: u32,
    /// The column number where this diagnostic occurred (1-based)
    pub col: u32,
}

impl Diagnostic {
    /// Creates a diagnostic with no location information.
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            section: None,
            row: 0,
            col: 0,
        }
    }

    /// Creates an error diagnostic with no location information.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Error, message)
    }

    /// Creates a warning diagnostic with no location information.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Warning, message)
    }

    /// Attaches a location to this diagnostic.
    pub fn at(mut self, section: Option<&str>, row: u32, col: u32) -> Self {
        self.section = section.map(str::to_string);
        self.row = row;
        self.col = col;
        self
    }

    /// Returns `true` if this diagnostic is an error.
    pub fn is_error(&self) -> bool {
        self.kind == DiagnosticKind::Error
    }
}

/// The severity level of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// The script is invalid and cannot be compiled.
    Error,
    /// The script compiles, but something looks wrong.
    Warning,
    /// Informational output from the backend.
    Info,
}

impl DiagnosticKind {
    /// Returns the lowercase label used when displaying diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::Error => "error",
            DiagnosticKind::Warning => "warning",
            DiagnosticKind::Info => "info",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered collection of diagnostics produced by one compile.
///
/// A compile succeeds only when this collection is empty, so warnings count
/// against success just like errors do.
///
/// # Examples
///
/// ```
/// use scripthost_core::{Diagnostic, Diagnostics};
///
/// let mut diagnostics = Diagnostics::new();
/// diagnostics.add_diagnostic(Diagnostic::error("first"));
/// diagnostics.add_diagnostic(Diagnostic::warning("second"));
///
/// assert_eq!(diagnostics.count(), 2);
/// assert_eq!(diagnostics.first().map(|d| d.message.as_str()), Some("first"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    diagnostics: VecDeque<Diagnostic>,
}

impl Diagnostics {
    /// Creates a new, empty diagnostics collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a diagnostic to the end of the collection.
    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push_back(diagnostic);
    }

    /// Returns `true` if the collection contains no diagnostics.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Returns the first diagnostic that was added, if any.
    pub fn first(&self) -> Option<&Diagnostic> {
        self.diagnostics.front()
    }

    /// Returns an iterator over all diagnostics, in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Returns an iterator over only the error diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    /// Returns the total number of diagnostics in the collection.
    pub fn count(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns the number of error diagnostics in the collection.
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        for diagnostic in iter {
            self.add_diagnostic(diagnostic);
        }
    }
}

impl FromIterator<Diagnostic> for Diagnostics {
    fn from_iter<T: IntoIterator<Item = Diagnostic>>(iter: T) -> Self {
        let mut diagnostics = Diagnostics::new();
        diagnostics.extend(iter);
        diagnostics
    }
}

impl fmt::Display for Diagnostic {
    /// Formats as `section:row:col: kind: message`, dropping the section
    /// when the backend did not report one.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(section) = &self.section {
            write!(
                f,
                "{}:{}:{}: {}: {}",
                section, self.row, self.col, self.kind, self.message
            )
        } else {
            write!(
                f,
                "{}:{}: {}: {}",
                self.row, self.col, self.kind, self.message
            )
        }
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for diagnostic in &self.diagnostics {
            writeln!(f, "{}", diagnostic)?;
        }
        Ok(())
    }
}
