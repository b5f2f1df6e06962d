//! Report data structures.
use std::fmt;

use jpat_error_codes::JpatErrorCode;
use jpat_source::location::Span;
use jpat_utils::highlight::{highlight, Colour, Modifier};

/// The kind of a [Report].
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum ReportKind {
    /// The report is an error.
    Error,
    /// The report is an informational diagnostic.
    Info,
    /// The report is a warning.
    Warning,
}

impl ReportKind {
    /// Get the [Colour] of the label associated with the [ReportKind].
    pub fn as_colour(&self) -> Colour {
        match self {
            ReportKind::Error => Colour::Red,
            ReportKind::Info => Colour::Blue,
            ReportKind::Warning => Colour::Yellow,
        }
    }

    /// Get the message label of the [ReportKind].
    pub fn message(&self) -> &'static str {
        match self {
            ReportKind::Error => "error",
            ReportKind::Info => "info",
            ReportKind::Warning => "warn",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", highlight(self.as_colour() | Modifier::Bold, self.message()))
    }
}

/// A note that is attached at the end of a [Report], e.g.
/// `= missing: lib.R(lib.B _)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportNote {
    pub label: String,
    pub message: String,
}

impl ReportNote {
    pub fn new(label: impl ToString, message: impl ToString) -> Self {
        Self { label: label.to_string(), message: message.to_string() }
    }
}

/// A [Span] with a message describing what is going on at that location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelledSpan {
    pub span: Span,
    pub message: String,
}

/// The elements that make up the body of a [Report].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportElement {
    Label(LabelledSpan),
    Note(ReportNote),
}

/// A diagnostic that is ready to be rendered.
#[derive(Debug, Clone)]
pub struct Report {
    /// The general kind of the report.
    pub kind: ReportKind,

    /// A general title for the report.
    pub title: String,

    /// An optional associated error code.
    pub error_code: Option<JpatErrorCode>,

    /// The labels and notes of the report, in insertion order.
    pub contents: Vec<ReportElement>,
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

impl Report {
    pub fn new() -> Self {
        Self {
            kind: ReportKind::Error,
            title: String::new(),
            error_code: None,
            contents: vec![],
        }
    }

    /// Check if the report denotes an occurred error.
    pub fn is_error(&self) -> bool {
        self.kind == ReportKind::Error
    }

    /// Check if the report denotes an occurred warning.
    pub fn is_warning(&self) -> bool {
        self.kind == ReportKind::Warning
    }

    /// Set the kind of the report.
    pub fn kind(&mut self, kind: ReportKind) -> &mut Self {
        self.kind = kind;
        self
    }

    /// Set the title of the report.
    pub fn title(&mut self, title: impl ToString) -> &mut Self {
        self.title = title.to_string();
        self
    }

    /// Set the associated [JpatErrorCode] of the report.
    pub fn code(&mut self, code: JpatErrorCode) -> &mut Self {
        self.error_code = Some(code);
        self
    }

    /// Add a labelled span to the report.
    pub fn add_labelled_span(&mut self, span: Span, message: impl ToString) -> &mut Self {
        self.contents.push(ReportElement::Label(LabelledSpan { span, message: message.to_string() }));
        self
    }

    /// Add a `note` to the report.
    pub fn add_note(&mut self, message: impl ToString) -> &mut Self {
        self.add_element_note("note", message)
    }

    /// Add a `help` note to the report.
    pub fn add_help(&mut self, message: impl ToString) -> &mut Self {
        self.add_element_note("help", message)
    }

    /// Add a note with an arbitrary label to the report.
    pub fn add_element_note(&mut self, label: impl ToString, message: impl ToString) -> &mut Self {
        self.contents.push(ReportElement::Note(ReportNote::new(label, message)));
        self
    }

    /// Iterate over the notes of the report.
    pub fn notes(&self) -> impl Iterator<Item = &ReportNote> + '_ {
        self.contents.iter().filter_map(|element| match element {
            ReportElement::Note(note) => Some(note),
            ReportElement::Label(_) => None,
        })
    }
}
