//! A diagnostic reporter with a fluent API for creating reports in a
//! declarative way.
use std::fmt;

use crate::{
    report::{Report, ReportKind},
    writer::ReportWriter,
};

pub type Reports = Vec<Report>;

/// Facilitates the creation of lists of [Report]s in a declarative way.
#[derive(Debug, Default)]
pub struct Reporter {
    reports: Vec<Report>,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a report to the builder.
    pub fn report(&mut self, kind: ReportKind) -> &mut Report {
        let mut report = Report::new();
        report.kind(kind);
        self.reports.push(report);

        // The report was pushed just above, so the vector is non-empty.
        let last = self.reports.len() - 1;
        &mut self.reports[last]
    }

    /// Add an error report to the builder.
    pub fn error(&mut self) -> &mut Report {
        self.report(ReportKind::Error)
    }

    /// Add a warning report to the builder.
    pub fn warning(&mut self) -> &mut Report {
        self.report(ReportKind::Warning)
    }

    /// Check whether any errors have been reported.
    pub fn has_errors(&self) -> bool {
        self.reports.iter().any(Report::is_error)
    }

    /// Consume the [`Reporter`], producing a [`Vec<Report>`].
    pub fn into_reports(self) -> Reports {
        self.reports
    }
}

impl fmt::Display for Reporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", ReportWriter::new(&self.reports))
    }
}
