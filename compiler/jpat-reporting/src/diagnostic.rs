//! Diagnostic stores. Each stage that can emit errors and warnings keeps
//! them in a store implementing [Diagnostics], and converts them into
//! [Report]s once it is done.

use crate::{report::Report, reporter::Reporter};

/// A diagnostic that knows how to add itself to a [Reporter].
pub trait IntoReports {
    fn add_to_reports(&self, reporter: &mut Reporter);
}

pub trait Diagnostics<E, W> {
    /// Add an error into the store.
    fn add_error(&mut self, error: E);

    /// Add a warning into the store.
    fn add_warning(&mut self, warning: W);

    /// Check if the diagnostics has an error.
    fn has_errors(&self) -> bool;

    /// Check if the diagnostics has a warning
    fn has_warnings(&self) -> bool;

    /// Convert the [Diagnostics] into a [Vec<Report>].
    fn into_reports(self) -> Vec<Report>;

    /// Convert the [Diagnostics] into it's respective parts. This is useful
    /// when we just want to inspect the errors rather than immediately
    /// converting the diagnostics into [Report]s.
    fn into_diagnostics(self) -> (Vec<E>, Vec<W>);
}

/// A simple in-order store of errors and warnings.
#[derive(Debug, Clone)]
pub struct DiagnosticStore<E, W> {
    pub errors: Vec<E>,
    pub warnings: Vec<W>,
}

impl<E, W> Default for DiagnosticStore<E, W> {
    fn default() -> Self {
        Self { errors: vec![], warnings: vec![] }
    }
}

impl<E, W> DiagnosticStore<E, W> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: IntoReports, W: IntoReports> Diagnostics<E, W> for DiagnosticStore<E, W> {
    fn add_error(&mut self, error: E) {
        self.errors.push(error);
    }

    fn add_warning(&mut self, warning: W) {
        self.warnings.push(warning);
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    fn into_reports(self) -> Vec<Report> {
        let mut reporter = Reporter::new();

        for error in &self.errors {
            error.add_to_reports(&mut reporter);
        }

        for warning in &self.warnings {
            warning.add_to_reports(&mut reporter);
        }

        reporter.into_reports()
    }

    fn into_diagnostics(self) -> (Vec<E>, Vec<W>) {
        (self.errors, self.warnings)
    }
}
