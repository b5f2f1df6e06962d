//! Report rendering.
//!
//! ```text
//! error[0001]: the switch expression does not cover all possible input values
//!   --> 4:12: pattern `lib.R(lib.B _)` not covered
//!    = note: in switch `test`
//! ```
use std::fmt;

use jpat_utils::highlight::{highlight, Colour, Modifier};

use crate::report::{Report, ReportElement};

/// General data type for displaying [Report]s, optionally prefixing every
/// location with the name of the source it came from.
pub struct ReportWriter<'r> {
    reports: &'r [Report],
    source: Option<&'r str>,
}

impl<'r> ReportWriter<'r> {
    pub fn new(reports: &'r [Report]) -> Self {
        Self { reports, source: None }
    }

    pub fn single(report: &'r Report) -> Self {
        Self::new(std::slice::from_ref(report))
    }

    /// Prefix every rendered location with the given source name.
    pub fn with_source(mut self, source: &'r str) -> Self {
        self.source = Some(source);
        self
    }
}

impl fmt::Display for ReportWriter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for report in self.reports {
            // Add the optional error code to the general message...
            let error_code_fmt = match report.error_code {
                Some(error_code) => highlight(
                    report.kind.as_colour() | Modifier::Bold,
                    format!("[{:0>4}]", error_code.to_num()),
                ),
                None => String::new(),
            };

            writeln!(
                f,
                "{}{}: {}",
                report.kind,
                error_code_fmt,
                highlight(Modifier::Bold, &report.title)
            )?;

            for element in &report.contents {
                match element {
                    ReportElement::Label(label) => {
                        let arrow = highlight(Colour::Blue, "-->");
                        let location = match self.source {
                            Some(source) => format!("{source}:{}", label.span),
                            None => label.span.to_string(),
                        };

                        if label.message.is_empty() {
                            writeln!(f, "  {arrow} {location}")?;
                        } else {
                            writeln!(f, "  {arrow} {location}: {}", label.message)?;
                        }
                    }
                    ReportElement::Note(note) => {
                        writeln!(f, "   = {}: {}", highlight(Modifier::Bold, &note.label), note.message)?;
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test_super {
    use jpat_error_codes::JpatErrorCode;
    use jpat_source::location::Span;
    use jpat_utils::highlight::set_colours_enabled;

    use super::*;
    use crate::reporter::Reporter;

    #[test]
    fn test_render_report() {
        set_colours_enabled(false);

        let mut reporter = Reporter::new();
        reporter
            .error()
            .code(JpatErrorCode::NotExhaustive)
            .title("the switch expression does not cover all possible input values")
            .add_labelled_span(Span::new(4, 12), "pattern `lib.R(lib.B _)` not covered")
            .add_note("in switch `test`");

        assert!(reporter.has_errors());
        let reports = reporter.into_reports();
        let rendered = ReportWriter::new(&reports).with_source("case.json").to_string();

        assert_eq!(
            rendered,
            "error[0001]: the switch expression does not cover all possible input values\n  \
             --> case.json:4:12: pattern `lib.R(lib.B _)` not covered\n   = note: in switch \
             `test`\n"
        );
    }
}
