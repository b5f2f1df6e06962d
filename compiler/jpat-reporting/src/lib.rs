//! jpat error and warning reporting. Stages collect their diagnostics in a
//! [diagnostic::DiagnosticStore], convert them into [report::Report]s via a
//! [reporter::Reporter], and the driver renders them with a
//! [writer::ReportWriter].
pub mod diagnostic;
pub mod report;
pub mod reporter;
pub mod writer;

pub use jpat_error_codes;
