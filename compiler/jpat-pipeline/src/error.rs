//! Defines the error type for the jpat pipeline. These errors can originate
//! from the parsing of specified arguments, reading the workspace, or when
//! resolving the names that the workspace refers to.
use std::{io, path::PathBuf};

use clap::error::ErrorKind;
use jpat_error_codes::JpatErrorCode;
use jpat_reporting::{
    diagnostic::IntoReports,
    report::ReportKind,
    reporter::{Reporter, Reports},
};
use jpat_types::store::TyStoreError;

/// Errors that might occur when attempting to check a workspace.
#[derive(Debug)]
pub enum PipelineError {
    /// Some parsing error that clap emits, it could be benign.
    ParseError(clap::Error),

    /// A configuration key that expects a value was given none.
    MissingValue(String),

    /// An unknown configuration key.
    UnknownKey(String),

    /// When a configuration key value is not a valid option
    /// for the specified key.
    InvalidValue(String, String),

    /// The requested pipeline configuration expected a workspace.
    MissingWorkspace,

    /// The workspace could not be read.
    ReadWorkspace {
        /// The path of the workspace.
        path: PathBuf,

        /// The specific [io::Error] that occurred.
        error: io::Error,
    },

    /// The workspace is not valid JSON, or does not have the expected shape.
    MalformedWorkspace { path: PathBuf, error: serde_json::Error },

    /// The types of the workspace do not form a valid hierarchy.
    Types(Vec<TyStoreError>),

    /// A switch refers to a type that is not declared.
    UnknownType { name: String, switch: String },
}

impl From<TyStoreError> for PipelineError {
    fn from(error: TyStoreError) -> Self {
        PipelineError::Types(vec![error])
    }
}

impl PipelineError {
    /// Convert the error into its [Reports].
    pub fn into_reports(self) -> Reports {
        let mut reporter = Reporter::new();
        self.add_to_reports(&mut reporter);
        reporter.into_reports()
    }
}

impl IntoReports for PipelineError {
    fn add_to_reports(&self, reporter: &mut Reporter) {
        match self {
            PipelineError::ParseError(error) => {
                let kind = match error.kind() {
                    ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => ReportKind::Info,
                    _ => ReportKind::Error,
                };

                reporter.report(kind).title(error.to_string().trim_end());
            }
            PipelineError::MissingValue(key) => {
                reporter.error().title(format!("configuration key `{key}` expects a value"));
            }
            PipelineError::UnknownKey(key) => {
                reporter.error().title(format!("unknown configuration key `{key}`"));
            }
            PipelineError::InvalidValue(key, value) => {
                reporter.error().title(format!("invalid value `{value}` for configuration key `{key}`"));
            }
            PipelineError::MissingWorkspace => {
                reporter.error().title("no workspace was specified");
            }
            PipelineError::ReadWorkspace { path, error } => {
                let kind = error.kind();

                let message = error.raw_os_error().map_or_else(
                    || format!("couldn't read `{}`, {}", path.to_string_lossy(), kind),
                    |code| format!("couldn't read `{}`, {} (code: {})", path.to_string_lossy(), kind, code),
                );

                reporter.error().title(message);
            }
            PipelineError::MalformedWorkspace { path, error } => {
                reporter
                    .error()
                    .title(format!("malformed workspace `{}`", path.to_string_lossy()))
                    .add_note(error);
            }
            PipelineError::Types(errors) => {
                for error in errors {
                    let code = match error {
                        TyStoreError::Duplicate { .. } => JpatErrorCode::DuplicateType,
                        TyStoreError::Undefined { .. } => JpatErrorCode::UnknownType,
                        TyStoreError::PermittedNotSubtype { .. }
                        | TyStoreError::SubtypeNotPermitted { .. }
                        | TyStoreError::InvalidSupertype { .. } => JpatErrorCode::InvalidPermits,
                    };

                    reporter
                        .error()
                        .code(code)
                        .title(error)
                        .add_note(format!("in the declaration of `{}`", error.subject()));
                }
            }
            PipelineError::UnknownType { name, switch } => {
                reporter
                    .error()
                    .code(JpatErrorCode::UnknownType)
                    .title(format!("cannot find type `{name}`"))
                    .add_note(format!("in switch `{switch}`"));
            }
        }
    }
}
