//! jpat command line arguments. Flags and the subcommand are parsed with
//! `clap`, configuration keys are given as `-C<key>=<value>` and applied to
//! the [CompilerSettings] afterwards.
use std::{ffi::OsString, path::PathBuf};

use clap::{Parser, Subcommand};

use crate::{error::PipelineError, settings::CompilerSettings};

/// CompilerOptions is a structural representation of what arguments the
/// checker can take when running.
#[derive(Parser, Debug)]
#[command(name = "jpatc", version, about = "Check the exhaustiveness of switches over sealed types and records")]
#[command(disable_colored_help = true)]
pub struct CompilerOptions {
    /// Run the checker in debug mode
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Configuration options in the form of `-C<key>=<value>`
    #[arg(short = 'C', value_name = "KEY[=VALUE]", global = true)]
    pub configuration: Vec<String>,

    /// Checker mode
    #[command(subcommand)]
    pub mode: SubCmd,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SubCmd {
    /// Check every switch of a JSON workspace
    Check {
        /// The workspace to check
        workspace: PathBuf,
    },
}

/// This function is used to parse the command line arguments that are
/// passed to the checker, it will return a [CompilerSettings] struct
/// that contains all of the settings that the pipeline should use. If
/// there is an error, this will return an error that can be
/// dealt with by the caller.
pub fn parse_settings_from_args<I, T>(args: I) -> Result<CompilerSettings, PipelineError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let options = CompilerOptions::try_parse_from(args).map_err(PipelineError::ParseError)?;
    CompilerSettings::try_from(options)
}

impl TryFrom<CompilerOptions> for CompilerSettings {
    type Error = PipelineError;

    fn try_from(options: CompilerOptions) -> Result<Self, Self::Error> {
        let SubCmd::Check { workspace } = options.mode;

        let mut settings = CompilerSettings::new(workspace);
        settings.debug = options.debug;

        for arg in &options.configuration {
            parse_arg_configuration(&mut settings, arg)?;
        }

        Ok(settings)
    }
}

/// This function will parse a single `-C<key>=<value>` argument and apply the
/// specified configuration option to the [CompilerSettings]. Some keys may
/// not have a value.
fn parse_arg_configuration(settings: &mut CompilerSettings, arg: &str) -> Result<(), PipelineError> {
    // First try and see if we have been provided a key-value pair, if not
    // then we will assume that the key is the argument and the value is
    // `None`.
    let (key, value) = match arg.split_once('=') {
        Some((key, value)) => (key.to_string(), Some(value.to_string())),
        None => (arg.to_string(), None),
    };

    // When a value is expected from a key, but none is provided, this
    // closure will be used to return an error.
    let expected_value = || PipelineError::MissingValue(key.clone());

    match key.as_str() {
        "max-base-checks" => {
            let value = value.ok_or_else(expected_value)?;

            settings.exhaustiveness_settings.max_base_checks = match value.parse::<usize>() {
                Ok(limit) if limit > 0 => limit,
                _ => return Err(PipelineError::InvalidValue(key, value)),
            };
        }
        "emit-witness-limit" => {
            let value = value.ok_or_else(expected_value)?;

            settings.exhaustiveness_settings.witness_limit =
                value.parse().map_err(|_| PipelineError::InvalidValue(key.clone(), value.clone()))?;
        }
        "report-only-errors" => {
            settings.report_only_errors = match value.as_deref() {
                None | Some("true") => true,
                Some("false") => false,
                Some(value) => return Err(PipelineError::InvalidValue(key, value.to_string())),
            };
        }
        _ => {
            return Err(PipelineError::UnknownKey(key));
        }
    };

    Ok(())
}
