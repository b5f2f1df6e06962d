//! jpatc, checks the switches of a JSON workspace and prints the reports.
mod crash_handler;

use std::{io::IsTerminal, panic, process::exit};

use crash_handler::panic_handler;
use jpat_pipeline::{
    args::parse_settings_from_args,
    error::PipelineError,
    interface::{emit_reports, run},
};
use jpat_reporting::report::Report;
use jpat_utils::{
    highlight::set_colours_enabled,
    log::{self, LevelFilter},
    logging::CompilerLogger,
    stream::CompilerOutputStream,
    timing::timed,
};

pub static CONSOLE_LOGGER: CompilerLogger = CompilerLogger::new();

fn main() {
    // Initial grunt work, panic handler and logger setup...
    panic::set_hook(Box::new(panic_handler));
    log::set_logger(&CONSOLE_LOGGER).unwrap_or_else(|_| panic!("couldn't initiate logger"));
    CONSOLE_LOGGER.set_streams(CompilerOutputStream::stdout(), CompilerOutputStream::stderr());

    set_colours_enabled(std::io::stderr().is_terminal());
    let mut error_stream = CompilerOutputStream::stderr();

    let settings = match parse_settings_from_args(std::env::args_os()) {
        Ok(settings) => settings,
        // Help, version and usage errors are printed by clap itself.
        Err(PipelineError::ParseError(error)) => error.exit(),
        Err(error) => {
            emit_reports(&error.into_reports(), "jpatc", &mut error_stream);
            exit(1);
        }
    };

    // if debug is specified, we want to log everything that is debug level...
    if settings.debug {
        log::set_max_level(LevelFilter::Debug);
    }

    let source = settings.workspace().map(|path| path.display().to_string()).unwrap_or_default();

    let result = timed(|| run(&settings), log::Level::Debug, |elapsed| log::debug!("check took {elapsed:?}"));

    let reports = match result {
        Ok(outcome) => {
            for checked in &outcome.switches {
                log::debug!(
                    "switch `{}`: exhaustive={}, accepted labels={}",
                    checked.name,
                    checked.report.exhaustive,
                    checked.report.accepted.len()
                );
            }

            outcome.reports
        }
        Err(error) => error.into_reports(),
    };

    if settings.emit_errors {
        emit_reports(&reports, &source, &mut error_stream);
    }

    if reports.iter().any(Report::is_error) {
        exit(1);
    }
}
