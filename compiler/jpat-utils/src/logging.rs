//! jpat logging utilities. This defines a simple logger with a style which
//! should be used across the workspace to log and print messages.

use once_cell::sync::OnceCell;

use crate::{
    highlight::{highlight, Colour, Modifier},
    log::{Level, Log, Metadata, Record},
    stream::CompilerOutputStream,
    stream_writeln,
};

/// The logger that is used by the checker for `log!` statements.
#[derive(Default)]
pub struct CompilerLogger {
    /// The output stream that the logger will write to.
    pub output_stream: OnceCell<CompilerOutputStream>,

    /// The error stream that the logger will write to.
    pub error_stream: OnceCell<CompilerOutputStream>,
}

impl CompilerLogger {
    /// Create a new compiler logger.
    pub const fn new() -> Self {
        Self { output_stream: OnceCell::new(), error_stream: OnceCell::new() }
    }

    /// Attach the streams that the logger writes to. The first call wins,
    /// subsequent calls leave the existing streams in place.
    pub fn set_streams(&self, output: CompilerOutputStream, error: CompilerOutputStream) {
        let _ = self.output_stream.set(output);
        let _ = self.error_stream.set(error);
    }
}

impl Log for CompilerLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        // Custom colour formatting for the log level
        let level_prefix = match record.level() {
            Level::Error => highlight(Colour::Red | Modifier::Bold, "error"),
            Level::Warn => highlight(Colour::Yellow | Modifier::Bold, "warn"),
            Level::Info => highlight(Colour::Blue | Modifier::Bold, "info"),
            Level::Debug => highlight(Colour::Blue | Modifier::Bold, "debug"),
            Level::Trace => highlight(Colour::Magenta | Modifier::Bold, "trace"),
        };

        let stream = if record.level() <= Level::Warn {
            self.error_stream.get()
        } else {
            self.output_stream.get()
        };

        // Streams that were never attached fall back to standard error.
        let mut out = stream.cloned().unwrap_or_else(CompilerOutputStream::stderr);
        stream_writeln!(out, "{level_prefix}: {}", record.args());
    }

    fn flush(&self) {}
}
