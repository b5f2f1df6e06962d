//! A stream interface for the compiler to write information to. The driver
//! writes to the standard streams, while the test runner captures output in
//! an owned buffer so that it can be compared against snapshots.

use std::sync::{Arc, Mutex};

/// A [CompilerOutputStream] specifies where the output of the checker
/// should be written to.
#[derive(Debug)]
pub enum CompilerOutputStream {
    /// A [CompilerOutputStream] that points to the `stdout` stream.
    Stdout(std::io::Stdout),

    /// A [CompilerOutputStream] that points to the `stderr` stream.
    Stderr(std::io::Stderr),

    /// A [CompilerOutputStream] that is backed by a [Mutex] and a [Vec].
    Owned(Arc<Mutex<Vec<u8>>>),
}

impl CompilerOutputStream {
    /// Create a new [CompilerOutputStream] which uses "stdout" as the output
    /// stream.
    pub fn stdout() -> Self {
        CompilerOutputStream::Stdout(std::io::stdout())
    }

    /// Create a new [CompilerOutputStream] which uses "stderr" as the output
    /// stream.
    pub fn stderr() -> Self {
        CompilerOutputStream::Stderr(std::io::stderr())
    }

    /// Create an owned [CompilerOutputStream].
    pub fn owned() -> Self {
        CompilerOutputStream::Owned(Arc::new(Mutex::new(Vec::new())))
    }

    /// Take the contents that have been written to an owned stream. Standard
    /// streams yield an empty string.
    pub fn contents(&self) -> String {
        match self {
            CompilerOutputStream::Owned(stream) => match stream.lock() {
                Ok(buffer) => String::from_utf8_lossy(&buffer).into_owned(),
                Err(poisoned) => String::from_utf8_lossy(&poisoned.into_inner()).into_owned(),
            },
            _ => String::new(),
        }
    }
}

impl Clone for CompilerOutputStream {
    fn clone(&self) -> Self {
        match self {
            CompilerOutputStream::Stdout(_) => CompilerOutputStream::Stdout(std::io::stdout()),
            CompilerOutputStream::Stderr(_) => CompilerOutputStream::Stderr(std::io::stderr()),
            CompilerOutputStream::Owned(stream) => CompilerOutputStream::Owned(stream.clone()),
        }
    }
}

impl std::io::Write for CompilerOutputStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            CompilerOutputStream::Stdout(stream) => stream.write(buf),
            CompilerOutputStream::Stderr(stream) => stream.write(buf),
            CompilerOutputStream::Owned(stream) => {
                let mut stream = stream
                    .lock()
                    .map_err(|_| std::io::Error::other("output stream lock was poisoned"))?;
                stream.extend_from_slice(buf);
                Ok(buf.len())
            }
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            CompilerOutputStream::Stdout(stream) => stream.flush(),
            CompilerOutputStream::Stderr(stream) => stream.flush(),
            CompilerOutputStream::Owned(_) => Ok(()),
        }
    }
}

/// Write a line to the given [CompilerOutputStream]. Write failures are
/// ignored, there is nowhere left to report them to.
#[macro_export]
macro_rules! stream_writeln {
    ($stream:expr, $($arg:tt)*) => {{
        use std::io::Write as _;
        let _ = writeln!($stream, $($arg)*);
    }};
}

/// Write a line to the standard error stream, without going through a
/// [CompilerOutputStream].
#[macro_export]
macro_rules! stream_less_ewriteln {
    ($($arg:tt)*) => {{
        use std::io::Write as _;
        let _ = writeln!(std::io::stderr(), $($arg)*);
    }};
}

#[cfg(test)]
mod test_super {
    use super::*;

    #[test]
    fn test_owned_stream_captures_output() {
        let mut stream = CompilerOutputStream::owned();
        let mut copy = stream.clone();

        stream_writeln!(stream, "hello {}", 1);
        stream_writeln!(copy, "world");

        assert_eq!(stream.contents(), "hello 1\nworld\n");
        assert_eq!(CompilerOutputStream::stdout().contents(), "");
    }
}
