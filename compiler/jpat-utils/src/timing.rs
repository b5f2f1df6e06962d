//! Timing utilities.

use std::time::{Duration, Instant};

use log::{log_enabled, Level};

/// Execute the given closure while timing it, and pass the duration to the
/// second closure. The timing is only performed if the given log level is
/// enabled.
#[inline(always)]
pub fn timed<T>(op: impl FnOnce() -> T, level: Level, on_elapsed: impl FnOnce(Duration)) -> T {
    if log_enabled!(level) {
        let begin = Instant::now();
        let result = op();
        on_elapsed(begin.elapsed());
        result
    } else {
        op()
    }
}
