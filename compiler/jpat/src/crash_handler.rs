//! jpatc crash handler.
use std::{io::Write, panic::PanicInfo, process::exit, sync::atomic, thread};

use backtrace::Backtrace;

pub(crate) fn panic_handler(info: &PanicInfo) {
    // keep track to ensure that we only panic once and multiple threads can exit gracefully!
    static PANIC_ONCE: atomic::AtomicBool = atomic::AtomicBool::new(false);

    if !PANIC_ONCE.swap(true, atomic::Ordering::SeqCst) {
        let stderr = std::io::stderr();
        let mut stderr = stderr.lock();

        let _ = write!(&mut stderr, "Sorry :^(\nInternal Panic");

        if let Some(s) = info.payload().downcast_ref::<&str>() {
            let _ = writeln!(&mut stderr, ": {s}\n");
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            let _ = writeln!(&mut stderr, ": {s}\n");
        } else {
            let _ = writeln!(&mut stderr, "\n");
        }

        // Display the location if we can...
        if let Some(location) = info.location() {
            let _ = writeln!(
                &mut stderr,
                "Occurred in file '{}' at {}:{}",
                location.file(),
                location.line(),
                location.column()
            );
        }

        let backtrace = Backtrace::new();

        // Print backtrace and thread name if available
        if let Some(name) = thread::current().name() {
            let _ = writeln!(&mut stderr, "Backtrace for thread \"{name}\":\n{backtrace:?}");
        } else {
            let _ = writeln!(&mut stderr, "Backtrace:\n{backtrace:?}");
        }

        let _ = writeln!(&mut stderr, "This is a bug in jpatc, please file a bug report.");
    }

    // Now call exit after we have printed all the relevant info
    exit(1);
}
