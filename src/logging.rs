use std::sync::atomic::{AtomicBool, Ordering};

/// Verbose diagnostics switch, off by default.
pub static VERBOSE_LOGGING: AtomicBool = AtomicBool::new(false);

pub fn enable_verbose_logging() {
    VERBOSE_LOGGING.store(true, Ordering::Relaxed);
}

#[inline]
pub fn is_verbose() -> bool {
    VERBOSE_LOGGING.load(Ordering::Relaxed)
}

/// Runs `f` with verbose logging switched off, then restores the previous
/// setting.
pub fn suspended<T>(f: impl FnOnce() -> T) -> T {
    let was = VERBOSE_LOGGING.swap(false, Ordering::Relaxed);
    let r = f();
    VERBOSE_LOGGING.store(was, Ordering::Relaxed);
    r
}

/// Writes a diagnostic line to stderr when verbose logging is on.
/// Stdout is reserved for the generation report.
#[macro_export]
macro_rules! vlog {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!("[life] {}", format!($($arg)*));
        }
    };
}
