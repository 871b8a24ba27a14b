//! Structured logging system with visual formatting.
//!
//! This module provides the logging system used by both the calculator library and
//! the `prayertimes` binary. It includes different log levels and special formatting
//! functions for creating structured output with Unicode box drawing characters.
//!
//! The logger supports runtime enable/disable functionality for quiet operation
//! (JSON output, tests), and a separate debug switch that gates `log_debug!` so the
//! solver can describe its refinement iterations without polluting normal output.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);
static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

/// Main logging interface providing structured output formatting.
///
/// ## Logging Conventions
///
/// - **`log_block_start!`**: Starts a new conceptual block (e.g. "Prayer times for ...").
///   Prepends an empty pipe `┃` for spacing, then prints `┣ message`.
/// - **`log_indented!`**: Nested details belonging to a parent message. Prints `┃   message`.
/// - **`log_pipe!`**: A single empty `┃` line for vertical spacing, typically before
///   `log_warning!` or `log_debug!`.
/// - **`log_version!`**: The startup header `┏ prayertimes vX.Y.Z ━━╸`.
/// - **`log_end!`**: The final termination marker `╹`.
/// - **`log_warning!`, `log_debug!`**: Semantic messages with a colored `[LEVEL]`
///   prefix. `log_debug!` only prints when [`Log::set_debug`] has been enabled.
/// - **`log_error_exit!`**: A red `[ERROR]` line that closes the output flow.
pub struct Log;

impl Log {
    /// Enable or disable logging.
    pub fn set_enabled(enabled: bool) {
        LOGGING_ENABLED.store(enabled, Ordering::SeqCst);
    }

    /// Check if logging is currently enabled.
    pub fn is_enabled() -> bool {
        LOGGING_ENABLED.load(Ordering::SeqCst)
    }

    /// Enable or disable `log_debug!` output.
    pub fn set_debug(enabled: bool) {
        DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
    }

    /// Check if debug output is enabled (and logging as a whole is on).
    pub fn is_debug_enabled() -> bool {
        Self::is_enabled() && DEBUG_ENABLED.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
thread_local! {
    static CAPTURED: std::cell::RefCell<Option<String>> = const { std::cell::RefCell::new(None) };
}

// Public function that routes output (needed by macros)
pub fn write_output(text: &str) {
    #[cfg(test)]
    {
        let captured = CAPTURED.with_borrow_mut(|buffer| match buffer {
            Some(buffer) => {
                buffer.push_str(text);
                true
            }
            None => false,
        });
        if captured {
            return;
        }
    }

    print!("{text}");
    let _ = std::io::stdout().flush();
}

/// Run `f` and return everything it logged on this thread instead of printing it.
#[cfg(test)]
pub(crate) fn capture_output(f: impl FnOnce()) -> String {
    CAPTURED.set(Some(String::new()));
    f();
    CAPTURED.take().unwrap_or_default()
}

// # Logging Macros

/// Log an indented message for sub-items or details within a block.
#[macro_export]
macro_rules! log_indented {
    ($fmt:literal $($arg:tt)*) => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            let message = format!($fmt $($arg)*);
            $crate::logger::write_output(&format!("┃   {message}\n"));
        }
    }};
    ($expr:expr) => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            let expr = $expr;
            $crate::logger::write_output(&format!("┃   {expr}\n"));
        }
    }};
}

/// Log a visual pipe separator for vertical spacing.
#[macro_export]
macro_rules! log_pipe {
    () => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            $crate::logger::write_output("┃\n");
        }
    }};
}

/// Log a block start message, initiating a new conceptual block of information.
#[macro_export]
macro_rules! log_block_start {
    ($fmt:literal $($arg:tt)*) => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            let message = format!($fmt $($arg)*);
            $crate::logger::write_output(&format!("┃\n┣ {message}\n"));
        }
    }};
    ($expr:expr) => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            let expr = $expr;
            $crate::logger::write_output(&format!("┃\n┣ {expr}\n"));
        }
    }};
}

/// Log the application version header.
#[macro_export]
macro_rules! log_version {
    () => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            let version = env!("CARGO_PKG_VERSION");
            $crate::logger::write_output(&format!("┏ prayertimes v{version} ━━╸\n"));
        }
    }};
}

/// Log the final termination marker.
#[macro_export]
macro_rules! log_end {
    () => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            $crate::logger::write_output("╹\n");
        }
    }};
}

/// Log a warning message with pipe prefix and yellow-colored text.
#[macro_export]
macro_rules! log_warning {
    ($fmt:literal $($arg:tt)*) => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            let message = format!($fmt $($arg)*);
            $crate::logger::write_output(&format!("┣[\x1b[33mWARNING\x1b[0m] {message}\n"));
        }
    }};
    ($expr:expr) => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            let expr = $expr;
            $crate::logger::write_output(&format!("┣[\x1b[33mWARNING\x1b[0m] {expr}\n"));
        }
    }};
}

/// Log an error message followed by the terminal corner, ending the output flow.
#[macro_export]
macro_rules! log_error_exit {
    ($fmt:literal $($arg:tt)*) => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            let message = format!($fmt $($arg)*);
            $crate::logger::write_output(&format!("┃\n┗[\x1b[31mERROR\x1b[0m] {message}\n"));
        }
    }};
    ($expr:expr) => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            let expr = $expr;
            $crate::logger::write_output(&format!("┃\n┗[\x1b[31mERROR\x1b[0m] {expr}\n"));
        }
    }};
}

/// Log a debug message with pipe prefix. Silent unless debug output is enabled.
#[macro_export]
macro_rules! log_debug {
    ($fmt:literal $($arg:tt)*) => {{
        use $crate::logger::Log;
        if Log::is_debug_enabled() {
            let message = format!($fmt $($arg)*);
            $crate::logger::write_output(&format!("┣[\x1b[32mDEBUG\x1b[0m] {message}\n"));
        }
    }};
    ($expr:expr) => {{
        use $crate::logger::Log;
        if Log::is_debug_enabled() {
            let expr = $expr;
            $crate::logger::write_output(&format!("┣[\x1b[32mDEBUG\x1b[0m] {expr}\n"));
        }
    }};
}

