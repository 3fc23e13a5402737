#![warn(clippy::all, rust_2018_idioms)]

/// Logging macros that prefix every message with `[file:module:line]`
///
/// `log_*` macros go through the `log` crate and reach the tracing subscriber
/// via the `LogTracer` bridge installed at startup; `trace_*` macros write to
/// tracing directly.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!("[{}:{}:{}] {}", file!(), module_path!(), line!(), format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        log::error!("[{}:{}:{}] {}", file!(), module_path!(), line!(), format!($($arg)*))
    };
}

#[macro_export]
macro_rules! trace_info {
    ($($arg:tt)*) => {
        tracing::info!("[{}:{}:{}] {}", file!(), module_path!(), line!(), format!($($arg)*))
    };
}

/*
Log level guidelines:

DEBUG: SDK client setup, per-page pagination progress, sheet rendering, config loading
INFO:  One line per user processed, the final "saved to" line, startup banner
WARN:  Recoverable surprises (unparseable CloudTrail record, unreadable report.json)
ERROR: The run failed; the message carries the full anyhow context chain

USAGE:
```rust
log_info!("Processing logs for user: {}", user);
// [src/app/user_activity_report/generator.rs:trail_report::app::user_activity_report::generator:46] Processing logs for user: alice
```
*/
