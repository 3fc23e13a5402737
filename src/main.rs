#![warn(clippy::all, rust_2018_idioms)]

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use trail_report::app::user_activity_report::TimeWindow;
use trail_report::app::{generate, ReportConfig};
use trail_report::{log_error, trace_info};

const APP_NAME: &str = "trail-report";

const DEFAULT_LOG_FILTER: &str = "trail_report=info,aws_config=warn,aws_sigv4=warn,aws_smithy_runtime=warn,aws_smithy_runtime_api=warn,hyper=warn";

fn log_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "", APP_NAME).map(|dirs| dirs.data_dir().join("logs"))
}

fn open_log_file(log_dir: &Path) -> Option<(File, PathBuf)> {
    if let Err(e) = std::fs::create_dir_all(log_dir) {
        eprintln!("Failed to create log directory {:?}: {}", log_dir, e);
        return None;
    }

    let log_path = log_dir.join("trail-report.log");
    let file = match std::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Failed to open log file {:?}: {}", log_path, e);
            return None;
        }
    };

    // Set restrictive permissions (owner read/write only)
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(metadata) = file.metadata() {
            let mut perms = metadata.permissions();
            perms.set_mode(0o600);
            if let Err(e) = std::fs::set_permissions(&log_path, perms) {
                eprintln!("[SECURITY] Failed to set log file permissions: {}", e);
            }
        }
    }

    Some((file, log_path))
}

fn init_logging() {
    // RUST_LOG wins over the built-in filter
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let log_file = log_dir().and_then(|dir| open_log_file(&dir));
    let log_path = log_file.as_ref().map(|(_, path)| path.clone());

    // 1. Filter layer
    // 2. Console layer (progress for whoever ran the report)
    // 3. File layer (persistent history, no ANSI colors)
    let file_layer = log_file.map(|(file, _)| {
        fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
    });

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(file_layer);

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return;
    }

    // Bridge log crate events (log_* macros) to tracing.
    // This must be done AFTER setting the tracing subscriber
    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("Failed to initialize log-to-tracing bridge: {}", e);
    }

    match log_path {
        Some(path) => tracing::debug!("Logging initialized to: {:?}", path),
        None => tracing::debug!("File logging unavailable, console only"),
    }
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        let crash_msg = format!(
            "{} crashed!\n\
             Panic occurred at: {}\n\
             Details: {}\n\
             Backtrace:\n{:?}\n",
            APP_NAME,
            panic_info
                .location()
                .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
                .unwrap_or_else(|| "unknown location".to_string()),
            panic_info
                .payload()
                .downcast_ref::<&str>()
                .copied()
                .or_else(|| panic_info.payload().downcast_ref::<String>().map(|s| s.as_str()))
                .unwrap_or("unknown panic"),
            std::backtrace::Backtrace::force_capture()
        );

        eprintln!("\n{}", crash_msg);

        if let Some(log_dir) = log_dir() {
            let _ = std::fs::create_dir_all(&log_dir);
            let crash_log_path = log_dir.join("crash.log");

            if let Ok(mut file) = std::fs::OpenOptions::new()
                .append(true)
                .create(true)
                .open(&crash_log_path)
            {
                use std::io::Write;
                let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S");
                let _ = writeln!(file, "\n=== CRASH at {} ===\n{}", timestamp, crash_msg);
                eprintln!("Crash log written to: {:?}", crash_log_path);
            }
        }
    }));
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    setup_panic_handler();
    init_logging();

    trace_info!(
        "{} {} starting ({}@{})",
        APP_NAME,
        env!("CARGO_PKG_VERSION"),
        env!("GIT_BRANCH"),
        env!("GIT_COMMIT")
    );

    let config = ReportConfig::load();
    let output_path = config.output_path_for(&TimeWindow::yesterday());

    // Failures are reported, not propagated: the process always exits normally
    match generate(&config.identities, &config.region, &output_path).await {
        Ok(summary) => tracing::info!(
            "Wrote {} events for {} users ({} .. {})",
            summary.total_events(),
            summary.sheets.len(),
            summary.window.start,
            summary.window.end
        ),
        Err(e) => log_error!("An error occurred: {:#}", e),
    }
}
