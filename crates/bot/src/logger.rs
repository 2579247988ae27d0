use std::{fs, fs::OpenOptions, path::PathBuf};

use chrono::Local;
use tracing_appender::non_blocking;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Writer guards for the non-blocking appenders. Logging stops flushing once
/// this is dropped, so main has to hold it for the whole process lifetime.
pub struct TracingGuards {
    _file: tracing_appender::non_blocking::WorkerGuard,
    _stdout: tracing_appender::non_blocking::WorkerGuard,
}

/// Set up tracing with a daily log file under `logs/` plus ANSI stdout.
pub fn init_tracing() -> TracingGuards {
    let (file_writer, file_guard) = daily_file_appender("logs", "arbitpro");

    let (stdout_writer, stdout_guard) = non_blocking(std::io::stdout());

    let env_filter = EnvFilter::from_default_env().add_directive("info".parse().unwrap());

    // file logging stays at info regardless of RUST_LOG
    let file_filter = EnvFilter::new("info");

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer)
                .with_filter(file_filter),
        )
        .with(fmt::layer().with_writer(stdout_writer).with_ansi(true))
        .init();

    TracingGuards {
        _file: file_guard,
        _stdout: stdout_guard,
    }
}

/// Opens `logs/arbitpro.2026-08-28.log` style files, one per day of process
/// start.
fn daily_file_appender(
    base_dir: &str,
    prefix: &str,
) -> (
    non_blocking::NonBlocking,
    tracing_appender::non_blocking::WorkerGuard,
) {
    let date = Local::now().format("%Y-%m-%d").to_string();
    let filename = format!("{prefix}.{date}.log");

    let mut path = PathBuf::from(base_dir);
    fs::create_dir_all(&path).expect("Failed to create log directory");
    path.push(filename);

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .expect("Failed to open log file");

    non_blocking(file)
}
