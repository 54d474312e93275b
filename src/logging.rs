use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, EnvFilter};

fn filter(verbose: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directive = match verbose {
            0 => "warn",
            1 => "sowa_cli=info",
            2 => "sowa_cli=debug",
            _ => "trace",
        };
        EnvFilter::new(directive)
    })
}

/// Logs to stderr. Used for one-shot subcommands.
pub fn init_stderr(verbose: u8) {
    let _ = fmt()
        .without_time()
        .with_env_filter(filter(verbose))
        .with_target(verbose != 0)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Logs to `sowa.log` in `dir` so the TUI owns the terminal. Keep the guard
/// alive until exit or buffered lines are lost.
pub fn init_file(dir: &Path, verbose: u8) -> Option<WorkerGuard> {
    std::fs::create_dir_all(dir).ok()?;
    let appender = tracing_appender::rolling::never(dir, "sowa.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    fmt()
        .with_ansi(false)
        .with_env_filter(filter(verbose))
        .with_writer(writer)
        .try_init()
        .ok()?;
    Some(guard)
}
