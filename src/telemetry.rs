use anyhow::{anyhow, Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Where log lines go.
pub enum Sink<'a> {
    Stderr,
    /// The interactive form owns the terminal, so it logs to a file.
    File(&'a Path),
}

fn filter(level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid log level/filter '{}'", level)),
    }
}

pub fn init(level: &str, sink: Sink<'_>) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter(level)?)
        .with_target(false)
        .compact()
        .with_ansi(false);

    match sink {
        Sink::Stderr => builder.with_writer(std::io::stderr).try_init(),
        Sink::File(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            builder.with_writer(Mutex::new(file)).try_init()
        }
    }
    .map_err(|e| anyhow!("telemetry error: {}", e))
}
