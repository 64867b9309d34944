//! Dual-sink logging: the operator's console plus a durable file.
//!
//! Both sinks carry timestamps and the same default level. The file
//! appender is used synchronously, so every event reaches the log as it
//! occurs and a crash mid-run leaves a faithful partial record.

use std::path::Path;

use anyhow::Context;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

/// Name of the append-only log file inside the working directory.
pub const LOG_FILE: &str = "fleetmend.log";

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber: ANSI console on stdout plus an
/// append-only `fleetmend.log` next to the unit definition files.
pub fn init(working_dir: &Path) -> anyhow::Result<()> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix("fleetmend")
        .filename_suffix("log")
        .build(working_dir)
        .context("failed to open the durable log file")?;

    let console = fmt::layer().with_filter(default_filter());
    let file = fmt::layer()
        .with_writer(appender)
        .with_ansi(false)
        .with_filter(default_filter());

    Registry::default()
        .with(console)
        .with(file)
        .try_init()
        .context("failed to install the tracing subscriber")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_writes_the_durable_log() {
        let dir = tempfile::TempDir::new().unwrap();
        init(dir.path()).unwrap();

        tracing::info!("probe line");

        let content = std::fs::read_to_string(dir.path().join(LOG_FILE)).unwrap();
        assert!(content.contains("probe line"));
    }
}
