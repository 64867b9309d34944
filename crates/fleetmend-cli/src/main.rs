//! fleetmend: restart fleet units flagged ineligible by the remote
//! health authority.
//!
//! One invocation runs one reconciliation pass and exits; scheduling is
//! external (cron or a systemd timer). Only usage and startup faults
//! exit non-zero. Once the pass is underway, failures are observability
//! events in the log sinks, and the process exits zero even when
//! individual units failed to restart.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use fleetmend_core::FleetConfig;
use fleetmend_reconcile::Reconciler;
use fleetmend_report::AuthorityClient;
use fleetmend_restart::ComposeController;

mod logging;

#[derive(Parser)]
#[command(
    name = "fleetmend",
    about = "Restart compose-managed fleet units flagged ineligible by the remote health authority",
    version
)]
struct Cli {
    /// Public address the fleet's endpoints are reported under.
    address: String,

    /// Directory holding the unit definition files; also receives the
    /// durable log.
    working_dir: PathBuf,

    /// Path to fleet.toml. Built-in defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init(&cli.working_dir)?;

    let config = match &cli.config {
        Some(path) => {
            let config = FleetConfig::from_file(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?;
            info!(config = %path.display(), "configuration loaded");
            config
        }
        None => FleetConfig::default(),
    };

    let client =
        AuthorityClient::new(&config.authority).context("failed to build the report client")?;
    let controller = ComposeController::new(&cli.working_dir, &config.units.primary_container);
    let reconciler = Reconciler::new(config.ports, &cli.working_dir, controller);

    reconciler.run(&client, &cli.address).await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn both_positional_arguments_are_required() {
        assert!(Cli::try_parse_from(["fleetmend", "203.0.113.7"]).is_err());
        assert!(Cli::try_parse_from(["fleetmend"]).is_err());

        let cli = Cli::try_parse_from(["fleetmend", "203.0.113.7", "/srv/fleet"]).unwrap();
        assert_eq!(cli.address, "203.0.113.7");
        assert_eq!(cli.working_dir, PathBuf::from("/srv/fleet"));
        assert!(cli.config.is_none());
    }

    #[test]
    fn extra_arguments_are_rejected() {
        assert!(Cli::try_parse_from(["fleetmend", "a", "b", "c"]).is_err());
    }
}
