//! The reconciliation pass.

use std::path::PathBuf;

use tracing::{error, info, warn};

use fleetmend_core::{PortPlan, Unit, resolve_unit};
use fleetmend_report::{AuthorityClient, ineligible_ports};
use fleetmend_restart::{ProcessController, RestartOutcome};

use crate::summary::{PortOutcome, PortStatus, RunSummary};

/// Drives one fetch, filter, resolve, restart cycle.
///
/// Restarts run strictly one at a time; units may share a network
/// overlay or image cache, and a stampede of concurrent restarts is
/// exactly what this tool exists to avoid.
pub struct Reconciler<C> {
    plan: PortPlan,
    working_dir: PathBuf,
    controller: C,
}

impl<C: ProcessController> Reconciler<C> {
    pub fn new(plan: PortPlan, working_dir: impl Into<PathBuf>, controller: C) -> Self {
        Self {
            plan,
            working_dir: working_dir.into(),
            controller,
        }
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    /// Run one full pass for `address`.
    ///
    /// Never fails: every fault is logged and absorbed at its own
    /// stage, and the closing log line is reached on every path.
    pub async fn run(&self, client: &AuthorityClient, address: &str) -> RunSummary {
        info!(%address, "reconciliation pass started");

        let nodes = match client.fetch_report(address).await {
            Ok(nodes) => nodes,
            Err(e) => {
                error!(error = %e, "report fetch failed, treating report as empty");
                Vec::new()
            }
        };
        info!(records = nodes.len(), "report entries fetched");

        let summary = if nodes.is_empty() {
            warn!("no report entries for this address, nothing to reconcile");
            RunSummary::default()
        } else {
            let ports = ineligible_ports(&nodes);
            info!(flagged = ports.len(), "ineligible ports extracted");

            if ports.is_empty() {
                info!("no endpoints flagged ineligible");
                RunSummary {
                    records: nodes.len(),
                    ..RunSummary::default()
                }
            } else {
                info!(?ports, "processing flagged ports");
                let outcomes = self.reconcile_ports(&ports).await;
                RunSummary {
                    records: nodes.len(),
                    flagged_ports: ports,
                    outcomes,
                }
            }
        };

        info!(
            records = summary.records,
            restarted = summary.restarted(),
            failed = summary.failed(),
            unresolved = summary.unresolved(),
            "reconciliation pass finished"
        );
        summary
    }

    /// Resolve and restart each flagged port, in order.
    ///
    /// One outcome per port; a failure for one unit never stops the
    /// ports after it.
    pub async fn reconcile_ports(&self, ports: &[u16]) -> Vec<PortOutcome> {
        let mut outcomes = Vec::with_capacity(ports.len());
        for &port in ports {
            let status = self.restart_port(port).await;
            outcomes.push(PortOutcome { port, status });
        }
        outcomes
    }

    async fn restart_port(&self, port: u16) -> PortStatus {
        let unit = match resolve_unit(port, &self.plan, &self.working_dir) {
            Ok(unit) => unit,
            Err(e) => {
                error!(port, error = %e, "port did not resolve to a unit, skipping");
                return PortStatus::Unresolved;
            }
        };

        let outcome = match unit {
            Unit::Primary => {
                info!(port, "restarting primary unit");
                self.controller.restart_primary().await
            }
            Unit::Auxiliary { index, file } => {
                info!(port, index, %file, "restarting auxiliary unit");
                self.controller.restart_auxiliary(&file).await
            }
        };

        match outcome {
            RestartOutcome::Completed { stdout, stderr } => {
                info!(port, "unit restarted");
                if !stdout.is_empty() {
                    info!(port, %stdout, "command output");
                }
                if !stderr.is_empty() {
                    warn!(port, %stderr, "command warnings");
                }
                PortStatus::Restarted
            }
            RestartOutcome::Failed { code, stderr, .. } => {
                error!(port, ?code, %stderr, "restart command exited non-zero");
                PortStatus::CommandFailed
            }
            RestartOutcome::BinaryMissing { program } => {
                error!(port, %program, "control binary not found on the search path");
                PortStatus::CommandFailed
            }
            RestartOutcome::Error { message } => {
                error!(port, %message, "restart command could not be run");
                PortStatus::CommandFailed
            }
        }
    }
}
