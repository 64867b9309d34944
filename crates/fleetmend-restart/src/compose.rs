//! Restart execution through the compose tooling.

use std::future::Future;
use std::io;
use std::path::PathBuf;

use tokio::process::Command;
use tracing::info;

use crate::outcome::RestartOutcome;

/// Capability surface the reconciler drives restarts through.
pub trait ProcessController {
    /// Restart the primary unit.
    fn restart_primary(&self) -> impl Future<Output = RestartOutcome> + Send;

    /// Restart the auxiliary unit defined by `file`.
    fn restart_auxiliary(&self, file: &str) -> impl Future<Output = RestartOutcome> + Send;
}

/// Controller that shells out to `docker` and `docker-compose`.
///
/// Commands run with the working directory as their execution root, so
/// relative definition file names resolve against it. Each command is
/// awaited to completion before the caller moves on; units may share a
/// network overlay or image cache, and sequential execution avoids
/// cross-unit interference.
#[derive(Debug, Clone)]
pub struct ComposeController {
    working_dir: PathBuf,
    primary_container: String,
    docker_bin: String,
    compose_bin: String,
}

impl ComposeController {
    pub fn new(working_dir: impl Into<PathBuf>, primary_container: impl Into<String>) -> Self {
        Self {
            working_dir: working_dir.into(),
            primary_container: primary_container.into(),
            docker_bin: "docker".to_string(),
            compose_bin: "docker-compose".to_string(),
        }
    }

    /// Override the control binaries. Tests point these at stubs.
    pub fn with_binaries(mut self, docker: impl Into<String>, compose: impl Into<String>) -> Self {
        self.docker_bin = docker.into();
        self.compose_bin = compose.into();
        self
    }

    async fn run(&self, program: &str, args: &[&str]) -> RestartOutcome {
        let command = format!("{program} {}", args.join(" "));
        info!(%command, "executing restart command");

        let result = Command::new(program)
            .args(args)
            .current_dir(&self.working_dir)
            .output()
            .await;

        match result {
            Ok(output) => {
                let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
                let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
                if output.status.success() {
                    RestartOutcome::Completed { stdout, stderr }
                } else {
                    RestartOutcome::Failed {
                        code: output.status.code(),
                        stdout,
                        stderr,
                    }
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => RestartOutcome::BinaryMissing {
                program: program.to_string(),
            },
            Err(e) => RestartOutcome::Error {
                message: e.to_string(),
            },
        }
    }
}

impl ProcessController for ComposeController {
    async fn restart_primary(&self) -> RestartOutcome {
        self.run(&self.docker_bin, &["restart", &self.primary_container])
            .await
    }

    async fn restart_auxiliary(&self, file: &str) -> RestartOutcome {
        self.run(&self.compose_bin, &["-f", file, "restart"]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn controller(dir: &TempDir) -> ComposeController {
        ComposeController::new(dir.path(), "fleet-node")
    }

    #[tokio::test]
    async fn zero_exit_is_completed_with_captured_output() {
        let dir = TempDir::new().unwrap();
        let outcome = controller(&dir)
            .with_binaries("echo", "echo")
            .restart_primary()
            .await;

        match outcome {
            RestartOutcome::Completed { stdout, stderr } => {
                assert_eq!(stdout, "restart fleet-node");
                assert!(stderr.is_empty());
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn auxiliary_command_names_the_definition_file() {
        let dir = TempDir::new().unwrap();
        let outcome = controller(&dir)
            .with_binaries("echo", "echo")
            .restart_auxiliary("docker-compose5.yaml")
            .await;

        match outcome {
            RestartOutcome::Completed { stdout, .. } => {
                assert_eq!(stdout, "-f docker-compose5.yaml restart");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_zero_exit_is_failed() {
        let dir = TempDir::new().unwrap();
        let outcome = controller(&dir)
            .with_binaries("false", "false")
            .restart_primary()
            .await;

        match outcome {
            RestartOutcome::Failed { code, .. } => assert_eq!(code, Some(1)),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_binary_is_its_own_outcome() {
        let dir = TempDir::new().unwrap();
        let outcome = controller(&dir)
            .with_binaries("/nonexistent/fleetmend-docker", "/nonexistent/fleetmend-compose")
            .restart_primary()
            .await;

        assert_eq!(
            outcome,
            RestartOutcome::BinaryMissing {
                program: "/nonexistent/fleetmend-docker".to_string()
            }
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn unexecutable_binary_is_an_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let stub = dir.path().join("not-executable");
        std::fs::write(&stub, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&stub, std::fs::Permissions::from_mode(0o644)).unwrap();

        let stub = stub.to_string_lossy().to_string();
        let outcome = controller(&dir)
            .with_binaries(stub.clone(), stub)
            .restart_primary()
            .await;

        assert!(matches!(outcome, RestartOutcome::Error { .. }));
    }
}
