//! Error types for unit resolution.

use std::path::PathBuf;
use thiserror::Error;

/// Why a reported port could not be mapped onto a managed unit.
///
/// Either way the unit is skipped for this pass; resolution faults are
/// never retried within a run.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("computed unit index {index} for port {port} is negative")]
    NegativeIndex { port: u16, index: i64 },

    #[error("unit definition '{file}' not found in {}", dir.display())]
    DefinitionNotFound { file: String, dir: PathBuf },
}
