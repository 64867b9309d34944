//! The unit model and port-to-unit resolution.
//!
//! Units are not long-lived objects: every reconciliation pass re-derives
//! the unit identifier from the reported port and the on-disk definition
//! files, with no persisted registry.

use std::path::Path;

use crate::config::PortPlan;
use crate::error::ResolveError;

/// A locally controlled process group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unit {
    /// The singleton unit on the reserved primary port, addressed by a
    /// fixed container name.
    Primary,
    /// A numbered unit addressed through its compose definition file.
    Auxiliary { index: u32, file: String },
}

/// File name of the compose definition for auxiliary unit `index`.
pub fn definition_file_name(index: u32) -> String {
    format!("docker-compose{index}.yaml")
}

/// Map a reported port onto the unit it belongs to.
///
/// `unit_dir` is the working directory holding the definition files. A
/// negative computed index or a missing definition file rejects the
/// port for this pass.
pub fn resolve_unit(port: u16, plan: &PortPlan, unit_dir: &Path) -> Result<Unit, ResolveError> {
    if plan.is_primary(port) {
        return Ok(Unit::Primary);
    }

    let index = plan.aux_index(port);
    if index < 0 {
        return Err(ResolveError::NegativeIndex { port, index });
    }
    let index = index as u32;

    let file = definition_file_name(index);
    if !unit_dir.join(&file).is_file() {
        return Err(ResolveError::DefinitionNotFound {
            file,
            dir: unit_dir.to_path_buf(),
        });
    }

    Ok(Unit::Auxiliary { index, file })
}
