//! One reconciliation pass over the fleet.
//!
//! Control flow per pass: fetch the eligibility report, filter it down
//! to the ports explicitly flagged ineligible, then resolve and restart
//! each flagged port sequentially. Every fault is absorbed and logged at
//! its own stage:
//!
//! - a failed fetch degrades to an empty report and a clean no-op exit;
//! - a malformed record is skipped;
//! - an unresolvable port is skipped;
//! - a failed restart marks that unit and the pass moves on.
//!
//! The invariant: the units restarted in a pass are exactly the units
//! resolvable from ports reported ineligible in that pass's fetch. No
//! unit is restarted speculatively, and no flagged port is dropped
//! without a logged reason.

pub mod run;
pub mod summary;

pub use run::Reconciler;
pub use summary::{PortOutcome, PortStatus, RunSummary};
