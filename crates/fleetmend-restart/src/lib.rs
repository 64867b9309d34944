//! Process control for compose-managed units.
//!
//! The reconciler drives restarts through the [`ProcessController`]
//! capability trait, so the restart logic can be exercised in tests with
//! a recording fake. Production uses [`ComposeController`], which shells
//! out to `docker` for the primary unit and `docker-compose` for the
//! numbered units.
//!
//! Every failure mode is a [`RestartOutcome`] value, never a panic or an
//! error that escapes the pass: a unit that cannot be restarted must not
//! block the units after it.

pub mod compose;
pub mod outcome;

pub use compose::{ComposeController, ProcessController};
pub use outcome::RestartOutcome;
