//! Role deletion policy
//!
//! A pure decision over who is asking, which role is targeted and how many
//! users currently hold it. Nothing in this module performs I/O; deleting the
//! row and telling the user about a denial belong to the caller.

mod deletion;
mod types;

pub use deletion::{RoleDeletionPolicy, evaluate_role_deletion};
pub use types::{Actor, DenialReason, RoleDeletionOutcome};
