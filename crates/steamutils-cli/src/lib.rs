//! steamutils command-line front end
//!
//! Output helpers, logging setup and the `list` and cleanup workflows used by
//! the `steamutils` binary.

pub mod cleanup;
pub mod display;
pub mod list;
pub mod logging;

pub use cleanup::{AssumeYes, CleanupOptions, CleanupSummary, Confirm, LineConfirm, run_cleanup};
pub use list::{ListOptions, list_games};
