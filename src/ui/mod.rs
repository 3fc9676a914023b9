//! User interface module - everything the operator sees on the terminal.
//!
//! Progress and results go to stdout, diagnostics and usage to stderr.
//! Styling comes from `console`, which drops colour when the stream is not
//! a terminal.

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_dry_run_plan, display_error, display_release_summary, display_stage, display_status,
    display_success, display_usage, display_version, usage_text,
};
