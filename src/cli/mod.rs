//! Command-line workflow, kept separate from argument parsing in `main.rs`

pub mod orchestration;

pub use orchestration::{run_release, ReleaseArgs, ReleaseOutcome, ReleasePlan};
