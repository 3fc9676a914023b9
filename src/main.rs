use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use git_release::cli::{run_release, ReleaseArgs};
use git_release::config;
use git_release::domain::VersionTarget;
use git_release::git::SystemGit;
use git_release::ui;
use git_release::ReleaseError;

#[derive(clap::Parser)]
#[command(
    name = "release",
    version,
    about = "Bump the manifest version, commit, tag and push a release"
)]
struct Args {
    #[arg(
        value_name = "VERSION",
        help = "major, minor, patch, or an explicit version such as 1.2.3"
    )]
    target: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Check preconditions and show the plan without making changes")]
    dry_run: bool,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if e.use_stderr() => {
            eprint!("{e}");
            return ExitCode::FAILURE;
        }
        Err(e) => e.exit(),
    };

    let Some(target) = args.target.as_deref() else {
        ui::display_usage("release");
        return ExitCode::FAILURE;
    };

    match run(target, args.config.as_deref(), args.dry_run) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::display_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(target: &str, config_path: Option<&str>, dry_run: bool) -> Result<()> {
    let root: PathBuf = std::env::current_dir().map_err(ReleaseError::from)?;
    let config = config::load_config(&root, config_path)?;
    let repo = SystemGit::new(&root);

    let args = ReleaseArgs {
        target: VersionTarget::from_arg(target),
        dry_run,
    };
    let outcome = run_release(&root, &args, &config, &repo)?;

    match outcome.pushed_to {
        Some(remote) => ui::display_release_summary(&outcome.tag, &remote),
        None => ui::display_success(&format!(
            "Dry run complete: {} -> {} ({})",
            outcome.previous_version, outcome.version, outcome.tag
        )),
    }

    Ok(())
}
