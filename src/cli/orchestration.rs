//! Release workflow orchestration
//!
//! The pipeline is strictly linear: read the current version, compute the
//! target, check preconditions, then rewrite the manifest, commit, tag and
//! push. The first error stops the run. Nothing already done is rolled back,
//! so a failure after the manifest rewrite leaves the repository for the
//! operator to repair.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::domain::{resolve_target, VersionTarget};
use crate::error::{ReleaseError, Result};
use crate::git::{Repository, TagLookup};
use crate::manifest;
use crate::ui;

/// Arguments for the release workflow
///
/// Decoupled from the clap parser so the workflow can be driven
/// programmatically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseArgs {
    /// Bump directive or literal version
    pub target: VersionTarget,

    /// Stop after the precondition checks and print the plan
    pub dry_run: bool,
}

/// Result of a successful release workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseOutcome {
    /// Version found in the manifest before the run
    pub previous_version: String,

    /// Version written to the manifest
    pub version: String,

    /// The tag that was created
    pub tag: String,

    /// Remote that received the commit and tag, `None` for dry runs
    pub pushed_to: Option<String>,
}

/// Everything the executor needs to cut one release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePlan {
    pub version: String,
    pub tag: String,
    pub tag_message: String,
    pub commit_message: String,
    pub remote: String,
    /// Manifest path relative to the repository root, as passed to `git add`
    pub manifest: PathBuf,
}

impl ReleasePlan {
    /// Render every template in `config` for `version`
    pub fn new(version: &str, config: &Config) -> Result<Self> {
        Ok(ReleasePlan {
            version: version.to_string(),
            tag: config.tag_pattern()?.format(version),
            tag_message: config.tag_message()?.format(version),
            commit_message: config.commit_message()?.format(version),
            remote: config.remote.clone(),
            manifest: PathBuf::from(&config.manifest),
        })
    }

    /// The steps `execute_release` performs, in order
    pub fn steps(&self) -> Vec<String> {
        vec![
            format!("Update {} version to {}", self.manifest.display(), self.version),
            format!("Stage {}", self.manifest.display()),
            format!("Commit \"{}\"", self.commit_message),
            format!("Create annotated tag {} \"{}\"", self.tag, self.tag_message),
            format!("Push HEAD to {}", self.remote),
            format!("Push {} to {}", self.tag, self.remote),
        ]
    }
}

/// Verify the working tree is clean and `tag` is not taken.
///
/// Runs before anything is mutated. A tag lookup that cannot be answered is
/// an error, never a licence to proceed.
pub fn check_preconditions<R: Repository>(repo: &R, tag: &str) -> Result<()> {
    let status = repo.status()?;
    if !status.trim().is_empty() {
        return Err(ReleaseError::DirtyWorkingTree);
    }

    match repo.find_tag(tag)? {
        TagLookup::Present => Err(ReleaseError::TagExists(tag.to_string())),
        TagLookup::Absent => Ok(()),
    }
}

/// Rewrite the manifest, commit, tag and push.
///
/// # Arguments
/// * `repo` - Repository to mutate
/// * `root` - Project root the manifest path is relative to
/// * `plan` - Rendered release plan
pub fn execute_release<R: Repository>(repo: &R, root: &Path, plan: &ReleasePlan) -> Result<()> {
    ui::display_stage("📝", &format!("Updating {}...", plan.manifest.display()));
    manifest::set_version(&root.join(&plan.manifest), &plan.version)?;

    ui::display_stage("📦", "Committing version change...");
    repo.stage(&plan.manifest)?;
    repo.commit(&plan.commit_message)?;

    ui::display_stage("🏷️ ", &format!("Creating git tag {}...", plan.tag));
    repo.create_annotated_tag(&plan.tag, &plan.tag_message)?;

    ui::display_stage("🚀", &format!("Pushing to {}...", plan.remote));
    repo.push_head(&plan.remote)?;
    repo.push_tag(&plan.remote, &plan.tag)?;

    Ok(())
}

/// Main release workflow
///
/// Orchestrates the entire release:
/// 1. Read current version from the manifest
/// 2. Compute the new version
/// 3. Check for a clean tree and a free tag
/// 4. Rewrite the manifest, commit and tag
/// 5. Push commit and tag
///
/// # Arguments
///
/// * `root` - Project root, resolved once by the caller
/// * `args` - Target version and dry-run flag
/// * `config` - Release configuration
/// * `repo` - Version-control backend
///
/// # Returns
///
/// The released version and tag, or the first error encountered
pub fn run_release<R: Repository>(
    root: &Path,
    args: &ReleaseArgs,
    config: &Config,
    repo: &R,
) -> Result<ReleaseOutcome> {
    let previous_version = manifest::get_current_version(&config.manifest_path(root))?;
    ui::display_version("Current version", &previous_version);

    let version = resolve_target(&previous_version, &args.target)?;
    ui::display_version("New version", &version);

    let plan = ReleasePlan::new(&version, config)?;
    ui::display_status(&format!("Checking working tree and tag {}...", plan.tag));
    check_preconditions(repo, &plan.tag)?;

    if args.dry_run {
        ui::display_dry_run_plan(&plan.steps());
        return Ok(ReleaseOutcome {
            previous_version,
            version,
            tag: plan.tag,
            pushed_to: None,
        });
    }

    execute_release(repo, root, &plan)?;

    Ok(ReleaseOutcome {
        previous_version,
        version,
        tag: plan.tag,
        pushed_to: Some(plan.remote),
    })
}
