use crate::error::{ReleaseError, Result};
use crate::git::{Repository, TagLookup};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// Repository backed by the system `git` executable
#[derive(Debug, Clone)]
pub struct SystemGit {
    root: PathBuf,
}

impl SystemGit {
    /// Operate on the repository whose working tree contains `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        SystemGit { root: root.into() }
    }

    fn git_cmd(&self) -> Command {
        let mut cmd = Command::new("git");
        cmd.current_dir(&self.root);
        cmd
    }

    /// Run a read-only query and capture its output
    fn query(&self, args: &[&str]) -> Result<Output> {
        self.git_cmd()
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                ReleaseError::environment(format!("failed to run {}: {}", render_command(args), e))
            })
    }

    /// Run a mutating command with the operator's terminal attached
    fn run<S: AsRef<OsStr>>(&self, args: &[S]) -> Result<()> {
        let command = render_command(args);
        let status = self
            .git_cmd()
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|_| ReleaseError::command_failure(command.as_str()))?;

        if !status.success() {
            return Err(ReleaseError::command_failure(command));
        }
        Ok(())
    }
}

impl Repository for SystemGit {
    fn status(&self) -> Result<String> {
        let output = self.query(&["status", "--porcelain"])?;
        if !output.status.success() {
            return Err(ReleaseError::environment(first_line(&output.stderr)));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn find_tag(&self, tag_name: &str) -> Result<TagLookup> {
        let reference = format!("refs/tags/{}", tag_name);
        let output = self.query(&["rev-parse", "-q", "--verify", reference.as_str()])?;

        // `--verify -q` exits 1 silently for a missing ref; anything else is a real failure
        match output.status.code() {
            Some(0) => Ok(TagLookup::Present),
            Some(1) => Ok(TagLookup::Absent),
            _ => Err(ReleaseError::environment(format!(
                "cannot look up tag {}: {}",
                tag_name,
                first_line(&output.stderr)
            ))),
        }
    }

    fn stage(&self, path: &Path) -> Result<()> {
        self.run(&[OsStr::new("add"), path.as_os_str()])
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.run(&["commit", "-m", message])
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        self.run(&["tag", "-a", name, "-m", message])
    }

    fn push_head(&self, remote: &str) -> Result<()> {
        self.run(&["push", remote, "HEAD"])
    }

    fn push_tag(&self, remote: &str, tag_name: &str) -> Result<()> {
        self.run(&["push", remote, tag_name])
    }
}

/// Render a git invocation the way an operator would type it
fn render_command<S: AsRef<OsStr>>(args: &[S]) -> String {
    let mut rendered = String::from("git");
    for arg in args {
        let arg = arg.as_ref().to_string_lossy();
        rendered.push(' ');
        if arg.is_empty() || arg.contains(char::is_whitespace) {
            rendered.push('"');
            rendered.push_str(&arg.replace('"', "\\\""));
            rendered.push('"');
        } else {
            rendered.push_str(&arg);
        }
    }
    rendered
}

fn first_line(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    match text.lines().map(str::trim).find(|line| !line.is_empty()) {
        Some(line) => line.to_string(),
        None => "git exited unsuccessfully".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_render_command_quotes_messages() {
        assert_eq!(
            render_command(&["commit", "-m", "chore: bump version to 1.0.1"]),
            "git commit -m \"chore: bump version to 1.0.1\""
        );
        assert_eq!(render_command(&["push", "origin", "v1.0.1"]), "git push origin v1.0.1");
    }

    #[test]
    fn test_render_command_accepts_paths() {
        let path = Path::new("packages/web app/package.json");
        assert_eq!(
            render_command(&[OsStr::new("add"), path.as_os_str()]),
            "git add \"packages/web app/package.json\""
        );
    }

    #[test]
    fn test_first_line_skips_blank_lines() {
        assert_eq!(
            first_line(b"\nfatal: not a git repository\nhint: x\n"),
            "fatal: not a git repository"
        );
        assert_eq!(first_line(b""), "git exited unsuccessfully");
    }

    #[test]
    fn test_status_outside_repository_is_environment_error() {
        let dir = TempDir::new().unwrap();
        let git = SystemGit::new(dir.path().join("does-not-exist"));

        // A missing working directory fails before git ever runs
        assert!(matches!(git.status(), Err(ReleaseError::Environment(_))));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_stage_passes_non_utf8_path_unchanged() {
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        let init = Command::new("git")
            .args(["init", "-q"])
            .current_dir(dir.path())
            .status()
            .unwrap();
        assert!(init.success());

        let name = OsStr::from_bytes(b"pkg-\xff.json");
        std::fs::write(dir.path().join(name), "{}\n").unwrap();

        let git = SystemGit::new(dir.path());
        git.stage(Path::new(name)).unwrap();

        let staged = Command::new("git")
            .args(["diff", "--cached", "--name-only", "-z"])
            .current_dir(dir.path())
            .output()
            .unwrap();
        assert_eq!(staged.stdout, b"pkg-\xff.json\0");
    }
}
