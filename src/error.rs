use thiserror::Error;

/// Unified error type for release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Manifest error: {0}")]
    Parse(String),

    #[error("Invalid version format: {0}. Must be semver (e.g., 1.0.0, 1.0.0-beta.1)")]
    InvalidFormat(String),

    #[error("Invalid bump type: {0}. Use major, minor, or patch")]
    InvalidBumpType(String),

    #[error("You have uncommitted changes. Please commit or stash them first.")]
    DirtyWorkingTree,

    #[error("Tag {0} already exists")]
    TagExists(String),

    #[error("Not a git repository or git not available: {0}")]
    Environment(String),

    #[error("Error executing: {command}")]
    CommandFailure { command: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a manifest parse error with context
    pub fn parse(msg: impl Into<String>) -> Self {
        ReleaseError::Parse(msg.into())
    }

    /// Create an environment error with context
    pub fn environment(msg: impl Into<String>) -> Self {
        ReleaseError::Environment(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a command failure for the rendered command line
    pub fn command_failure(command: impl Into<String>) -> Self {
        ReleaseError::CommandFailure {
            command: command.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReleaseError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ReleaseError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_invalid_format_names_offending_string() {
        let err = ReleaseError::InvalidFormat("v1.0.0".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid version format: v1.0.0. Must be semver (e.g., 1.0.0, 1.0.0-beta.1)"
        );
    }

    #[test]
    fn test_invalid_bump_type_message() {
        let err = ReleaseError::InvalidBumpType("huge".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid bump type: huge. Use major, minor, or patch"
        );
    }

    #[test]
    fn test_command_failure_names_command() {
        let err = ReleaseError::command_failure("git push origin HEAD");
        assert_eq!(err.to_string(), "Error executing: git push origin HEAD");
    }

    #[test]
    fn test_error_messages_are_single_line() {
        let errors = vec![
            ReleaseError::parse("package.json: expected value at line 1 column 1"),
            ReleaseError::DirtyWorkingTree,
            ReleaseError::TagExists("v1.0.0".to_string()),
            ReleaseError::environment("git exited with status 128"),
            ReleaseError::command_failure("git commit -m msg"),
        ];

        for err in errors {
            let msg = err.to_string();
            assert!(!msg.is_empty());
            assert!(!msg.contains('\n'), "multi-line message: {}", msg);
        }
    }

    #[test]
    fn test_tag_exists_message() {
        let err = ReleaseError::TagExists("v2.0.0".to_string());
        assert_eq!(err.to_string(), "Tag v2.0.0 already exists");
    }
}
