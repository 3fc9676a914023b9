//! Domain logic - pure version and tag rules independent of git operations

pub mod tag;
pub mod version;

pub use tag::TagPattern;
pub use version::{
    bump_version, resolve_target, validate_version, Version, VersionBump, VersionTarget,
};
