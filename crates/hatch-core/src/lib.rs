//! Core of the `hatch` project hatchery.
//!
//! A hatchery is a single root directory holding short-lived projects named
//! `<YYYY-MM-DD>-<slug>`. This crate owns everything with real behavior:
//! name normalization, the filesystem operations over the root, fuzzy
//! ranking, and the browser reducer driven by the terminal front end.

use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod browser;
pub mod clock;
pub mod clone;
pub mod fuzzy;
pub mod name;
pub mod project;

pub use browser::{Action, Browser, ConfirmAction, Outcome};
pub use clock::{Clock, FixedClock, SystemClock};
pub use clone::{Cloner, GitCli, clone_project, repo_name_from_url};
pub use fuzzy::{NO_MATCH, fuzzy_score};
pub use name::{normalize_name, project_dir_name};
pub use project::{
    ARCHIVE_DIR, Project, archive_project, copy_project, create_project, expand_path,
    list_projects, remove_project,
};

#[derive(Error, Debug)]
pub enum HatchError {
    #[error("project name must contain at least one valid character")]
    InvalidName,
    #[error("project already exists: {}", .0.display())]
    AlreadyExists(PathBuf),
    #[error("source must be a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("{op} {}: {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("clone {url}: {message}")]
    Clone { url: String, message: String },
    #[error("could not resolve home directory")]
    NoHomeDir,
}

pub type Result<T> = std::result::Result<T, HatchError>;

/// Build a `map_err` adapter that tags an I/O failure with the attempted
/// operation and the path it was attempted on.
pub(crate) fn io_err(op: &'static str, path: &Path) -> impl FnOnce(std::io::Error) -> HatchError {
    let path = path.to_path_buf();
    move |source| HatchError::Io { op, path, source }
}
