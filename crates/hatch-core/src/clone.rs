//! Cloning a remote repository into a fresh project directory.

use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, Local};
use tracing::{debug, info};

use crate::name::project_dir_name;
use crate::project::vacant_target;
use crate::{HatchError, Result, io_err};

/// Materializes a repository at `target`, which does not exist yet.
pub trait Cloner {
    fn clone_repo(&self, url: &str, target: &Path) -> Result<()>;
}

/// Shells out to the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCli {
    pub program: String,
}

impl Default for GitCli {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
        }
    }
}

impl Cloner for GitCli {
    fn clone_repo(&self, url: &str, target: &Path) -> Result<()> {
        debug!(program = %self.program, url, target = %target.display(), "running git clone");
        let output = Command::new(&self.program)
            .arg("clone")
            .arg(url)
            .arg(target)
            .output()
            .map_err(io_err("run git clone into", target))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(HatchError::Clone {
                url: url.to_string(),
                message: stderr.trim().to_string(),
            });
        }
        Ok(())
    }
}

/// Repository name from a clone URL: the last path segment without `.git`.
///
/// Handles `https://host/owner/repo.git`, `git@host:owner/repo` and plain
/// local paths. Returns `None` when no segment is left.
pub fn repo_name_from_url(url: &str) -> Option<String> {
    let trimmed = url.trim().trim_end_matches('/');
    let last = trimmed.rsplit(['/', ':']).next()?;
    let name = last.strip_suffix(".git").unwrap_or(last);
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Clone `url` into `<root>/<date>-<name>`.
///
/// `name` overrides the repository name taken from the URL. The same
/// collision policy as [`crate::create_project`] applies.
pub fn clone_project(
    root: &Path,
    url: &str,
    name: Option<&str>,
    now: &DateTime<Local>,
    cloner: &dyn Cloner,
) -> Result<PathBuf> {
    let raw_name = match name {
        Some(name) => name.to_string(),
        None => repo_name_from_url(url).ok_or(HatchError::InvalidName)?,
    };
    let dir_name = project_dir_name(&raw_name, now)?;

    std::fs::create_dir_all(root).map_err(io_err("create hatchery root", root))?;
    let target = vacant_target(root, &dir_name)?;

    cloner.clone_repo(url, &target)?;
    info!(url, path = %target.display(), "cloned project");
    Ok(target)
}
