//! Filesystem operations over the hatchery root.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{debug, info};

use crate::name::project_dir_name;
use crate::{HatchError, Result, io_err};

/// Reserved directory under the root that holds archived projects.
pub const ARCHIVE_DIR: &str = "archive";

/// A project directory directly under the hatchery root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Directory base name, e.g. `2026-02-28-hatch`.
    pub name: String,
    pub path: PathBuf,
}

/// Expand a leading `~` to the home directory and make the path absolute.
pub fn expand_path(value: &str) -> Result<PathBuf> {
    let expanded = if value == "~" {
        dirs::home_dir().ok_or(HatchError::NoHomeDir)?
    } else if let Some(rest) = value.strip_prefix("~/") {
        dirs::home_dir().ok_or(HatchError::NoHomeDir)?.join(rest)
    } else {
        PathBuf::from(value)
    };

    std::path::absolute(&expanded).map_err(io_err("resolve absolute path for", &expanded))
}

/// List projects under `root`, newest first.
///
/// The root is created when missing. Only immediate subdirectories are
/// returned, the reserved `archive` directory never is, and the order is
/// descending by name, which puts later dates first.
pub fn list_projects(root: &Path) -> Result<Vec<Project>> {
    fs::create_dir_all(root).map_err(io_err("create hatchery root", root))?;

    let read_dir = fs::read_dir(root).map_err(io_err("read hatchery root", root))?;
    let mut projects = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(io_err("read hatchery root", root))?;
        let file_type = entry
            .file_type()
            .map_err(io_err("read entry metadata for", &entry.path()))?;
        if !file_type.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name == ARCHIVE_DIR {
            continue;
        }
        projects.push(Project {
            path: entry.path(),
            name,
        });
    }

    projects.sort_by(|a, b| b.name.cmp(&a.name));
    debug!(root = %root.display(), count = projects.len(), "listed projects");
    Ok(projects)
}

/// Create an empty project named `<date>-<slug>` under `root`.
pub fn create_project(root: &Path, name: &str, now: &DateTime<Local>) -> Result<PathBuf> {
    let dir_name = project_dir_name(name, now)?;

    fs::create_dir_all(root).map_err(io_err("create hatchery root", root))?;
    let target = vacant_target(root, &dir_name)?;

    fs::create_dir_all(&target).map_err(io_err("create project directory", &target))?;
    info!(path = %target.display(), "created project");
    Ok(target)
}

/// Copy the directory tree at `source` into a new project under `root`.
///
/// Symlinks are recreated with their original (unresolved) target and
/// permission bits are carried over. A failure partway through leaves the
/// partially copied target in place.
pub fn copy_project(
    root: &Path,
    source: &str,
    name: &str,
    now: &DateTime<Local>,
) -> Result<PathBuf> {
    let dir_name = project_dir_name(name, now)?;

    let source = expand_path(source)?;
    let metadata = fs::metadata(&source).map_err(io_err("read source directory", &source))?;
    if !metadata.is_dir() {
        return Err(HatchError::NotADirectory(source));
    }

    fs::create_dir_all(root).map_err(io_err("create hatchery root", root))?;
    let target = vacant_target(root, &dir_name)?;

    // The source may contain the root (`hatch ~ snap`). Walking canonical
    // paths lets the copy recognise its own output and leave it out.
    let source = fs::canonicalize(&source).map_err(io_err("resolve source directory", &source))?;
    let exclude = fs::canonicalize(root)
        .map_err(io_err("resolve hatchery root", root))?
        .join(&dir_name);

    copy_dir(&source, &target, &exclude)?;
    info!(source = %source.display(), path = %target.display(), "copied project");
    Ok(target)
}

/// Move a project into `<root>/archive`, returning its new path.
///
/// When the archive already holds a directory with the same name the
/// first free `-2`, `-3`, ... suffix is used. The move is a single rename
/// and fails outright across filesystems.
pub fn archive_project(root: &Path, project_path: &Path) -> Result<PathBuf> {
    let archive_root = root.join(ARCHIVE_DIR);
    fs::create_dir_all(&archive_root).map_err(io_err("create archive directory", &archive_root))?;

    let base = project_path.file_name().ok_or_else(|| HatchError::Io {
        op: "archive project",
        path: project_path.to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidInput, "path has no directory name"),
    })?;
    let target = next_available_path(&archive_root.join(base))?;

    fs::rename(project_path, &target).map_err(io_err("archive project", project_path))?;
    info!(from = %project_path.display(), to = %target.display(), "archived project");
    Ok(target)
}

/// Recursively delete a project. A path that is already gone is fine.
pub fn remove_project(project_path: &Path) -> Result<()> {
    match fs::remove_dir_all(project_path) {
        Ok(()) => {
            info!(path = %project_path.display(), "removed project");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(HatchError::Io {
            op: "remove project",
            path: project_path.to_path_buf(),
            source: e,
        }),
    }
}

/// `root/dir_name`, or `AlreadyExists` when something is already there.
pub(crate) fn vacant_target(root: &Path, dir_name: &str) -> Result<PathBuf> {
    let target = root.join(dir_name);
    if path_exists(&target)? {
        return Err(HatchError::AlreadyExists(target));
    }
    Ok(target)
}

/// Whether anything (including a dangling symlink) occupies `path`.
fn path_exists(path: &Path) -> Result<bool> {
    match fs::symlink_metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(HatchError::Io {
            op: "check project directory",
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

fn next_available_path(path: &Path) -> Result<PathBuf> {
    if !path_exists(path)? {
        return Ok(path.to_path_buf());
    }
    for i in 2.. {
        let mut candidate = OsString::from(path.as_os_str());
        candidate.push(format!("-{i}"));
        let candidate = PathBuf::from(candidate);
        if !path_exists(&candidate)? {
            return Ok(candidate);
        }
    }
    unreachable!("suffix search is unbounded")
}

/// `source` must be canonical; subdirectories are only entered through real
/// directory entries, so every path visited stays canonical and can be
/// compared against `exclude` directly.
fn copy_dir(source: &Path, target: &Path, exclude: &Path) -> Result<()> {
    let entries = fs::read_dir(source)
        .and_then(|rd| rd.collect::<io::Result<Vec<_>>>())
        .map_err(io_err("read directory", source))?;

    fs::create_dir_all(target).map_err(io_err("create directory", target))?;

    for entry in entries {
        let src_path = entry.path();
        let dst_path = target.join(entry.file_name());
        let file_type = entry
            .file_type()
            .map_err(io_err("read entry metadata for", &src_path))?;

        if file_type.is_symlink() {
            let link_target =
                fs::read_link(&src_path).map_err(io_err("read symlink", &src_path))?;
            make_symlink(&link_target, &dst_path)?;
        } else if file_type.is_dir() {
            if src_path == exclude {
                debug!(path = %src_path.display(), "skipping copy target inside source");
                continue;
            }
            copy_dir(&src_path, &dst_path, exclude)?;
        } else {
            // fs::copy carries the permission bits along with the bytes.
            fs::copy(&src_path, &dst_path).map_err(io_err("copy file", &src_path))?;
        }
    }

    // Permissions go on last so read-only source directories stay writable
    // while their contents are copied in.
    let permissions = fs::metadata(source)
        .map_err(io_err("read entry metadata for", source))?
        .permissions();
    fs::set_permissions(target, permissions).map_err(io_err("set permissions on", target))
}

#[cfg(unix)]
fn make_symlink(link_target: &Path, dst: &Path) -> Result<()> {
    std::os::unix::fs::symlink(link_target, dst).map_err(io_err("create symlink", dst))
}

#[cfg(windows)]
fn make_symlink(link_target: &Path, dst: &Path) -> Result<()> {
    let resolved = dst.parent().map(|p| p.join(link_target));
    let result = if resolved.is_some_and(|p| p.is_dir()) {
        std::os::windows::fs::symlink_dir(link_target, dst)
    } else {
        std::os::windows::fs::symlink_file(link_target, dst)
    };
    result.map_err(io_err("create symlink", dst))
}
