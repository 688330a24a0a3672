//! Package and command discovery
//!
//! Results are always sorted so batch invocations are identical across runs
//! and platforms, whatever order the directory listing comes back in.

use std::fs;
use std::path::Path;

use crate::error::{BuildError, BuildResult};

/// Import paths of every package under `packages_root`.
///
/// A package is any directory (recursively, including the root itself) that
/// holds at least one file with the `extension` suffix. Its import path is
/// `import_path` followed by the directory relative to `project_dir`.
/// A missing root yields no packages.
pub fn package_paths(
    project_dir: &Path,
    packages_root: &Path,
    import_path: &str,
    extension: &str,
) -> BuildResult<Vec<String>> {
    let mut paths = Vec::new();
    if packages_root.is_dir() {
        collect_packages(project_dir, packages_root, import_path, extension, &mut paths)?;
    }
    paths.sort();
    Ok(paths)
}

fn collect_packages(
    project_dir: &Path,
    current: &Path,
    import_path: &str,
    extension: &str,
    paths: &mut Vec<String>,
) -> BuildResult<()> {
    let entries = fs::read_dir(current).map_err(|e| BuildError::io("failed to read", current, e))?;
    walk_entries(project_dir, current, entries, import_path, extension, paths);
    Ok(())
}

// Symlinked directories are neither walked nor counted as sources, and
// unreadable subdirectories are skipped.
fn walk_entries(
    project_dir: &Path,
    current: &Path,
    entries: fs::ReadDir,
    import_path: &str,
    extension: &str,
    paths: &mut Vec<String>,
) {
    let mut has_source = false;
    let mut subdirs = Vec::new();

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!(dir = %current.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        let path = entry.path();
        if file_type.is_dir() {
            subdirs.push(path);
        } else if file_type.is_symlink() && path.is_dir() {
            tracing::debug!(dir = %path.display(), "not following directory link");
        } else if path.extension().map(|e| e == extension).unwrap_or(false) {
            has_source = true;
        }
    }

    if has_source {
        paths.push(import_path_for(project_dir, current, import_path));
    }

    for dir in subdirs {
        match fs::read_dir(&dir) {
            Ok(entries) => walk_entries(project_dir, &dir, entries, import_path, extension, paths),
            Err(e) => {
                tracing::debug!(dir = %dir.display(), error = %e, "skipping unreadable directory");
            }
        }
    }
}

fn import_path_for(project_dir: &Path, dir: &Path, import_path: &str) -> String {
    let relative = dir.strip_prefix(project_dir).unwrap_or(dir);
    let segments: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if segments.is_empty() {
        import_path.to_string()
    } else {
        format!("{}/{}", import_path, segments.join("/"))
    }
}

/// Names of the immediate subdirectories of `commands_root`, sorted.
///
/// Plain files are skipped. A missing root yields no commands.
pub fn command_names(commands_root: &Path) -> BuildResult<Vec<String>> {
    if !commands_root.is_dir() {
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    let entries =
        fs::read_dir(commands_root).map_err(|e| BuildError::io("failed to read", commands_root, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| BuildError::io("failed to read", commands_root, e))?;
        if entry.path().is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    names.sort();
    Ok(names)
}
