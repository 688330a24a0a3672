use std::path::{Path, PathBuf};

use crate::config::PROJECT_CONFIG_FILE;

/// Overrides project discovery when set
pub const PROJECT_DIR_ENV: &str = "MSGBUILD_PROJECT_DIR";

/// Discover the project root directory from an invocation directory.
///
/// Heuristics (first match wins, walking upward from `start`):
/// - `msgbuild.toml` (explicit project config)
/// - `Gopkg.toml` (the dependency manager's manifest)
/// - `.git/` or `.git` file (git repo root / worktree)
///
/// Falls back to `start` when no markers are found.
pub fn discover_project_root(start: &Path) -> PathBuf {
    for dir in start.ancestors() {
        if dir.join(PROJECT_CONFIG_FILE).is_file() {
            return dir.to_path_buf();
        }
        if dir.join("Gopkg.toml").is_file() {
            return dir.to_path_buf();
        }
        if dir.join(".git").exists() {
            return dir.to_path_buf();
        }
    }
    start.to_path_buf()
}

/// Project root for this process: `MSGBUILD_PROJECT_DIR`, or discovery
/// from `cwd`.
pub fn resolve_project_root<F>(cwd: &Path, lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(PROJECT_DIR_ENV).filter(|v| !v.is_empty()) {
        Some(dir) => cwd.join(dir),
        None => discover_project_root(cwd),
    }
}
