//! File system access used by the workspace resolver
//!
//! Every call maps one-to-one onto a `std::fs` operation and wraps the error
//! with the path it failed on. Nothing here retries.

use crate::error::{BuildError, BuildResult};
use std::path::{Path, PathBuf};

/// Abstract file system interface
pub trait FileSystem {
    /// Check whether anything (file, directory or link) is at `path`.
    ///
    /// Links are not followed, so a dangling link still counts.
    fn exists(&self, path: &Path) -> bool;

    /// Check whether `path` exists once links are followed
    fn resolves(&self, path: &Path) -> bool;

    /// Create a single directory; the parent must exist
    fn create_dir(&self, path: &Path) -> BuildResult<()>;

    /// Create directory and parents
    fn create_dir_all(&self, path: &Path) -> BuildResult<()>;

    /// Create a directory symbolic link at `link` pointing at `target`
    fn symlink_dir(&self, target: &Path, link: &Path) -> BuildResult<()>;

    /// Resolve `path` to an absolute path without symlinks
    fn canonicalize(&self, path: &Path) -> BuildResult<PathBuf>;
}

/// The real local file system
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        std::fs::symlink_metadata(path).is_ok()
    }

    fn resolves(&self, path: &Path) -> bool {
        std::fs::metadata(path).is_ok()
    }

    fn create_dir(&self, path: &Path) -> BuildResult<()> {
        std::fs::create_dir(path)
            .map_err(|e| BuildError::io("failed to create directory", path, e))
    }

    fn create_dir_all(&self, path: &Path) -> BuildResult<()> {
        std::fs::create_dir_all(path)
            .map_err(|e| BuildError::io("failed to create directory", path, e))
    }

    fn symlink_dir(&self, target: &Path, link: &Path) -> BuildResult<()> {
        #[cfg(unix)]
        let result = std::os::unix::fs::symlink(target, link);
        #[cfg(windows)]
        let result = std::os::windows::fs::symlink_dir(target, link);

        result.map_err(|e| BuildError::io("failed to create symbolic link", link, e))
    }

    fn canonicalize(&self, path: &Path) -> BuildResult<PathBuf> {
        std::fs::canonicalize(path).map_err(|e| BuildError::io("failed to resolve", path, e))
    }
}

/// File system wrapper that records every mutating call (for tests)
#[cfg(test)]
#[derive(Clone, Default)]
pub struct RecordingFs {
    inner: LocalFs,
    pub created: std::rc::Rc<std::cell::RefCell<Vec<PathBuf>>>,
    pub linked: std::rc::Rc<std::cell::RefCell<Vec<PathBuf>>>,
}

#[cfg(test)]
impl RecordingFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times `path` was created through this wrapper
    pub fn creations_of(&self, path: &Path) -> usize {
        self.created.borrow().iter().filter(|p| *p == path).count()
    }
}

#[cfg(test)]
impl FileSystem for RecordingFs {
    fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path)
    }

    fn resolves(&self, path: &Path) -> bool {
        self.inner.resolves(path)
    }

    fn create_dir(&self, path: &Path) -> BuildResult<()> {
        self.created.borrow_mut().push(path.to_path_buf());
        self.inner.create_dir(path)
    }

    fn create_dir_all(&self, path: &Path) -> BuildResult<()> {
        self.created.borrow_mut().push(path.to_path_buf());
        self.inner.create_dir_all(path)
    }

    fn symlink_dir(&self, target: &Path, link: &Path) -> BuildResult<()> {
        self.linked.borrow_mut().push(link.to_path_buf());
        self.inner.symlink_dir(target, link)
    }

    fn canonicalize(&self, path: &Path) -> BuildResult<PathBuf> {
        self.inner.canonicalize(path)
    }
}
