//! File Store
//!
//! One regular file per key, written atomically via write-then-rename.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Component, Path, PathBuf};

use tempfile::{Builder, NamedTempFile};

use crate::error::{BucketError, Result};

/// Key/value storage backed by a directory tree
///
/// ## Concurrency:
/// - Holds no mutable state; all methods take `&self`
/// - Share between connection threads behind an `Arc`
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Directory every key is resolved against
    root: PathBuf,
}

impl FileStore {
    /// Open storage rooted at `root`, creating the directory if needed
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        fs::create_dir_all(root)?;

        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Get the root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Store `value` as the full contents of the file for `key`
    ///
    /// Nested keys get their intermediate directories created. The value
    /// is written to a temporary file next to the target and renamed over
    /// it, so readers and racing writers only ever see whole values.
    pub fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        let path = self.path_for(key)?;

        if let Some(parent) = nested_parent(key) {
            fs::create_dir_all(self.root.join(parent))?;
        }

        let dir = path.parent().unwrap_or(&self.root);
        let mut tmp = temp_file_in(dir)?;
        tmp.write_all(value)?;
        tmp.persist(&path).map_err(|e| e.error)?;

        Ok(())
    }

    /// Get the value stored under `key`
    ///
    /// Returns:
    /// - `Ok(Some(value))` — file exists, full contents
    /// - `Ok(None)` — no file for this key
    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key)?;

        match fs::read(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if is_absent(&e, &path) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove the value stored under `key`
    ///
    /// Removing a key that does not exist succeeds.
    pub fn delete(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if is_absent(&e, &path) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve `key` to its file path under the root
    ///
    /// Keys are used as relative paths verbatim. Empty keys, absolute
    /// paths and `..` components are rejected so every key stays inside
    /// the root.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        let relative = Path::new(key);
        let mut has_name = false;

        for component in relative.components() {
            match component {
                Component::Normal(_) => has_name = true,
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(BucketError::InvalidKey(key.to_string()));
                }
            }
        }

        if !has_name {
            return Err(BucketError::InvalidKey(key.to_string()));
        }

        Ok(self.root.join(relative))
    }
}

// =============================================================================
// Private Helpers
// =============================================================================

/// Parent of `key` if it names a real subdirectory
///
/// "reports/jan" → Some("reports"), "jan" and "./jan" → None
fn nested_parent(key: &str) -> Option<&Path> {
    Path::new(key)
        .parent()
        .filter(|p| p.components().any(|c| matches!(c, Component::Normal(_))))
}

/// Prefix of in-flight temporary files; not a realistic key
pub(crate) const TEMP_PREFIX: &str = ".bucket-put-";

/// Temporary file next to the target, created like a plain `fs::write`
/// would be (0666 filtered through the umask) rather than 0600
fn temp_file_in(dir: &Path) -> std::io::Result<NamedTempFile> {
    let mut builder = Builder::new();
    builder.prefix(TEMP_PREFIX);

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }

    builder.tempfile_in(dir)
}

/// NotFound, or any error on a path that does not exist (e.g. a file
/// where a directory was expected along the way)
fn is_absent(err: &std::io::Error, path: &Path) -> bool {
    err.kind() == ErrorKind::NotFound || !path.exists()
}
