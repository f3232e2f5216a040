use super::ContentSource;
use crate::error::{FolioError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// Serves site-relative paths from a directory on disk.
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a site-relative path, refusing anything that leaves the root.
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path.trim_start_matches("./"));
        let mut resolved = self.root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(resolved)
    }
}

impl ContentSource for FileSource {
    fn fetch(&self, path: &str) -> Result<String> {
        let full = self.resolve(path).ok_or_else(|| FolioError::Status {
            path: path.to_string(),
            status: 403,
        })?;

        let not_found = || FolioError::Status {
            path: path.to_string(),
            status: 404,
        };
        if !full.is_file() {
            return Err(not_found());
        }

        fs::read_to_string(&full).map_err(|e| match e.kind() {
            ErrorKind::NotFound => not_found(),
            _ => FolioError::Io(e),
        })
    }
}
