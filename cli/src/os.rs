use std::fs;
use std::path::PathBuf;

use picopack::os::{self, DirEntry, FileKind};
use picopack::path::Path;

/// Real-filesystem access, rooted at the workspace directory.
pub struct OsEnv {
    root: PathBuf,
}

impl OsEnv {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl os::Os for OsEnv {
    fn is_file(&self, path: &Path) -> os::Result<bool> {
        Ok(self.root.join(path.as_str()).is_file())
    }

    fn is_dir(&self, path: &Path) -> os::Result<bool> {
        Ok(self.root.join(path.as_str()).is_dir())
    }

    fn read_dir(&self, path: &Path) -> os::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(self.root.join(path.as_str()))? {
            let entry = entry?;
            let file_type = entry.file_type()?;
            let kind = if file_type.is_file() {
                FileKind::File
            } else if file_type.is_dir() {
                FileKind::Dir
            } else {
                FileKind::Other
            };
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                kind,
            });
        }
        Ok(entries)
    }
}
