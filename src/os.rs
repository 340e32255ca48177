use crate::path::Path;

pub type Result<T> = anyhow::Result<T>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    File,
    Dir,
    /// Symlinks, devices and anything else that is not a regular file or
    /// directory. The source expander skips these.
    Other,
}

#[derive(Debug, Clone)]
pub struct DirEntry {
    pub name: String,
    pub kind: FileKind,
}

/// Filesystem access used during the configuration phase.
///
/// Only the local workspace is ever queried through this trait; outputs of
/// other targets are resolved later, against the registry snapshot.
pub trait Os: 'static {
    fn is_file(&self, path: &Path) -> Result<bool>;
    fn is_dir(&self, path: &Path) -> Result<bool>;
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>>;
}
