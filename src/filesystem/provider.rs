use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// What a filesystem entry is, as far as the tree is concerned.
///
/// Symbolic links met while listing a directory are reported as
/// [`EntryType::Other`] and never descended into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    File,
    Directory,
    Other,
}

impl From<fs::FileType> for EntryType {
    fn from(file_type: fs::FileType) -> Self {
        if file_type.is_dir() {
            EntryType::Directory
        } else if file_type.is_file() {
            EntryType::File
        } else {
            EntryType::Other
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    pub name: String,
    pub entry_type: EntryType,
}

/// Read-only view of a filesystem.
///
/// `NotFound` and `PermissionDenied` are reported through [`io::ErrorKind`] so
/// callers can tell recoverable conditions apart from real failures.
pub trait Filesystem {
    /// Follows symbolic links.
    fn stat(&self, path: &Path) -> io::Result<EntryType>;
    /// Entries are returned in the order the underlying listing yields them.
    fn list_entries(&self, path: &Path) -> io::Result<Vec<DirEntryInfo>>;
    /// Absolute path with symlinks and `..` resolved the way the OS does.
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;
    fn current_dir(&self) -> io::Result<PathBuf>;
}

/// The real filesystem, backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFilesystem;

impl Filesystem for LocalFilesystem {
    fn stat(&self, path: &Path) -> io::Result<EntryType> {
        fs::metadata(path).map(|metadata| metadata.file_type().into())
    }

    fn list_entries(&self, path: &Path) -> io::Result<Vec<DirEntryInfo>> {
        fs::read_dir(path)?
            .map(|entry| -> io::Result<DirEntryInfo> {
                let entry = entry?;
                Ok(DirEntryInfo {
                    name: entry.file_name().to_string_lossy().into_owned(),
                    entry_type: entry.file_type()?.into(),
                })
            })
            .collect()
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        fs::canonicalize(path)
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }
}
