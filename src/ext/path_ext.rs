use std::path::{Component, Path, PathBuf};

/// Joins `path` onto `cwd` unless it is already absolute and drops `.`
/// components. `..` is kept: whether it leads where it appears to depends on
/// symlinks and missing directories, which only the filesystem can answer.
pub fn resolve_against(path: &Path, cwd: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };

    absolute
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}

pub trait PathExt {
    /// Absolute, normalized form of the path for messages. Falls back to the
    /// lexical form when the path does not exist.
    fn display_resolved(&self) -> String;

    /// Final segment of the path, or the whole path when it has none (`/`).
    fn node_name(&self) -> String;
}

impl PathExt for Path {
    fn display_resolved(&self) -> String {
        if let Ok(canonical) = self.canonicalize() {
            return canonical.display().to_string();
        }
        match std::env::current_dir() {
            Ok(cwd) => resolve_against(self, &cwd).display().to_string(),
            Err(_) => self.display().to_string(),
        }
    }

    fn node_name(&self) -> String {
        self.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.display().to_string())
    }
}

impl PathExt for PathBuf {
    fn display_resolved(&self) -> String {
        self.as_path().display_resolved()
    }

    fn node_name(&self) -> String {
        self.as_path().node_name()
    }
}
