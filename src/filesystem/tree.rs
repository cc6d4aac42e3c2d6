use std::io;
use std::path::{Path, PathBuf};

use hashlink::LinkedHashSet;
use snafu::{ResultExt, Snafu};
use tracing::{debug, warn};

use crate::ext::{PathExt, resolve_against};
use crate::filesystem::{DirEntryInfo, EntryType, Filesystem, Node, NodeKind};
use crate::git::{ClassifierError, GitClassifier, ProcessRunner};

pub const DEFAULT_MAX_DEPTH: usize = 10;
pub const DEFAULT_SKIP: &[&str] = &[
    "node_modules",
    "target",
    "dist",
    "build",
    "vendor",
    ".git",
    "__pycache__",
    ".venv",
    "venv",
];

/// Which parts of the filesystem the walk descends into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalPolicy {
    /// Directories at this depth (the root is 0) are reported but not listed.
    pub max_depth: usize,
    /// Directory names that are reported but not listed.
    pub skip: LinkedHashSet<String>,
    pub include_hidden: bool,
}

impl Default for TraversalPolicy {
    fn default() -> Self {
        TraversalPolicy {
            max_depth: DEFAULT_MAX_DEPTH,
            skip: DEFAULT_SKIP.iter().map(|name| name.to_string()).collect(),
            include_hidden: false,
        }
    }
}

impl TraversalPolicy {
    fn admits(&self, entry: &DirEntryInfo) -> bool {
        self.include_hidden || !entry.name.starts_with('.')
    }

    fn prunes(&self, name: &str, depth: usize) -> bool {
        self.skip.contains(name) || depth >= self.max_depth
    }
}

/// Walks a directory tree depth-first and builds the [`Node`] tree for it.
pub struct TreeBuilder<'a, F, P> {
    fs: &'a F,
    classifier: GitClassifier<'a, F, P>,
    policy: &'a TraversalPolicy,
}

impl<'a, F: Filesystem, P: ProcessRunner> TreeBuilder<'a, F, P> {
    pub fn new(fs: &'a F, runner: &'a P, policy: &'a TraversalPolicy) -> Self {
        Self {
            fs,
            classifier: GitClassifier::new(fs, runner),
            policy,
        }
    }

    pub fn with_git_program(mut self, program: impl Into<String>) -> Self {
        self.classifier = self.classifier.with_program(program);
        self
    }

    /// Builds the tree rooted at `path`, resolved against the current directory.
    ///
    /// Only problems with the root itself are errors; anything below it is
    /// logged and the affected directory is left without children.
    pub fn build(&self, path: &Path) -> Result<Node, TreeError> {
        let cwd = self.fs.current_dir().context(CurrentDirSnafu)?;
        let root = resolve_against(path, &cwd);
        debug!("Building tree for {}", root.display());

        let entry_type = match self.fs.stat(&root) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return RootNotFoundSnafu { path: root }.fail();
            }
            result => result.context(RootStatSnafu { path: root.clone() })?,
        };
        let resolved = self
            .fs
            .canonicalize(&root)
            .context(RootStatSnafu { path: root.clone() })?;
        // `link/..` has no name of its own; the directory it lands in does
        let name = match root.file_name() {
            Some(_) => root.node_name(),
            None => resolved.node_name(),
        };
        let kind = self.classify(&resolved, entry_type).context(ClassifySnafu)?;

        Ok(self.build_node(&resolved, name, kind, 0))
    }

    fn build_node(&self, path: &Path, name: String, kind: NodeKind, depth: usize) -> Node {
        let node = Node::new(name, kind);
        if !node.kind.is_directory_like() {
            return node;
        }
        if self.policy.prunes(&node.name, depth) {
            debug!("Not descending into {} at depth {}", path.display(), depth);
            return node;
        }

        let children = self
            .list_children(path)
            .into_iter()
            .filter(|entry| self.policy.admits(entry))
            .map(|entry| {
                let child_path = path.join(&entry.name);
                let kind = self.classify_child(&child_path, entry.entry_type);
                self.build_node(&child_path, entry.name, kind, depth + 1)
            })
            .collect();

        node.with_children(children)
    }

    fn classify(&self, path: &Path, entry_type: EntryType) -> Result<NodeKind, ClassifierError> {
        let kind = match entry_type {
            EntryType::File => NodeKind::File,
            EntryType::Other => NodeKind::Unknown,
            EntryType::Directory if self.classifier.is_repository(path)? => {
                NodeKind::RepoDirectory(self.classifier.status(path))
            }
            EntryType::Directory => NodeKind::Directory,
        };
        Ok(kind)
    }

    fn classify_child(&self, path: &Path, entry_type: EntryType) -> NodeKind {
        self.classify(path, entry_type).unwrap_or_else(|e| {
            warn!(
                "Treating {} as a plain directory: {}",
                path.display(),
                snafu::Report::from_error(e)
            );
            NodeKind::Directory
        })
    }

    fn list_children(&self, path: &Path) -> Vec<DirEntryInfo> {
        match self.fs.list_entries(path) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                warn!("Permission denied: cannot read {}", path.display());
                Vec::new()
            }
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }
}

#[derive(Debug, Snafu)]
pub enum TreeError {
    #[snafu(display("Failed to obtain current dir"))]
    CurrentDirError { source: io::Error },
    #[snafu(display("Path not found: {}", path.display()))]
    RootNotFound { path: PathBuf },
    #[snafu(display("Failed to read {}", path.display_resolved()))]
    RootStatError { path: PathBuf, source: io::Error },
    #[snafu(display("Failed to classify the root directory"))]
    ClassifyError { source: ClassifierError },
}
