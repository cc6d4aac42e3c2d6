use derive_more::{Add, IsVariant};

use crate::git::GitStatus;

/// Classification of a visited entry. A repository directory always carries
/// its status, so there is no way to have one without the other.
#[derive(Debug, Clone, PartialEq, Eq, IsVariant)]
pub enum NodeKind {
    File,
    Directory,
    RepoDirectory(GitStatus),
    Unknown,
}

impl NodeKind {
    pub fn is_directory_like(&self) -> bool {
        matches!(self, NodeKind::Directory | NodeKind::RepoDirectory(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    pub children: Vec<Node>,
    /// Starts out as "is this a repository" and is cleared by any child that
    /// does not itself lead to a repository.
    pub all_paths_lead_to_repo: bool,
    /// Some descendant, at any depth, is a repository.
    pub contains_repo: bool,
}

impl Node {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Node {
            name: name.into(),
            all_paths_lead_to_repo: kind.is_repo_directory(),
            contains_repo: false,
            children: Vec::new(),
            kind,
        }
    }

    /// Attaches already-built children and folds their flags into this node.
    pub fn with_children(self, children: Vec<Node>) -> Self {
        let (all_paths_lead_to_repo, contains_repo) = children.iter().fold(
            (self.all_paths_lead_to_repo, self.contains_repo),
            |(all_paths, contains), child| {
                (
                    all_paths && child.all_paths_lead_to_repo,
                    contains || child.kind.is_repo_directory() || child.contains_repo,
                )
            },
        );

        Node {
            children,
            all_paths_lead_to_repo,
            contains_repo,
            ..self
        }
    }

    pub fn git_status(&self) -> Option<&GitStatus> {
        match &self.kind {
            NodeKind::RepoDirectory(status) => Some(status),
            NodeKind::File | NodeKind::Directory | NodeKind::Unknown => None,
        }
    }

    pub fn stats(&self) -> TreeStats {
        let own = match &self.kind {
            NodeKind::File => TreeStats {
                files: 1,
                ..Default::default()
            },
            NodeKind::Directory | NodeKind::RepoDirectory(_) => TreeStats {
                directories: 1,
                repositories: usize::from(self.kind.is_repo_directory()),
                dirty_repositories: usize::from(
                    self.git_status().is_some_and(GitStatus::is_dirty),
                ),
                ..Default::default()
            },
            NodeKind::Unknown => TreeStats {
                unknown: 1,
                ..Default::default()
            },
        };

        self.children
            .iter()
            .map(Node::stats)
            .fold(own, |total, child| total + child)
    }
}

/// Entry counts over a whole tree, the root included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Add)]
pub struct TreeStats {
    pub files: usize,
    pub directories: usize,
    pub repositories: usize,
    pub dirty_repositories: usize,
    pub unknown: usize,
}
