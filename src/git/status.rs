use derive_more::Display;

/// Prefix `git status --porcelain` uses for untracked files.
const UNTRACKED_MARKER: &str = "??";

/// Dirty/clean signals of a single repository.
///
/// The default value is a clean repository, which is also what a failed status
/// check degrades to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitStatus {
    pub has_working_changes: bool,
    pub uncommitted_changes: usize,
    pub untracked_files: usize,
    /// `None` when it was not computed: the working tree already has changes,
    /// or the current branch has no upstream.
    pub has_unpushed_changes: Option<bool>,
    pub commits_ahead: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RepoState {
    #[display("clean")]
    Clean,
    #[display("dirty")]
    Dirty,
}

impl GitStatus {
    pub fn from_porcelain(output: &str) -> Self {
        let (untracked_files, uncommitted_changes) = output
            .lines()
            .filter(|line| !line.trim().is_empty())
            .fold((0, 0), |(untracked, uncommitted), line| {
                if line.starts_with(UNTRACKED_MARKER) {
                    (untracked + 1, uncommitted)
                } else {
                    (untracked, uncommitted + 1)
                }
            });

        GitStatus {
            has_working_changes: untracked_files + uncommitted_changes > 0,
            uncommitted_changes,
            untracked_files,
            has_unpushed_changes: None,
            commits_ahead: None,
        }
    }

    pub fn with_commits_ahead(self, commits_ahead: Option<u32>) -> Self {
        GitStatus {
            has_unpushed_changes: commits_ahead.map(|ahead| ahead > 0),
            commits_ahead,
            ..self
        }
    }

    /// Local changes or commits not yet on the upstream make a repository dirty.
    /// A branch without an upstream only counts its local changes.
    pub fn is_dirty(&self) -> bool {
        self.has_working_changes || self.has_unpushed_changes == Some(true)
    }

    pub fn state(&self) -> RepoState {
        if self.is_dirty() {
            RepoState::Dirty
        } else {
            RepoState::Clean
        }
    }
}
