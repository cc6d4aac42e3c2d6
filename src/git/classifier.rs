use std::{
    io,
    num::ParseIntError,
    path::{Path, PathBuf},
};

use snafu::{ResultExt, Snafu, ensure};
use tracing::{debug, warn};

use crate::ext::PathExt;
use crate::filesystem::{EntryType, Filesystem};
use crate::git::{GitStatus, ProcessOutput, ProcessRunner};

pub const GIT_DIR_NAME: &str = ".git";
pub const DEFAULT_GIT_PROGRAM: &str = "git";

const STATUS_ARGS: &[&str] = &["status", "--porcelain"];
const UPSTREAM_ARGS: &[&str] = &["rev-parse", "--abbrev-ref", "--symbolic-full-name", "@{u}"];
const AHEAD_ARGS: &[&str] = &["rev-list", "--count", "@{u}..HEAD"];

/// Decides which directories are repositories and how dirty they are.
pub struct GitClassifier<'a, F, P> {
    fs: &'a F,
    runner: &'a P,
    program: String,
}

impl<'a, F: Filesystem, P: ProcessRunner> GitClassifier<'a, F, P> {
    pub fn new(fs: &'a F, runner: &'a P) -> Self {
        Self {
            fs,
            runner,
            program: DEFAULT_GIT_PROGRAM.to_string(),
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// True iff `path/.git` exists and is a directory. A missing `.git` is not an error.
    pub fn is_repository(&self, path: &Path) -> Result<bool, ClassifierError> {
        let git_dir = path.join(GIT_DIR_NAME);
        match self.fs.stat(&git_dir) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            result => {
                let entry_type = result.context(ProbeSnafu { path: git_dir })?;
                Ok(entry_type == EntryType::Directory)
            }
        }
    }

    /// Never fails: problems talking to git are logged and reported as a clean
    /// repository so the walk can carry on.
    pub fn status(&self, path: &Path) -> GitStatus {
        match self.working_tree_status(path) {
            Ok(status) => {
                debug!(
                    "Repository {} is {}: {} changed, {} untracked, {:?} ahead",
                    path.display(),
                    status.state(),
                    status.uncommitted_changes,
                    status.untracked_files,
                    status.commits_ahead
                );
                status
            }
            Err(e) => {
                warn!(
                    "Could not read git status of {}: {}",
                    path.display_resolved(),
                    snafu::Report::from_error(e)
                );
                GitStatus::default()
            }
        }
    }

    fn working_tree_status(&self, path: &Path) -> Result<GitStatus, GitCommandError> {
        let porcelain = self.git(path, STATUS_ARGS)?;
        let status = GitStatus::from_porcelain(&porcelain);
        if status.has_working_changes {
            return Ok(status);
        }

        match self.commits_ahead(path) {
            Ok(ahead) => Ok(status.with_commits_ahead(ahead)),
            Err(e) => {
                warn!(
                    "Could not compare {} with its upstream: {}",
                    path.display_resolved(),
                    snafu::Report::from_error(e)
                );
                Ok(status)
            }
        }
    }

    /// `None` when the current branch has no upstream.
    fn commits_ahead(&self, path: &Path) -> Result<Option<u32>, GitCommandError> {
        let upstream = self.spawn(path, UPSTREAM_ARGS)?;
        if !upstream.success() {
            debug!("No upstream configured for {}", path.display());
            return Ok(None);
        }

        let count = self.git(path, AHEAD_ARGS)?;
        let count = count.trim();
        count
            .parse::<u32>()
            .map(Some)
            .context(InvalidCountSnafu { output: count })
    }

    fn git(&self, path: &Path, args: &[&str]) -> Result<String, GitCommandError> {
        let output = self.spawn(path, args)?;
        ensure!(
            output.success(),
            FailedSnafu {
                command: args.join(" "),
                exit_code: output.exit_code,
                stderr: output.stderr.trim(),
            }
        );
        Ok(output.stdout)
    }

    fn spawn(&self, path: &Path, args: &[&str]) -> Result<ProcessOutput, GitCommandError> {
        self.runner.run(&self.program, args, path).context(SpawnSnafu {
            program: self.program.clone(),
            command: args.join(" "),
        })
    }
}

#[derive(Debug, Snafu)]
pub enum ClassifierError {
    #[snafu(display("Failed to probe {}", path.display_resolved()))]
    Probe { path: PathBuf, source: io::Error },
}

#[derive(Debug, Snafu)]
pub enum GitCommandError {
    #[snafu(display("Failed to run '{} {}'", program, command))]
    Spawn {
        program: String,
        command: String,
        source: io::Error,
    },
    #[snafu(display("'git {}' exited with code {}: {}", command, exit_code, stderr))]
    Failed {
        command: String,
        exit_code: i32,
        stderr: String,
    },
    #[snafu(display("Unexpected commit count '{}'", output))]
    InvalidCount {
        output: String,
        source: ParseIntError,
    },
}
