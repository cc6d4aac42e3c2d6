//! Git repository detection and status inspection.
//!
//! Everything here talks to the outside world through the [`Filesystem`] and
//! [`ProcessRunner`] capabilities, so it can be driven by fakes in tests.
//!
//! [`Filesystem`]: crate::filesystem::Filesystem

mod classifier;
mod process;
mod status;

pub use classifier::{ClassifierError, DEFAULT_GIT_PROGRAM, GitClassifier};
pub use process::{ProcessOutput, ProcessRunner, SystemProcessRunner};
pub use status::{GitStatus, RepoState};
