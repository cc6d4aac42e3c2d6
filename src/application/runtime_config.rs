use std::path::PathBuf;

use crate::cli::Cli;
use crate::config::{Settings, split_list};
use crate::filesystem::TraversalPolicy;
use crate::git::DEFAULT_GIT_PROGRAM;

/// Everything a run needs, after merging command line, settings file and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub root: PathBuf,
    pub policy: TraversalPolicy,
    pub git_program: String,
    pub colorize: bool,
}

impl RuntimeConfig {
    /// Command line flags win over the settings file, which wins over defaults.
    pub fn resolve(cli: Cli, settings: Settings) -> Self {
        let defaults = TraversalPolicy::default();
        let skip = match (cli.skip.as_deref(), settings.skip) {
            (Some(list), _) => split_list(list).into_iter().collect(),
            (None, Some(names)) => names.into_iter().collect(),
            (None, None) => defaults.skip,
        };

        let policy = TraversalPolicy {
            max_depth: cli
                .max_depth
                .or(settings.max_depth)
                .unwrap_or(defaults.max_depth),
            skip,
            include_hidden: cli.include_hidden
                || (!cli.exclude_hidden && settings.include_hidden.unwrap_or(false)),
        };

        Self {
            root: cli.path,
            policy,
            git_program: settings
                .git
                .unwrap_or_else(|| DEFAULT_GIT_PROGRAM.to_string()),
            colorize: cli.color.should_colorize(),
        }
    }
}
