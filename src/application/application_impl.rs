use std::io::{self, Write};

use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info};

use crate::application::RuntimeConfig;
use crate::cli::Cli;
use crate::config::{Settings, SettingsError};
use crate::filesystem::{Filesystem, LocalFilesystem, TreeBuilder, TreeError};
use crate::git::SystemProcessRunner;
use crate::render::TreeRenderer;

pub struct Application;

impl Application {
    pub fn run(cli: Cli) -> Result<(), ApplicationError> {
        let fs = LocalFilesystem;
        let cwd = fs.current_dir().context(CurrentDirSnafu)?;
        let settings = Settings::read(cli.config.as_deref(), &cwd).context(ConfigSnafu)?;
        let config = RuntimeConfig::resolve(cli, settings);
        debug!("Resolved runtime config: {:?}", config);

        colored::control::set_override(config.colorize);

        let runner = SystemProcessRunner;
        let tree = TreeBuilder::new(&fs, &runner, &config.policy)
            .with_git_program(&config.git_program)
            .build(&config.root)
            .context(WalkSnafu)?;

        let lines = TreeRenderer::new(config.colorize).render(&tree);
        let mut stdout = io::stdout().lock();
        for line in &lines {
            writeln!(stdout, "{line}").context(OutputSnafu)?;
        }

        let stats = tree.stats();
        info!(
            "{} directories, {} files, {} other entries",
            stats.directories, stats.files, stats.unknown
        );
        if stats.repositories > 0 {
            info!(
                "{} repositories found, {} dirty",
                stats.repositories, stats.dirty_repositories
            );
        }

        Ok(())
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Failed to obtain current dir"))]
    CurrentDirError { source: io::Error },
    #[snafu(display("Critical failure encountered during configuration stage"))]
    ConfigError { source: SettingsError },
    #[snafu(display("Critical failure encountered while walking the tree"))]
    WalkError { source: TreeError },
    #[snafu(display("Failed to write the tree to stdout"))]
    OutputError { source: io::Error },
}
