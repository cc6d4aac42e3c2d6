use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::application::data::LogLevel;

/// Show a directory tree and mark which directories are git repositories.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Cli {
    /// Directory (or file) to show
    #[clap(default_value = ".")]
    pub path: PathBuf,

    /// Do not list directories deeper than this [default: 10]
    #[clap(long, short = 'd')]
    pub max_depth: Option<usize>,

    /// Comma-separated directory names to show without their contents
    #[clap(long, short, value_name = "NAMES")]
    pub skip: Option<String>,

    /// Include entries whose name starts with a dot
    #[clap(long = "all", short = 'a', overrides_with = "exclude_hidden")]
    pub include_hidden: bool,

    /// Leave out dot entries even when the settings file includes them
    #[clap(long = "no-all", overrides_with = "include_hidden")]
    pub exclude_hidden: bool,

    #[clap(long, default_value = "auto", value_enum)]
    pub color: ColorChoice,

    /// YAML settings file [default: ./git-tree.yaml when present]
    #[clap(long, short)]
    pub config: Option<PathBuf>,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum ColorChoice {
    /// Color when stdout supports it
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn should_colorize(self) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => supports_color::on(supports_color::Stream::Stdout).is_some(),
        }
    }
}
