use std::{
    fs,
    path::{Path, PathBuf},
};

use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::debug;

use crate::ext::PathExt;

pub const SETTINGS_FILE_NAME: &str = "git-tree.yaml";

/// Values read from a YAML settings file. Anything left `None` falls back to
/// the command line or the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub max_depth: Option<usize>,
    pub skip: Option<Vec<String>>,
    pub include_hidden: Option<bool>,
    pub git: Option<String>,
}

impl Settings {
    /// Reads `explicit` when given, otherwise `git-tree.yaml` in `cwd` if it exists.
    pub fn read(explicit: Option<&Path>, cwd: &Path) -> Result<Self, SettingsError> {
        if let Some(path) = explicit {
            return Self::from_path(path);
        }

        let implicit = cwd.join(SETTINGS_FILE_NAME);
        if implicit.is_file() {
            Self::from_path(&implicit)
        } else {
            debug!("No settings file at {}, using defaults", implicit.display());
            Ok(Self::default())
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, SettingsError> {
        debug!("Reading settings file: {}", path.display_resolved());
        let contents = fs::read_to_string(path).context(ReadSnafu {
            file_path: path.to_path_buf(),
        })?;
        contents.as_str().try_into()
    }

    fn apply(&mut self, key: &str, value: &Yaml) -> Result<(), SettingsError> {
        match key {
            "max_depth" => {
                let depth = match value {
                    Yaml::Value(Scalar::Integer(n)) => usize::try_from(*n).ok(),
                    _ => None,
                };
                self.max_depth = Some(depth.context(InvalidValueSnafu {
                    key,
                    expected: "a non-negative integer",
                })?);
            }
            "skip" => {
                let names = match (value.as_str(), value.as_sequence()) {
                    (Some(list), _) => Some(split_list(list)),
                    (_, Some(items)) => items
                        .iter()
                        .map(|item| item.as_str().map(str::to_string))
                        .collect::<Option<Vec<_>>>(),
                    _ => None,
                };
                self.skip = Some(names.context(InvalidValueSnafu {
                    key,
                    expected: "a list of directory names",
                })?);
            }
            "include_hidden" => {
                let include = match value {
                    Yaml::Value(Scalar::Boolean(b)) => Some(*b),
                    _ => None,
                };
                self.include_hidden = Some(include.context(InvalidValueSnafu {
                    key,
                    expected: "true or false",
                })?);
            }
            "git" => {
                let program = value.as_str().filter(|s| !s.trim().is_empty());
                self.git = Some(
                    program
                        .context(InvalidValueSnafu {
                            key,
                            expected: "the git executable",
                        })?
                        .to_string(),
                );
            }
            other => debug!("Ignoring unknown setting '{}'", other),
        }
        Ok(())
    }
}

impl TryFrom<&str> for Settings {
    type Error = SettingsError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let mut settings = Settings::default();
        let document = match documents.first() {
            None | Some(Yaml::Value(Scalar::Null)) => return Ok(settings),
            Some(document) => document,
        };

        let top_level = document.as_mapping().context(TopLevelNotMapSnafu)?;
        for (key, value) in top_level.iter() {
            match key.as_str() {
                Some(key) => settings.apply(key, value)?,
                None => debug!("Skipping non-string settings key: {:?}", key),
            }
        }

        Ok(settings)
    }
}

/// Splits a comma-separated list, trimming items and dropping empty ones.
pub fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Snafu)]
pub enum SettingsError {
    #[snafu(display("Failed to read the settings file: {}", file_path.display_resolved()))]
    ReadError {
        file_path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to parse the settings file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Top level of the settings file should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Setting '{}' should be {}", key, expected))]
    InvalidValue { key: String, expected: &'static str },
}
