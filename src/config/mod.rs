//! Layered configuration: built-in defaults, an optional YAML settings file,
//! then command line flags.

mod settings;

pub use settings::{Settings, SettingsError, split_list};
