use std::path::PathBuf;

use crate::cli::Cli;
use crate::config::Settings;
use crate::renamer::{ConflictPolicy, ErrorPolicy, RenameOptions};

/// Options given on the command line. `None` means the flag was not passed
/// and the settings file or the default decides.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub root: PathBuf,
    pub settings_file: Option<PathBuf>,
    pub conflict: Option<ConflictPolicy>,
    pub recurse_after_rename: Option<bool>,
    pub on_error: Option<ErrorPolicy>,
}

impl RuntimeConfig {
    /// Command line beats settings file beats default.
    pub fn rename_options(&self, settings: &Settings) -> RenameOptions {
        let defaults = RenameOptions::default();
        RenameOptions {
            conflict: self
                .conflict
                .or(settings.conflict)
                .unwrap_or(defaults.conflict),
            recurse_after_rename: self
                .recurse_after_rename
                .or(settings.recurse_after_rename)
                .unwrap_or(defaults.recurse_after_rename),
            on_error: self
                .on_error
                .or(settings.on_error)
                .unwrap_or(defaults.on_error),
        }
    }
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            root: cli.root,
            settings_file: cli.config,
            conflict: cli.conflict,
            recurse_after_rename: cli.recurse_after_rename.then_some(true),
            on_error: cli.on_error,
        }
    }
}
