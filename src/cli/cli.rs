use std::path::PathBuf;

use clap::Parser;

use crate::application::data::LogLevel;
use crate::renamer::{ConflictPolicy, ErrorPolicy};

/// Renames every `[[name]]` file or directory under ROOT to `name`.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Cli {
    /// The directory tree to process
    pub root: PathBuf,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// What to do when the unwrapped name is already taken [default: overwrite]
    #[clap(long, short, value_enum)]
    pub conflict: Option<ConflictPolicy>,

    /// Descend into directories right after renaming them
    #[clap(long, short)]
    pub recurse_after_rename: bool,

    /// Whether a failed entry stops the whole run [default: abort]
    #[clap(long, short = 'e', value_enum)]
    pub on_error: Option<ErrorPolicy>,

    /// Settings file to use instead of ROOT/unbracket.yaml
    #[clap(long)]
    pub config: Option<PathBuf>,
}
