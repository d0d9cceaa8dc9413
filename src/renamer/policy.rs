use clap::ValueEnum;
use derive_more::Display;

/// What to do when the unwrapped name is already taken by a sibling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Display)]
pub enum ConflictPolicy {
    /// Delete the existing entry, recursively for directories, then rename
    #[default]
    #[display("overwrite")]
    Overwrite,
    /// Leave both entries where they are
    #[display("skip")]
    Skip,
    /// Report the collision as an error
    #[display("fail")]
    Fail,
    /// Rename to the first free `name (n)` variant
    #[display("suffix")]
    Suffix,
}

/// How a failed filesystem operation affects the rest of the traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Display)]
pub enum ErrorPolicy {
    /// Stop at the first error
    #[default]
    #[display("abort")]
    Abort,
    /// Record the error and move on to the next entry
    #[display("continue")]
    Continue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenameOptions {
    pub conflict: ConflictPolicy,
    /// Descend into a directory right after it was renamed. Off by default,
    /// which leaves bracketed names inside it for the next run.
    pub recurse_after_rename: bool,
    pub on_error: ErrorPolicy,
}
