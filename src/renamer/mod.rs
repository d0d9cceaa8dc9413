//! Unwrapping of `[[name]]` entries across a directory tree.
//!
//! [`TreeRenamer`] does the walking; the policies in [`RenameOptions`] decide
//! what happens on name collisions and on filesystem errors.

mod bracket_name;
mod policy;
mod progress;
mod report;
mod tree_renamer;

pub use policy::{ConflictPolicy, ErrorPolicy, RenameOptions};
pub use progress::{ProgressEvent, ProgressSink, WriterProgress};
pub use report::RenameReport;
pub use tree_renamer::{RenameError, TreeRenamer};
