use std::path::{self, Path};

/// Renders a path for diagnostics.
///
/// Prefers the canonical form. Paths that no longer exist, such as the source
/// of a finished rename, fall back to their absolute form, and to the path as
/// given if even that cannot be built.
pub trait BestEffortPathExt {
    fn best_effort_path_display(&self) -> String;
}

impl BestEffortPathExt for Path {
    fn best_effort_path_display(&self) -> String {
        self.canonicalize()
            .or_else(|_| path::absolute(self))
            .unwrap_or_else(|_| self.to_path_buf())
            .display()
            .to_string()
    }
}
