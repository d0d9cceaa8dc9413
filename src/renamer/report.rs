use crate::renamer::RenameError;

/// Summary of a single traversal.
#[derive(Debug, Default)]
pub struct RenameReport {
    /// Entries listed and inspected, including those inside subdirectories
    pub checked: usize,
    pub renamed: usize,
    /// Bracketed entries left in place, either because of the conflict policy
    /// or because their unwrapped name is not usable
    pub skipped: usize,
    /// Errors tolerated under `ErrorPolicy::Continue`
    pub failures: Vec<RenameError>,
}

impl RenameReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
