use std::error::Error as _;
use std::ffi::{OsStr, OsString};
use std::fs::{self, DirEntry, Metadata};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use snafu::{ResultExt, Snafu, ensure};
use tracing::{debug, info, warn};

use crate::ext::BestEffortPathExt;
use crate::renamer::bracket_name::{is_addressable, unwrap_bracketed};
use crate::renamer::{
    ConflictPolicy, ErrorPolicy, ProgressEvent, ProgressSink, RenameOptions, RenameReport,
};

/// Depth-first walker that unwraps `[[name]]` entries in place.
///
/// Every directory is listed once, right before its entries are visited, so
/// renames made earlier in the walk are visible to later listings but a
/// directory never sees its own renamed children twice.
pub struct TreeRenamer<P> {
    options: RenameOptions,
    progress: P,
    report: RenameReport,
}

impl<P: ProgressSink> TreeRenamer<P> {
    pub fn new(options: RenameOptions, progress: P) -> Self {
        Self {
            options,
            progress,
            report: RenameReport::default(),
        }
    }

    /// Processes the tree under `root`.
    ///
    /// Failing to open `root` itself always aborts. Any later failure either
    /// aborts or is collected into the report, depending on
    /// [`RenameOptions::on_error`]. Renames done before an abort stay done.
    pub fn run(&mut self, root: &Path) -> Result<RenameReport, RenameError> {
        let metadata = fs::metadata(root).context(RootUnavailableSnafu {
            path: root.to_path_buf(),
        })?;
        ensure!(
            metadata.is_dir(),
            NotADirectorySnafu {
                path: root.to_path_buf()
            }
        );

        info!(
            "Unwrapping bracketed names under {}",
            root.best_effort_path_display()
        );
        self.report = RenameReport::default();
        self.visit_directory(root)?;

        let report = std::mem::take(&mut self.report);
        info!(
            "Checked {} entries: {} renamed, {} skipped, {} failed",
            report.checked,
            report.renamed,
            report.skipped,
            report.failures.len()
        );
        Ok(report)
    }

    fn visit_directory(&mut self, dir: &Path) -> Result<(), RenameError> {
        debug!("Listing {}", dir.best_effort_path_display());
        let entries = fs::read_dir(dir)
            .context(ReadDirSnafu {
                path: dir.to_path_buf(),
            })?
            .collect::<Vec<_>>();

        for entry in entries {
            let result = entry
                .context(ReadDirSnafu {
                    path: dir.to_path_buf(),
                })
                .and_then(|entry| self.visit_entry(dir, &entry));
            self.apply_error_policy(result)?;
        }

        Ok(())
    }

    fn visit_entry(&mut self, dir: &Path, entry: &DirEntry) -> Result<(), RenameError> {
        let name = entry.file_name();
        let path = entry.path();
        self.progress
            .report(ProgressEvent::Checking { name: name.clone() });
        self.report.checked += 1;

        // Read at visit time, as earlier renames in this directory may have
        // replaced the listed entry. Symlinks are not followed.
        let Some(metadata) = existing_entry(&path)? else {
            debug!(
                "{} vanished before it was visited",
                path.best_effort_path_display()
            );
            return Ok(());
        };

        match unwrap_bracketed(&name) {
            Some(target_name) => {
                self.rename_entry(dir, &path, &name, &target_name, metadata.is_dir())
            }
            None if metadata.is_dir() => self.visit_directory(&path),
            None => Ok(()),
        }
    }

    fn rename_entry(
        &mut self,
        dir: &Path,
        path: &Path,
        name: &OsStr,
        target_name: &OsStr,
        is_dir: bool,
    ) -> Result<(), RenameError> {
        if !is_addressable(target_name) {
            warn!("Leaving {name:?} in place, {target_name:?} is not a usable name");
            self.report.skipped += 1;
            return Ok(());
        }

        let Some(final_name) = self.claim_target(dir, target_name)? else {
            self.report.skipped += 1;
            return Ok(());
        };

        self.progress.report(ProgressEvent::Renaming {
            from: name.to_os_string(),
            to: final_name.clone(),
        });

        let target = dir.join(&final_name);
        fs::rename(path, &target).context(MoveSnafu {
            from: path.to_path_buf(),
            to: target.clone(),
        })?;
        info!(
            "Renamed {} to {final_name:?}",
            path.best_effort_path_display()
        );
        self.report.renamed += 1;

        if is_dir && self.options.recurse_after_rename {
            self.visit_directory(&target)?;
        }

        Ok(())
    }

    /// Makes room for `target_name` inside `dir` according to the conflict
    /// policy. Returns the name to rename to, or `None` if the entry stays.
    fn claim_target(
        &self,
        dir: &Path,
        target_name: &OsStr,
    ) -> Result<Option<OsString>, RenameError> {
        let target = dir.join(target_name);
        let Some(existing) = existing_entry(&target)? else {
            return Ok(Some(target_name.to_os_string()));
        };

        match self.options.conflict {
            ConflictPolicy::Overwrite => {
                debug!("Removing existing {}", target.best_effort_path_display());
                remove_existing(&target, &existing)?;
                Ok(Some(target_name.to_os_string()))
            }
            ConflictPolicy::Skip => {
                warn!(
                    "{} already exists, skipping",
                    target.best_effort_path_display()
                );
                Ok(None)
            }
            ConflictPolicy::Fail => TargetExistsSnafu { path: target }.fail(),
            ConflictPolicy::Suffix => free_suffixed_name(dir, target_name).map(Some),
        }
    }

    fn apply_error_policy(&mut self, result: Result<(), RenameError>) -> Result<(), RenameError> {
        let Err(error) = result else {
            return Ok(());
        };

        match self.options.on_error {
            ErrorPolicy::Abort => Err(error),
            ErrorPolicy::Continue => {
                match error.source() {
                    Some(cause) => warn!("{error}: {cause}. Continuing"),
                    None => warn!("{error}. Continuing"),
                }
                self.report.failures.push(error);
                Ok(())
            }
        }
    }
}

/// Looks at `path` without following a final symlink, so a dangling link
/// still counts as an existing entry.
fn existing_entry(path: &Path) -> Result<Option<Metadata>, RenameError> {
    match fs::symlink_metadata(path) {
        Ok(metadata) => Ok(Some(metadata)),
        Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
        Err(error) => Err(error).context(InspectTargetSnafu {
            path: path.to_path_buf(),
        }),
    }
}

fn remove_existing(path: &Path, metadata: &Metadata) -> Result<(), RenameError> {
    let removed = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    removed.context(RemoveExistingSnafu {
        path: path.to_path_buf(),
    })
}

fn free_suffixed_name(dir: &Path, target_name: &OsStr) -> Result<OsString, RenameError> {
    let mut counter = 1;
    loop {
        let candidate = suffixed_name(target_name, counter);
        if existing_entry(&dir.join(&candidate))?.is_none() {
            return Ok(candidate);
        }
        counter += 1;
    }
}

/// `report.pdf` becomes `report (n).pdf`. Names without an extension,
/// dotfiles included, get the counter appended.
fn suffixed_name(name: &OsStr, counter: usize) -> OsString {
    let path = Path::new(name);
    let mut suffixed = path.file_stem().unwrap_or(name).to_os_string();
    suffixed.push(format!(" ({counter})"));
    if let Some(extension) = path.extension() {
        suffixed.push(".");
        suffixed.push(extension);
    }
    suffixed
}

#[derive(Debug, Snafu)]
pub enum RenameError {
    #[snafu(display("Cannot access root directory {}", path.best_effort_path_display()))]
    RootUnavailableError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("{} is not a directory", path.best_effort_path_display()))]
    NotADirectoryError { path: PathBuf },
    #[snafu(display("Failed to list directory {}", path.best_effort_path_display()))]
    ReadDirError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to inspect existing entry {}", path.best_effort_path_display()))]
    InspectTargetError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to remove existing entry {}", path.best_effort_path_display()))]
    RemoveExistingError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display(
        "Failed to rename {} to {}",
        from.best_effort_path_display(),
        to.best_effort_path_display()
    ))]
    MoveError {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display(
        "Cannot rename into {}, an entry with that name already exists",
        path.best_effort_path_display()
    ))]
    TargetExistsError { path: PathBuf },
}
