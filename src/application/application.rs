use snafu::Snafu;
use snafu::prelude::*;
use tracing::debug;

use crate::application::RuntimeConfig;
use crate::config::{Settings, SettingsError};
use crate::renamer::{ProgressSink, RenameError, RenameReport, TreeRenamer, WriterProgress};

pub struct Application;

impl Application {
    pub fn run(runtime_config: impl Into<RuntimeConfig>) -> Result<RenameReport, ApplicationError> {
        Self::run_with_progress(runtime_config, WriterProgress::stdout())
    }

    pub fn run_with_progress(
        runtime_config: impl Into<RuntimeConfig>,
        progress: impl ProgressSink,
    ) -> Result<RenameReport, ApplicationError> {
        let runtime_config: RuntimeConfig = runtime_config.into();
        let settings = Settings::read(
            &runtime_config.root,
            runtime_config.settings_file.as_deref(),
        )
        .context(SettingsSnafu)?;
        debug!("Loaded settings: {:?}", settings);

        let options = runtime_config.rename_options(&settings);
        debug!("Effective rename options: {:?}", options);

        let report = TreeRenamer::new(options, progress)
            .run(&runtime_config.root)
            .context(RenameSnafu)?;

        ensure!(
            report.is_clean(),
            PartialFailureSnafu {
                failures: report.failures.len()
            }
        );
        Ok(report)
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered while loading settings"))]
    SettingsError { source: SettingsError },
    #[snafu(display("Critical failure encountered while renaming"))]
    RenameError { source: RenameError },
    #[snafu(display("Finished with {} failed entries", failures))]
    PartialFailure { failures: usize },
}
