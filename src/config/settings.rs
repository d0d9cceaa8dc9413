use clap::ValueEnum;
use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::{
    ext::BestEffortPathExt,
    renamer::{ConflictPolicy, ErrorPolicy},
};

const SETTINGS_FILE_NAME: &str = "unbracket.yaml";

fn get_settings_file_path(root: &Path) -> PathBuf {
    root.join(SETTINGS_FILE_NAME)
}

/// Values read from the settings file. Unset keys fall through to the
/// built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub conflict: Option<ConflictPolicy>,
    pub recurse_after_rename: Option<bool>,
    pub on_error: Option<ErrorPolicy>,
}

impl Settings {
    /// Reads `explicit` when given. Otherwise reads `unbracket.yaml` from
    /// `root` if it exists, and returns empty settings if it does not.
    pub fn read(root: &Path, explicit: Option<&Path>) -> Result<Self, SettingsError> {
        if let Some(path) = explicit {
            return Self::from_path(path);
        }

        let path = get_settings_file_path(root);
        if !path.is_file() {
            debug!(
                "No settings file at {}, using defaults",
                path.best_effort_path_display()
            );
            return Ok(Self::default());
        }
        Self::from_path(&path)
    }

    pub fn from_path(path: &Path) -> Result<Self, SettingsError> {
        debug!("Reading settings file: {}", path.best_effort_path_display());
        let contents = fs::read_to_string(path).context(ReadSnafu {
            file_path: path.best_effort_path_display(),
        })?;
        contents.as_str().try_into()
    }

    fn apply_mapping(&mut self, mapping: &LinkedHashMap<Yaml, Yaml>) -> Result<(), SettingsError> {
        for (key, value) in mapping {
            let Yaml::Value(Scalar::String(key)) = key else {
                return Err(SettingsError::KeyNotString {
                    key: format!("{key:?}"),
                });
            };
            let key: &str = key;

            match key {
                "conflict" => self.conflict = Some(parse_value_enum(key, value)?),
                "on_error" => self.on_error = Some(parse_value_enum(key, value)?),
                "recurse_after_rename" => match value {
                    Yaml::Value(Scalar::Boolean(flag)) => self.recurse_after_rename = Some(*flag),
                    _ => {
                        return InvalidValueSnafu {
                            key,
                            value: format!("{value:?}"),
                        }
                        .fail();
                    }
                },
                _ => return UnknownKeySnafu { key }.fail(),
            }
        }
        Ok(())
    }
}

fn parse_value_enum<T: ValueEnum>(key: &str, value: &Yaml) -> Result<T, SettingsError> {
    let text = value.as_str().context(InvalidValueSnafu {
        key,
        value: format!("{value:?}"),
    })?;
    T::from_str(text, true)
        .ok()
        .context(InvalidValueSnafu { key, value: text })
}

impl TryFrom<&str> for Settings {
    type Error = SettingsError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let mut settings = Settings::default();

        match documents.first() {
            // Empty file, or one holding only comments
            None | Some(Yaml::Value(Scalar::Null)) => {}
            Some(Yaml::Mapping(mapping)) => settings.apply_mapping(mapping)?,
            Some(_) => return Err(SettingsError::TopLevelNotMap),
        }
        ensure!(documents.len() <= 1, MultipleDocumentsSnafu);

        Ok(settings)
    }
}

#[derive(Debug, Snafu)]
pub enum SettingsError {
    #[snafu(display("Failed to read the settings file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Failed to parse the settings file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Settings file should contain a single document"))]
    MultipleDocuments,
    #[snafu(display("Top level of the settings file should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Setting keys should be strings, found {}", key))]
    KeyNotString { key: String },
    #[snafu(display("Unknown setting '{}'", key))]
    UnknownKey { key: String },
    #[snafu(display("Invalid value {} for setting '{}'", value, key))]
    InvalidValue { key: String, value: String },
}
