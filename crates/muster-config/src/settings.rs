use std::path::Path;

use crate::env::EnvSettings;
use crate::errors::SettingsError;
use crate::file::FileSettings;

/// Layered settings resolver: environment first, settings file second.
///
/// Lookup is pure per key; absence at both layers is a normal `None`, never
/// an error.
#[derive(Debug, Clone)]
pub struct Settings {
    env: EnvSettings,
    file: FileSettings,
}

impl Settings {
    pub fn new(
        prefix: impl Into<String>,
        section: &str,
        path: impl AsRef<Path>,
    ) -> Result<Self, SettingsError> {
        Ok(Self {
            env: EnvSettings::new(prefix),
            file: FileSettings::load(section, path)?,
        })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.env.get(key).or_else(|| self.file.get(key))
    }
}
