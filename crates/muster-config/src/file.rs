use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, warn};

use crate::errors::SettingsError;

/// Settings source backed by a sectioned key/value file.
///
/// Lines are `key = value` (or `key: value`) under `[section]` headers, with
/// `#` and `;` comment lines. Keys are case-insensitive; only the configured
/// section is retained. A missing file yields an empty source, matching the
/// behavior of a freshly provisioned machine without a settings file.
#[derive(Debug, Clone)]
pub struct FileSettings {
    values: HashMap<String, String>,
}

impl FileSettings {
    pub fn load(section: &str, path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file, starting empty");
                String::new()
            }
            Err(source) => {
                return Err(SettingsError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        Ok(Self {
            values: parse(&content, section),
        })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.get(&key.to_lowercase()).cloned()
    }
}

fn parse(content: &str, section: &str) -> HashMap<String, String> {
    let mut values = HashMap::new();
    let mut in_section = false;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            in_section = header.trim().eq_ignore_ascii_case(section);
            continue;
        }
        if !in_section {
            continue;
        }
        match line.split_once(['=', ':']) {
            Some((key, value)) => {
                values.insert(key.trim().to_lowercase(), value.trim().to_string());
            }
            None => warn!(line, "settings line has no separator, ignoring"),
        }
    }

    values
}
