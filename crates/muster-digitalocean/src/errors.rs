use thiserror::Error;

use muster_cache::CacheError;
use muster_config::SettingsError;
use muster_core::ClassifyError;

#[derive(Error, Debug)]
pub enum DigitalOceanError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Classify(#[from] ClassifyError),

    #[error("failed to render inventory: {0}")]
    Render(#[from] serde_json::Error),
}
