use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("cache slot i/o failed: {0}")]
    Io(#[from] io::Error),

    #[error("cache slot holds invalid content: {0}")]
    Content(#[from] serde_json::Error),

    #[error("producer failed: {0}")]
    Producer(#[source] Box<dyn std::error::Error + Send + Sync>),
}
