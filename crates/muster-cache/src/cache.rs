use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::CacheError;

/// Disk-backed cache for one expensive computation, keyed by a slot path.
///
/// Two layers: a durable slot on disk (JSON, survives process restarts) and
/// an in-process memo. Once this instance has judged its slot fresh and holds
/// a memo, it keeps returning the memo for its own lifetime without re-reading
/// the slot, even if another process rewrites the slot in the meantime. The
/// staleness check is the only path back to the producer.
///
/// No locking: concurrent writers to the same slot race, last writer wins.
/// Callers that share a slot across threads or processes must serialize
/// access themselves.
pub struct FileCache<T> {
    path: PathBuf,
    ttl: Duration,
    memo: Option<T>,
}

impl<T> FileCache<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    pub fn new(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            path: path.into(),
            ttl,
            memo: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the cached value, invoking `produce` only when the slot is
    /// stale (missing, empty, or older than the TTL).
    ///
    /// On the stale path the fresh value is written to the slot before it is
    /// returned, so the slot always holds the exact serialization of the last
    /// producer result. On the fresh path a corrupt or unreadable slot is
    /// fatal for the call; it never falls back to the producer.
    pub fn fetch<F, E>(&mut self, produce: F) -> Result<T, CacheError>
    where
        F: FnOnce() -> Result<T, E>,
        E: std::error::Error + Send + Sync + 'static,
    {
        if self.is_stale()? {
            debug!(slot = %self.path.display(), "slot stale, invoking producer");
            let value = produce().map_err(|e| CacheError::Producer(Box::new(e)))?;
            fs::write(&self.path, serde_json::to_string(&value)?)?;
            self.memo = Some(value.clone());
            return Ok(value);
        }

        if let Some(value) = &self.memo {
            debug!(slot = %self.path.display(), "fresh, serving process memo");
            return Ok(value.clone());
        }

        debug!(slot = %self.path.display(), "fresh, reading slot");
        let value: T = serde_json::from_str(&fs::read_to_string(&self.path)?)?;
        self.memo = Some(value.clone());
        Ok(value)
    }

    fn is_stale(&self) -> Result<bool, CacheError> {
        let meta = match fs::metadata(&self.path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(true),
            Err(e) => return Err(e.into()),
        };
        Ok(stale(meta.len(), meta.modified()?, SystemTime::now(), self.ttl))
    }
}

/// Staleness rule: an empty slot is stale, as is one older than the TTL.
/// A modification time in the future counts as fresh.
fn stale(len: u64, modified: SystemTime, now: SystemTime, ttl: Duration) -> bool {
    if len == 0 {
        return true;
    }
    match now.duration_since(modified) {
        Ok(age) => age > ttl,
        Err(_) => false,
    }
}
