use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("cache backend unavailable: {0}")]
    Unavailable(String),
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed cache payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Minimal key-value store with expiring string values and scored sets, in the style of Redis.
///
/// All methods take `&self`: implementations synchronize internally so a backend can be shared between threads.
pub trait CacheBackend: Send + Sync {
    /// Returns the value stored under `key`, `None` if absent or expired.
    fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Stores `value` under `key`, replacing any previous value. The entry expires after `ttl`.
    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;

    /// Adds `member` to the scored set `set`, or updates its score.
    fn zadd(&self, set: &str, score: f64, member: &str) -> Result<(), CacheError>;

    /// Members of `set` ranked `start..=stop`, highest score first.
    fn zrevrange(&self, set: &str, start: usize, stop: usize) -> Result<Vec<String>, CacheError>;

    /// Removes the members of `set` scored within `min..=max`, returns how many were removed.
    fn zremrangebyscore(&self, set: &str, min: f64, max: f64) -> Result<usize, CacheError>;

    fn delete(&self, key: &str) -> Result<(), CacheError>;
}

impl<B: CacheBackend + ?Sized> CacheBackend for std::sync::Arc<B> {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        (**self).set(key, value, ttl)
    }

    fn zadd(&self, set: &str, score: f64, member: &str) -> Result<(), CacheError> {
        (**self).zadd(set, score, member)
    }

    fn zrevrange(&self, set: &str, start: usize, stop: usize) -> Result<Vec<String>, CacheError> {
        (**self).zrevrange(set, start, stop)
    }

    fn zremrangebyscore(&self, set: &str, min: f64, max: f64) -> Result<usize, CacheError> {
        (**self).zremrangebyscore(set, min, max)
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        (**self).delete(key)
    }
}
