use std::time::Duration;

use jiff::Timestamp;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::cache::{CacheBackend, CacheError};
use crate::io::canonical::RequestHash;
use crate::io::ext_repr::OptimizeResponse;
use crate::util::CacheConfig;

/// Scored set indexing cached results by the UTC epoch second they were stored at
pub const INDEX_KEY: &str = "opt:index";

/// Metadata record of a cached result.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CacheEntry {
    pub request_hash: String,
    pub timestamp_utc: Timestamp,
    pub result: OptimizeResponse,
}

/// Best-effort result cache on top of a [`CacheBackend`].
///
/// Failures of the backend never reach the caller: reads degrade to misses and writes are dropped.
pub struct ResultCache<B: CacheBackend> {
    backend: B,
    ttl: Duration,
}

impl<B: CacheBackend> ResultCache<B> {
    pub fn new(backend: B, config: CacheConfig) -> Self {
        Self {
            backend,
            ttl: Duration::from_secs(config.ttl_secs),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the result stored for `hash`, if any.
    pub fn lookup(&self, hash: &RequestHash) -> Option<OptimizeResponse> {
        let raw = match self.backend.get(&hash.cache_key()) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("[CACHE] read of {} failed, treating as miss: {e}", hash.cache_key());
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(result) => Some(result),
            Err(e) => {
                warn!("[CACHE] undecodable entry under {}, treating as miss: {e}", hash.cache_key());
                None
            }
        }
    }

    /// Stores `result` under `hash`, along with its metadata entry and a recency index record.
    pub fn store(&self, hash: &RequestHash, result: &OptimizeResponse) {
        match self.try_store(hash, result) {
            Ok(()) => debug!("[CACHE] stored {} (ttl {}s)", hash.cache_key(), self.ttl.as_secs()),
            Err(e) => warn!("[CACHE] failed to store {}, dropping: {e}", hash.cache_key()),
        }
    }

    fn try_store(&self, hash: &RequestHash, result: &OptimizeResponse) -> Result<(), CacheError> {
        let now = Timestamp::now();
        let entry = CacheEntry {
            request_hash: hash.hex().to_string(),
            timestamp_utc: now,
            result: result.clone(),
        };
        self.backend
            .set(&hash.cache_key(), &serde_json::to_string(result)?, self.ttl)?;
        self.backend
            .set(&hash.meta_key(), &serde_json::to_string(&entry)?, self.ttl)?;
        //index records older than the ttl point to expired entries
        let cutoff = now.as_second().saturating_sub_unsigned(self.ttl.as_secs());
        let trimmed = self
            .backend
            .zremrangebyscore(INDEX_KEY, f64::NEG_INFINITY, cutoff as f64 - 1.0)?;
        if trimmed > 0 {
            debug!("[CACHE] trimmed {trimmed} expired record(s) from {INDEX_KEY}");
        }
        self.backend
            .zadd(INDEX_KEY, now.as_second() as f64, hash.hex())?;
        Ok(())
    }

    /// Metadata entry of the result stored for `hash`.
    /// If only the result itself survived, the entry is rebuilt with the current time as timestamp.
    pub fn entry_by_hash(&self, hash: &RequestHash) -> Option<CacheEntry> {
        match self.read_json::<CacheEntry>(&hash.meta_key()) {
            Some(entry) => Some(entry),
            None => {
                let result = self.read_json::<OptimizeResponse>(&hash.cache_key())?;
                debug!("[CACHE] rebuilt metadata entry of {}", hash.hex());
                Some(CacheEntry {
                    request_hash: hash.hex().to_string(),
                    timestamp_utc: Timestamp::now(),
                    result,
                })
            }
        }
    }

    /// Most recently stored entries first, skipping `offset` and returning at most `limit`.
    /// Index records whose entries expired are skipped.
    pub fn recent(&self, offset: usize, limit: usize) -> Vec<CacheEntry> {
        if limit == 0 {
            return vec![];
        }
        let hashes = match self.backend.zrevrange(INDEX_KEY, offset, offset + limit - 1) {
            Ok(hashes) => hashes,
            Err(e) => {
                warn!("[CACHE] failed to read the recency index: {e}");
                return vec![];
            }
        };
        hashes
            .iter()
            .filter_map(|hex| RequestHash::from_hex(hex))
            .filter_map(|hash| self.entry_by_hash(&hash))
            .collect()
    }

    fn read_json<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Option<T> {
        let raw = self
            .backend
            .get(key)
            .inspect_err(|e| warn!("[CACHE] read of {key} failed: {e}"))
            .ok()??;
        serde_json::from_str(&raw)
            .inspect_err(|e| warn!("[CACHE] undecodable entry under {key}: {e}"))
            .ok()
    }
}
