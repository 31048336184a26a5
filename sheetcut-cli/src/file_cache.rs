use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use itertools::Itertools;
use jiff::{SignedDuration, Timestamp};
use log::debug;
use serde::{Deserialize, Serialize};

use sheetcut::cache::{CacheBackend, CacheError};

/// [`CacheBackend`] persisting every key as a JSON file in a folder, so results outlive a single run.
pub struct FileBackend {
    dir: PathBuf,
    //serializes read-modify-write cycles on the scored sets
    lock: Mutex<()>,
}

#[derive(Serialize, Deserialize)]
struct StoredValue {
    value: String,
    expires_at: Timestamp,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            lock: Mutex::new(()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn value_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize(key)))
    }

    fn set_path(&self, set: &str) -> PathBuf {
        self.dir.join(format!("{}.zset.json", sanitize(set)))
    }

    fn read_set(&self, set: &str) -> Result<BTreeMap<String, f64>, CacheError> {
        match fs::read_to_string(self.set_path(set)) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn guard(&self) -> Result<std::sync::MutexGuard<'_, ()>, CacheError> {
        self.lock
            .lock()
            .map_err(|_| CacheError::Unavailable("file backend lock poisoned".to_string()))
    }
}

/// Keys like `opt:<hex>` contain characters not every file system accepts
fn sanitize(key: &str) -> String {
    key.chars()
        .map(|c| match c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            true => c,
            false => '_',
        })
        .collect()
}

static TMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Writes to a temporary file first so concurrent readers never observe a partial file
fn write_atomically(path: &Path, contents: &str) -> Result<(), CacheError> {
    let n = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let tmp = path.with_extension(format!("{}.{n}.tmp", std::process::id()));
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

impl CacheBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let path = self.value_path(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let stored: StoredValue = serde_json::from_str(&raw)?;
        if stored.expires_at <= Timestamp::now() {
            debug!("[FILE CACHE] {key} expired at {}", stored.expires_at);
            let _ = fs::remove_file(&path);
            return Ok(None);
        }
        Ok(Some(stored.value))
    }

    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let ttl = SignedDuration::try_from(ttl)
            .map_err(|e| CacheError::Unavailable(format!("invalid ttl: {e}")))?;
        let expires_at = Timestamp::now()
            .checked_add(ttl)
            .map_err(|e| CacheError::Unavailable(format!("invalid ttl: {e}")))?;
        let stored = StoredValue {
            value: value.to_string(),
            expires_at,
        };
        write_atomically(&self.value_path(key), &serde_json::to_string(&stored)?)
    }

    fn zadd(&self, set: &str, score: f64, member: &str) -> Result<(), CacheError> {
        let _guard = self.guard()?;
        let mut members = self.read_set(set)?;
        members.insert(member.to_string(), score);
        write_atomically(&self.set_path(set), &serde_json::to_string(&members)?)
    }

    fn zrevrange(&self, set: &str, start: usize, stop: usize) -> Result<Vec<String>, CacheError> {
        let _guard = self.guard()?;
        if stop < start {
            return Ok(vec![]);
        }
        let members = self.read_set(set)?;
        Ok(members
            .into_iter()
            .sorted_by(|(ma, sa), (mb, sb)| sb.total_cmp(sa).then_with(|| mb.cmp(ma)))
            .skip(start)
            .take(stop - start + 1)
            .map(|(member, _)| member)
            .collect())
    }

    fn zremrangebyscore(&self, set: &str, min: f64, max: f64) -> Result<usize, CacheError> {
        let _guard = self.guard()?;
        let mut members = self.read_set(set)?;
        let before = members.len();
        members.retain(|_, score| *score < min || *score > max);
        let removed = before - members.len();
        if removed > 0 {
            write_atomically(&self.set_path(set), &serde_json::to_string(&members)?)?;
        }
        Ok(removed)
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        for path in [self.value_path(key), self.set_path(key)] {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}
