use crate::cache::{CacheBackend, CacheError};
use itertools::Itertools;
use ordered_float::OrderedFloat;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// In-process [`CacheBackend`]. Expired values are evicted when read and swept on every write.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    values: Mutex<HashMap<String, (String, Instant)>>,
    sorted_sets: Mutex<HashMap<String, HashMap<String, f64>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live values
    pub fn len(&self) -> usize {
        let now = Instant::now();
        lock(&self.values)
            .map(|values| values.values().filter(|(_, exp)| *exp > now).count())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, CacheError> {
    mutex
        .lock()
        .map_err(|_| CacheError::Unavailable("memory backend lock poisoned".to_string()))
}

impl CacheBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut values = lock(&self.values)?;
        match values.get(key) {
            Some((_, expires_at)) if *expires_at <= Instant::now() => {
                values.remove(key);
                Ok(None)
            }
            Some((value, _)) => Ok(Some(value.clone())),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let now = Instant::now();
        let mut values = lock(&self.values)?;
        values.retain(|_, (_, expires_at)| *expires_at > now);
        values.insert(key.to_string(), (value.to_string(), now + ttl));
        Ok(())
    }

    fn zadd(&self, set: &str, score: f64, member: &str) -> Result<(), CacheError> {
        lock(&self.sorted_sets)?
            .entry(set.to_string())
            .or_default()
            .insert(member.to_string(), score);
        Ok(())
    }

    fn zrevrange(&self, set: &str, start: usize, stop: usize) -> Result<Vec<String>, CacheError> {
        let sets = lock(&self.sorted_sets)?;
        let Some(members) = sets.get(set) else {
            return Ok(vec![]);
        };
        if stop < start {
            return Ok(vec![]);
        }
        //ties are ranked by member in reverse lexicographic order
        Ok(members
            .iter()
            .sorted_by(|(ma, sa), (mb, sb)| {
                OrderedFloat(**sb)
                    .cmp(&OrderedFloat(**sa))
                    .then_with(|| mb.cmp(ma))
            })
            .skip(start)
            .take(stop - start + 1)
            .map(|(member, _)| member.clone())
            .collect())
    }

    fn zremrangebyscore(&self, set: &str, min: f64, max: f64) -> Result<usize, CacheError> {
        let mut sets = lock(&self.sorted_sets)?;
        let Some(members) = sets.get_mut(set) else {
            return Ok(0);
        };
        let before = members.len();
        members.retain(|_, score| *score < min || *score > max);
        Ok(before - members.len())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        lock(&self.values)?.remove(key);
        lock(&self.sorted_sets)?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn values_expire() {
        let backend = MemoryBackend::new();
        backend.set("a", "1", Duration::from_secs(60)).unwrap();
        backend.set("b", "2", Duration::ZERO).unwrap();
        assert_eq!(backend.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(backend.get("b").unwrap(), None);
        assert_eq!(backend.len(), 1);

        backend.delete("a").unwrap();
        assert!(backend.is_empty());
    }

    #[test]
    fn zrevrange_ranks_by_descending_score() {
        let backend = MemoryBackend::new();
        backend.zadd("idx", 1.0, "old").unwrap();
        backend.zadd("idx", 3.0, "new").unwrap();
        backend.zadd("idx", 2.0, "mid").unwrap();
        backend.zadd("idx", 0.5, "mid").unwrap();

        assert_eq!(backend.zrevrange("idx", 0, 9).unwrap(), vec!["new", "old", "mid"]);
        assert_eq!(backend.zrevrange("idx", 1, 1).unwrap(), vec!["old"]);
        assert!(backend.zrevrange("idx", 5, 9).unwrap().is_empty());
        assert!(backend.zrevrange("missing", 0, 9).unwrap().is_empty());
    }

    #[test]
    fn writes_sweep_expired_values() {
        let backend = MemoryBackend::new();
        for i in 0..10 {
            backend.set(&format!("stale{i}"), "v", Duration::ZERO).unwrap();
        }
        backend.set("fresh", "v", Duration::from_secs(60)).unwrap();
        assert_eq!(backend.values.lock().unwrap().len(), 1);
    }

    #[test]
    fn zremrangebyscore_is_inclusive() {
        let backend = MemoryBackend::new();
        for (score, member) in [(1.0, "a"), (2.0, "b"), (3.0, "c"), (4.0, "d")] {
            backend.zadd("idx", score, member).unwrap();
        }
        assert_eq!(backend.zremrangebyscore("idx", f64::NEG_INFINITY, 2.0).unwrap(), 2);
        assert_eq!(backend.zrevrange("idx", 0, 9).unwrap(), vec!["d", "c"]);
        assert_eq!(backend.zremrangebyscore("missing", 0.0, 9.0).unwrap(), 0);
    }

    #[test]
    fn shared_between_threads() {
        let backend = MemoryBackend::new();
        thread::scope(|s| {
            for i in 0..8 {
                let backend = &backend;
                s.spawn(move || {
                    backend
                        .set(&format!("k{i}"), "v", Duration::from_secs(60))
                        .unwrap()
                });
            }
        });
        assert_eq!(backend.len(), 8);
    }
}
