//! Resolved-move cache
//!
//! Memoizes `(position, side, difficulty) -> SAN` with a fixed capacity and
//! FIFO eviction: when full, the oldest inserted key is dropped, no matter how
//! recently it was read. Insertion order lives in an explicit queue next to
//! the map.

use std::collections::{HashMap, VecDeque};

use chess_engine::{Difficulty, Side};
use parking_lot::Mutex;

pub const DEFAULT_CACHE_CAPACITY: usize = 1000;

/// Cache key for a canonical position, side and difficulty
pub fn cache_key(position_key: &str, side: Side, difficulty: Difficulty) -> String {
    format!("{position_key}:{side}:{difficulty}")
}

#[derive(Debug, Default)]
struct CacheInner {
    entries: HashMap<String, String>,
    order: VecDeque<String>,
}

#[derive(Debug)]
pub struct MoveCache {
    capacity: usize,
    inner: Mutex<CacheInner>,
}

impl Default for MoveCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl MoveCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inner: Mutex::new(CacheInner::default()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.lock().entries.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.lock().entries.contains_key(key)
    }

    /// Insert a move, evicting the oldest entry first when full
    ///
    /// Re-inserting an existing key replaces its move and keeps its original
    /// position in the eviction order.
    pub fn put(&self, key: String, mv: String) {
        let mut inner = self.inner.lock();

        if let Some(existing) = inner.entries.get_mut(&key) {
            *existing = mv;
            return;
        }

        while inner.entries.len() >= self.capacity {
            match inner.order.pop_front() {
                Some(oldest) => {
                    inner.entries.remove(&oldest);
                }
                None => break,
            }
        }

        inner.order.push_back(key.clone());
        inner.entries.insert(key, mv);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
