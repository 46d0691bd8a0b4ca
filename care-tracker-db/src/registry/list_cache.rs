use parking_lot::RwLock;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// In-memory mirror of the last successful read/write result set.
///
/// Locks are held only for the duration of each call, so callers must not
/// keep a guard across an `.await`. Concurrent writers race: the last one wins.
#[derive(Debug)]
pub struct ListCache<T> {
    rows: RwLock<Vec<T>>,
}

impl<T> Default for ListCache<T> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }
}

impl<T: Identifiable + Clone> ListCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole result set and returns a copy of it
    pub fn replace_all(&self, rows: Vec<T>) -> Vec<T> {
        let mut guard = self.rows.write();
        *guard = rows;
        guard.clone()
    }

    pub fn prepend(&self, row: T) {
        self.rows.write().insert(0, row);
    }

    /// Replaces the entry with the same id. Returns false if there was none.
    pub fn replace(&self, row: T) -> bool {
        let mut guard = self.rows.write();
        match guard.iter_mut().find(|existing| existing.get_id() == row.get_id()) {
            Some(existing) => {
                *existing = row;
                true
            }
            None => false,
        }
    }

    /// Inserts a row into a list kept in descending `key` order, after any
    /// entries with an equal key.
    pub fn insert_ordered_by<K: Ord>(&self, row: T, key: impl Fn(&T) -> K) {
        let mut guard = self.rows.write();
        let row_key = key(&row);
        let at = guard
            .iter()
            .position(|existing| key(existing) < row_key)
            .unwrap_or(guard.len());
        guard.insert(at, row);
    }

    /// Removes the entry with the given id. Returns false if there was none.
    pub fn remove(&self, id: Uuid) -> bool {
        let mut guard = self.rows.write();
        let before = guard.len();
        guard.retain(|row| row.get_id() != id);
        guard.len() != before
    }

    pub fn snapshot(&self) -> Vec<T> {
        self.rows.read().clone()
    }

    /// Runs a read-only computation over the cached rows
    pub fn with_rows<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.rows.read())
    }

    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }
}
