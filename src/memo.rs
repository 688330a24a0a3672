//! Compute-once state for a single process run.
//!
//! Resolution steps (creating a directory, running the dependency manager)
//! must happen at most once per run. Zero-argument steps keep their result
//! in a [`OnceCell`]; steps that take arguments keep one result per argument
//! tuple in a [`Memo`]. Both are single-threaded on purpose.

use std::cell::{OnceCell, RefCell};
use std::collections::HashMap;
use std::hash::Hash;

/// Return the cached value, or compute and store it.
///
/// A failed computation stores nothing, so the next call tries again.
pub fn cached<T, E, F>(cell: &OnceCell<T>, init: F) -> Result<T, E>
where
    T: Clone,
    F: FnOnce() -> Result<T, E>,
{
    if let Some(value) = cell.get() {
        return Ok(value.clone());
    }
    let value = init()?;
    Ok(cell.get_or_init(|| value).clone())
}

/// Results keyed by the arguments that produced them
#[derive(Debug)]
pub struct Memo<K, V> {
    entries: RefCell<HashMap<K, V>>,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self {
            entries: RefCell::new(HashMap::new()),
        }
    }
}

impl<K, V> Memo<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `key`, computing and storing the value on a miss.
    ///
    /// The map is not borrowed while `init` runs, so `init` may consult
    /// other memoized steps.
    pub fn get_or_try_insert_with<E, F>(&self, key: K, init: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(value) = self.entries.borrow().get(&key) {
            return Ok(value.clone());
        }
        let value = init()?;
        self.entries.borrow_mut().insert(key, value.clone());
        Ok(value)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.borrow().len()
    }
}
