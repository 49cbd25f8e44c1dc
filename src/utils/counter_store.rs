#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::utils::counter_types::CounterView;
use crate::utils::errors::CounterError;

// ***************************************************************************
//                               CounterStore
// ***************************************************************************
/** The in-memory mapping from counter name to value.  It starts empty and
 * lives only as long as the process.  
 * 
 * Every operation takes the single lock for exactly one map access, so the 
 * four operations are atomic with respect to each other and concurrent 
 * updates on the same name are never lost.
 */
#[derive(Debug, Default)]
pub struct CounterStore {
    counters: Mutex<HashMap<String, u64>>,
}

impl CounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ---------------------------------------------------------------------------
    // create:
    // ---------------------------------------------------------------------------
    /// Insert a new counter at 0.  Fails with Conflict if the name is taken.
    pub fn create(&self, name: &str) -> Result<CounterView, CounterError> {
        let mut counters = self.lock();
        if counters.contains_key(name) {
            return Err(CounterError::Conflict(name.to_string()));
        }
        counters.insert(name.to_string(), 0);
        Ok(CounterView::new(name.to_string(), 0))
    }

    // ---------------------------------------------------------------------------
    // read:
    // ---------------------------------------------------------------------------
    pub fn read(&self, name: &str) -> Result<CounterView, CounterError> {
        match self.lock().get(name) {
            Some(value) => Ok(CounterView::new(name.to_string(), *value)),
            None => Err(CounterError::NotFound(name.to_string())),
        }
    }

    // ---------------------------------------------------------------------------
    // increment:
    // ---------------------------------------------------------------------------
    /// Add exactly one to an existing counter and return the new value.
    pub fn increment(&self, name: &str) -> Result<CounterView, CounterError> {
        match self.lock().get_mut(name) {
            Some(value) => {
                *value += 1;
                Ok(CounterView::new(name.to_string(), *value))
            },
            None => Err(CounterError::NotFound(name.to_string())),
        }
    }

    // ---------------------------------------------------------------------------
    // delete:
    // ---------------------------------------------------------------------------
    /// Remove the counter entirely, freeing its name for a later create.
    pub fn delete(&self, name: &str) -> Result<(), CounterError> {
        match self.lock().remove(name) {
            Some(_) => Ok(()),
            None => Err(CounterError::NotFound(name.to_string())),
        }
    }

    /// Number of counters currently stored.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock cannot leave a partial update behind
    // since each critical section is a single map call.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, u64>> {
        self.counters.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::CounterStore;
    use crate::utils::errors::CounterError;

    #[test]
    fn create_starts_at_zero() {
        let store = CounterStore::new();
        let view = store.create("foo").unwrap();
        assert_eq!(view.name, "foo");
        assert_eq!(view.value, 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn duplicate_create_conflicts_without_mutation() {
        let store = CounterStore::new();
        store.create("bar").unwrap();
        store.increment("bar").unwrap();
        assert_eq!(store.create("bar"), Err(CounterError::Conflict("bar".to_string())));
        assert_eq!(store.read("bar").unwrap().value, 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn absent_name_is_not_found() {
        let store = CounterStore::new();
        let expected = Err(CounterError::NotFound("ghost".to_string()));
        assert_eq!(store.read("ghost"), expected);
        assert_eq!(store.increment("ghost"), expected);
        assert_eq!(store.delete("ghost"), Err(CounterError::NotFound("ghost".to_string())));
        assert!(store.is_empty());
    }

    #[test]
    fn read_does_not_mutate() {
        let store = CounterStore::new();
        store.create("stable").unwrap();
        store.increment("stable").unwrap();
        for _ in 0..5 {
            assert_eq!(store.read("stable").unwrap().value, 1);
        }
    }

    #[test]
    fn increments_accumulate() {
        let store = CounterStore::new();
        store.create("k").unwrap();
        for i in 1..=10 {
            assert_eq!(store.increment("k").unwrap().value, i);
        }
        assert_eq!(store.read("k").unwrap().value, 10);
    }

    #[test]
    fn delete_is_terminal_and_name_is_reusable() {
        let store = CounterStore::new();
        store.create("temp").unwrap();
        store.increment("temp").unwrap();
        store.delete("temp").unwrap();

        assert!(store.read("temp").is_err());
        assert!(store.increment("temp").is_err());
        assert!(store.delete("temp").is_err());

        assert_eq!(store.create("temp").unwrap().value, 0);
        assert_eq!(store.read("temp").unwrap().value, 0);
    }

    #[test]
    fn names_are_independent() {
        let store = CounterStore::new();
        store.create("a").unwrap();
        store.create("b").unwrap();
        store.increment("a").unwrap();
        store.increment("a").unwrap();
        assert_eq!(store.read("a").unwrap().value, 2);
        assert_eq!(store.read("b").unwrap().value, 0);
    }

    #[test]
    fn concurrent_increments_are_not_lost() {
        let store = Arc::new(CounterStore::new());
        store.create("shared").unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..250 {
                        store.increment("shared").unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(store.read("shared").unwrap().value, 2000);
    }

    #[test]
    fn concurrent_creates_admit_one_winner() {
        let store = Arc::new(CounterStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.create("race").is_ok())
            })
            .collect();
        let winners = handles.into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(winners, 1);
        assert_eq!(store.len(), 1);
    }
}
