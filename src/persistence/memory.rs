use std::cell::RefCell;
use std::rc::Rc;

use super::{PersistError, ScoreStore};

#[derive(Debug, Default)]
struct Slot {
    value: Option<u64>,
    saves: usize,
    attempts: usize,
    failing: bool,
}

/// In-process store
///
/// Clones share the same slot, so a test can keep a handle while the loop owns
/// the boxed store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Rc<RefCell<Slot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that already holds `best`
    pub fn with_value(best: u64) -> Self {
        let store = Self::new();
        store.slot.borrow_mut().value = Some(best);
        store
    }

    /// Store whose every load and save fails
    pub fn failing() -> Self {
        let store = Self::new();
        store.slot.borrow_mut().failing = true;
        store
    }

    /// Last successfully saved (or seeded) value
    pub fn value(&self) -> Option<u64> {
        self.slot.borrow().value
    }

    /// Number of save calls that succeeded
    pub fn saves(&self) -> usize {
        self.slot.borrow().saves
    }

    /// Number of save calls, failed ones included
    pub fn attempts(&self) -> usize {
        self.slot.borrow().attempts
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Result<u64, PersistError> {
        let slot = self.slot.borrow();
        if slot.failing {
            return Err(PersistError::Unavailable("memory store set to fail".into()));
        }
        Ok(slot.value.unwrap_or(0))
    }

    fn save(&mut self, best: u64) -> Result<(), PersistError> {
        let mut slot = self.slot.borrow_mut();
        slot.attempts += 1;
        if slot.failing {
            return Err(PersistError::Unavailable("memory store set to fail".into()));
        }
        slot.value = Some(best);
        slot.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_loads_zero() {
        assert_eq!(MemoryStore::new().load().unwrap(), 0);
    }

    #[test]
    fn test_clones_share_slot() {
        let handle = MemoryStore::new();
        let mut owned: Box<dyn ScoreStore> = Box::new(handle.clone());
        owned.save(9).unwrap();
        assert_eq!(handle.value(), Some(9));
        assert_eq!(handle.saves(), 1);
        assert_eq!(owned.load().unwrap(), 9);
    }

    #[test]
    fn test_failing() {
        let mut store = MemoryStore::failing();
        assert!(matches!(store.load(), Err(PersistError::Unavailable(_))));
        assert!(store.save(3).is_err());
        assert_eq!(store.value(), None);
    }
}
