//! Best score bookkeeping
//!
//! Wraps a `ScoreStore` so the simulation never sees a persistence error: a
//! failed load counts as "no prior best", a failed save is logged and the
//! in-memory value stays authoritative for the rest of the process. After the
//! first failed save the store is left alone.

use crate::persistence::ScoreStore;

/// Persistence side of the best score
pub struct BestScore {
    store: Box<dyn ScoreStore>,
    /// Value most recently loaded or successfully written
    persisted: u64,
    /// Set once a save has failed
    save_failed: bool,
}

impl BestScore {
    /// Load the stored best score, falling back to 0 on any error
    pub fn load(store: Box<dyn ScoreStore>) -> Self {
        let persisted = match store.load() {
            Ok(best) => {
                log::info!("Loaded best score: {}", best);
                best
            }
            Err(e) => {
                log::warn!("Could not load best score, starting from 0: {}", e);
                0
            }
        };
        Self {
            store,
            persisted,
            save_failed: false,
        }
    }

    /// Value most recently loaded or successfully written
    pub fn persisted(&self) -> u64 {
        self.persisted
    }

    /// Write `best` if it beats the persisted value. Does nothing once a save
    /// has failed.
    pub fn record(&mut self, best: u64) {
        if self.save_failed || best <= self.persisted {
            return;
        }
        match self.store.save(best) {
            Ok(()) => self.persisted = best,
            Err(e) => {
                log::warn!(
                    "Could not save best score {}, keeping it in memory only: {}",
                    best,
                    e
                );
                self.save_failed = true;
            }
        }
    }
}

impl std::fmt::Debug for BestScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BestScore")
            .field("persisted", &self.persisted)
            .field("save_failed", &self.save_failed)
            .finish_non_exhaustive()
    }
}
