use super::{BEST_SCORE_KEY, PersistError, ScoreStore};

/// Browser LocalStorage, value kept as a decimal string
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    /// LocalStorage key
    const STORAGE_KEY_PREFIX: &'static str = "flappy_";

    pub fn new() -> Self {
        Self
    }

    fn key() -> String {
        format!("{}{}", Self::STORAGE_KEY_PREFIX, BEST_SCORE_KEY)
    }

    fn storage() -> Result<web_sys::Storage, PersistError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| PersistError::Unavailable("LocalStorage not available".into()))
    }
}

impl ScoreStore for LocalStorageStore {
    fn load(&self) -> Result<u64, PersistError> {
        let storage = Self::storage()?;
        let key = Self::key();
        let value = storage
            .get_item(&key)
            .map_err(|e| PersistError::Unavailable(format!("{:?}", e)))?;
        match value {
            None => Ok(0),
            Some(text) => text
                .trim()
                .parse()
                .map_err(|_| PersistError::Corrupt { key, value: text }),
        }
    }

    fn save(&mut self, best: u64) -> Result<(), PersistError> {
        let storage = Self::storage()?;
        storage
            .set_item(&Self::key(), &best.to_string())
            .map_err(|e| PersistError::Unavailable(format!("{:?}", e)))?;
        log::info!("Best score saved ({})", best);
        Ok(())
    }
}
