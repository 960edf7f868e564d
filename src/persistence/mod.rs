//! Best score persistence
//!
//! A store is a durable key → integer slot. The game only needs one key, but
//! file-backed stores keep any other keys they find.
//!
//! - `MemoryStore`: in-process, can be told to fail (tests, headless runs)
//! - `JsonFileStore`: JSON object on disk, written via temp file + rename
//! - `LocalStorageStore`: browser LocalStorage (wasm32)

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local_storage;

pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

/// Key the best score is stored under
pub const BEST_SCORE_KEY: &str = "best_score";

/// Persistence errors
#[derive(thiserror::Error, Debug)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("corrupt value for {key}: {value:?}")]
    Corrupt { key: String, value: String },
}

/// Durable home of the best score
pub trait ScoreStore {
    /// Stored best score; `Ok(0)` when nothing was ever saved
    fn load(&self) -> Result<u64, PersistError>;

    /// Overwrite the stored best score
    fn save(&mut self, best: u64) -> Result<(), PersistError>;
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn load(&self) -> Result<u64, PersistError> {
        (**self).load()
    }

    fn save(&mut self, best: u64) -> Result<(), PersistError> {
        (**self).save(best)
    }
}
