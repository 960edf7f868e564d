use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde_json::{Map, Value};

use super::{BEST_SCORE_KEY, PersistError, ScoreStore};

/// JSON object of key → integer on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.local/state/flappy/scores.json`, or the platform data dir when
    /// `HOME` is unset
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("flappy");
            Some(state_dir.join("scores.json"))
        } else {
            ProjectDirs::from("", "", "flappy")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("scores.json"))
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current file contents; a missing file is an empty object
    fn read_map(&self) -> Result<Map<String, Value>, PersistError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&contents)?)
    }

    /// Write to a sibling temp file, then rename over the target
    fn write_map(&self, map: &Map<String, Value>) -> Result<(), PersistError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(map)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl ScoreStore for JsonFileStore {
    fn load(&self) -> Result<u64, PersistError> {
        let map = self.read_map()?;
        match map.get(BEST_SCORE_KEY) {
            None => Ok(0),
            Some(value) => value.as_u64().ok_or_else(|| PersistError::Corrupt {
                key: BEST_SCORE_KEY.to_string(),
                value: value.to_string(),
            }),
        }
    }

    fn save(&mut self, best: u64) -> Result<(), PersistError> {
        let mut map = match self.read_map() {
            Ok(map) => map,
            Err(PersistError::Json(e)) => {
                log::warn!("Replacing unreadable score file {:?}: {}", self.path, e);
                Map::new()
            }
            Err(e) => return Err(e),
        };
        map.insert(BEST_SCORE_KEY.to_string(), Value::from(best));
        self.write_map(&map)?;
        log::debug!("Best score {} saved to {:?}", best, self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_zero() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("scores.json"));
        assert_eq!(store.load().unwrap(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("scores.json");
        let mut store = JsonFileStore::new(&path);
        store.save(17).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.load().unwrap(), 17);
    }

    #[test]
    fn test_other_keys_survive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, r#"{ "volume": 3, "best_score": 2 }"#).unwrap();

        let mut store = JsonFileStore::new(&path);
        store.save(5).unwrap();

        let map: Map<String, Value> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(map.get("volume"), Some(&Value::from(3)));
        assert_eq!(map.get("best_score"), Some(&Value::from(5)));
    }

    #[test]
    fn test_corrupt_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, r#"{ "best_score": "lots" }"#).unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load(), Err(PersistError::Corrupt { .. })));
    }

    #[test]
    fn test_garbage_file_is_replaced_on_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, "not json").unwrap();

        let mut store = JsonFileStore::new(&path);
        assert!(matches!(store.load(), Err(PersistError::Json(_))));
        store.save(4).unwrap();
        assert_eq!(store.load().unwrap(), 4);
    }
}
