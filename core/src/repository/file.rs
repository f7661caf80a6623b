use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::repository::traits::KeyValueStore;

/// One file per key under the data directory (default `~/.worklog`).
#[derive(Clone)]
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let path = match base_dir {
            Some(dir) => dir,
            None => {
                let home_dir = dirs::home_dir()
                    .ok_or_else(|| anyhow!("Could not determine home directory"))?;
                home_dir.join(".worklog")
            }
        };
        fs::create_dir_all(&path)?;
        Ok(FileStore { base_dir: path })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::write(self.key_path(key), value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(store.get("nothing").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(Some(dir.path().to_path_buf())).unwrap();
        store.set("time_grid", "{}").unwrap();
        assert_eq!(store.get("time_grid").unwrap().as_deref(), Some("{}"));

        // Last writer wins
        store.set("time_grid", "{\"a\":{}}").unwrap();
        assert_eq!(
            store.get("time_grid").unwrap().as_deref(),
            Some("{\"a\":{}}")
        );
    }
}
