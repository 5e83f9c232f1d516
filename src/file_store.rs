//! ファイル版キー・バリューストレージ
//!
//! ブラウザの localStorage と同じ内容（キー → 文字列値）を1つのJSONファイルに保存する。
//! 読み込みのたびにファイルを読み直し、書き込みはファイル全体を即時に書き戻す。

use road_damage_common::{Error as CommonError, KeyValueStore, Result as CommonResult};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 保存済みの全項目を読み込み
    ///
    /// ファイルがない・壊れている場合は空として扱う。
    pub fn load_items(&self) -> BTreeMap<String, String> {
        if !self.path.exists() {
            return BTreeMap::new();
        }

        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ストレージを開けません");
                return BTreeMap::new();
            }
        };

        match serde_json::from_reader(BufReader::new(file)) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ストレージが破損しているため空として扱います");
                BTreeMap::new()
            }
        }
    }

    fn save_items(&self, items: &BTreeMap<String, String>) -> CommonResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| self.storage_error(e))?;
            }
        }

        let file = File::create(&self.path).map_err(|e| self.storage_error(e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, items).map_err(|e| self.storage_error(e))?;
        writer.flush().map_err(|e| self.storage_error(e))?;
        Ok(())
    }

    fn storage_error(&self, e: impl std::fmt::Display) -> CommonError {
        CommonError::Storage(format!("{}: {}", self.path.display(), e))
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.load_items().remove(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> CommonResult<()> {
        let mut items = self.load_items();
        items.insert(key.to_string(), value.to_string());
        self.save_items(&items)
    }

    fn remove_item(&mut self, key: &str) -> CommonResult<()> {
        let mut items = self.load_items();
        if items.remove(key).is_some() {
            self.save_items(&items)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_path() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("storage.json");
        assert_eq!(FileStore::new(&path).path(), path.as_path());
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().expect("Failed to create temp dir");
        let store = FileStore::new(dir.path().join("storage.json"));

        assert!(store.load_items().is_empty());
        assert_eq!(store.get_item("filterMonth"), None);
    }

    #[test]
    fn test_set_creates_parent_dirs() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("nested").join("storage.json");
        let mut store = FileStore::new(&path);

        store.set_item("sidebarCollapsed", "1").unwrap();
        assert!(path.exists());
        assert_eq!(FileStore::new(&path).get_item("sidebarCollapsed").as_deref(), Some("1"));
    }

    #[test]
    fn test_remove_item() {
        let dir = tempdir().expect("Failed to create temp dir");
        let mut store = FileStore::new(dir.path().join("storage.json"));

        store.set_item("a", "1").unwrap();
        store.set_item("b", "2").unwrap();
        store.remove_item("a").unwrap();

        assert_eq!(store.get_item("a"), None);
        assert_eq!(store.get_item("b").as_deref(), Some("2"));
    }

    #[test]
    fn test_corrupted_file_is_empty() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "{ invalid json }").unwrap();

        let store = FileStore::new(&path);
        assert!(store.load_items().is_empty());
    }

    #[test]
    fn test_unwritable_path_is_storage_error() {
        let dir = tempdir().expect("Failed to create temp dir");
        // ディレクトリをファイルとして開こうとして失敗させる
        let mut store = FileStore::new(dir.path());

        let result = store.set_item("k", "v");
        assert!(matches!(result, Err(CommonError::Storage(_))));
    }
}
