//! キー・バリュー型ストレージ
//!
//! ブラウザの localStorage と同じ形（文字列キー → 文字列値）の永続化層。
//! Webでは localStorage、CLIではJSONファイルが実装を提供する。

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// 対応状況の上書きマップ
pub const OVERRIDES_KEY: &str = "damagesStatusOverrides";
/// 一覧・地図で選択された損傷（詳細画面への受け渡し）
pub const SELECTED_KEY: &str = "selectedDamage";
pub const FILTER_MONTH_KEY: &str = "filterMonth";
pub const FILTER_SEVERITY_KEY: &str = "filterSeverity";
pub const FILTER_TYPE_KEY: &str = "filterType";
pub const SIDEBAR_COLLAPSED_KEY: &str = "sidebarCollapsed";

/// 同期的なキー・バリュー型ストレージ
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;

    /// 書き込み失敗（容量超過・使用不可）は `Error::Storage`
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    fn remove_item(&mut self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }
}

/// 保存済みJSONを読み込む
///
/// 値がない、またはJSONとして壊れている場合はデフォルト値を返す。
/// 呼び出し側にエラーは返さない。
pub fn read_json_or_default<T>(store: &impl KeyValueStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    read_json(store, key).unwrap_or_default()
}

/// 保存済みJSONを読み込む（値なし・破損時は `None`）
pub fn read_json<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get_item(key)?;
    if raw.trim().is_empty() {
        return None;
    }

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "保存データが不正なため無視します");
            None
        }
    }
}

/// メモリ上のストレージ
///
/// `quota` を指定すると、保存済みの合計バイト数が上限を超える書き込みを拒否する。
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            items: HashMap::new(),
            quota: Some(quota),
        }
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.items
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(quota) = self.quota {
            let needed = self.used_bytes_without(key) + key.len() + value.len();
            if needed > quota {
                return Err(Error::Storage(format!(
                    "quota exceeded: {} bytes > {} bytes",
                    needed, quota
                )));
            }
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}
