//! ブラウザの localStorage

use road_damage_common::{Error, KeyValueStore, Result};

/// `window.localStorage` のラッパー
///
/// プライベートモード等で使えない場合は読み込みが常に空、書き込みがエラーになる。
pub struct BrowserStorage {
    storage: Option<web_sys::Storage>,
}

impl BrowserStorage {
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            web_sys::console::warn_1(&"localStorageが使用できません".into());
        }
        Self { storage }
    }

    pub fn is_available(&self) -> bool {
        self.storage.is_some()
    }

    fn storage(&self) -> Result<&web_sys::Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| Error::Storage("localStorageが使用できません".to_string()))
    }
}

fn js_error(e: wasm_bindgen::JsValue) -> Error {
    Error::Storage(format!("{:?}", e))
}

impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        // 容量超過は QuotaExceededError として返る
        self.storage()?.set_item(key, value).map_err(js_error)
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.storage()?.remove_item(key).map_err(js_error)
    }
}
