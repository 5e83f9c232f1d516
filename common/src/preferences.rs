//! 画面設定の保存と復元
//!
//! 絞り込み条件（年月・損傷度・種別）とサイドバーの折りたたみ状態。

use crate::error::Result;
use crate::filter::{DamageFilter, ALL};
use crate::storage::{
    KeyValueStore, FILTER_MONTH_KEY, FILTER_SEVERITY_KEY, FILTER_TYPE_KEY, SIDEBAR_COLLAPSED_KEY,
};

/// 保存された絞り込み条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPreferences {
    pub month: String,
    pub severity: String,
    pub damage_type: String,
}

impl Default for FilterPreferences {
    fn default() -> Self {
        Self {
            month: ALL.to_string(),
            severity: ALL.to_string(),
            damage_type: ALL.to_string(),
        }
    }
}

impl FilterPreferences {
    /// 保存されている項目だけを復元し、残りは「全て」
    pub fn load(store: &impl KeyValueStore) -> Self {
        let restore = |key: &str| {
            store
                .get_item(key)
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| ALL.to_string())
        };

        Self {
            month: restore(FILTER_MONTH_KEY),
            severity: restore(FILTER_SEVERITY_KEY),
            damage_type: restore(FILTER_TYPE_KEY),
        }
    }

    /// 3項目すべてを書き込む（変更のたびに呼ぶ）
    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<()> {
        store.set_item(FILTER_MONTH_KEY, &self.month)?;
        store.set_item(FILTER_SEVERITY_KEY, &self.severity)?;
        store.set_item(FILTER_TYPE_KEY, &self.damage_type)?;
        Ok(())
    }

    /// 絞り込みを解除して保存
    pub fn reset(store: &mut impl KeyValueStore) -> Result<Self> {
        let prefs = Self::default();
        prefs.save(store)?;
        Ok(prefs)
    }

    pub fn to_filter(&self) -> DamageFilter {
        DamageFilter::new(&self.month, &self.severity, &self.damage_type)
    }
}

/// サイドバーが折りたたまれているか（保存値 "1"）
pub fn load_sidebar_collapsed(store: &impl KeyValueStore) -> bool {
    store.get_item(SIDEBAR_COLLAPSED_KEY).as_deref() == Some("1")
}

pub fn save_sidebar_collapsed(store: &mut impl KeyValueStore, collapsed: bool) -> Result<()> {
    store.set_item(SIDEBAR_COLLAPSED_KEY, if collapsed { "1" } else { "0" })
}
