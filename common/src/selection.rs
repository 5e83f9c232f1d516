//! 選択中の損傷の受け渡し
//!
//! 一覧・地図でクリックされたレコードを丸ごと保存し、詳細画面が読み込む。

use crate::error::Result;
use crate::storage::{read_json, KeyValueStore, SELECTED_KEY};
use crate::types::DamageRecord;

/// 選択中のレコードを保存（マージ済みレコード全体を書き込む）
pub fn save_selected(store: &mut impl KeyValueStore, record: &DamageRecord) -> Result<()> {
    let json = serde_json::to_string(record)?;
    store.set_item(SELECTED_KEY, &json)
}

/// 選択中のレコード（未選択・破損時は `None`）
pub fn load_selected(store: &impl KeyValueStore) -> Option<DamageRecord> {
    read_json(store, SELECTED_KEY)
}

pub fn clear_selected(store: &mut impl KeyValueStore) -> Result<()> {
    store.remove_item(SELECTED_KEY)
}

/// 選択中のレコードが指定IDなら選択を解除する
///
/// 選択は保存時点のレコード全体なので、除外・上書き削除の後は古い内容になる。
pub fn clear_selected_if(store: &mut impl KeyValueStore, id: u64) -> Result<bool> {
    if load_selected(store).map(|r| r.id) != Some(id) {
        return Ok(false);
    }
    clear_selected(store)?;
    Ok(true)
}
