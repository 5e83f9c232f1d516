//! 上書きマージストア
//!
//! 変更しないベースデータに、ストレージへ保存された対応状況の上書きを重ねて
//! 全画面共通の表示データを作る。
//!
//! ## 保存形式
//! `damagesStatusOverrides` キーに、レコードID（文字列）→ 部分上書きのJSONオブジェクト。
//!
//! ```json
//! {"1": {"status": "completed", "responseDate": "2024-05-01"}, "7": {"deleted": true}}
//! ```

use crate::error::{Error, Result};
use crate::storage::{read_json_or_default, KeyValueStore, OVERRIDES_KEY};
use crate::types::{DamageRecord, OverridePatch};
use std::collections::{BTreeMap, HashSet};

/// レコードID（文字列）→ 上書き
pub type OverrideMap = BTreeMap<String, OverridePatch>;

/// 保存されたままの上書きマップ（エントリは未解釈のJSON）
type RawOverrides = serde_json::Map<String, serde_json::Value>;

fn load_raw_overrides(store: &impl KeyValueStore) -> RawOverrides {
    read_json_or_default(store, OVERRIDES_KEY)
}

fn write_raw_overrides(store: &mut impl KeyValueStore, raw: &RawOverrides) -> Result<()> {
    let json = serde_json::to_string(raw)?;
    store.set_item(OVERRIDES_KEY, &json)
}

/// 保存済みの上書きマップを読み込む
///
/// 値がない・JSONが壊れている場合は空のマップ。
/// オブジェクトでないエントリだけを無視する。エントリ内の解釈できない項目は
/// `extra` に残り、`deleted` など他の項目は有効なまま。
pub fn load_overrides(store: &impl KeyValueStore) -> OverrideMap {
    load_raw_overrides(store)
        .into_iter()
        .filter_map(|(id, value)| match serde_json::from_value::<OverridePatch>(value) {
            Ok(patch) => Some((id, patch)),
            Err(e) => {
                tracing::warn!(id = %id, error = %e, "不正な上書きエントリを無視します");
                None
            }
        })
        .collect()
}

/// ベースデータに上書きをマージし、削除済みを除外する
///
/// ベースデータの順序を保ち、常に新しいVecを返す。
pub fn merge_records(base: &[DamageRecord], overrides: &OverrideMap) -> Vec<DamageRecord> {
    base.iter()
        .map(|record| match overrides.get(&record.id.to_string()) {
            Some(patch) => patch.apply_to(record),
            None => record.clone(),
        })
        .filter(|record| !record.deleted)
        .collect()
}

/// IDの重複をチェック
pub fn validate_unique_ids(records: &[DamageRecord]) -> Result<()> {
    let mut seen = HashSet::new();
    for record in records {
        if !seen.insert(record.id) {
            return Err(Error::DuplicateId(record.id));
        }
    }
    Ok(())
}

/// ベースデータと上書きストレージをまとめて扱うストア
///
/// 読み込みは毎回ストレージから行い、キャッシュしない。
#[derive(Debug)]
pub struct DamageStore<S> {
    base: Vec<DamageRecord>,
    storage: S,
}

impl<S: KeyValueStore> DamageStore<S> {
    pub fn new(base: Vec<DamageRecord>, storage: S) -> Result<Self> {
        validate_unique_ids(&base)?;
        Ok(Self { base, storage })
    }

    pub fn base_records(&self) -> &[DamageRecord] {
        &self.base
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn contains(&self, id: u64) -> bool {
        self.base.iter().any(|r| r.id == id)
    }

    /// 現在の上書きマップ
    pub fn overrides(&self) -> OverrideMap {
        load_overrides(&self.storage)
    }

    /// 全画面に渡すマージ済みレコード
    pub fn merged_records(&self) -> Vec<DamageRecord> {
        merge_records(&self.base, &self.overrides())
    }

    /// 上書きを適用したレコードをIDで取得（削除フラグが立っていても返す）
    pub fn find_with_override(&self, id: u64) -> Option<DamageRecord> {
        let record = self.base.iter().find(|r| r.id == id)?;
        Some(match self.overrides().get(&id.to_string()) {
            Some(patch) => patch.apply_to(record),
            None => record.clone(),
        })
    }

    /// マージ済みレコードをIDで取得（削除済みは `None`）
    pub fn find_merged(&self, id: u64) -> Option<DamageRecord> {
        self.find_with_override(id).filter(|r| !r.deleted)
    }

    /// 削除フラグが立っているレコード（上書き適用済み、ベースデータの順）
    pub fn excluded_records(&self) -> Vec<DamageRecord> {
        let overrides = self.overrides();
        self.base
            .iter()
            .map(|record| match overrides.get(&record.id.to_string()) {
                Some(patch) => patch.apply_to(record),
                None => record.clone(),
            })
            .filter(|record| record.deleted)
            .collect()
    }

    /// 上書きを保存する
    ///
    /// 既存の上書きにフィールド単位で重ね、対象IDのエントリだけを書き換える。
    /// 他のIDのエントリは解釈できない内容も含めて保存されたまま残る。
    /// 保存後の上書き内容を返す。
    pub fn save_override(&mut self, id: u64, patch: OverridePatch) -> Result<OverridePatch> {
        if !self.contains(id) {
            return Err(Error::UnknownRecord(id));
        }

        let key = id.to_string();
        let mut raw = load_raw_overrides(&self.storage);
        let mut entry = match raw.remove(&key) {
            Some(value) => serde_json::from_value::<OverridePatch>(value).unwrap_or_else(|e| {
                tracing::warn!(id, error = %e, "不正な上書きエントリを置き換えます");
                OverridePatch::default()
            }),
            None => OverridePatch::default(),
        };
        entry.merge_from(patch);
        raw.insert(key, serde_json::to_value(&entry)?);

        write_raw_overrides(&mut self.storage, &raw)?;
        tracing::debug!(id, stored = ?entry, "上書きを保存");
        Ok(entry)
    }

    pub fn mark_deleted(&mut self, id: u64) -> Result<OverridePatch> {
        self.save_override(id, OverridePatch::deleted(true))
    }

    pub fn restore(&mut self, id: u64) -> Result<OverridePatch> {
        self.save_override(id, OverridePatch::deleted(false))
    }

    /// 指定IDの上書きを削除（ベースの値に戻す）
    pub fn clear_override(&mut self, id: u64) -> Result<bool> {
        let mut raw = load_raw_overrides(&self.storage);
        if raw.remove(&id.to_string()).is_none() {
            return Ok(false);
        }
        write_raw_overrides(&mut self.storage, &raw)?;
        Ok(true)
    }

    pub fn clear_all_overrides(&mut self) -> Result<()> {
        self.storage.remove_item(OVERRIDES_KEY)
    }

    /// ベースデータに存在しないIDの上書き（どの画面にも反映されない）
    pub fn stray_override_ids(&self) -> Vec<String> {
        let known: HashSet<String> = self.base.iter().map(|r| r.id.to_string()).collect();
        load_raw_overrides(&self.storage)
            .into_iter()
            .map(|(id, _)| id)
            .filter(|id| !known.contains(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::types::DamageStatus;
    use serde_json::json;

    fn crack(id: u64) -> DamageRecord {
        DamageRecord {
            id,
            damage_type: "crack".to_string(),
            status: DamageStatus::Pending,
            ..Default::default()
        }
    }

    fn store_with(base: Vec<DamageRecord>, overrides: serde_json::Value) -> DamageStore<MemoryStore> {
        let mut storage = MemoryStore::new();
        storage.set_item(OVERRIDES_KEY, &overrides.to_string()).unwrap();
        DamageStore::new(base, storage).unwrap()
    }

    #[test]
    fn test_empty_overrides_pass_through() {
        let store = DamageStore::new(vec![crack(1)], MemoryStore::new()).unwrap();
        assert_eq!(store.merged_records(), vec![crack(1)]);
    }

    #[test]
    fn test_override_fields_win() {
        let store = store_with(
            vec![crack(1)],
            json!({"1": {"status": "completed", "responseDate": "2024-05-01"}}),
        );

        let merged = store.merged_records();
        let expected = DamageRecord {
            status: DamageStatus::Completed,
            response_date: Some("2024-05-01".to_string()),
            ..crack(1)
        };
        assert_eq!(merged, vec![expected]);
        assert_eq!(
            serde_json::to_value(&merged).unwrap(),
            json!([{"id": 1, "status": "completed", "type": "crack", "severity": "", "responseDate": "2024-05-01"}])
        );
    }

    #[test]
    fn test_deleted_override_removes_record() {
        let store = store_with(vec![crack(1)], json!({"1": {"deleted": true}}));
        assert!(store.merged_records().is_empty());
        assert_eq!(store.find_merged(1), None);
        assert!(store.find_with_override(1).unwrap().deleted);
    }

    #[test]
    fn test_deleted_wins_over_other_fields() {
        let store = store_with(
            vec![crack(1), crack(2)],
            json!({"2": {"status": "completed", "responseDetails": "x", "deleted": true}}),
        );
        let ids: Vec<u64> = store.merged_records().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_deleted_wins_over_invalid_status() {
        let store = store_with(
            vec![crack(1), crack(2)],
            json!({"1": {"status": 3, "deleted": true}, "2": {"status": "on-hold", "deleted": true}}),
        );
        assert!(store.merged_records().is_empty());
        assert!(store.find_with_override(2).unwrap().deleted);
    }

    #[test]
    fn test_save_keeps_unparsable_entries_of_other_ids() {
        let mut store = store_with(
            vec![crack(1), crack(2), crack(3)],
            json!({"1": {"status": "on-hold", "deleted": true}, "3": [1, 2]}),
        );

        store.save_override(2, OverridePatch::status(DamageStatus::Completed)).unwrap();

        let raw = store.storage().get_item(OVERRIDES_KEY).unwrap();
        let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            stored,
            json!({
                "1": {"status": "on-hold", "deleted": true},
                "2": {"status": "completed"},
                "3": [1, 2]
            })
        );
        let ids: Vec<u64> = store.merged_records().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_save_replaces_unknown_status_of_same_id() {
        let mut store = store_with(vec![crack(1)], json!({"1": {"status": "on-hold", "note": "x"}}));

        store.save_override(1, OverridePatch::status(DamageStatus::InProgress)).unwrap();

        let raw = store.storage().get_item(OVERRIDES_KEY).unwrap();
        let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored, json!({"1": {"status": "in-progress", "note": "x"}}));
    }

    #[test]
    fn test_base_deleted_flag_respected_and_restorable() {
        let mut hidden = crack(3);
        hidden.deleted = true;
        let mut store = DamageStore::new(vec![crack(1), hidden], MemoryStore::new()).unwrap();
        assert_eq!(store.merged_records().len(), 1);

        store.restore(3).unwrap();
        assert_eq!(store.merged_records().len(), 2);
    }

    #[test]
    fn test_excluded_records_follow_restore() {
        let mut store = store_with(
            vec![crack(1), crack(2), crack(3)],
            json!({"3": {"deleted": true, "status": "completed"}, "1": {"deleted": true}}),
        );

        let excluded = store.excluded_records();
        let ids: Vec<u64> = excluded.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(excluded[1].status, DamageStatus::Completed);

        store.save_override(1, OverridePatch::deleted(false)).unwrap();
        let ids: Vec<u64> = store.excluded_records().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3]);
        assert_eq!(store.find_merged(1), Some(crack(1)));
    }

    #[test]
    fn test_order_preserved() {
        let store = store_with(
            vec![crack(5), crack(2), crack(9), crack(1)],
            json!({"9": {"deleted": true}, "1": {"status": "cancelled"}}),
        );
        let ids: Vec<u64> = store.merged_records().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![5, 2, 1]);
    }

    #[test]
    fn test_merge_is_idempotent_and_base_untouched() {
        let store = store_with(vec![crack(1)], json!({"1": {"status": "in-progress"}}));
        let first = store.merged_records();
        let second = store.merged_records();

        assert_eq!(first, second);
        assert_eq!(store.base_records()[0].status, DamageStatus::Pending);
    }

    #[test]
    fn test_returned_vec_is_a_fresh_copy() {
        let store = DamageStore::new(vec![crack(1), crack(2)], MemoryStore::new()).unwrap();
        let mut merged = store.merged_records();
        merged.clear();
        assert_eq!(store.merged_records().len(), 2);
    }

    #[test]
    fn test_corrupted_storage_fails_open() {
        let mut storage = MemoryStore::new();
        storage.set_item(OVERRIDES_KEY, "{ invalid json }").unwrap();
        let store = DamageStore::new(vec![crack(1)], storage).unwrap();

        assert_eq!(store.merged_records(), vec![crack(1)]);
    }

    #[test]
    fn test_non_object_storage_fails_open() {
        let store = store_with(vec![crack(1)], json!([1, 2, 3]));
        assert_eq!(store.merged_records(), vec![crack(1)]);
    }

    #[test]
    fn test_bad_entry_does_not_discard_others() {
        let store = store_with(
            vec![crack(1), crack(2), crack(3)],
            json!({
                "1": {"status": "on-hold", "deleted": true},
                "2": {"status": "completed"},
                "3": "not an object"
            }),
        );
        let merged = store.merged_records();
        let ids: Vec<u64> = merged.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(merged[0].status, DamageStatus::Completed);
        assert_eq!(merged[1], crack(3));
    }

    #[test]
    fn test_unknown_status_keeps_other_fields() {
        let store = store_with(
            vec![crack(1)],
            json!({"1": {"status": "on-hold", "responseDetails": "確認中"}}),
        );
        let record = store.find_merged(1).unwrap();
        assert_eq!(record.status, DamageStatus::Pending);
        assert_eq!(record.response_details.as_deref(), Some("確認中"));
    }

    #[test]
    fn test_stray_override_is_inert() {
        let store = store_with(vec![crack(1)], json!({"99": {"status": "completed"}}));
        assert_eq!(store.merged_records(), vec![crack(1)]);
        assert_eq!(store.stray_override_ids(), vec!["99".to_string()]);
    }

    #[test]
    fn test_save_override_accumulates_fields() {
        let mut store = DamageStore::new(vec![crack(1)], MemoryStore::new()).unwrap();

        store.save_override(1, OverridePatch::status(DamageStatus::InProgress)).unwrap();
        store
            .save_override(
                1,
                OverridePatch {
                    response_details: Some("patched".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        let raw = store.storage().get_item(OVERRIDES_KEY).unwrap();
        let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            stored,
            json!({"1": {"status": "in-progress", "responseDetails": "patched"}})
        );
    }

    #[test]
    fn test_save_override_keeps_other_ids_and_unknown_fields() {
        let mut store = store_with(
            vec![crack(1), crack(2)],
            json!({"2": {"status": "cancelled", "note": "keep me"}}),
        );

        store.save_override(1, OverridePatch::status(DamageStatus::Completed)).unwrap();
        store.save_override(2, OverridePatch::deleted(true)).unwrap();

        let overrides = store.overrides();
        assert_eq!(overrides["1"].status, Some(DamageStatus::Completed));
        assert_eq!(overrides["2"].status, Some(DamageStatus::Cancelled));
        assert_eq!(overrides["2"].deleted, Some(true));
        assert_eq!(overrides["2"].extra.get("note"), Some(&json!("keep me")));
    }

    #[test]
    fn test_save_override_unknown_id() {
        let mut store = DamageStore::new(vec![crack(1)], MemoryStore::new()).unwrap();
        let result = store.save_override(42, OverridePatch::status(DamageStatus::Completed));

        assert!(matches!(result, Err(Error::UnknownRecord(42))));
        assert!(store.storage().get_item(OVERRIDES_KEY).is_none());
    }

    #[test]
    fn test_save_override_quota_exceeded() {
        let mut store = DamageStore::new(vec![crack(1)], MemoryStore::with_quota(8)).unwrap();
        let result = store.save_override(
            1,
            OverridePatch::status_update(DamageStatus::Completed, None, "補修完了"),
        );

        assert!(matches!(result, Err(Error::Storage(_))));
        assert_eq!(store.merged_records()[0].status, DamageStatus::Pending);
    }

    #[test]
    fn test_clear_override() {
        let mut store = store_with(vec![crack(1)], json!({"1": {"status": "completed"}}));

        assert!(store.clear_override(1).unwrap());
        assert!(!store.clear_override(1).unwrap());
        assert_eq!(store.merged_records(), vec![crack(1)]);
    }

    #[test]
    fn test_clear_override_keeps_unparsable_entries() {
        let mut store = store_with(
            vec![crack(1), crack(2)],
            json!({"1": {"status": "completed"}, "2": {"status": "on-hold", "deleted": true}}),
        );

        assert!(store.clear_override(1).unwrap());
        let raw = store.storage().get_item(OVERRIDES_KEY).unwrap();
        let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored, json!({"2": {"status": "on-hold", "deleted": true}}));
    }

    #[test]
    fn test_clear_all_overrides() {
        let mut store = store_with(vec![crack(1)], json!({"1": {"deleted": true}}));
        store.clear_all_overrides().unwrap();
        assert_eq!(store.merged_records(), vec![crack(1)]);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = DamageStore::new(vec![crack(1), crack(1)], MemoryStore::new());
        assert!(matches!(result, Err(Error::DuplicateId(1))));
    }
}
