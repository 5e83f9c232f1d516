//! ファイル版ストレージ上での上書きマージの統合テスト
//!
//! 同梱データ `data/damages.json` と一時ディレクトリの保存先を使い、
//! プロセスをまたいだ保存・復元（ストアの開き直し）を検証する。

use road_damage_common::{
    load_selected, save_selected, DamageStatus, DamageStore, FilterPreferences, KeyValueStore,
    OverridePatch,
};
use road_damage_dashboard::dataset::load_dataset;
use road_damage_dashboard::editor::build_status_patch;
use road_damage_dashboard::file_store::FileStore;
use serde_json::json;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn sample_dataset() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join("damages.json")
}

fn open(storage: &Path) -> DamageStore<FileStore> {
    let records = load_dataset(&sample_dataset()).expect("sample dataset");
    DamageStore::new(records, FileStore::new(storage)).expect("unique ids")
}

fn crack_store(storage: &Path) -> DamageStore<FileStore> {
    let base = serde_json::from_value(json!([{"id": 1, "status": "pending", "type": "crack"}])).unwrap();
    DamageStore::new(base, FileStore::new(storage)).unwrap()
}

#[test]
fn test_empty_storage_returns_base_records() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = crack_store(&dir.path().join("storage.json"));

    assert_eq!(
        serde_json::to_value(store.merged_records()).unwrap(),
        json!([{"id": 1, "status": "pending", "type": "crack", "severity": ""}])
    );
}

#[test]
fn test_override_written_by_hand_is_merged() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("storage.json");
    let mut storage = FileStore::new(&path);
    storage
        .set_item(
            "damagesStatusOverrides",
            r#"{"1":{"status":"completed","responseDate":"2024-05-01"}}"#,
        )
        .unwrap();

    let store = crack_store(&path);
    let merged = store.merged_records();
    assert_eq!(merged[0].status, DamageStatus::Completed);
    assert_eq!(merged[0].response_date.as_deref(), Some("2024-05-01"));
    assert_eq!(merged[0].damage_type, "crack");
}

#[test]
fn test_deleted_override_hides_record() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("storage.json");
    FileStore::new(&path)
        .set_item("damagesStatusOverrides", r#"{"1":{"deleted":true}}"#)
        .unwrap();

    assert!(crack_store(&path).merged_records().is_empty());
}

#[test]
fn test_successive_saves_merge_per_field() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("storage.json");

    let mut store = crack_store(&path);
    store
        .save_override(1, OverridePatch::status(DamageStatus::InProgress))
        .unwrap();
    store
        .save_override(
            1,
            OverridePatch {
                response_details: Some("patched".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

    // 開き直しても同じ内容
    let reopened = crack_store(&path);
    assert_eq!(
        serde_json::to_value(reopened.overrides()).unwrap(),
        json!({"1": {"status": "in-progress", "responseDetails": "patched"}})
    );
}

#[test]
fn test_sample_dataset_status_workflow() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("storage.json");

    let mut store = open(&path);
    let total = store.merged_records().len();
    let current = store.find_with_override(1).unwrap();
    assert_eq!(current.status, DamageStatus::Pending);

    let patch = build_status_patch(&current, DamageStatus::Completed, Some("2024-05-20"), Some("全面補修"))
        .unwrap();
    store.save_override(1, patch).unwrap();
    store.mark_deleted(6).unwrap();

    let store = open(&path);
    let merged = store.merged_records();
    assert_eq!(merged.len(), total - 1);

    let first = store.find_merged(1).unwrap();
    assert_eq!(first.status, DamageStatus::Completed);
    assert_eq!(first.response_date.as_deref(), Some("2024-05-20"));
    assert_eq!(first.response_details.as_deref(), Some("全面補修"));
    // 上書きしていない項目はベースのまま
    assert_eq!(first.temporary_repair.as_deref(), Some("カラーコーン設置"));
    assert_eq!(store.find_merged(6), None);
}

#[test]
fn test_preferences_and_selection_share_storage_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("storage.json");

    let mut store = open(&path);
    let prefs = FilterPreferences {
        month: "2024-05".to_string(),
        ..Default::default()
    };
    prefs.save(store.storage_mut()).unwrap();
    let record = store.find_merged(2).unwrap();
    save_selected(store.storage_mut(), &record).unwrap();
    store
        .save_override(2, OverridePatch::status(DamageStatus::Completed))
        .unwrap();

    let store = open(&path);
    let restored = FilterPreferences::load(store.storage());
    assert_eq!(restored, prefs);
    assert_eq!(load_selected(store.storage()).map(|r| r.id), Some(2));

    let filtered = restored.to_filter().apply(&store.merged_records());
    let ids: Vec<u64> = filtered.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 7]);
}

#[test]
fn test_corrupt_storage_file_is_treated_as_empty() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "{ not json").unwrap();

    let mut store = open(&path);
    assert!(store.overrides().is_empty());
    assert_eq!(store.merged_records().len(), store.base_records().len());

    // 書き込みでファイルが正常な形に戻る
    store.mark_deleted(3).unwrap();
    assert_eq!(open(&path).find_merged(3), None);
}

#[test]
fn test_unknown_id_is_rejected_without_writing() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("storage.json");

    let mut store = open(&path);
    let result = store.save_override(999, OverridePatch::deleted(true));
    assert!(matches!(result, Err(road_damage_common::Error::UnknownRecord(999))));
    assert!(!path.exists());
}

#[test]
fn test_unparsable_entry_survives_save_of_other_id() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("storage.json");
    FileStore::new(&path)
        .set_item(
            "damagesStatusOverrides",
            r#"{"1":{"status":"on-hold","deleted":true}}"#,
        )
        .unwrap();

    let mut store = open(&path);
    assert_eq!(store.find_merged(1), None);
    store
        .save_override(2, OverridePatch::status(DamageStatus::InProgress))
        .unwrap();

    let store = open(&path);
    assert_eq!(store.find_merged(1), None);
    let stored: serde_json::Value =
        serde_json::from_str(&store.storage().get_item("damagesStatusOverrides").unwrap()).unwrap();
    assert_eq!(stored["1"], json!({"status": "on-hold", "deleted": true}));
    assert_eq!(stored["2"], json!({"status": "in-progress"}));
}

#[test]
fn test_excluded_record_can_be_restored() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("storage.json");

    let mut store = open(&path);
    store.mark_deleted(4).unwrap();
    let ids: Vec<u64> = open(&path).excluded_records().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![4]);

    let mut store = open(&path);
    store.save_override(4, OverridePatch::deleted(false)).unwrap();
    let store = open(&path);
    assert!(store.excluded_records().is_empty());
    assert!(store.find_merged(4).is_some());
}
