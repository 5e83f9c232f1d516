//! 損傷データの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - DamageRecord: 点検で登録された損傷（ベースデータ、マージ後の表示データ兼用）
//! - OverridePatch: 利用者が保存した対応状況の上書き
//! - DamageStatus / SeverityLevel: 対応状況・緊急度の区分

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 対応状況
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DamageStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl DamageStatus {
    /// 対応状況ボードの表示順（未対応→対応中→完了→不要）
    pub const ALL: [DamageStatus; 4] = [
        DamageStatus::Pending,
        DamageStatus::InProgress,
        DamageStatus::Completed,
        DamageStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DamageStatus::Pending => "pending",
            DamageStatus::InProgress => "in-progress",
            DamageStatus::Completed => "completed",
            DamageStatus::Cancelled => "cancelled",
        }
    }

    /// 画面表示用ラベル
    pub fn label(&self) -> &'static str {
        match self {
            DamageStatus::Pending => "未対応",
            DamageStatus::InProgress => "対応中",
            DamageStatus::Completed => "対応完了",
            DamageStatus::Cancelled => "対応不要",
        }
    }

    pub fn board_order(&self) -> usize {
        match self {
            DamageStatus::Pending => 0,
            DamageStatus::InProgress => 1,
            DamageStatus::Completed => 2,
            DamageStatus::Cancelled => 3,
        }
    }
}

impl fmt::Display for DamageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DamageStatus {
    type Err = String;

    /// 値（pending等）と日本語ラベルの両方を受け付ける
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        DamageStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s) || status.label() == s)
            .ok_or_else(|| {
                format!(
                    "Unknown status: {}. Use pending, in-progress, completed, or cancelled",
                    s
                )
            })
    }
}

/// 緊急度
///
/// 損傷度の表記は配備ごとに異なる（大/中/小 と 高度/中度/低度）。
/// どちらの表記も同じ3段階として扱う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeverityLevel {
    High,
    Medium,
    Low,
}

impl SeverityLevel {
    pub fn classify(severity: &str) -> Option<Self> {
        match severity.trim() {
            "大" | "高度" => Some(SeverityLevel::High),
            "中" | "中度" => Some(SeverityLevel::Medium),
            "小" | "低度" => Some(SeverityLevel::Low),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SeverityLevel::High => "高緊急度",
            SeverityLevel::Medium => "中緊急度",
            SeverityLevel::Low => "低緊急度",
        }
    }

    /// 地図マーカー等の色
    pub fn color(&self) -> &'static str {
        match self {
            SeverityLevel::High => "#ef4444",
            SeverityLevel::Medium => "#f59e0b",
            SeverityLevel::Low => "#10b981",
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// 損傷レコード
///
/// ベースデータとして読み込まれ、上書きをマージした結果も同じ型で表す。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageRecord {
    pub id: u64,

    #[serde(rename = "type", default)]
    pub damage_type: String,          // 損傷種別

    #[serde(default)]
    pub severity: String,             // 損傷度

    #[serde(default)]
    pub status: DamageStatus,

    /// 点検日時（旧データは `date`）
    #[serde(default, alias = "date", skip_serializing_if = "String::is_empty")]
    pub inspection_time: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_text: Option<String>,   // 音声メモの文字起こし

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patrol_team: Option<String>,  // パトロール班

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspection_section: Option<String>, // 点検区間

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gps: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temporary_repair: Option<String>, // 応急処置

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_date: Option<String>,    // 対応完了日

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_details: Option<String>, // 対応内容

    #[serde(default, skip_serializing_if = "is_false")]
    pub deleted: bool,
}

impl DamageRecord {
    /// 月別集計用のキー（先頭7文字 `YYYY-MM`）
    pub fn month(&self) -> &str {
        self.inspection_time
            .get(..7)
            .unwrap_or(self.inspection_time.as_str())
    }

    pub fn severity_level(&self) -> Option<SeverityLevel> {
        SeverityLevel::classify(&self.severity)
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.lat.zip(self.lng)
    }
}

/// 対応状況の上書き（部分フィールド）
///
/// 未知のフィールドは `extra` に保持し、書き戻し時に失わない。
/// 既知のフィールドでも値を解釈できない場合（他バージョンの対応状況など）は
/// `extra` に残し、他のフィールドはそのまま有効にする。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "serde_json::Map<String, serde_json::Value>")]
pub struct OverridePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DamageStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_details: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

const STATUS_FIELD: &str = "status";
const RESPONSE_DATE_FIELD: &str = "responseDate";
const RESPONSE_DETAILS_FIELD: &str = "responseDetails";
const DELETED_FIELD: &str = "deleted";

/// 1フィールドを取り出して解釈する（失敗時は値を `raw` に戻す）
fn take_field<T: DeserializeOwned>(
    raw: &mut serde_json::Map<String, serde_json::Value>,
    key: &str,
) -> Option<T> {
    let value = raw.remove(key)?;
    match T::deserialize(&value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!(key, value = %value, error = %e, "解釈できない上書き項目をそのまま保持します");
            raw.insert(key.to_string(), value);
            None
        }
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for OverridePatch {
    fn from(mut raw: serde_json::Map<String, serde_json::Value>) -> Self {
        Self {
            status: take_field(&mut raw, STATUS_FIELD),
            response_date: take_field(&mut raw, RESPONSE_DATE_FIELD),
            response_details: take_field(&mut raw, RESPONSE_DETAILS_FIELD),
            deleted: take_field(&mut raw, DELETED_FIELD),
            extra: raw,
        }
    }
}

impl OverridePatch {
    /// 対応状況画面の保存内容
    ///
    /// 完了日は `completed` の場合のみ保持し、それ以外は空文字で上書きする。
    pub fn status_update(
        status: DamageStatus,
        response_date: Option<String>,
        response_details: impl Into<String>,
    ) -> Self {
        let response_date = match status {
            DamageStatus::Completed => response_date.unwrap_or_default(),
            _ => String::new(),
        };

        Self {
            status: Some(status),
            response_date: Some(response_date),
            response_details: Some(response_details.into()),
            ..Default::default()
        }
    }

    pub fn status(status: DamageStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn deleted(deleted: bool) -> Self {
        Self {
            deleted: Some(deleted),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.response_date.is_none()
            && self.response_details.is_none()
            && self.deleted.is_none()
            && self.extra.is_empty()
    }

    /// 後から保存された値を優先してフィールド単位で重ねる
    ///
    /// 同じキーが既知フィールドと `extra` の両方に残らないようにする。
    pub fn merge_from(&mut self, later: OverridePatch) {
        let OverridePatch {
            status,
            response_date,
            response_details,
            deleted,
            extra,
        } = later;

        for key in extra.keys() {
            self.clear_field(key);
        }
        self.extra.extend(extra);

        if status.is_some() {
            self.status = status;
            self.extra.remove(STATUS_FIELD);
        }
        if response_date.is_some() {
            self.response_date = response_date;
            self.extra.remove(RESPONSE_DATE_FIELD);
        }
        if response_details.is_some() {
            self.response_details = response_details;
            self.extra.remove(RESPONSE_DETAILS_FIELD);
        }
        if deleted.is_some() {
            self.deleted = deleted;
            self.extra.remove(DELETED_FIELD);
        }
    }

    fn clear_field(&mut self, key: &str) {
        match key {
            STATUS_FIELD => self.status = None,
            RESPONSE_DATE_FIELD => self.response_date = None,
            RESPONSE_DETAILS_FIELD => self.response_details = None,
            DELETED_FIELD => self.deleted = None,
            _ => {}
        }
    }

    /// レコードに上書きを適用した新しいレコードを返す
    pub fn apply_to(&self, record: &DamageRecord) -> DamageRecord {
        let mut merged = record.clone();
        if let Some(status) = self.status {
            merged.status = status;
        }
        if let Some(date) = &self.response_date {
            merged.response_date = Some(date.clone());
        }
        if let Some(details) = &self.response_details {
            merged.response_details = Some(details.clone());
        }
        if let Some(deleted) = self.deleted {
            merged.deleted = deleted;
        }
        merged
    }
}
