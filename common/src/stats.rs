//! ダッシュボード集計
//!
//! マージ済みレコードから統計カード・種別分布・対応状況内訳・月別推移・
//! 最近の報告・緊急対応リストを作る。描画は各画面側で行う。

use crate::types::{DamageRecord, DamageStatus, SeverityLevel};
use std::collections::BTreeMap;

/// 種別分布の既定の並び順
pub const DEFAULT_DAMAGE_TYPES: &[&str] = &["縦状亀裂", "ポットホール", "横状亀裂", "網状亀裂", "その他"];

/// 統計サマリー
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub completed: usize,
    /// 対応率（%、四捨五入）
    pub completion_rate: u32,
}

impl DashboardSummary {
    pub fn from_records(records: &[DamageRecord]) -> Self {
        let count_level = |level: SeverityLevel| {
            records
                .iter()
                .filter(|r| r.severity_level() == Some(level))
                .count()
        };
        let total = records.len();
        let completed = records
            .iter()
            .filter(|r| r.status == DamageStatus::Completed)
            .count();

        Self {
            total,
            high: count_level(SeverityLevel::High),
            medium: count_level(SeverityLevel::Medium),
            low: count_level(SeverityLevel::Low),
            completed,
            completion_rate: percent(completed, total).round() as u32,
        }
    }
}

fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// 種別ごとの件数
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
    /// 全体に占める割合（%）
    pub percent: f64,
}

/// 損傷種別分布
///
/// `known_types` の順に並べ、それ以外の種別は出現順で後ろに続ける。件数0は除外。
pub fn type_distribution<T: AsRef<str>>(
    records: &[DamageRecord],
    known_types: &[T],
) -> Vec<CategoryCount> {
    let mut order: Vec<&str> = known_types.iter().map(|t| t.as_ref()).collect();
    for record in records {
        if !order.contains(&record.damage_type.as_str()) {
            order.push(&record.damage_type);
        }
    }

    order
        .into_iter()
        .map(|label| {
            let count = records.iter().filter(|r| r.damage_type == label).count();
            CategoryCount {
                label: label.to_string(),
                count,
                percent: percent(count, records.len()),
            }
        })
        .filter(|c| c.count > 0)
        .collect()
}

/// 対応状況ごとの件数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCount {
    pub status: DamageStatus,
    pub count: usize,
}

/// 対応状況内訳（未対応→対応中→完了→不要、件数0は除外）
pub fn status_breakdown(records: &[DamageRecord]) -> Vec<StatusCount> {
    DamageStatus::ALL
        .into_iter()
        .map(|status| StatusCount {
            status,
            count: records.iter().filter(|r| r.status == status).count(),
        })
        .filter(|s| s.count > 0)
        .collect()
}

/// 月別件数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyCount {
    pub month: String,
    pub count: usize,
    /// 最大月を100とした棒の長さ（%）
    pub bar_percent: u32,
}

/// 月別損傷発生推移（古い月から）
pub fn monthly_trend(records: &[DamageRecord]) -> Vec<MonthlyCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.month()).or_default() += 1;
    }
    let max = counts.values().copied().max().unwrap_or(0).max(1);

    counts
        .into_iter()
        .map(|(month, count)| MonthlyCount {
            month: month.to_string(),
            count,
            bar_percent: (count as f64 / max as f64 * 100.0).round() as u32,
        })
        .collect()
}

/// 最近の損傷報告（点検日時の新しい順に `limit` 件）
pub fn recent(records: &[DamageRecord], limit: usize) -> Vec<DamageRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| b.inspection_time.cmp(&a.inspection_time));
    sorted.truncate(limit);
    sorted
}

/// 緊急対応が必要な損傷（緊急度「大」「高度」）
pub fn urgent(records: &[DamageRecord]) -> Vec<DamageRecord> {
    records
        .iter()
        .filter(|r| r.severity_level() == Some(SeverityLevel::High))
        .cloned()
        .collect()
}

/// 対応状況ボードの並び（状況順、同じ状況内は元の順序）
pub fn sort_for_status_board(records: &mut [DamageRecord]) {
    records.sort_by_key(|r| r.status.board_order());
}
