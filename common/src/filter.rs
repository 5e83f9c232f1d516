//! 絞り込み条件
//!
//! 地図・検索画面の年月／損傷度／種別による絞り込みと、選択肢の生成。

use crate::types::DamageRecord;
use std::collections::HashSet;

/// 「絞り込みなし」を表す選択値
pub const ALL: &str = "全て";

/// 絞り込み条件（`None` はその項目で絞り込まない）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DamageFilter {
    pub month: Option<String>,
    pub severity: Option<String>,
    pub damage_type: Option<String>,
}

fn selection(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value == ALL {
        None
    } else {
        Some(value.to_string())
    }
}

impl DamageFilter {
    /// 画面の選択値から生成（「全て」・空文字は条件なし）
    pub fn new(month: &str, severity: &str, damage_type: &str) -> Self {
        Self {
            month: selection(month),
            severity: selection(severity),
            damage_type: selection(damage_type),
        }
    }

    pub fn is_unfiltered(&self) -> bool {
        self.month.is_none() && self.severity.is_none() && self.damage_type.is_none()
    }

    pub fn matches(&self, record: &DamageRecord) -> bool {
        self.month.as_deref().map_or(true, |m| record.month() == m)
            && self.severity.as_deref().map_or(true, |s| record.severity == s)
            && self.damage_type.as_deref().map_or(true, |t| record.damage_type == t)
    }

    pub fn apply(&self, records: &[DamageRecord]) -> Vec<DamageRecord> {
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

/// 年月の選択肢
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthOption {
    /// `YYYY-MM`
    pub value: String,
    /// `YYYY年M月`
    pub label: String,
}

/// 絞り込みドロップダウンの選択肢
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// 新しい月から順
    pub months: Vec<MonthOption>,
    /// 出現順
    pub severities: Vec<String>,
    /// 出現順
    pub damage_types: Vec<String>,
}

impl FilterOptions {
    pub fn from_records(records: &[DamageRecord]) -> Self {
        let mut months: Vec<String> = distinct(records.iter().map(|r| r.month()))
            .into_iter()
            .filter(|m| !m.is_empty())
            .collect();
        months.sort_by(|a, b| b.cmp(a));

        Self {
            months: months
                .into_iter()
                .map(|value| MonthOption {
                    label: format_month_label(&value),
                    value,
                })
                .collect(),
            severities: distinct(records.iter().map(|r| r.severity.as_str())),
            damage_types: distinct(records.iter().map(|r| r.damage_type.as_str())),
        }
    }
}

/// 出現順を保った重複除去
fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(|v| v.to_string())
        .collect()
}

/// `2024-05` → `2024年5月`（形式が異なる場合はそのまま）
pub fn format_month_label(month: &str) -> String {
    match month.split_once('-') {
        Some((year, m)) => match m.parse::<u32>() {
            Ok(m) => format!("{}年{}月", year, m),
            Err(_) => month.to_string(),
        },
        None => month.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, date: &str, severity: &str, damage_type: &str) -> DamageRecord {
        DamageRecord {
            id,
            inspection_time: date.to_string(),
            severity: severity.to_string(),
            damage_type: damage_type.to_string(),
            ..Default::default()
        }
    }

    fn sample() -> Vec<DamageRecord> {
        vec![
            record(1, "2024-04-03", "高度", "ひび割れ"),
            record(2, "2024-05-10", "中度", "ポットホール"),
            record(3, "2024-05-21", "高度", "わだち掘れ"),
            record(4, "2024-03-30", "低度", "ひび割れ"),
        ]
    }

    #[test]
    fn test_all_matches_everything() {
        let filter = DamageFilter::new(ALL, ALL, ALL);
        assert!(filter.is_unfiltered());
        assert_eq!(filter.apply(&sample()).len(), 4);
    }

    #[test]
    fn test_month_filter_uses_prefix() {
        let filter = DamageFilter::new("2024-05", ALL, "");
        let ids: Vec<u64> = filter.apply(&sample()).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_combined_filter() {
        let filter = DamageFilter::new("全て", "高度", "ひび割れ");
        let ids: Vec<u64> = filter.apply(&sample()).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_options() {
        let options = FilterOptions::from_records(&sample());

        let months: Vec<&str> = options.months.iter().map(|m| m.value.as_str()).collect();
        assert_eq!(months, vec!["2024-05", "2024-04", "2024-03"]);
        assert_eq!(options.months[0].label, "2024年5月");
        assert_eq!(options.severities, vec!["高度", "中度", "低度"]);
        assert_eq!(options.damage_types, vec!["ひび割れ", "ポットホール", "わだち掘れ"]);
    }

    #[test]
    fn test_options_skip_missing_dates() {
        let options = FilterOptions::from_records(&[record(1, "", "大", "その他")]);
        assert!(options.months.is_empty());
    }

    #[test]
    fn test_format_month_label() {
        assert_eq!(format_month_label("2023-11"), "2023年11月");
        assert_eq!(format_month_label("2024-01"), "2024年1月");
        assert_eq!(format_month_label("不明"), "不明");
    }
}
