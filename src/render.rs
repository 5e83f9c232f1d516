//! 端末向けの表示整形

use road_damage_common::filter::FilterOptions;
use road_damage_common::stats::{CategoryCount, MonthlyCount, StatusCount};
use road_damage_common::{
    DamageRecord, DashboardSummary, FilterPreferences, OverrideMap, SeverityLevel,
};
use std::fmt::Write;

const BAR_WIDTH: usize = 20;

fn or_dash(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "-",
    }
}

pub fn summary(summary: &DashboardSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  総損傷数        {:>5}  全損傷の合計", summary.total);
    let levels = [
        (SeverityLevel::High, "大", summary.high, "即時対応が必要"),
        (SeverityLevel::Medium, "中", summary.medium, "計画的な対応が必要"),
        (SeverityLevel::Low, "小", summary.low, "監視継続"),
    ];
    for (level, mark, count, note) in levels {
        let _ = writeln!(out, "  {} ({})   {:>5}  {}", level.label(), mark, count, note);
    }
    let _ = writeln!(
        out,
        "  対応率          {:>4}%  完了 {}件",
        summary.completion_rate, summary.completed
    );
    out
}

pub fn type_distribution(items: &[CategoryCount]) -> String {
    if items.is_empty() {
        return "  （データなし）\n".to_string();
    }

    let mut out = String::new();
    for item in items {
        let _ = writeln!(out, "  {:<12} {:>4}件 {:>5.1}%", item.label, item.count, item.percent);
    }
    out
}

pub fn status_breakdown(items: &[StatusCount]) -> String {
    if items.is_empty() {
        return "  （データなし）\n".to_string();
    }

    let mut out = String::new();
    for item in items {
        let _ = writeln!(out, "  {:<8} {:>4}件", item.status.label(), item.count);
    }
    out
}

pub fn monthly_trend(items: &[MonthlyCount]) -> String {
    let mut out = String::new();
    for item in items {
        let filled = (item.bar_percent as usize * BAR_WIDTH).div_ceil(100);
        let _ = writeln!(
            out,
            "  {:<8} {:<width$} {:>4}",
            item.month,
            "█".repeat(filled),
            item.count,
            width = BAR_WIDTH
        );
    }
    out
}

/// 一覧の1行
pub fn record_line(record: &DamageRecord) -> String {
    format!(
        "#{:<4} {} / {} / {} [{}] {}",
        record.id,
        record.damage_type,
        record.severity,
        or_dash(Some(record.inspection_time.as_str())),
        record.status.label(),
        or_dash(record.patrol_team.as_deref()),
    )
}

pub fn record_list(records: &[DamageRecord]) -> String {
    let mut out = String::new();
    for record in records {
        let _ = writeln!(out, "  {}", record_line(record));
    }
    out
}

/// 詳細表示
pub fn record_detail(record: &DamageRecord) -> String {
    let coords = record
        .coordinates()
        .map(|(lat, lng)| format!("{:.5}, {:.5}", lat, lng));

    let rows = [
        ("ID", Some(record.id.to_string())),
        ("種別", Some(record.damage_type.clone())),
        ("損傷度", Some(record.severity.clone())),
        ("緊急度", record.severity_level().map(|l| l.label().to_string())),
        ("対応状況", Some(record.status.label().to_string())),
        ("点検日時", Some(record.inspection_time.clone())),
        ("座標", coords),
        ("GPS", record.gps.clone()),
        ("大きさ", record.size.clone()),
        ("パトロール班", record.patrol_team.clone()),
        ("車両", record.vehicle.clone()),
        ("天候", record.weather.clone()),
        ("点検区間", record.inspection_section.clone()),
        ("応急処置", record.temporary_repair.clone()),
        ("音声メモ", record.voice_text.clone()),
        ("画像", record.image.clone()),
        ("対応完了日", record.response_date.clone()),
        ("対応内容", record.response_details.clone()),
    ];

    let mut out = String::new();
    for (label, value) in rows {
        let _ = writeln!(out, "  {:<12} {}", label, or_dash(value.as_deref()));
    }
    out
}

pub fn filter_options(options: &FilterOptions) -> String {
    let months: Vec<String> = options
        .months
        .iter()
        .map(|m| format!("{} ({})", m.label, m.value))
        .collect();

    let mut out = String::new();
    let _ = writeln!(out, "  年月:   {}", months.join(", "));
    let _ = writeln!(out, "  損傷度: {}", options.severities.join(", "));
    let _ = writeln!(out, "  種別:   {}", options.damage_types.join(", "));
    out
}

/// 保存中の絞り込み条件（条件がなければ「なし」）
pub fn filter_conditions(prefs: &FilterPreferences) -> String {
    if prefs.to_filter().is_unfiltered() {
        return "なし".to_string();
    }
    format!(
        "年月={} / 損傷度={} / 種別={}",
        prefs.month, prefs.severity, prefs.damage_type
    )
}

pub fn overrides(overrides: &OverrideMap, stray_ids: &[String]) -> String {
    if overrides.is_empty() {
        return "  （上書きなし）\n".to_string();
    }

    let mut out = String::new();
    for (id, patch) in overrides {
        let json = if patch.is_empty() {
            "（変更なし）".to_string()
        } else {
            serde_json::to_string(patch).unwrap_or_default()
        };
        let note = if stray_ids.contains(id) { "  ※データに存在しないID" } else { "" };
        let _ = writeln!(out, "  #{:<4} {}{}", id, json, note);
    }
    out
}
