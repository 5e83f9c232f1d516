//! 対話式の対応状況編集
//!
//! 状況を選び、完了の場合のみ完了日を入力し、対応内容を入力して保存する。

use crate::error::{DashboardError, Result};
use chrono::NaiveDate;
use dialoguer::{Confirm, Input, Select};
use road_damage_common::{stats, DamageRecord, DamageStatus, DamageStore, KeyValueStore, OverridePatch};

/// 完了日の検証（YYYY-MM-DD）
pub fn parse_response_date(input: &str) -> Result<String> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|_| DashboardError::InvalidDate(trimmed.to_string()))
}

pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// 完了日の既定値（既存の完了日があればそれ、なければ本日）
pub fn default_response_date(record: &DamageRecord) -> String {
    record
        .response_date
        .clone()
        .filter(|d| !d.is_empty())
        .unwrap_or_else(today)
}

/// コマンド引数から保存内容を組み立てる
///
/// 省略された対応内容は既存値、省略された完了日は既存値または本日。
pub fn build_status_patch(
    current: &DamageRecord,
    status: DamageStatus,
    response_date: Option<&str>,
    details: Option<&str>,
) -> Result<OverridePatch> {
    let response_date = match (status, response_date) {
        (DamageStatus::Completed, Some(date)) => Some(parse_response_date(date)?),
        (DamageStatus::Completed, None) => Some(default_response_date(current)),
        _ => None,
    };
    let details = details
        .map(str::to_string)
        .or_else(|| current.response_details.clone())
        .unwrap_or_default();

    Ok(OverridePatch::status_update(status, response_date, details))
}

fn prompt_error(e: dialoguer::Error) -> DashboardError {
    DashboardError::Prompt(e.to_string())
}

/// 編集対象を一覧から選ぶ（対応状況順）
pub fn select_record(records: &[DamageRecord]) -> Result<Option<DamageRecord>> {
    if records.is_empty() {
        return Ok(None);
    }

    let mut sorted = records.to_vec();
    stats::sort_for_status_board(&mut sorted);
    let items: Vec<String> = sorted.iter().map(crate::render::record_line).collect();

    let index = Select::new()
        .with_prompt("編集する損傷")
        .items(&items)
        .default(0)
        .interact_opt()
        .map_err(prompt_error)?;

    Ok(index.map(|i| sorted[i].clone()))
}

/// 1件の対応状況を対話的に編集して保存
pub fn run_interactive_edit<S: KeyValueStore>(store: &mut DamageStore<S>, id: Option<u64>) -> Result<()> {
    let record = match id {
        Some(id) => store.find_merged(id).ok_or(DashboardError::RecordNotFound(id))?,
        None => match select_record(&store.merged_records())? {
            Some(record) => record,
            None => {
                println!("編集対象がありません");
                return Ok(());
            }
        },
    };

    println!(
        "\n#{} {}（{}） 発見日: {} / パトロール班: {}",
        record.id,
        record.damage_type,
        record.severity,
        record.inspection_time,
        record.patrol_team.as_deref().unwrap_or("")
    );

    let labels: Vec<&str> = DamageStatus::ALL.iter().map(|s| s.label()).collect();
    let selected = Select::new()
        .with_prompt("対応状況")
        .items(&labels)
        .default(record.status.board_order())
        .interact()
        .map_err(prompt_error)?;
    let status = DamageStatus::ALL[selected];

    // 完了日は対応完了のときだけ入力できる
    let response_date = if status == DamageStatus::Completed {
        let input: String = Input::new()
            .with_prompt("対応完了日 (YYYY-MM-DD)")
            .with_initial_text(default_response_date(&record))
            .validate_with(|s: &String| parse_response_date(s).map(|_| ()).map_err(|e| e.to_string()))
            .interact_text()
            .map_err(prompt_error)?;
        Some(parse_response_date(&input)?)
    } else {
        None
    };

    let details: String = Input::new()
        .with_prompt("対応内容や特記事項")
        .with_initial_text(record.response_details.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)?;

    let confirmed = Confirm::new()
        .with_prompt("保存しますか？")
        .default(true)
        .interact()
        .map_err(prompt_error)?;
    if !confirmed {
        println!("保存せずに終了しました");
        return Ok(());
    }

    let patch = OverridePatch::status_update(status, response_date, details);
    store.save_override(record.id, patch)?;
    println!("✔ 保存しました: #{} → {}", record.id, status.label());

    Ok(())
}
