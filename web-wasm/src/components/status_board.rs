//! 対応状況ボード

use leptos::prelude::*;
use crate::app::today;
use road_damage_common::stats::sort_for_status_board;
use road_damage_common::{DamageRecord, DamageStatus, OverridePatch};

/// ボード上で状況を切り替えたときの保存内容
///
/// 対応内容は維持し、完了日は既存値または本日。
fn board_patch(record: &DamageRecord, status: DamageStatus) -> OverridePatch {
    let response_date = record
        .response_date
        .clone()
        .filter(|d| !d.is_empty())
        .unwrap_or_else(today);
    OverridePatch::status_update(
        status,
        Some(response_date),
        record.response_details.clone().unwrap_or_default(),
    )
}

#[component]
pub fn StatusBoard<F>(records: ReadSignal<Vec<DamageRecord>>, on_save: F) -> impl IntoView
where
    F: Fn((u64, OverridePatch)) + 'static + Clone + Send,
{
    let sorted = Memo::new(move |_| {
        let mut records = records.get();
        sort_for_status_board(&mut records);
        records
    });

    view! {
        <section class="status-board">
            <h2>"対応状況"</h2>
            <div class="status-columns">
                {DamageStatus::ALL
                    .into_iter()
                    .map(|status| {
                        let on_save = on_save.clone();
                        let column = Memo::new(move |_| {
                            sorted
                                .get()
                                .into_iter()
                                .filter(|r| r.status == status)
                                .collect::<Vec<_>>()
                        });
                        view! {
                            <div class=format!("status-column status-{}", status.as_str())>
                                <h3>
                                    {status.label()}
                                    <span class="count">{move || column.get().len()}</span>
                                </h3>
                                <For
                                    each=move || column.get()
                                    key=|record| (record.id, record.status)
                                    children=move |record| {
                                        let on_save = on_save.clone();
                                        view! { <StatusCard record=record on_save=on_save /> }
                                    }
                                />
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}

#[component]
fn StatusCard<F>(record: DamageRecord, on_save: F) -> impl IntoView
where
    F: Fn((u64, OverridePatch)) + 'static + Clone + Send,
{
    let title = format!("#{} {}（{}）", record.id, record.damage_type, record.severity);
    let meta = format!(
        "発見日: {} / パトロール班: {}",
        record.inspection_time,
        record.patrol_team.as_deref().unwrap_or("")
    );
    let current = record.status;

    view! {
        <div class="status-card">
            <div class="status-card-title">{title}</div>
            <div class="status-card-meta">{meta}</div>
            <select
                prop:value=current.as_str()
                on:change=move |ev| {
                    let next: DamageStatus = event_target_value(&ev).parse().unwrap_or_default();
                    if next != current {
                        on_save((record.id, board_patch(&record, next)));
                    }
                }
            >
                {DamageStatus::ALL
                    .into_iter()
                    .map(|s| view! { <option value=s.as_str() selected=s == current>{s.label()}</option> })
                    .collect_view()}
            </select>
        </div>
    }
}
