//! 選択中の損傷の詳細と対応状況の編集フォーム

use leptos::prelude::*;
use crate::app::today;
use road_damage_common::{DamageRecord, DamageStatus, OverridePatch};

#[component]
pub fn DetailPanel<F>(selected: ReadSignal<Option<DamageRecord>>, on_save: F) -> impl IntoView
where
    F: Fn((u64, OverridePatch)) + 'static + Clone + Send + Sync,
{
    let (status, set_status) = signal(DamageStatus::Pending);
    let (response_date, set_response_date) = signal(String::new());
    let (details, set_details) = signal(String::new());

    // 選択が変わったらフォームを保存済みの値で初期化
    Effect::new(move |_| {
        if let Some(record) = selected.get() {
            set_status.set(record.status);
            set_response_date.set(
                record
                    .response_date
                    .filter(|d| !d.is_empty())
                    .unwrap_or_else(today),
            );
            set_details.set(record.response_details.unwrap_or_default());
        }
    });

    let on_submit = move |_| {
        let Some(record) = selected.get_untracked() else {
            return;
        };
        let patch = OverridePatch::status_update(
            status.get_untracked(),
            Some(response_date.get_untracked()),
            details.get_untracked(),
        );
        on_save((record.id, patch));
    };

    view! {
        <section class="detail-panel">
            <h2>"損傷詳細"</h2>
            <Show
                when=move || selected.get().is_some()
                fallback=|| view! { <p class="text-muted">"一覧から損傷を選択してください"</p> }
            >
                <dl class="detail-grid">
                    {move || selected.get().map(detail_rows)}
                </dl>

                <div class="edit-form">
                    <div class="form-group">
                        <label for="status">"対応状況"</label>
                        <select
                            id="status"
                            prop:value=move || status.get().as_str()
                            on:change=move |ev| {
                                set_status.set(event_target_value(&ev).parse().unwrap_or_default());
                            }
                        >
                            {DamageStatus::ALL
                                .into_iter()
                                .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                                .collect_view()}
                        </select>
                    </div>

                    <div class="form-group">
                        <label for="response-date">"対応完了日"</label>
                        // 完了日は対応完了のときだけ入力できる
                        <input
                            type="date"
                            id="response-date"
                            disabled=move || status.get() != DamageStatus::Completed
                            prop:value=move || response_date.get()
                            on:input=move |ev| set_response_date.set(event_target_value(&ev))
                        />
                    </div>

                    <div class="form-group">
                        <label for="response-details">"対応内容や特記事項"</label>
                        <textarea
                            id="response-details"
                            prop:value=move || details.get()
                            on:input=move |ev| set_details.set(event_target_value(&ev))
                        />
                    </div>

                    <button class="btn btn-primary" on:click=on_submit.clone()>
                        "保存"
                    </button>
                </div>
            </Show>
        </section>
    }
}

fn detail_rows(record: DamageRecord) -> impl IntoView {
    let coords = record
        .coordinates()
        .map(|(lat, lng)| format!("{:.5}, {:.5}", lat, lng));

    let rows = [
        ("ID", Some(record.id.to_string())),
        ("種別", Some(record.damage_type)),
        ("損傷度", Some(record.severity)),
        ("対応状況", Some(record.status.label().to_string())),
        ("点検日時", Some(record.inspection_time)),
        ("座標", coords),
        ("大きさ", record.size),
        ("パトロール班", record.patrol_team),
        ("車両", record.vehicle),
        ("天候", record.weather),
        ("点検区間", record.inspection_section),
        ("応急処置", record.temporary_repair),
        ("音声メモ", record.voice_text),
        ("対応完了日", record.response_date),
        ("対応内容", record.response_details),
    ];

    rows.into_iter()
        .map(|(label, value)| {
            let value = value.filter(|v| !v.is_empty()).unwrap_or_else(|| "-".to_string());
            view! {
                <dt>{label}</dt>
                <dd>{value}</dd>
            }
        })
        .collect_view()
}
