//! 損傷一覧（絞り込み結果）

use leptos::prelude::*;
use road_damage_common::DamageRecord;

#[component]
pub fn DamageList<FS, FD>(
    records: Memo<Vec<DamageRecord>>,
    selected: ReadSignal<Option<DamageRecord>>,
    on_select: FS,
    on_delete: FD,
) -> impl IntoView
where
    FS: Fn(DamageRecord) + 'static + Clone + Send + Sync,
    FD: Fn(u64) + 'static + Clone + Send + Sync,
{
    let selected_id = Memo::new(move |_| selected.get().map(|r| r.id));

    view! {
        <section class="damage-list">
            <h2>{move || format!("損傷一覧（{}件）", records.get().len())}</h2>
            <Show
                when=move || !records.get().is_empty()
                fallback=|| view! { <p class="text-muted">"条件に一致する損傷はありません"</p> }
            >
                <ul>
                    <For
                        each=move || records.get()
                        key=|record| (record.id, record.status)
                        children={
                            let on_select = on_select.clone();
                            let on_delete = on_delete.clone();
                            move |record| {
                                let on_select = on_select.clone();
                                let on_delete = on_delete.clone();
                                let id = record.id;
                                let summary = format!(
                                    "{} / {} / {}",
                                    record.damage_type, record.severity, record.inspection_time
                                );
                                let status = record.status.label();
                                let level = record.severity_level();
                                let level_label = level.map(|l| l.label()).unwrap_or("緊急度不明");
                                let level_style = level
                                    .map(|l| format!("background-color: {}", l.color()))
                                    .unwrap_or_default();
                                view! {
                                    <li
                                        class="damage-item"
                                        class:selected=move || selected_id.get() == Some(id)
                                        on:click=move |_| on_select(record.clone())
                                    >
                                        <span class="damage-id">{format!("#{}", id)}</span>
                                        <span class="damage-summary">{summary}</span>
                                        <span class="badge badge-severity" style=level_style>
                                            {level_label}
                                        </span>
                                        <span class="badge">{status}</span>
                                        <button
                                            class="btn btn-danger btn-small"
                                            title="一覧から除外"
                                            on:click=move |ev| {
                                                ev.stop_propagation();
                                                on_delete(id);
                                            }
                                        >
                                            "除外"
                                        </button>
                                    </li>
                                }
                            }
                        }
                    />
                </ul>
            </Show>
        </section>
    }
}
