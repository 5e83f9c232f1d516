//! 除外済みの損傷（一覧に戻す操作）

use leptos::prelude::*;
use road_damage_common::DamageRecord;

#[component]
pub fn ExcludedList<F>(records: ReadSignal<Vec<DamageRecord>>, on_restore: F) -> impl IntoView
where
    F: Fn(u64) + 'static + Clone + Send + Sync,
{
    let (open, set_open) = signal(false);
    let on_restore = StoredValue::new(on_restore);

    view! {
        <section class="excluded-list">
            <button
                class="btn btn-secondary"
                on:click=move |_| set_open.update(|v| *v = !*v)
            >
                {move || {
                    let mark = if open.get() { "▼" } else { "▶" };
                    format!("{} 除外済み（{}件）", mark, records.get().len())
                }}
            </button>
            <Show when=move || open.get()>
                <Show
                    when=move || !records.get().is_empty()
                    fallback=|| view! { <p class="text-muted">"除外済みの損傷はありません"</p> }
                >
                    <ul>
                        <For
                            each=move || records.get()
                            key=|record| record.id
                            children={
                                let on_restore = on_restore.clone();
                                move |record| {
                                    let on_restore = on_restore.get_value();
                                    let id = record.id;
                                    let summary = format!(
                                        "#{} {} / {} / {}",
                                        id, record.damage_type, record.severity, record.inspection_time
                                    );
                                    view! {
                                        <li class="damage-item excluded">
                                            <span class="damage-summary">{summary}</span>
                                            <button
                                                class="btn btn-small"
                                                title="一覧に戻す"
                                                on:click=move |_| on_restore(id)
                                            >
                                                "戻す"
                                            </button>
                                        </li>
                                    }
                                }
                            }
                        />
                    </ul>
                </Show>
            </Show>
        </section>
    }
}
