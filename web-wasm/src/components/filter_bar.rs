//! 絞り込みコンポーネント（年月・損傷度・種別）

use leptos::prelude::*;
use road_damage_common::{DamageRecord, FilterOptions, FilterPreferences, ALL};

#[component]
pub fn FilterBar<F>(
    records: ReadSignal<Vec<DamageRecord>>,
    prefs: ReadSignal<FilterPreferences>,
    on_change: F,
) -> impl IntoView
where
    F: Fn(FilterPreferences) + 'static + Clone + Send,
{
    let options = Memo::new(move |_| FilterOptions::from_records(&records.get()));

    let month_options = Signal::derive(move || {
        options
            .get()
            .months
            .into_iter()
            .map(|m| (m.value, m.label))
            .collect::<Vec<_>>()
    });
    let severity_options = Signal::derive(move || pairs(options.get().severities));
    let type_options = Signal::derive(move || pairs(options.get().damage_types));

    let update = move |apply: fn(&mut FilterPreferences, String)| {
        let on_change = on_change.clone();
        move |value: String| {
            let mut next = prefs.get_untracked();
            apply(&mut next, value);
            on_change(next);
        }
    };

    let on_reset = {
        let on_change = update(|p, _| *p = FilterPreferences::default());
        move |_| on_change(String::new())
    };

    view! {
        <div class="filter-bar">
            <FilterSelect
                label="年月"
                options=month_options
                value=Signal::derive(move || prefs.get().month)
                on_select=update(|p, v| p.month = v)
            />
            <FilterSelect
                label="損傷度"
                options=severity_options
                value=Signal::derive(move || prefs.get().severity)
                on_select=update(|p, v| p.severity = v)
            />
            <FilterSelect
                label="種別"
                options=type_options
                value=Signal::derive(move || prefs.get().damage_type)
                on_select=update(|p, v| p.damage_type = v)
            />
            <button class="btn btn-secondary btn-small" on:click=on_reset>
                "絞り込みを解除"
            </button>
        </div>
    }
}

fn pairs(values: Vec<String>) -> Vec<(String, String)> {
    values.into_iter().map(|v| (v.clone(), v)).collect()
}

/// 先頭に「全て」を持つドロップダウン
#[component]
fn FilterSelect<F>(
    label: &'static str,
    options: Signal<Vec<(String, String)>>,
    value: Signal<String>,
    on_select: F,
) -> impl IntoView
where
    F: Fn(String) + 'static + Clone + Send,
{
    view! {
        <div class="form-group">
            <label>{label}</label>
            <select
                prop:value=move || value.get()
                on:change=move |ev| on_select(event_target_value(&ev))
            >
                <option value=ALL>{ALL}</option>
                {move || {
                    let current = value.get();
                    options
                        .get()
                        .into_iter()
                        .map(|(v, text)| {
                            let selected = v == current;
                            view! { <option value=v selected=selected>{text}</option> }
                        })
                        .collect_view()
                }}
            </select>
        </div>
    }
}
