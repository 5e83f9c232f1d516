//! 種別分布・月別推移の棒グラフ

use leptos::prelude::*;
use road_damage_common::stats::{monthly_trend, type_distribution};
use road_damage_common::{DamageRecord, DEFAULT_DAMAGE_TYPES};

#[component]
pub fn TypeDistribution(records: ReadSignal<Vec<DamageRecord>>) -> impl IntoView {
    let items = Memo::new(move |_| type_distribution(&records.get(), DEFAULT_DAMAGE_TYPES));

    view! {
        <section class="chart">
            <h2>"損傷種別分布"</h2>
            <Show
                when=move || !items.get().is_empty()
                fallback=|| view! { <p class="text-muted">"データなし"</p> }
            >
                <ul class="bar-list">
                    {move || {
                        items
                            .get()
                            .into_iter()
                            .map(|item| {
                                view! {
                                    <li class="bar-row">
                                        <span class="bar-label">{item.label}</span>
                                        <div class="bar">
                                            <div
                                                class="bar-fill"
                                                style=format!("width: {:.1}%", item.percent)
                                            />
                                        </div>
                                        <span class="bar-value">
                                            {format!("{}件 ({:.1}%)", item.count, item.percent)}
                                        </span>
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
            </Show>
        </section>
    }
}

#[component]
pub fn MonthlyTrend(records: ReadSignal<Vec<DamageRecord>>) -> impl IntoView {
    let items = Memo::new(move |_| monthly_trend(&records.get()));

    view! {
        <section class="chart">
            <h2>"月別 損傷発生推移"</h2>
            <div class="column-chart">
                {move || {
                    items
                        .get()
                        .into_iter()
                        .map(|item| {
                            view! {
                                <div class="column">
                                    <span class="column-value">{item.count}</span>
                                    <div
                                        class="column-fill"
                                        style=format!("height: {}%", item.bar_percent)
                                    />
                                    <span class="column-label">{item.month}</span>
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </section>
    }
}
