//! 統計サマリーカード

use leptos::prelude::*;
use road_damage_common::{DamageRecord, DashboardSummary, SeverityLevel};

#[component]
pub fn SummaryCards(records: ReadSignal<Vec<DamageRecord>>) -> impl IntoView {
    let summary = Memo::new(move |_| DashboardSummary::from_records(&records.get()));

    view! {
        <div class="summary-cards">
            <SummaryCard
                title="総損傷数"
                value=Signal::derive(move || summary.get().total.to_string())
                note="全損傷の合計"
                class="card-total"
            />
            <SummaryCard
                title=SeverityLevel::High.label()
                value=Signal::derive(move || summary.get().high.to_string())
                note="即時対応が必要"
                class="card-high"
            />
            <SummaryCard
                title=SeverityLevel::Medium.label()
                value=Signal::derive(move || summary.get().medium.to_string())
                note="計画的な対応が必要"
                class="card-medium"
            />
            <SummaryCard
                title=SeverityLevel::Low.label()
                value=Signal::derive(move || summary.get().low.to_string())
                note="監視継続"
                class="card-low"
            />
            <SummaryCard
                title="対応率"
                value=Signal::derive(move || format!("{}%", summary.get().completion_rate))
                note="対応完了の割合"
                class="card-rate"
            />
        </div>
    }
}

#[component]
fn SummaryCard(
    title: &'static str,
    value: Signal<String>,
    note: &'static str,
    class: &'static str,
) -> impl IntoView {
    view! {
        <div class=format!("summary-card {}", class)>
            <p class="summary-title">{title}</p>
            <p class="summary-value">{move || value.get()}</p>
            <p class="summary-note">{note}</p>
        </div>
    }
}
