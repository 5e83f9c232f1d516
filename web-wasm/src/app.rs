//! メインアプリケーションコンポーネント

use leptos::prelude::*;
use crate::browser_storage::BrowserStorage;
use crate::components::{
    charts::{MonthlyTrend, TypeDistribution},
    damage_list::DamageList,
    detail_panel::DetailPanel,
    excluded_list::ExcludedList,
    filter_bar::FilterBar,
    header::Header,
    status_board::StatusBoard,
    summary_cards::SummaryCards,
};
use road_damage_common::{
    clear_selected_if, load_selected, load_sidebar_collapsed, parse_dataset, save_selected,
    save_sidebar_collapsed, DamageRecord, DamageStore, FilterPreferences, OverridePatch,
};

/// 同梱の損傷データ
const DATASET_JSON: &str = include_str!("../../data/damages.json");

/// 本日の日付（YYYY-MM-DD）
pub fn today() -> String {
    let iso: String = js_sys::Date::new_0().to_iso_string().into();
    iso.chars().take(10).collect()
}

fn open_store() -> road_damage_common::Result<DamageStore<BrowserStorage>> {
    let records = parse_dataset(DATASET_JSON)?;
    DamageStore::new(records, BrowserStorage::open())
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    match open_store() {
        Ok(store) => view! { <Dashboard store=store /> }.into_any(),
        Err(e) => view! {
            <div class="container">
                <p class="error-banner">{format!("損傷データを読み込めません: {}", e)}</p>
            </div>
        }
        .into_any(),
    }
}

#[component]
fn Dashboard(store: DamageStore<BrowserStorage>) -> impl IntoView {
    let store = StoredValue::new_local(store);

    // 画面の状態はすべてストレージから復元する
    let (records, set_records) = signal(store.with_value(|s| s.merged_records()));
    let (excluded, set_excluded) = signal(store.with_value(|s| s.excluded_records()));
    let (prefs, set_prefs) = signal(store.with_value(|s| FilterPreferences::load(s.storage())));
    let (selected, set_selected) = signal(store.with_value(|s| load_selected(s.storage())));
    let (collapsed, set_collapsed) = signal(store.with_value(|s| load_sidebar_collapsed(s.storage())));
    let (error, set_error) = signal(None::<String>);

    let filtered = Memo::new(move |_| prefs.get().to_filter().apply(&records.get()));

    let report = move |result: road_damage_common::Result<()>| match result {
        Ok(()) => set_error.set(None),
        Err(e) => {
            web_sys::console::error_1(&e.to_string().into());
            set_error.set(Some(format!("保存できませんでした: {}", e)));
        }
    };

    // 上書きを保存し、全画面のデータを読み直す
    let save_override = move |id: u64, patch: OverridePatch| {
        let mut result = Ok(());
        store.update_value(|s| result = s.save_override(id, patch).map(|_| ()));
        report(result);

        let merged = store.with_value(|s| s.merged_records());
        set_selected.update(|current| {
            if let Some(record) = current.as_mut().filter(|r| r.id == id) {
                if let Some(updated) = merged.iter().find(|r| r.id == id) {
                    *record = updated.clone();
                }
            }
        });
        set_records.set(merged);
        set_excluded.set(store.with_value(|s| s.excluded_records()));
    };

    let on_status_save = move |(id, patch): (u64, OverridePatch)| save_override(id, patch);

    let on_delete = move |id: u64| {
        save_override(id, OverridePatch::deleted(true));
        if store.with_value(|s| s.find_merged(id).is_some()) {
            return;
        }

        // 除外したレコードの選択は解除
        let mut result = Ok(false);
        store.update_value(|s| result = clear_selected_if(s.storage_mut(), id));
        if let Err(e) = result {
            report(Err(e));
        }
        if selected.get_untracked().is_some_and(|r| r.id == id) {
            set_selected.set(None);
        }
    };

    let on_restore = move |id: u64| save_override(id, OverridePatch::deleted(false));

    let on_select = move |record: DamageRecord| {
        let mut result = Ok(());
        store.update_value(|s| result = save_selected(s.storage_mut(), &record));
        report(result);
        set_selected.set(Some(record));
    };

    let on_filter_change = move |next: FilterPreferences| {
        let mut result = Ok(());
        store.update_value(|s| result = next.save(s.storage_mut()));
        report(result);
        set_prefs.set(next);
    };

    let on_toggle = move |_: ()| {
        let next = !collapsed.get_untracked();
        let mut result = Ok(());
        store.update_value(|s| result = save_sidebar_collapsed(s.storage_mut(), next));
        report(result);
        set_collapsed.set(next);
    };

    view! {
        <div class="container" class:sidebar-collapsed=move || collapsed.get()>
            <Header collapsed=collapsed on_toggle=on_toggle />

            <Show when=move || error.get().is_some()>
                <p class="error-banner">{move || error.get().unwrap_or_default()}</p>
            </Show>

            <div class="layout">
                <aside class="sidebar">
                    <FilterBar records=records prefs=prefs on_change=on_filter_change />
                </aside>

                <main class="main">
                    <SummaryCards records=records />

                    <div class="chart-grid">
                        <TypeDistribution records=records />
                        <MonthlyTrend records=records />
                    </div>

                    <DamageList
                        records=filtered
                        selected=selected
                        on_select=on_select
                        on_delete=on_delete
                    />

                    <ExcludedList records=excluded on_restore=on_restore />

                    <DetailPanel selected=selected on_save=on_status_save />

                    <StatusBoard records=records on_save=on_status_save />
                </main>
            </div>
        </div>
    }
}
