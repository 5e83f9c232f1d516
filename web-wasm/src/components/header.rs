//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header<F>(collapsed: ReadSignal<bool>, on_toggle: F) -> impl IntoView
where
    F: Fn(()) + 'static + Clone + Send,
{
    view! {
        <header class="header">
            <button
                class="btn btn-secondary btn-small sidebar-toggle"
                title=move || if collapsed.get() { "サイドバーを開く" } else { "サイドバーを閉じる" }
                on:click=move |_| on_toggle(())
            >
                {move || if collapsed.get() { "☰" } else { "«" }}
            </button>
            <h1>"道路管理ダッシュボード"</h1>
        </header>
    }
}
