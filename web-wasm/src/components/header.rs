//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"映画台帳 - Movie Ledger"</h1>
        </header>
    }
}
