//! メインアプリケーションコンポーネント
//!
//! 2つの表示コレクション（ベースライン/登録済み）はこのコンポーネントが
//! 排他的に所有し、他のコンポーネントには読み取り用シグナルと
//! 追加コールバックだけを渡す。

use leptos::prelude::*;
use leptos::task::spawn_local;

use movie_ledger_common::{load_submitted, Movie};

use crate::api::baseline::fetch_baseline;
use crate::api::firestore::{FirestoreClient, FirestoreConfig};
use crate::components::{header::Header, movie_form::MovieForm, movie_gallery::MovieGallery};

#[component]
pub fn App() -> impl IntoView {
    let (baseline, set_baseline) = signal(Vec::<Movie>::new());
    let (submitted, set_submitted) = signal(Vec::<Movie>::new());
    let (baseline_error, set_baseline_error) = signal(None::<String>);
    let (submitted_error, set_submitted_error) = signal(None::<String>);

    // ストアハンドルはここで1つ作り、ローダーとフォームに注入する
    let store = FirestoreClient::new(FirestoreConfig::default());

    // マウント時の読み込みは2本とも1回きり。互いに書き込む状態が
    // 重ならないため順序づけはしない
    spawn_local(async move {
        match fetch_baseline().await {
            Ok(movies) => set_baseline.set(movies),
            Err(e) => {
                gloo::console::error!(format!("ベースライン読み込み失敗: {}", e));
                set_baseline_error.set(Some(e.to_string()));
            }
        }
    });

    {
        let store = store.clone();
        spawn_local(async move {
            match load_submitted(&store).await {
                Ok(movies) => set_submitted.set(movies),
                Err(e) => {
                    gloo::console::error!(format!("登録済みリスト読み込み失敗: {}", e));
                    set_submitted_error.set(Some(e.to_string()));
                }
            }
        });
    }

    // 登録成功時にフォームから渡される確定レコードを追記する
    let on_movie_added = move |movie: Movie| {
        set_submitted.update(|list| list.push(movie));
    };

    view! {
        <div class="container">
            <Header />

            <section>
                <h2>"トップ映画リスト"</h2>
                <ErrorNotice error=baseline_error />
                <MovieGallery movies=baseline />
            </section>

            <section>
                <h2>"映画を追加"</h2>
                <MovieForm store=store on_movie_added=on_movie_added />
            </section>

            <section>
                <h2>"新着映画リスト"</h2>
                <ErrorNotice error=submitted_error />
                <MovieGallery movies=submitted />
            </section>
        </div>
    }
}

/// 読み込み失敗の通知バナー
///
/// 失敗はその読み込みに閉じる。リストは空のまま表示し、
/// アプリ自体は操作可能なまま残す
#[component]
fn ErrorNotice(error: ReadSignal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some()>
            <p class="error-notice">
                {move || {
                    format!(
                        "リストを読み込めませんでした: {}",
                        error.get().unwrap_or_default()
                    )
                }}
            </p>
        </Show>
    }
}
