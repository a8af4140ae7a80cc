//! 映画追加フォームコンポーネント
//!
//! 下書き（MovieDraft）を唯一のステージング状態として持ち、
//! ファイル選択・ドラッグ&ドロップ・クリップボード貼り付けの
//! 3経路から添付を受け付ける。送信はSubmissionWorkflow経由。

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, DragEvent, Event, File, FileList, HtmlInputElement, SubmitEvent};

use movie_ledger_common::{Attachment, Error, Movie, MovieDraft, SubmissionWorkflow};

use crate::api::firestore::FirestoreClient;
use crate::preview;

#[component]
pub fn MovieForm<F>(store: FirestoreClient, on_movie_added: F) -> impl IntoView
where
    F: Fn(Movie) + 'static + Clone,
{
    let draft = RwSignal::new(MovieDraft::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (is_dragover, set_is_dragover) = signal(false);

    let workflow = Rc::new(SubmissionWorkflow::new(store));

    // 3経路共通の添付処理。プレビューURLは添付時に1回だけ払い出す
    let attach_files = move |files: Vec<File>| {
        let mut added = Vec::new();
        for file in files {
            match preview::allocate(&file) {
                Some(url) => added.push(Attachment {
                    name: file.name(),
                    preview_url: url,
                }),
                None => gloo::console::error!("プレビューURLの生成に失敗しました"),
            }
        }
        if added.is_empty() {
            return;
        }
        draft.update(|d| d.attach(added));
    };

    let on_file_input = {
        let attach_files = attach_files.clone();
        move |ev: Event| {
            if let Some(target) = ev.target() {
                if let Ok(input) = target.dyn_into::<HtmlInputElement>() {
                    if let Some(files) = input.files() {
                        attach_files(collect_file_list(&files));
                    }
                    // 同じファイルを続けて選んでもchangeが発火するように
                    input.set_value("");
                }
            }
        }
    };

    let on_drop = {
        let attach_files = attach_files.clone();
        move |ev: DragEvent| {
            // 既定のナビゲーション（ファイルを開く）を抑止
            ev.prevent_default();
            set_is_dragover.set(false);

            if let Some(dt) = ev.data_transfer() {
                if let Some(files) = dt.files() {
                    attach_files(collect_file_list(&files));
                }
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    let on_paste = {
        let attach_files = attach_files.clone();
        // tachysはpasteイベントを生の`Event`として型付けする（ClipboardEventはunstable）ため、
        // 実行時型のClipboardEventへダウンキャストしてから扱う
        move |ev: Event| {
            let Some(ev) = ev.dyn_ref::<ClipboardEvent>() else {
                return;
            };
            if let Some(data) = ev.clipboard_data() {
                let items = data.items();
                let mut files = Vec::new();
                for i in 0..items.length() {
                    if let Some(item) = items.get(i) {
                        // ファイル以外の項目（テキスト等）は黙って無視する
                        if item.kind() != "file" {
                            continue;
                        }
                        if let Ok(Some(file)) = item.get_as_file() {
                            files.push(file);
                        }
                    }
                }
                attach_files(files);
            }
        }
    };

    let on_submit = {
        let workflow = workflow.clone();
        let on_movie_added = on_movie_added.clone();
        move |ev: SubmitEvent| {
            // フォーム既定の送信ナビゲーションを抑止
            ev.prevent_default();

            if is_submitting.get_untracked() {
                return;
            }
            let snapshot = draft.get_untracked();
            if !snapshot.is_complete() {
                return;
            }

            set_is_submitting.set(true);
            let workflow = workflow.clone();
            let on_movie_added = on_movie_added.clone();
            spawn_local(async move {
                match workflow.submit(&snapshot).await {
                    Ok(movie) => {
                        // プレビューURLは登録済みレコードの表示に引き継ぐため
                        // ここでは解放しない
                        draft.try_update(|d| d.reset());
                        on_movie_added(movie);
                        gloo::dialogs::alert("映画を登録しました");
                    }
                    // 送信中の再入はワークフロー側で拒否される。通知は出さない
                    Err(Error::SubmissionInFlight) => {}
                    Err(e) => {
                        gloo::console::error!(format!("映画の登録に失敗: {}", e));
                        gloo::dialogs::alert(&format!("映画の登録に失敗しました: {}", e));
                    }
                }
                set_is_submitting.set(false);
            });
        }
    };

    view! {
        <form
            class=move || {
                let mut classes = vec!["add-movie-form"];
                if is_dragover.get() {
                    classes.push("dragover");
                }
                classes.join(" ")
            }
            on:submit=on_submit
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:drop=on_drop
            on:paste=on_paste
        >
            <input
                type="text"
                placeholder="タイトル"
                required=true
                prop:value=move || draft.with(|d| d.title.clone())
                on:input=move |ev| draft.update(|d| d.title = event_target_value(&ev))
            />
            <input
                type="text"
                placeholder="公開年"
                required=true
                prop:value=move || draft.with(|d| d.year.clone())
                on:input=move |ev| draft.update(|d| d.year = event_target_value(&ev))
            />
            <input
                type="text"
                placeholder="監督"
                required=true
                prop:value=move || draft.with(|d| d.director.clone())
                on:input=move |ev| draft.update(|d| d.director = event_target_value(&ev))
            />
            <textarea
                placeholder="あらすじ"
                required=true
                prop:value=move || draft.with(|d| d.plot.clone())
                on:input=move |ev| draft.update(|d| d.plot = event_target_value(&ev))
            ></textarea>

            <input
                type="file"
                multiple=true
                accept="image/*"
                on:change=on_file_input
            />

            <div class="image-preview">
                <For
                    each=move || draft.with(|d| d.attachments().to_vec())
                    key=|a| a.preview_url.clone()
                    children=move |attachment: Attachment| {
                        let url = attachment.preview_url.clone();
                        view! {
                            <div class="image-preview-item">
                                <img src=attachment.preview_url.clone() alt=attachment.name.clone() />
                                <p>{attachment.name.clone()}</p>
                                <button
                                    type="button"
                                    class="btn btn-small btn-secondary"
                                    on:click=move |_| {
                                        draft.update(|d| {
                                            let index = d
                                                .attachments()
                                                .iter()
                                                .position(|a| a.preview_url == url);
                                            if let Some(index) = index {
                                                if let Some(removed) = d.remove_attachment(index) {
                                                    preview::release(&removed.preview_url);
                                                }
                                            }
                                        });
                                    }
                                >
                                    "削除"
                                </button>
                            </div>
                        }
                    }
                />
            </div>

            <button type="submit" class="btn btn-primary" disabled=move || is_submitting.get()>
                {move || if is_submitting.get() { "登録中..." } else { "映画を追加" }}
            </button>
        </form>
    }
}

fn collect_file_list(list: &FileList) -> Vec<File> {
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}
