//! 送信ワークフローと登録済み一覧の読み込み
//!
//! 下書きのスナップショットを受け取り、ストアへの書き込みと
//! 確定レコードの組み立てを行う。状態の書き戻し（`submitted`への追加と
//! 下書きリセット）は呼び出し側コントローラの責務。

use std::cell::Cell;

use crate::draft::MovieDraft;
use crate::error::{Error, Result};
use crate::store::MovieStore;
use crate::types::{Movie, MovieFields, DEFAULT_IMAGE_URL};

/// 送信ワークフロー
///
/// ストアハンドルと送信中フラグを持つ。フラグはシングルスレッドの
/// イベントループ上でのみ触られるため`Cell`で足りる。
pub struct SubmissionWorkflow<S> {
    store: S,
    in_flight: Cell<bool>,
}

/// awaitをまたいでもフラグを確実に戻すためのガード
struct ClearOnDrop<'a>(&'a Cell<bool>);

impl Drop for ClearOnDrop<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl<S: MovieStore> SubmissionWorkflow<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            in_flight: Cell::new(false),
        }
    }

    /// 書き込みが未完了のまま残っているか
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.get()
    }

    /// 下書きのスナップショットをストアへ登録し、確定レコードを返す
    ///
    /// 先行する送信が未完了の間は`SubmissionInFlight`で再入を拒否する
    /// （連打による二重書き込みの防止）。添付が1件もなければ画像リストに
    /// 代替URLを1件補う。失敗時は下書きに一切触れない。
    pub async fn submit(&self, draft: &MovieDraft) -> Result<Movie> {
        if self.in_flight.get() {
            return Err(Error::SubmissionInFlight);
        }
        self.in_flight.set(true);
        let _clear = ClearOnDrop(&self.in_flight);

        // 表示URLの収集は添付時に払い出し済みのため同期・不可失敗
        let mut images: Vec<String> = draft
            .attachments()
            .iter()
            .map(|a| a.preview_url.clone())
            .collect();
        if images.is_empty() {
            images.push(DEFAULT_IMAGE_URL.to_string());
        }

        let fields = MovieFields {
            title: draft.title.clone(),
            year: draft.year.clone(),
            director: draft.director.clone(),
            plot: draft.plot.clone(),
            images,
        };

        // 唯一の失敗し得る（中断し得る）ステップ
        let key = self.store.create(&fields).await?;

        // ストア採番キーと送信した値そのもので確定レコードを作る。
        // 代替画像もここに含まれるため、追加表示されるレコードの
        // 画像リストが空になることはない
        Ok(Movie::from_fields(key, fields))
    }
}

/// 登録済み一覧をストアから読み込む
///
/// ドキュメントキーを`id`に立て、ストアの返却順を保ったまま
/// レコード列へ写す。マウント時に1回だけ呼ばれる。
pub async fn load_submitted<S: MovieStore>(store: &S) -> Result<Vec<Movie>> {
    let documents = store.list_all().await?;
    Ok(documents
        .into_iter()
        .map(|(key, fields)| Movie::from_fields(key, fields))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Attachment;
    use futures::executor::block_on;
    use futures::pin_mut;
    use futures::task::noop_waker;
    use std::cell::RefCell;
    use std::future::Future;
    use std::rc::Rc;
    use std::task::{Context, Poll};

    /// インメモリのフェイクストア
    #[derive(Default, Clone)]
    struct FakeStore {
        inner: Rc<RefCell<FakeInner>>,
    }

    #[derive(Default)]
    struct FakeInner {
        docs: Vec<(String, MovieFields)>,
        fail_create: bool,
        create_calls: usize,
    }

    impl FakeStore {
        fn failing() -> Self {
            let store = Self::default();
            store.inner.borrow_mut().fail_create = true;
            store
        }

        fn with_docs(docs: Vec<(String, MovieFields)>) -> Self {
            let store = Self::default();
            store.inner.borrow_mut().docs = docs;
            store
        }

        fn create_calls(&self) -> usize {
            self.inner.borrow().create_calls
        }
    }

    impl MovieStore for FakeStore {
        async fn list_all(&self) -> Result<Vec<(String, MovieFields)>> {
            Ok(self.inner.borrow().docs.clone())
        }

        async fn create(&self, fields: &MovieFields) -> Result<String> {
            let mut inner = self.inner.borrow_mut();
            inner.create_calls += 1;
            if inner.fail_create {
                return Err(Error::Network("connection reset".to_string()));
            }
            let key = format!("doc-{}", inner.docs.len() + 1);
            inner.docs.push((key.clone(), fields.clone()));
            Ok(key)
        }
    }

    /// createが永遠に完了しないストア（送信中状態の再現用）
    struct PendingStore;

    impl MovieStore for PendingStore {
        async fn list_all(&self) -> Result<Vec<(String, MovieFields)>> {
            Ok(Vec::new())
        }

        async fn create(&self, _fields: &MovieFields) -> Result<String> {
            std::future::pending().await
        }
    }

    fn filled_draft() -> MovieDraft {
        let mut draft = MovieDraft::new();
        draft.title = "Arrival".to_string();
        draft.year = "2016".to_string();
        draft.director = "Denis Villeneuve".to_string();
        draft.plot = "A linguist communicates with visitors.".to_string();
        draft
    }

    #[test]
    fn test_submit_without_attachments_uses_fallback_image() {
        let store = FakeStore::default();
        let workflow = SubmissionWorkflow::new(store.clone());
        let draft = filled_draft();

        let movie = block_on(workflow.submit(&draft)).expect("登録失敗");

        // ストアへは代替画像1件で書き込まれる
        let docs = store.inner.borrow().docs.clone();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].1.images, vec![DEFAULT_IMAGE_URL.to_string()]);

        // 確定レコードも同じ画像リストを持つ
        assert_eq!(movie.id.as_deref(), Some("doc-1"));
        assert_eq!(movie.title, "Arrival");
        assert_eq!(movie.images, vec![DEFAULT_IMAGE_URL.to_string()]);
        assert!(!workflow.is_in_flight());
    }

    #[test]
    fn test_submit_sends_attachment_urls_in_order() {
        let store = FakeStore::default();
        let workflow = SubmissionWorkflow::new(store.clone());

        let mut draft = filled_draft();
        draft.attach([
            Attachment {
                name: "a.jpg".to_string(),
                preview_url: "blob:a".to_string(),
            },
            Attachment {
                name: "b.jpg".to_string(),
                preview_url: "blob:b".to_string(),
            },
        ]);

        let movie = block_on(workflow.submit(&draft)).expect("登録失敗");
        assert_eq!(movie.images, vec!["blob:a".to_string(), "blob:b".to_string()]);
    }

    #[test]
    fn test_failed_submit_leaves_draft_untouched() {
        let store = FakeStore::failing();
        let workflow = SubmissionWorkflow::new(store.clone());
        let draft = filled_draft();
        let before = draft.clone();

        let err = block_on(workflow.submit(&draft)).unwrap_err();
        assert!(matches!(err, Error::Network(_)));

        // 下書きは保持され、ストアにも何も残らない
        assert_eq!(draft, before);
        assert!(store.inner.borrow().docs.is_empty());
        assert_eq!(store.create_calls(), 1);
        assert!(!workflow.is_in_flight());
    }

    #[test]
    fn test_reentrant_submit_is_rejected() {
        let workflow = SubmissionWorkflow::new(PendingStore);
        let draft = filled_draft();

        let waker = noop_waker();
        let mut cx = Context::from_waker(&waker);

        {
            // 1回目をcreateの途中（保留）まで進める
            let first = workflow.submit(&draft);
            pin_mut!(first);
            assert!(matches!(first.as_mut().poll(&mut cx), Poll::Pending));
            assert!(workflow.is_in_flight());

            // 保留中の再入は拒否される
            let err = block_on(workflow.submit(&draft)).unwrap_err();
            assert!(matches!(err, Error::SubmissionInFlight));
        }

        // 1回目の破棄でフラグが戻り、次の送信は通る
        assert!(!workflow.is_in_flight());
    }

    #[test]
    fn test_successful_submit_then_reset_clears_staging() {
        let workflow = SubmissionWorkflow::new(FakeStore::default());
        let mut draft = filled_draft();
        draft.attach([Attachment {
            name: "poster.jpg".to_string(),
            preview_url: "blob:poster".to_string(),
        }]);

        let snapshot = draft.clone();
        let movie = block_on(workflow.submit(&snapshot)).expect("登録失敗");
        assert_eq!(movie.images, vec!["blob:poster".to_string()]);

        // 成功後はコントローラが下書きをリセットする
        let drained = draft.reset();
        assert_eq!(drained.len(), 1);
        assert_eq!(draft, MovieDraft::new());
    }

    #[test]
    fn test_load_submitted_maps_keys_in_store_order() {
        let docs = vec![
            (
                "k1".to_string(),
                MovieFields {
                    title: "First".to_string(),
                    ..Default::default()
                },
            ),
            (
                "k2".to_string(),
                MovieFields {
                    title: "Second".to_string(),
                    ..Default::default()
                },
            ),
            (
                "k3".to_string(),
                MovieFields {
                    title: "Third".to_string(),
                    ..Default::default()
                },
            ),
        ];
        let store = FakeStore::with_docs(docs);

        let movies = block_on(load_submitted(&store)).expect("一覧読み込み失敗");
        assert_eq!(movies.len(), 3);
        let ids: Vec<&str> = movies.iter().filter_map(|m| m.id.as_deref()).collect();
        assert_eq!(ids, vec!["k1", "k2", "k3"]);
        assert_eq!(movies[0].title, "First");
        assert_eq!(movies[2].title, "Third");
    }

    #[test]
    fn test_load_submitted_empty_store() {
        let store = FakeStore::default();
        let movies = block_on(load_submitted(&store)).expect("一覧読み込み失敗");
        assert!(movies.is_empty());
    }
}
