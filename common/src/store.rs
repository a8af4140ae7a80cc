//! リモートドキュメントストアの境界
//!
//! 送信ワークフローと一覧ローダーの両方に同じハンドルを注入するための
//! 最小インターフェース。テストではフェイク実装に差し替える。

use crate::error::Result;
use crate::types::MovieFields;

/// "movies"コレクションに対する操作
///
/// 追記専用: 一覧と作成のみで、更新・削除は公開しない。
/// `create`は呼び出し側から見て原子的（作成されたか、されなかったか）として扱う。
#[allow(async_fn_in_trait)]
pub trait MovieStore {
    /// 全ドキュメントを(キー, フィールド)でストアの返却順に返す
    async fn list_all(&self) -> Result<Vec<(String, MovieFields)>>;

    /// 1ドキュメントを作成し、採番されたキーを返す
    async fn create(&self, fields: &MovieFields) -> Result<String>;
}
