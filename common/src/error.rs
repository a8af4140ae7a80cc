//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// fetch自体の失敗（リクエスト構築・通信断・JS例外）
    #[error("network error: {0}")]
    Network(String),

    /// 2xx以外のHTTPレスポンス
    #[error("unexpected HTTP status: {0}")]
    Status(u16),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// レスポンスボディのデコード失敗
    #[error("decode error: {0}")]
    Decode(String),

    /// 送信が進行中のため再入を拒否
    #[error("submission already in flight")]
    SubmissionInFlight,
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
