//! 添付ファイルのプレビューURL管理
//!
//! 添付時にオブジェクトURLを1回だけ払い出し、添付を外したときに
//! 明示的に解放する。URLはページ寿命の一時参照。

use web_sys::{Blob, Url};

/// オブジェクトURLを払い出す。失敗時はNone
pub fn allocate(blob: &Blob) -> Option<String> {
    Url::create_object_url_with_blob(blob).ok()
}

/// 払い出したオブジェクトURLを解放する
pub fn release(url: &str) {
    let _ = Url::revoke_object_url(url);
}
