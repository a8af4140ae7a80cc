//! リモートアクセス層
//!
//! fetchの共通処理と各エンドポイントのクライアント

pub mod baseline;
pub mod firestore;

use movie_ledger_common::{Error, Result};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, Response};

/// リクエストを送り、JSONボディをJsValueで返す
///
/// 2xx以外は`Error::Status`、それ以外のfetch失敗は`Error::Network`に写す
pub(crate) async fn fetch_json(request: &Request) -> Result<JsValue> {
    let window = web_sys::window().ok_or_else(|| Error::Network("no window".to_string()))?;

    let resp_value = JsFuture::from(window.fetch_with_request(request))
        .await
        .map_err(js_error)?;
    let resp: Response = resp_value
        .dyn_into()
        .map_err(|_| Error::Network("unexpected fetch response type".to_string()))?;

    if !resp.ok() {
        return Err(Error::Status(resp.status()));
    }

    JsFuture::from(resp.json().map_err(js_error)?)
        .await
        .map_err(js_error)
}

fn js_error(value: JsValue) -> Error {
    Error::Network(format!("{:?}", value))
}
