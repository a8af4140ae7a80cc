//! ベースライン映画リストの取得
//!
//! 外部ホストされた固定JSONを1回だけGETする。読み取り専用で、
//! 取得後にこのリストが書き換わることはない。

use movie_ledger_common::{Error, Movie, Result};
use web_sys::{Request, RequestInit, RequestMode};

use super::{fetch_json, js_error};

const BASELINE_URL: &str =
    "https://raw.githubusercontent.com/winAs-Xprt/movieData/refs/heads/main/movies.json";

/// 固定JSONを丸ごと読み、レコード列として返す
pub async fn fetch_baseline() -> Result<Vec<Movie>> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let request = Request::new_with_str_and_init(BASELINE_URL, &opts).map_err(js_error)?;

    let json = fetch_json(&request).await?;
    serde_wasm_bindgen::from_value(json).map_err(|e| Error::Decode(e.to_string()))
}
