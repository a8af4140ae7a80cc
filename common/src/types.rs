//! 映画レコードの型定義
//!
//! Web(WASM)側と共有される型:
//! - Movie: 表示用の映画レコード（ベースライン/登録済みの両方）
//! - MovieFields: ストアへ書き込む5フィールド
//! - Attachment: 下書きに添付されたファイルのプレビュー参照

use serde::{Deserialize, Serialize};

/// 添付ファイルなしで登録された場合に使う代替画像URL
pub const DEFAULT_IMAGE_URL: &str = "default-image-url.jpg";

/// 映画レコード
///
/// ベースラインの配信JSONはキーが大文字始まり（Title, Year, ...）のため
/// PascalCaseでシリアライズする。`id`はストアが採番するドキュメントキーで、
/// ベースライン側には存在しない。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Movie {
    #[serde(rename = "id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub year: String,
    pub director: String,
    pub plot: String,
    pub images: Vec<String>,
}

impl Movie {
    /// ストア採番キーと書き込んだフィールドから確定レコードを組み立てる
    pub fn from_fields(id: String, fields: MovieFields) -> Self {
        Self {
            id: Some(id),
            title: fields.title,
            year: fields.year,
            director: fields.director,
            plot: fields.plot,
            images: fields.images,
        }
    }

    /// サムネイル表示に使う先頭画像
    ///
    /// 画像リストは描画時点で空であってはならないという不変条件を
    /// ここで吸収する（空なら代替画像URLを返す）
    pub fn primary_image(&self) -> &str {
        self.images
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_IMAGE_URL)
    }
}

/// ストアへ書き込む5フィールド（idなし）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MovieFields {
    pub title: String,
    pub year: String,
    pub director: String,
    pub plot: String,
    pub images: Vec<String>,
}

/// 下書きに添付されたファイル1件
///
/// `preview_url`は添付時に払い出されるオブジェクトURL。ページ寿命の
/// 一時参照であり、リロード後も有効な保存先URLではない。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attachment {
    pub name: String,
    pub preview_url: String,
}
