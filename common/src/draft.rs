//! 新規登録フォームの下書き状態
//!
//! フォームのマウント時に空で生成され、入力・添付のたびに更新される。
//! 登録成功後にのみリセットされ、失敗時は入力を保持したまま残す。

use crate::types::Attachment;

/// 1件分の下書き
///
/// テキスト4フィールドは検証なしの置き換え更新。添付リストは追記専用で、
/// 同じファイルを繰り返しドロップ/ペーストしても重複排除はしない
/// （受理したイベントごとに追記する）。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieDraft {
    pub title: String,
    pub year: String,
    pub director: String,
    pub plot: String,
    attachments: Vec<Attachment>,
}

impl MovieDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添付ファイルの一覧（イベント受理順）
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// 添付を1件以上追記する。空のイテレータなら何も起きない
    pub fn attach<I>(&mut self, files: I)
    where
        I: IntoIterator<Item = Attachment>,
    {
        self.attachments.extend(files);
    }

    /// 指定位置の添付を外して返す。範囲外ならNone
    ///
    /// 返った添付のプレビューURLは呼び出し側が解放する
    pub fn remove_attachment(&mut self, index: usize) -> Option<Attachment> {
        if index < self.attachments.len() {
            Some(self.attachments.remove(index))
        } else {
            None
        }
    }

    /// 4フィールドがすべて非空か（入力層の必須チェック）
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty()
            && !self.year.is_empty()
            && !self.director.is_empty()
            && !self.plot.is_empty()
    }

    /// 下書きを空に戻し、外した添付を返す
    ///
    /// 登録成功後にのみ呼ばれる。返った添付のプレビューURLの扱い
    /// （解放するか、登録済みレコードの表示に引き継ぐか）は呼び出し側が決める
    pub fn reset(&mut self) -> Vec<Attachment> {
        self.title.clear();
        self.year.clear();
        self.director.clear();
        self.plot.clear();
        std::mem::take(&mut self.attachments)
    }
}
