use crate::domain::constants::MAX_BODY_CHARS;
use crate::domain::value_objects::{PhotoFile, PhotoPreview};

/// 未投稿の入力内容（本文 + 任意の写真）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostDraft {
    body: String,
    photo: Option<SelectedPhoto>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectedPhoto {
    pub file: PhotoFile,
    pub preview: PhotoPreview,
}

impl PostDraft {
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn photo(&self) -> Option<&SelectedPhoto> {
        self.photo.as_ref()
    }

    /// 280 文字（Unicode スカラー値単位）を超えた分は切り捨てる。入力欄もこの結果を表示し直す。
    pub fn set_body(&mut self, body: &str) {
        self.body = truncate_chars(body, MAX_BODY_CHARS);
    }

    pub fn remaining_chars(&self) -> i64 {
        MAX_BODY_CHARS as i64 - self.body.chars().count() as i64
    }

    // サイズや形式の検証はしない
    pub fn select_photo(&mut self, file: PhotoFile) -> PhotoPreview {
        let preview = file.preview();
        self.photo = Some(SelectedPhoto {
            file,
            preview: preview.clone(),
        });
        preview
    }

    pub fn trimmed_body(&self) -> &str {
        self.body.trim()
    }

    /// 本文（trim 後）が空で写真もなければ共有できない
    pub fn can_share(&self) -> bool {
        !self.trimmed_body().is_empty() || self.photo.is_some()
    }

    pub fn clear(&mut self) {
        self.body.clear();
        self.photo = None;
    }
}

fn truncate_chars(value: &str, max: usize) -> String {
    match value.char_indices().nth(max) {
        Some((idx, _)) => value[..idx].to_string(),
        None => value.to_string(),
    }
}
