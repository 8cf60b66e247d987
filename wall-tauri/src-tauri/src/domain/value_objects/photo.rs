use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};
use bytes::Bytes;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// ファイルピッカーで選ばれたローカル画像
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl PhotoFile {
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, bytes: Bytes) -> Self {
        let content_type = content_type
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string());
        Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// 画面表示用のプレビュー（data URL）
    pub fn preview(&self) -> PhotoPreview {
        PhotoPreview(format!(
            "data:{};base64,{}",
            self.content_type,
            BASE64_STANDARD.encode(&self.bytes)
        ))
    }
}

/// `<img src>` にそのまま渡せるローカルプレビュー参照
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoPreview(String);

impl PhotoPreview {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
