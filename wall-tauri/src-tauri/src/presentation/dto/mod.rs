// DTOモジュール
pub mod profile_dto;
pub mod wall_dto;

// 共通のレスポンス型
use crate::domain::value_objects::PhotoFile;
use crate::shared::AppError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub error_code: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            error_code: None,
        }
    }

    pub fn from_app_error(error: AppError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.user_message()),
            error_code: Some(error.code().to_string()),
        }
    }

    pub fn from_result(result: crate::shared::Result<T>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(err) => Self::from_app_error(err),
        }
    }
}

/// ファイルピッカーから渡される画像
#[derive(Debug, Clone, Deserialize)]
pub struct PhotoFileRequest {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl Validate for PhotoFileRequest {
    fn validate(&self) -> Result<(), String> {
        if self.file_name.trim().is_empty() {
            return Err("File name is required".to_string());
        }
        Ok(())
    }
}

impl From<PhotoFileRequest> for PhotoFile {
    fn from(value: PhotoFileRequest) -> Self {
        PhotoFile::new(value.file_name, value.content_type, value.bytes.into())
    }
}

// バリデーショントレイト
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
