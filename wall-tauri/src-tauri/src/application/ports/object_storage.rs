use crate::domain::value_objects::PhotoFile;
use crate::shared::error::AppError;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadOptions {
    pub cache_control_secs: u64,
    pub upsert: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedObject {
    /// バケット内のパス
    pub path: String,
}

/// 写真を置くオブジェクトストレージへのポート
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn upload(
        &self,
        key: &str,
        photo: &PhotoFile,
        options: UploadOptions,
    ) -> Result<UploadedObject, AppError>;

    fn public_url(&self, path: &str) -> String;
}
