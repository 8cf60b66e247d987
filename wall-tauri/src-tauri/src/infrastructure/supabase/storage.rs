use super::client::{SupabaseClient, request_json};
use crate::application::ports::{ObjectStorage, UploadOptions, UploadedObject};
use crate::domain::value_objects::PhotoFile;
use crate::shared::AppError;
use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(rename = "Key")]
    key: Option<String>,
}

/// Supabase Storage のバケット 1 つ分
pub struct SupabaseObjectStorage {
    client: Arc<SupabaseClient>,
    bucket: String,
}

impl SupabaseObjectStorage {
    pub fn new(client: Arc<SupabaseClient>, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl ObjectStorage for SupabaseObjectStorage {
    async fn upload(
        &self,
        key: &str,
        photo: &PhotoFile,
        options: UploadOptions,
    ) -> Result<UploadedObject, AppError> {
        let url = self
            .client
            .endpoint(&["storage", "v1", "object", &self.bucket, key])?;
        let builder = self
            .client
            .request(Method::POST, url)
            .header("cache-control", format!("max-age={}", options.cache_control_secs))
            .header("x-upsert", options.upsert.to_string())
            .header("content-type", photo.content_type.as_str())
            .body(photo.bytes.clone());

        let response: UploadResponse = request_json(builder).await.map_err(|err| match err {
            AppError::Backend { status, message } => {
                AppError::Storage(format!("upload rejected ({status}): {message}"))
            }
            other => other,
        })?;

        // Key は "<bucket>/<path>"。返ってこない場合は要求したキーを使う
        let path = match response.key {
            Some(full) => full
                .strip_prefix(&format!("{}/", self.bucket))
                .map(str::to_string)
                .unwrap_or(full),
            None => {
                warn!("Upload response had no Key, using requested key");
                key.to_string()
            }
        };
        Ok(UploadedObject { path })
    }

    fn public_url(&self, path: &str) -> String {
        let mut segments = vec!["storage", "v1", "object", "public", self.bucket.as_str()];
        segments.extend(path.split('/').filter(|s| !s.is_empty()));
        match self.client.endpoint(&segments) {
            Ok(url) => url.to_string(),
            // endpoint() が失敗するのは base にできない URL のときだけ
            Err(_) => format!(
                "{}/storage/v1/object/public/{}/{}",
                self.client.base_url().as_str().trim_end_matches('/'),
                self.bucket,
                path
            ),
        }
    }
}
