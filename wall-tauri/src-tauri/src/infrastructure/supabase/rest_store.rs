use super::client::{SupabaseClient, request_json};
use crate::application::ports::PostStore;
use crate::domain::entities::{NewPost, Post};
use crate::shared::AppError;
use async_trait::async_trait;
use reqwest::Method;
use std::sync::Arc;

/// PostgREST (`/rest/v1/<table>`) 経由の投稿ストア
pub struct PostgrestPostStore {
    client: Arc<SupabaseClient>,
    table: String,
}

impl PostgrestPostStore {
    pub fn new(client: Arc<SupabaseClient>, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }
}

#[async_trait]
impl PostStore for PostgrestPostStore {
    async fn insert_post(&self, post: &NewPost) -> Result<Vec<Post>, AppError> {
        let url = self.client.endpoint(&["rest", "v1", &self.table])?;
        let builder = self
            .client
            .request(Method::POST, url)
            .header("Prefer", "return=representation")
            .json(&[post]);
        request_json(builder).await
    }

    async fn fetch_recent(&self, limit: usize) -> Result<Vec<Post>, AppError> {
        let url = self.client.endpoint(&["rest", "v1", &self.table])?;
        let builder = self.client.request(Method::GET, url).query(&[
            ("select", "*".to_string()),
            ("order", "created_at.desc".to_string()),
            ("limit", limit.to_string()),
        ]);
        request_json(builder).await
    }
}
