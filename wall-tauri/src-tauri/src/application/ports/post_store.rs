use crate::domain::entities::{NewPost, Post};
use crate::shared::error::AppError;
use async_trait::async_trait;

/// 投稿テーブル（追記のみ）へのポート
#[async_trait]
pub trait PostStore: Send + Sync {
    /// 1 件挿入し、挿入された行を返す。行が返らない場合は空の Vec。
    async fn insert_post(&self, post: &NewPost) -> Result<Vec<Post>, AppError>;

    /// `created_at` 降順で最新 `limit` 件を取得
    async fn fetch_recent(&self, limit: usize) -> Result<Vec<Post>, AppError>;
}
