use crate::domain::entities::Post;
use crate::shared::AppError;
use async_trait::async_trait;

/// 操作を中断したときのブロッキングなアラート
#[async_trait]
pub trait AlertNotifier: Send + Sync {
    async fn alert(&self, message: &str) -> Result<(), AppError>;
}

/// プッシュで届いた投稿を画面に反映させる通知
#[async_trait]
pub trait FeedNotifier: Send + Sync {
    async fn post_inserted(&self, post: &Post) -> Result<(), AppError>;
}
