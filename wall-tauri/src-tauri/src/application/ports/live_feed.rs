use crate::domain::entities::Post;
use crate::shared::error::AppError;
use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// 新規投稿のプッシュ購読を開くポート
#[async_trait]
pub trait LiveFeed: Send + Sync {
    async fn subscribe(&self) -> Result<LiveFeedSubscription, AppError>;
}

/// 購読ハンドル。drop すると購読が解放される。
pub struct LiveFeedSubscription {
    events: mpsc::UnboundedReceiver<Post>,
    release: CancellationToken,
}

impl LiveFeedSubscription {
    pub fn new(events: mpsc::UnboundedReceiver<Post>, release: CancellationToken) -> Self {
        Self { events, release }
    }

    /// 次の挿入通知。購読が閉じられると `None`。
    pub async fn next(&mut self) -> Option<Post> {
        self.events.recv().await
    }
}

impl Drop for LiveFeedSubscription {
    fn drop(&mut self) {
        self.release.cancel();
    }
}
