use crate::application::ports::{
    AlertNotifier, DisplayNameBinding, FeedNotifier, LiveFeed, LiveFeedSubscription,
    ObjectStorage, PostStore, UploadOptions,
};
use crate::domain::entities::{Feed, NewPost, Post, PostDraft};
use crate::domain::value_objects::{PhotoFile, PhotoPreview};
use crate::shared::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

pub const PHOTO_UPLOAD_FAILED: &str = "Photo upload failed. Please try again.";
pub const POST_UPLOAD_FAILED: &str = "Post upload failed. Please try again.";
pub const LIVE_RETRY_INITIAL_DELAY: Duration = Duration::from_secs(1);
const LIVE_RETRY_MAX_DELAY: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct WallSettings {
    pub feed_limit: usize,
    pub cache_control_secs: u64,
    pub initial_display_name: String,
    pub live_updates: bool,
    /// 購読が切れたときの最初の再試行までの待ち時間（以降倍々、上限 30 秒）
    pub live_retry_delay: Duration,
}

#[derive(Debug, Default)]
struct WallState {
    display_name: String,
    draft: PostDraft,
    feed: Feed,
}

/// 画面描画用のウォール状態のスナップショット
#[derive(Debug, Clone)]
pub struct WallSnapshot {
    pub display_name: String,
    pub draft_body: String,
    pub remaining_chars: i64,
    pub can_share: bool,
    pub photo_preview: Option<String>,
    pub posts: Vec<Post>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShareOutcome {
    /// 本文も写真もないので何もしなかった
    Skipped,
    Posted(Post),
}

struct LivePump {
    // サービスごと drop されても受信タスクが止まるように
    stop: DropGuard,
    handle: JoinHandle<()>,
}

pub struct WallService {
    store: Arc<dyn PostStore>,
    storage: Arc<dyn ObjectStorage>,
    live_feed: Arc<dyn LiveFeed>,
    alerts: Arc<dyn AlertNotifier>,
    feed_notifier: Arc<dyn FeedNotifier>,
    settings: WallSettings,
    state: Arc<RwLock<WallState>>,
    live: Mutex<Option<LivePump>>,
    connected: Arc<AtomicBool>,
}

impl WallService {
    pub fn new(
        store: Arc<dyn PostStore>,
        storage: Arc<dyn ObjectStorage>,
        live_feed: Arc<dyn LiveFeed>,
        alerts: Arc<dyn AlertNotifier>,
        feed_notifier: Arc<dyn FeedNotifier>,
        settings: WallSettings,
    ) -> Self {
        let state = WallState {
            display_name: settings.initial_display_name.clone(),
            ..WallState::default()
        };
        Self {
            store,
            storage,
            live_feed,
            alerts,
            feed_notifier,
            settings,
            state: Arc::new(RwLock::new(state)),
            live: Mutex::new(None),
            connected: Arc::new(AtomicBool::new(false)),
        }
    }

    /// 画面表示時の処理。フィードを読み込み、設定が有効ならプッシュ購読を開始する。
    /// 購読の確立は待たない。
    pub async fn open(&self) {
        self.load_feed().await;
        if self.settings.live_updates {
            self.start_live_updates().await;
        }
    }

    /// 画面破棄時の処理
    pub async fn close(&self) {
        self.stop_live_updates().await;
    }

    /// 最新投稿を取得してフィードを置き換える。失敗は握りつぶす（ログのみ）。
    pub async fn load_feed(&self) {
        match self.store.fetch_recent(self.settings.feed_limit).await {
            Ok(posts) => {
                debug!("Loaded {} posts", posts.len());
                let mut state = self.state.write().await;
                state.feed.replace(posts, self.settings.feed_limit);
            }
            Err(err) => {
                warn!("Failed to load feed: {}", err);
            }
        }
    }

    /// プッシュ購読タスクを起動する。既に動いていれば何もしない。
    /// 接続・join はタスク側で行い、切断や失敗のたびにバックオフ付きで張り直す。
    pub async fn start_live_updates(&self) {
        let mut live = self.live.lock().await;
        if live.as_ref().is_some_and(|pump| !pump.handle.is_finished()) {
            return;
        }

        let stop = CancellationToken::new();
        let handle = tokio::spawn(run_live_feed(
            Arc::clone(&self.live_feed),
            Arc::clone(&self.state),
            Arc::clone(&self.feed_notifier),
            Arc::clone(&self.connected),
            self.settings.live_retry_delay,
            stop.clone(),
        ));

        *live = Some(LivePump {
            stop: stop.drop_guard(),
            handle,
        });
    }

    /// 購読を解放し、受信タスクの終了を待つ
    pub async fn stop_live_updates(&self) {
        let pump = self.live.lock().await.take();
        if let Some(pump) = pump {
            drop(pump.stop);
            if let Err(err) = pump.handle.await {
                warn!("Live feed task ended abnormally: {}", err);
            }
            self.connected.store(false, Ordering::SeqCst);
            info!("Live feed subscription released");
        }
    }

    /// 購読が確立していて挿入通知を受け取れる状態か
    pub async fn is_live(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    pub async fn set_body(&self, body: &str) {
        self.state.write().await.draft.set_body(body);
    }

    pub async fn select_photo(&self, photo: PhotoFile) -> PhotoPreview {
        self.state.write().await.draft.select_photo(photo)
    }

    /// 「Share」。写真アップロード → 投稿挿入 → フィード先頭に追加。
    /// 失敗時はアラートを出し、下書きには手を付けない。
    pub async fn share(&self) -> Result<ShareOutcome, AppError> {
        let (draft, display_name) = {
            let state = self.state.read().await;
            (state.draft.clone(), state.display_name.clone())
        };

        if !draft.can_share() {
            return Ok(ShareOutcome::Skipped);
        }

        let photo_url = match draft.photo() {
            Some(selected) => {
                let key = photo_object_key(Utc::now());
                let options = UploadOptions {
                    cache_control_secs: self.settings.cache_control_secs,
                    upsert: false,
                };
                match self.storage.upload(&key, &selected.file, options).await {
                    Ok(uploaded) => self.storage.public_url(&uploaded.path),
                    Err(err) => {
                        error!("Photo upload failed: {}", err);
                        self.raise_alert(PHOTO_UPLOAD_FAILED).await;
                        return Err(err);
                    }
                }
            }
            None => String::new(),
        };

        let new_post = NewPost::new(display_name, draft.trimmed_body().to_string(), photo_url);
        let rows = match self.store.insert_post(&new_post).await {
            Ok(rows) => rows,
            Err(err) => {
                error!("Error sharing post: {}", err);
                self.raise_alert(&format!("Post upload failed: {}", err.user_message()))
                    .await;
                return Err(err);
            }
        };

        let Some(post) = rows.into_iter().next() else {
            error!("Post insert returned no data");
            self.raise_alert(POST_UPLOAD_FAILED).await;
            return Err(AppError::NotFound(
                "Post insert returned no data".to_string(),
            ));
        };

        let mut state = self.state.write().await;
        state.feed.prepend(post.clone());
        state.draft.clear();
        info!("Post shared: {}", post.id);
        Ok(ShareOutcome::Posted(post))
    }

    pub async fn snapshot(&self) -> WallSnapshot {
        let state = self.state.read().await;
        WallSnapshot {
            display_name: state.display_name.clone(),
            draft_body: state.draft.body().to_string(),
            remaining_chars: state.draft.remaining_chars(),
            can_share: state.draft.can_share(),
            photo_preview: state
                .draft
                .photo()
                .map(|selected| selected.preview.as_str().to_string()),
            posts: state.feed.posts().to_vec(),
        }
    }

    async fn raise_alert(&self, message: &str) {
        if let Err(err) = self.alerts.alert(message).await {
            warn!("Failed to show alert: {}", err);
        }
    }
}

#[async_trait]
impl DisplayNameBinding for WallService {
    async fn display_name(&self) -> String {
        self.state.read().await.display_name.clone()
    }

    async fn set_display_name(&self, name: String) {
        self.state.write().await.display_name = name;
    }
}

/// 購読 → 受信 → 切断されたら待って再購読、を停止されるまで繰り返す
async fn run_live_feed(
    live_feed: Arc<dyn LiveFeed>,
    state: Arc<RwLock<WallState>>,
    notifier: Arc<dyn FeedNotifier>,
    connected: Arc<AtomicBool>,
    retry_delay: Duration,
    stop: CancellationToken,
) {
    let mut delay = retry_delay;
    loop {
        let subscribed = tokio::select! {
            _ = stop.cancelled() => break,
            result = live_feed.subscribe() => result,
        };

        match subscribed {
            Ok(subscription) => {
                info!("Live feed subscription started");
                connected.store(true, Ordering::SeqCst);
                delay = retry_delay;
                let released = pump_inserts(subscription, &state, notifier.as_ref(), &stop).await;
                connected.store(false, Ordering::SeqCst);
                if released {
                    break;
                }
                warn!("Live feed closed by backend, resubscribing in {:?}", delay);
            }
            Err(err) => {
                warn!("Live feed subscription failed, retrying in {:?}: {}", delay, err);
            }
        }

        tokio::select! {
            _ = stop.cancelled() => break,
            _ = tokio::time::sleep(delay) => {}
        }
        delay = (delay * 2).min(LIVE_RETRY_MAX_DELAY);
    }
}

/// 停止されたら true、バックエンド側で閉じられたら false。
/// 戻るときに `subscription` が drop され、購読が解放される。
async fn pump_inserts(
    mut subscription: LiveFeedSubscription,
    state: &RwLock<WallState>,
    notifier: &dyn FeedNotifier,
    stop: &CancellationToken,
) -> bool {
    loop {
        tokio::select! {
            _ = stop.cancelled() => return true,
            next = subscription.next() => {
                let Some(post) = next else {
                    return false;
                };
                debug!("Live insert received: {}", post.id);
                state.write().await.feed.prepend(post.clone());
                if let Err(err) = notifier.post_inserted(&post).await {
                    warn!("Failed to notify live insert: {}", err);
                }
            }
        }
    }
}

/// `photo-<unix millis>-<uuid>` 形式のオブジェクトキー
pub fn photo_object_key(now: DateTime<Utc>) -> String {
    format!("photo-{}-{}", now.timestamp_millis(), Uuid::new_v4())
}
