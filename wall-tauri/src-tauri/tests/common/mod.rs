#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use wall_lib::application::ports::{
    AlertNotifier, FeedNotifier, LiveFeed, LiveFeedSubscription, ObjectStorage, PostStore,
    UploadOptions, UploadedObject,
};
use wall_lib::application::services::{ProfileService, WallService, WallSettings};
use wall_lib::domain::entities::{NewPost, Post};
use wall_lib::domain::value_objects::PhotoFile;
use wall_lib::shared::AppError;

pub fn post(id: &str, name: &str, body: &str) -> Post {
    Post {
        id: id.to_string(),
        user_id: format!("user-{id}"),
        name: name.to_string(),
        body: body.to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        photo_url: None,
    }
}

#[derive(Default)]
pub struct FakePostStore {
    pub recent: Mutex<Vec<Post>>,
    pub inserted: Mutex<Vec<NewPost>>,
    pub fail_insert: Mutex<Option<AppError>>,
}

#[async_trait]
impl PostStore for FakePostStore {
    async fn insert_post(&self, post: &NewPost) -> Result<Vec<Post>, AppError> {
        if let Some(err) = self.fail_insert.lock().unwrap().take() {
            return Err(err);
        }
        let mut inserted = self.inserted.lock().unwrap();
        inserted.push(post.clone());
        Ok(vec![Post {
            id: format!("new-{}", inserted.len()),
            user_id: post.user_id.clone(),
            name: post.name.clone(),
            body: post.body.clone(),
            created_at: Utc::now(),
            photo_url: Some(post.photo_url.clone()),
        }])
    }

    async fn fetch_recent(&self, limit: usize) -> Result<Vec<Post>, AppError> {
        let recent = self.recent.lock().unwrap();
        Ok(recent.iter().take(limit).cloned().collect())
    }
}

#[derive(Default)]
pub struct FakeStorage {
    pub uploads: Mutex<Vec<(String, String, UploadOptions)>>,
}

#[async_trait]
impl ObjectStorage for FakeStorage {
    async fn upload(
        &self,
        key: &str,
        photo: &PhotoFile,
        options: UploadOptions,
    ) -> Result<UploadedObject, AppError> {
        self.uploads
            .lock()
            .unwrap()
            .push((key.to_string(), photo.file_name.clone(), options));
        Ok(UploadedObject {
            path: key.to_string(),
        })
    }

    fn public_url(&self, path: &str) -> String {
        format!("https://cdn.test/post-photos/{path}")
    }
}

/// `push` で投稿を流し込めるライブフィード
#[derive(Default)]
pub struct FakeLiveFeed {
    senders: Mutex<Vec<(mpsc::UnboundedSender<Post>, CancellationToken)>>,
    pub subscribe_calls: AtomicUsize,
    /// true の間、subscribe は返ってこない
    pub hang: AtomicBool,
}

impl FakeLiveFeed {
    /// サーバー側から全ソケットを閉じる
    pub fn disconnect_all(&self) {
        self.senders.lock().unwrap().clear();
    }

    pub fn subscribe_calls(&self) -> usize {
        self.subscribe_calls.load(Ordering::SeqCst)
    }

    pub fn push(&self, post: Post) {
        for (tx, _) in self.senders.lock().unwrap().iter() {
            let _ = tx.send(post.clone());
        }
    }

    pub fn active_subscriptions(&self) -> usize {
        self.senders
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, token)| !token.is_cancelled())
            .count()
    }
}

#[async_trait]
impl LiveFeed for FakeLiveFeed {
    async fn subscribe(&self) -> Result<LiveFeedSubscription, AppError> {
        self.subscribe_calls.fetch_add(1, Ordering::SeqCst);
        if self.hang.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        let (tx, rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();
        self.senders.lock().unwrap().push((tx, token.clone()));
        Ok(LiveFeedSubscription::new(rx, token))
    }
}

#[derive(Default)]
pub struct RecordingAlerts {
    pub messages: Mutex<Vec<String>>,
}

#[async_trait]
impl AlertNotifier for RecordingAlerts {
    async fn alert(&self, message: &str) -> Result<(), AppError> {
        self.messages.lock().unwrap().push(message.to_string());
        Ok(())
    }
}

pub struct ChannelFeedNotifier {
    pub tx: mpsc::UnboundedSender<Post>,
}

#[async_trait]
impl FeedNotifier for ChannelFeedNotifier {
    async fn post_inserted(&self, post: &Post) -> Result<(), AppError> {
        let _ = self.tx.send(post.clone());
        Ok(())
    }
}

pub struct Harness {
    pub store: Arc<FakePostStore>,
    pub storage: Arc<FakeStorage>,
    pub live_feed: Arc<FakeLiveFeed>,
    pub alerts: Arc<RecordingAlerts>,
    pub inserted_events: mpsc::UnboundedReceiver<Post>,
    pub wall: Arc<WallService>,
    pub profile: Arc<ProfileService>,
}

pub fn harness(recent: Vec<Post>) -> Harness {
    let store = Arc::new(FakePostStore::default());
    *store.recent.lock().unwrap() = recent;
    let storage = Arc::new(FakeStorage::default());
    let live_feed = Arc::new(FakeLiveFeed::default());
    let alerts = Arc::new(RecordingAlerts::default());
    let (tx, inserted_events) = mpsc::unbounded_channel();

    let wall = Arc::new(WallService::new(
        store.clone(),
        storage.clone(),
        live_feed.clone(),
        alerts.clone(),
        Arc::new(ChannelFeedNotifier { tx }),
        WallSettings {
            feed_limit: 50,
            cache_control_secs: 3600,
            initial_display_name: "Aldrich Aranzamendez".to_string(),
            live_updates: true,
            live_retry_delay: Duration::from_millis(10),
        },
    ));
    let profile = Arc::new(ProfileService::new(wall.clone(), alerts.clone()));

    Harness {
        store,
        storage,
        live_feed,
        alerts,
        inserted_events,
        wall,
        profile,
    }
}

/// 条件が満たされるまで待つ（最大 2 秒）
pub async fn wait_until<F>(mut condition: F, what: &str)
where
    F: FnMut() -> bool,
{
    let waited = tokio::time::timeout(Duration::from_secs(2), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await;
    assert!(waited.is_ok(), "timed out waiting for {what}");
}
