use crate::application::ports::{AlertNotifier, FeedNotifier};
use crate::application::services::{
    LIVE_RETRY_INITIAL_DELAY, ProfileService, WallService, WallSettings,
};
use crate::infrastructure::supabase::{
    PostgrestPostStore, SupabaseClient, SupabaseObjectStorage, SupabaseRealtime,
};
use crate::shared::{AppConfig, AppError};
use std::sync::Arc;

/// アプリケーション全体の状態を管理する構造体
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub wall_service: Arc<WallService>,
    pub profile_service: Arc<ProfileService>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        alerts: Arc<dyn AlertNotifier>,
        feed_notifier: Arc<dyn FeedNotifier>,
    ) -> Result<Self, AppError> {
        config.validate().map_err(AppError::ConfigurationError)?;

        let client = Arc::new(SupabaseClient::new(&config.backend)?);
        let store = Arc::new(PostgrestPostStore::new(
            Arc::clone(&client),
            config.feed.table.clone(),
        ));
        let storage = Arc::new(SupabaseObjectStorage::new(
            client,
            config.storage.bucket.clone(),
        ));
        let realtime_url = config
            .realtime_url()
            .map_err(AppError::ConfigurationError)?;
        let live_feed = Arc::new(SupabaseRealtime::new(
            realtime_url,
            config.backend.anon_key.clone(),
            config.feed.table.clone(),
        ));

        let wall_service = Arc::new(WallService::new(
            store,
            storage,
            live_feed,
            Arc::clone(&alerts),
            feed_notifier,
            WallSettings {
                feed_limit: config.feed.limit,
                cache_control_secs: config.storage.cache_control_secs,
                initial_display_name: config.profile.default_display_name.clone(),
                live_updates: config.feed.live_updates,
                live_retry_delay: LIVE_RETRY_INITIAL_DELAY,
            },
        ));
        // 表示名はウォールが所有し、プロフィールカードには書き込み口だけを渡す
        let profile_service = Arc::new(ProfileService::new(wall_service.clone(), alerts));

        Ok(Self {
            config: Arc::new(config),
            wall_service,
            profile_service,
        })
    }
}
