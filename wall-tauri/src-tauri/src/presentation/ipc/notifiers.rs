use crate::application::ports::{AlertNotifier, FeedNotifier};
use crate::domain::entities::Post;
use crate::presentation::dto::wall_dto::PostResponse;
use crate::shared::AppError;
use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use tauri::{AppHandle, Emitter};

pub const ALERT_EVENT: &str = "wall://alert";
pub const POST_INSERTED_EVENT: &str = "wall://post-inserted";

#[derive(Serialize, Clone)]
struct AlertPayload {
    message: String,
}

/// フロントエンドに window.alert を出させる
#[derive(Clone)]
pub struct IpcAlertNotifier {
    app_handle: AppHandle,
}

impl IpcAlertNotifier {
    pub fn new(app_handle: &AppHandle) -> Self {
        Self {
            app_handle: app_handle.clone(),
        }
    }
}

#[async_trait]
impl AlertNotifier for IpcAlertNotifier {
    async fn alert(&self, message: &str) -> Result<(), AppError> {
        self.app_handle
            .emit(
                ALERT_EVENT,
                AlertPayload {
                    message: message.to_string(),
                },
            )
            .map_err(|err| AppError::Internal(format!("Failed to emit alert event: {err}")))
    }
}

#[derive(Clone)]
pub struct IpcFeedNotifier {
    app_handle: AppHandle,
}

impl IpcFeedNotifier {
    pub fn new(app_handle: &AppHandle) -> Self {
        Self {
            app_handle: app_handle.clone(),
        }
    }
}

#[async_trait]
impl FeedNotifier for IpcFeedNotifier {
    async fn post_inserted(&self, post: &Post) -> Result<(), AppError> {
        self.app_handle
            .emit(POST_INSERTED_EVENT, PostResponse::from_post(post, Utc::now()))
            .map_err(|err| AppError::Internal(format!("Failed to emit post event: {err}")))
    }
}
