use crate::application::services::WallSnapshot;
use crate::domain::entities::Post;
use crate::presentation::format::time_ago;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// レスポンスDTO
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PostResponse {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub body: String,
    pub created_at: String,
    pub time_ago: String,
    pub photo_url: Option<String>,
}

impl PostResponse {
    pub fn from_post(post: &Post, now: DateTime<Utc>) -> Self {
        Self {
            id: post.id.clone(),
            user_id: post.user_id.clone(),
            name: post.name.clone(),
            body: post.body.clone(),
            created_at: post.created_at.to_rfc3339(),
            time_ago: time_ago(post.created_at, now),
            photo_url: post.photo().map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WallViewResponse {
    pub display_name: String,
    pub draft_body: String,
    pub remaining_chars: i64,
    pub can_share: bool,
    pub photo_preview: Option<String>,
    pub posts: Vec<PostResponse>,
}

impl WallViewResponse {
    pub fn from_snapshot(snapshot: WallSnapshot, now: DateTime<Utc>) -> Self {
        Self {
            display_name: snapshot.display_name,
            draft_body: snapshot.draft_body,
            remaining_chars: snapshot.remaining_chars,
            can_share: snapshot.can_share,
            photo_preview: snapshot.photo_preview,
            posts: snapshot
                .posts
                .iter()
                .map(|post| PostResponse::from_post(post, now))
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ShareResponse {
    /// false なら空の下書きだったので何もしていない
    pub shared: bool,
    pub post: Option<PostResponse>,
    pub wall: WallViewResponse,
}

// リクエストDTO
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateDraftRequest {
    pub body: String,
}
