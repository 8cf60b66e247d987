use crate::application::ports::{AlertNotifier, DisplayNameBinding};
use crate::domain::constants::PROFILE_PHOTO_MAX_BYTES;
use crate::domain::entities::{ProfileCard, initials};
use crate::domain::value_objects::{PhotoFile, PhotoPreview};
use crate::shared::AppError;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

pub const PROFILE_PHOTO_TOO_LARGE: &str = "File size exceeds 10MB. Please choose a smaller file.";

#[derive(Debug, Clone)]
pub struct ProfileSnapshot {
    pub display_name: String,
    pub initials: String,
    pub photo_preview: Option<String>,
    pub network: String,
    pub city: String,
    pub is_editing: bool,
}

/// プロフィールカード。状態はメモリ上のみで、ネットワーク呼び出しはしない。
pub struct ProfileService {
    name: Arc<dyn DisplayNameBinding>,
    alerts: Arc<dyn AlertNotifier>,
    card: RwLock<ProfileCard>,
}

impl ProfileService {
    pub fn new(name: Arc<dyn DisplayNameBinding>, alerts: Arc<dyn AlertNotifier>) -> Self {
        Self {
            name,
            alerts,
            card: RwLock::new(ProfileCard::default()),
        }
    }

    /// 10MB を超える画像は拒否（ちょうど 10MB は受け付ける）
    pub async fn change_photo(&self, photo: PhotoFile) -> Result<PhotoPreview, AppError> {
        if photo.size() > PROFILE_PHOTO_MAX_BYTES {
            error!(
                "Rejected profile photo {} ({} bytes)",
                photo.file_name,
                photo.size()
            );
            if let Err(err) = self.alerts.alert(PROFILE_PHOTO_TOO_LARGE).await {
                warn!("Failed to show alert: {}", err);
            }
            return Err(AppError::ValidationError(
                PROFILE_PHOTO_TOO_LARGE.to_string(),
            ));
        }

        let preview = photo.preview();
        self.card.write().await.photo = Some(preview.clone());
        debug!("Profile photo changed: {}", photo.file_name);
        Ok(preview)
    }

    pub async fn toggle_editing(&self) -> bool {
        self.card.write().await.toggle_editing()
    }

    pub async fn set_network(&self, network: String) {
        self.card.write().await.network = network;
    }

    pub async fn set_city(&self, city: String) {
        self.card.write().await.city = city;
    }

    /// 入力のたびに親の表示名へそのまま反映する
    pub async fn set_display_name(&self, name: String) {
        self.name.set_display_name(name).await;
    }

    pub async fn initials(&self) -> String {
        initials(&self.name.display_name().await)
    }

    pub async fn snapshot(&self) -> ProfileSnapshot {
        let display_name = self.name.display_name().await;
        let card = self.card.read().await;
        ProfileSnapshot {
            initials: initials(&display_name),
            display_name,
            photo_preview: card.photo.as_ref().map(|p| p.as_str().to_string()),
            network: card.network.clone(),
            city: card.city.clone(),
            is_editing: card.is_editing,
        }
    }
}
