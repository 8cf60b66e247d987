use super::Validate;
use crate::application::services::ProfileSnapshot;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProfileCardResponse {
    pub display_name: String,
    pub initials: String,
    pub photo_preview: Option<String>,
    pub network: String,
    pub city: String,
    pub is_editing: bool,
}

impl From<ProfileSnapshot> for ProfileCardResponse {
    fn from(value: ProfileSnapshot) -> Self {
        Self {
            display_name: value.display_name,
            initials: value.initials,
            photo_preview: value.photo_preview,
            network: value.network,
            city: value.city,
            is_editing: value.is_editing,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateDisplayNameRequest {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateProfileInfoRequest {
    pub network: Option<String>,
    pub city: Option<String>,
}

impl Validate for UpdateProfileInfoRequest {
    fn validate(&self) -> Result<(), String> {
        if self.network.is_none() && self.city.is_none() {
            return Err("Nothing to update".to_string());
        }
        Ok(())
    }
}
