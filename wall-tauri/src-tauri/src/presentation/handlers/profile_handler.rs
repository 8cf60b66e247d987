use crate::{
    application::services::ProfileService,
    presentation::dto::{
        profile_dto::{ProfileCardResponse, UpdateDisplayNameRequest, UpdateProfileInfoRequest},
        PhotoFileRequest, Validate,
    },
    shared::error::AppError,
};
use std::sync::Arc;

pub struct ProfileHandler {
    profile_service: Arc<ProfileService>,
}

impl ProfileHandler {
    pub fn new(profile_service: Arc<ProfileService>) -> Self {
        Self { profile_service }
    }

    pub async fn card(&self) -> Result<ProfileCardResponse, AppError> {
        Ok(self.profile_service.snapshot().await.into())
    }

    pub async fn change_photo(
        &self,
        request: PhotoFileRequest,
    ) -> Result<ProfileCardResponse, AppError> {
        request.validate().map_err(AppError::InvalidInput)?;

        self.profile_service.change_photo(request.into()).await?;
        self.card().await
    }

    pub async fn toggle_editing(&self) -> Result<ProfileCardResponse, AppError> {
        self.profile_service.toggle_editing().await;
        self.card().await
    }

    pub async fn update_info(
        &self,
        request: UpdateProfileInfoRequest,
    ) -> Result<ProfileCardResponse, AppError> {
        request.validate().map_err(AppError::InvalidInput)?;

        if let Some(network) = request.network {
            self.profile_service.set_network(network).await;
        }
        if let Some(city) = request.city {
            self.profile_service.set_city(city).await;
        }
        self.card().await
    }

    pub async fn update_display_name(
        &self,
        request: UpdateDisplayNameRequest,
    ) -> Result<ProfileCardResponse, AppError> {
        self.profile_service.set_display_name(request.name).await;
        self.card().await
    }
}
